//! # Google Compute Engine (GCE) surface
//!
//! Everything the provisioning flow needs from the Compute Engine API.
//!
//! ## Submodules
//! - `build`: Pure builders shaping request descriptors from the options.
//! - `client`: The authenticated API client and the [`client::Compute`] seam.
//! - `types`: Data structures serialized to and from the API.
//! - `validate`: Pre-flight existence checks for referenced resources.

/// Descriptor builders for bulk-creation requests.
pub mod build;
/// Core client logic for API requests to GCE.
pub mod client;
/// Data structures for the GCE API.
pub mod types;
/// Existence validation of user-supplied resource identifiers.
pub mod validate;

// Re-export key components to provide a convenient public API for this module.
pub use crate::gcp::gce::client::{Compute, ComputeClient};
pub use crate::gcp::gce::types::*;
