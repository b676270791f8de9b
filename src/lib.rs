// # gce-fleet
//
// Bulk-provisions two groups of Compute Engine instances — servers and
// clients — in a single invocation: normalize the user's parameters into
// canonical resource paths, build the bulkInsert request bodies, submit
// one request per non-empty group, and poll each zone operation to its
// terminal state.

/// Command-line parameters and their normalized form.
pub mod config;

/// Error taxonomy for a provisioning run.
pub mod error;

/// Google Cloud Platform plumbing: authentication and the Compute Engine
/// API surface.
pub mod gcp;

/// Orchestration of bulk-creation requests and operation polling.
pub mod provision;
