//! # Google Compute Engine (GCE) Data Types
//!
//! Rust structs modelling the JSON bodies of the `instances.bulkInsert`
//! API call and the zone operation it returns. Optional fields are omitted
//! from the serialized body entirely rather than sent as empty values.
//!
//! For detailed information on each field, refer to the official GCE API
//! documentation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::NicType;

/// Configuration for external network access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessConfig {
    #[serde(rename = "type")]
    pub config_type: String,
    pub name: String,
    #[serde(rename = "networkTier")]
    pub network_tier: String,
}

/// A network interface shared by every instance in a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInterface {
    #[serde(rename = "accessConfigs")]
    pub access_configs: Vec<AccessConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnetwork: Option<String>,
    #[serde(rename = "nicType", skip_serializing_if = "Option::is_none")]
    pub nic_type: Option<NicType>,
}

/// Parameters for initializing a disk, from a source image for boot disks
/// or a disk type for scratch disks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "sourceImage", skip_serializing_if = "Option::is_none")]
    pub source_image: Option<String>,
    #[serde(rename = "diskType", skip_serializing_if = "Option::is_none")]
    pub disk_type: Option<String>,
}

/// A guest-OS feature flag carried on the boot disk image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestOsFeature {
    #[serde(rename = "type")]
    pub feature_type: String,
}

/// An attached disk configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    #[serde(rename = "type")]
    pub disk_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot: Option<bool>,
    #[serde(rename = "initializeParams")]
    pub initialize_params: InitializeParams,
    #[serde(rename = "autoDelete")]
    pub auto_delete: bool,
    #[serde(rename = "guestOsFeatures", skip_serializing_if = "Option::is_none")]
    pub guest_os_features: Option<Vec<GuestOsFeature>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
}

/// Access scopes granted to the instances' default service account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceAccountRef {
    pub scopes: Vec<String>,
}

/// Instance scheduling options, forced when a resource policy is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheduling {
    #[serde(rename = "onHostMaintenance")]
    pub on_host_maintenance: String,
    #[serde(rename = "automaticRestart")]
    pub automatic_restart: bool,
}

/// Egress bandwidth tier selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkPerformanceConfig {
    #[serde(rename = "totalEgressBandwidthTier")]
    pub total_egress_bandwidth_tier: String,
}

/// The property template every instance in a bulk request is created from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceProperties {
    #[serde(rename = "networkInterfaces")]
    pub network_interfaces: Vec<NetworkInterface>,
    pub disks: Vec<Disk>,
    #[serde(rename = "serviceAccounts")]
    pub service_accounts: Vec<ServiceAccountRef>,
    #[serde(rename = "machineType")]
    pub machine_type: String,
    #[serde(rename = "resourcePolicies", skip_serializing_if = "Option::is_none")]
    pub resource_policies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduling: Option<Scheduling>,
    #[serde(
        rename = "networkPerformanceConfig",
        skip_serializing_if = "Option::is_none"
    )]
    pub network_performance_config: Option<NetworkPerformanceConfig>,
}

/// Request body for `instances.bulkInsert`: create `count` instances from
/// one shared template, named by expanding `#` placeholders in the pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkInsertRequest {
    pub count: u32,
    #[serde(rename = "namePattern")]
    pub name_pattern: String,
    #[serde(rename = "instanceProperties")]
    pub instance_properties: InstanceProperties,
}

/// Lifecycle states of a zone operation. DONE is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Pending,
    Running,
    Done,
}

/// A provider-side handle for an in-progress or completed asynchronous
/// action. Only the provider ever changes it; we poll it by `name`. The
/// `error` payload, when present on a DONE operation, is kept as raw JSON
/// so it can be surfaced without reformatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(rename = "operationType", skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<String>,
    pub status: OperationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn operation_deserializes_from_api_shape() {
        let op: Operation = serde_json::from_value(json!({
            "name": "operation-1234",
            "operationType": "bulkInsert",
            "status": "RUNNING",
            "selfLink": "https://compute.googleapis.com/...",
        }))
        .unwrap();
        assert_eq!(op.name, "operation-1234");
        assert_eq!(op.operation_type.as_deref(), Some("bulkInsert"));
        assert_eq!(op.status, OperationStatus::Running);
        assert_eq!(op.error, None);
    }

    #[test]
    fn terminal_operation_keeps_error_payload_intact() {
        let payload = json!({
            "errors": [{ "code": "QUOTA_EXCEEDED", "message": "Quota 'N2_CPUS' exceeded" }]
        });
        let op: Operation = serde_json::from_value(json!({
            "name": "operation-1234",
            "status": "DONE",
            "error": payload.clone(),
        }))
        .unwrap();
        assert_eq!(op.status, OperationStatus::Done);
        assert_eq!(op.error.unwrap(), payload);
    }

    #[test]
    fn status_strings_match_the_api() {
        for (text, status) in [
            ("\"PENDING\"", OperationStatus::Pending),
            ("\"RUNNING\"", OperationStatus::Running),
            ("\"DONE\"", OperationStatus::Done),
        ] {
            let parsed: OperationStatus = serde_json::from_str(text).unwrap();
            assert_eq!(parsed, status);
        }
    }
}
