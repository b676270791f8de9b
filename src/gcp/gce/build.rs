//! Pure builders shaping bulkInsert resource descriptors from the
//! normalized options. No I/O and no hidden state: the same options and
//! role always produce structurally identical descriptors, which is what
//! keeps this layer testable without a provider connection.

use crate::config::{FleetOptions, NicType, Role};
use crate::gcp::gce::types::{
    AccessConfig, Disk, GuestOsFeature, InitializeParams, InstanceProperties, NetworkInterface,
    NetworkPerformanceConfig, Scheduling, ServiceAccountRef,
};

/// The one network interface shared by both groups: external NAT on the
/// premium tier, plus the subnetwork and NIC type when configured.
pub fn network_interface(opts: &FleetOptions) -> NetworkInterface {
    NetworkInterface {
        access_configs: vec![AccessConfig {
            config_type: "ONE_TO_ONE_NAT".to_string(),
            name: "External NAT".to_string(),
            network_tier: "PREMIUM".to_string(),
        }],
        subnetwork: opts.subnet.clone(),
        nic_type: opts.nic_type,
    }
}

/// One boot disk, followed by the configured number of local scratch disks
/// for server instances. Clients never get scratch disks.
pub fn disks(opts: &FleetOptions, role: Role) -> Vec<Disk> {
    let mut boot_disk = Disk {
        disk_type: "PERSISTENT".to_string(),
        boot: Some(true),
        initialize_params: InitializeParams {
            source_image: Some(opts.image.clone()),
            disk_type: None,
        },
        auto_delete: true,
        guest_os_features: None,
        interface: None,
    };

    // The image must advertise GVNIC support for a GVNIC interface to come up.
    if opts.nic_type == Some(NicType::Gvnic) {
        boot_disk.guest_os_features = Some(vec![GuestOsFeature {
            feature_type: "GVNIC".to_string(),
        }]);
    }

    let mut disks = vec![boot_disk];

    if role == Role::Server && opts.server.local_ssd_count > 0 {
        let scratch = Disk {
            disk_type: "SCRATCH".to_string(),
            boot: None,
            initialize_params: InitializeParams {
                source_image: None,
                disk_type: Some("local-ssd".to_string()),
            },
            auto_delete: true,
            guest_os_features: None,
            interface: Some("NVME".to_string()),
        };
        disks.extend(std::iter::repeat_n(
            scratch,
            opts.server.local_ssd_count as usize,
        ));
    }

    disks
}

/// The full property template for one instance group.
pub fn instance_properties(
    opts: &FleetOptions,
    role: Role,
    net_int: &NetworkInterface,
    disks: Vec<Disk>,
) -> InstanceProperties {
    let mut properties = InstanceProperties {
        network_interfaces: vec![net_int.clone()],
        disks,
        service_accounts: vec![ServiceAccountRef {
            scopes: opts.scopes.clone(),
        }],
        machine_type: opts.machine_type(role).to_string(),
        resource_policies: None,
        scheduling: None,
        network_performance_config: None,
    };

    if let Some(policy) = &opts.policy {
        // Placement policies require live migration and automatic restart
        // to be off.
        properties.resource_policies = Some(vec![policy.clone()]);
        properties.scheduling = Some(Scheduling {
            on_host_maintenance: "TERMINATE".to_string(),
            automatic_restart: false,
        });
    }

    if opts.tier1_networking {
        properties.network_performance_config = Some(NetworkPerformanceConfig {
            total_egress_bandwidth_tier: "TIER_1".to_string(),
        });
    }

    properties
}
