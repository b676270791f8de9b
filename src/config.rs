//! Command-line parameters and their normalized form.
//!
//! [`FleetArgs`] is the raw flag surface, one flag per configuration input.
//! [`FleetOptions`] is what the rest of the crate consumes: resource names
//! qualified into canonical Compute Engine paths, scopes expanded to full
//! URIs, and the TIER_1/NIC interaction resolved.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Which instance group a descriptor or request is being built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Server,
    Client,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Server => "server",
            Role::Client => "client",
        }
    }
}

/// Virtual NIC variant for the generated network interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NicType {
    /// Default virtio network interface.
    VirtioNet,
    /// Google virtual NIC, required for TIER_1 networking.
    Gvnic,
}

#[derive(Parser, Debug)]
#[command(
    name = "fleet_create",
    about = "Bulk-create groups of server and client GCE instances"
)]
pub struct FleetArgs {
    /// GCP project id
    #[arg(short, long)]
    pub project: String,

    /// GCP region to launch instances in
    #[arg(short, long)]
    pub region: String,

    /// GCP zone to launch instances in
    #[arg(short, long)]
    pub zone: String,

    /// Name of the source image to create instances from
    #[arg(short, long)]
    pub image: String,

    /// GCP access scope to be applied to instances (repeatable)
    #[arg(long, value_name = "SCOPE", required = true)]
    pub scopes: Vec<String>,

    /// Subnetwork to create instances in
    #[arg(short, long)]
    pub subnet: Option<String>,

    /// Name of a resource policy to apply to instances
    #[arg(long)]
    pub policy: Option<String>,

    /// Type of vNIC to be used on the generated network interface
    #[arg(long, value_enum)]
    pub nic_type: Option<NicType>,

    /// Enable TIER_1 egress networking on instances
    #[arg(long)]
    pub enable_tier1_networking: bool,

    /// Number of server instances to create
    #[arg(long)]
    pub num_servers: u32,

    /// Number of client instances to create
    #[arg(long)]
    pub num_clients: u32,

    /// Machine type to use for server instances
    #[arg(long)]
    pub server_type: String,

    /// Machine type to use for client instances
    #[arg(long)]
    pub client_type: String,

    /// String to begin all server names with
    #[arg(long)]
    pub server_prefix: String,

    /// String to begin all client names with
    #[arg(long)]
    pub client_prefix: String,

    /// Number of local SSDs to attach to each server instance
    #[arg(long, default_value_t = 0)]
    pub num_ssd_per_server: u32,
}

impl FleetArgs {
    /// An invocation that would create nothing is a configuration error,
    /// not a no-op. Checked before credentials, validation, or any
    /// provider call.
    pub fn ensure_instances_requested(&self) -> Result<(), Error> {
        if self.num_servers == 0 && self.num_clients == 0 {
            return Err(Error::NoInstancesRequested);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ServerGroup {
    pub count: u32,
    pub machine_type: String,
    pub name_prefix: String,
    pub local_ssd_count: u32,
}

#[derive(Debug, Clone)]
pub struct ClientGroup {
    pub count: u32,
    pub machine_type: String,
    pub name_prefix: String,
}

/// Normalized configuration, built once per invocation and never mutated.
#[derive(Debug, Clone)]
pub struct FleetOptions {
    pub project: String,
    pub region: String,
    pub zone: String,
    /// Canonical path of the source image, `global/images/{name}`.
    pub image: String,
    /// Fully qualified access-scope URIs.
    pub scopes: Vec<String>,
    /// Canonical subnetwork path when one was requested.
    pub subnet: Option<String>,
    pub policy: Option<String>,
    pub nic_type: Option<NicType>,
    pub tier1_networking: bool,
    pub server: ServerGroup,
    pub client: ClientGroup,
}

impl FleetOptions {
    /// Normalizes the raw arguments. TIER_1 networking only works over
    /// GVNIC, so an incompatible NIC choice is overridden rather than
    /// rejected; only an explicitly conflicting value warrants a warning.
    pub fn new(args: &FleetArgs) -> Self {
        let nic_type = if args.enable_tier1_networking {
            if args.nic_type.is_some() && args.nic_type != Some(NicType::Gvnic) {
                eprintln!("Warning: setting nic-type to \"gvnic\" for TIER_1 networking.");
            }
            Some(NicType::Gvnic)
        } else {
            args.nic_type
        };

        FleetOptions {
            project: args.project.clone(),
            region: args.region.clone(),
            zone: args.zone.clone(),
            image: format!("global/images/{}", args.image),
            scopes: args
                .scopes
                .iter()
                .map(|scope| format!("https://www.googleapis.com/auth/{}", scope))
                .collect(),
            subnet: args
                .subnet
                .as_ref()
                .map(|subnet| format!("regions/{}/subnetworks/{}", args.region, subnet)),
            policy: args.policy.clone(),
            nic_type,
            tier1_networking: args.enable_tier1_networking,
            server: ServerGroup {
                count: args.num_servers,
                machine_type: args.server_type.clone(),
                name_prefix: args.server_prefix.clone(),
                local_ssd_count: args.num_ssd_per_server,
            },
            client: ClientGroup {
                count: args.num_clients,
                machine_type: args.client_type.clone(),
                name_prefix: args.client_prefix.clone(),
            },
        }
    }

    pub fn group_count(&self, role: Role) -> u32 {
        match role {
            Role::Server => self.server.count,
            Role::Client => self.client.count,
        }
    }

    pub fn machine_type(&self, role: Role) -> &str {
        match role {
            Role::Server => &self.server.machine_type,
            Role::Client => &self.client.machine_type,
        }
    }

    pub fn name_prefix(&self, role: Role) -> &str {
        match role {
            Role::Server => &self.server.name_prefix,
            Role::Client => &self.client.name_prefix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> FleetArgs {
        FleetArgs {
            project: "perf-lab".to_string(),
            region: "us-central1".to_string(),
            zone: "us-central1-a".to_string(),
            image: "bench-image".to_string(),
            scopes: vec!["compute".to_string(), "devstorage.read_only".to_string()],
            subnet: None,
            policy: None,
            nic_type: None,
            enable_tier1_networking: false,
            num_servers: 2,
            num_clients: 4,
            server_type: "n2-standard-8".to_string(),
            client_type: "e2-standard-4".to_string(),
            server_prefix: "srv".to_string(),
            client_prefix: "cli".to_string(),
            num_ssd_per_server: 0,
        }
    }

    #[test]
    fn args_definition_is_consistent() {
        use clap::CommandFactory;
        FleetArgs::command().debug_assert();
    }

    #[test]
    fn qualifies_resource_paths() {
        let mut args = base_args();
        args.subnet = Some("bench-subnet".to_string());
        let opts = FleetOptions::new(&args);
        assert_eq!(opts.image, "global/images/bench-image");
        assert_eq!(
            opts.scopes,
            vec![
                "https://www.googleapis.com/auth/compute".to_string(),
                "https://www.googleapis.com/auth/devstorage.read_only".to_string(),
            ]
        );
        assert_eq!(
            opts.subnet.as_deref(),
            Some("regions/us-central1/subnetworks/bench-subnet")
        );
    }

    #[test]
    fn absent_optionals_stay_absent() {
        let opts = FleetOptions::new(&base_args());
        assert_eq!(opts.subnet, None);
        assert_eq!(opts.policy, None);
        assert_eq!(opts.nic_type, None);
    }

    #[test]
    fn tier1_overrides_conflicting_nic_type() {
        let mut args = base_args();
        args.enable_tier1_networking = true;
        args.nic_type = Some(NicType::VirtioNet);
        let opts = FleetOptions::new(&args);
        assert_eq!(opts.nic_type, Some(NicType::Gvnic));
    }

    #[test]
    fn tier1_upgrades_unset_nic_type() {
        let mut args = base_args();
        args.enable_tier1_networking = true;
        let opts = FleetOptions::new(&args);
        assert_eq!(opts.nic_type, Some(NicType::Gvnic));
    }

    #[test]
    fn nic_type_untouched_without_tier1() {
        let mut args = base_args();
        args.nic_type = Some(NicType::VirtioNet);
        let opts = FleetOptions::new(&args);
        assert_eq!(opts.nic_type, Some(NicType::VirtioNet));
    }

    #[test]
    fn rejects_empty_fleet() {
        let mut args = base_args();
        args.num_servers = 0;
        args.num_clients = 0;
        assert!(matches!(
            args.ensure_instances_requested(),
            Err(Error::NoInstancesRequested)
        ));
    }

    #[test]
    fn one_group_is_enough() {
        let mut args = base_args();
        args.num_servers = 0;
        args.num_clients = 1;
        assert!(args.ensure_instances_requested().is_ok());
    }

    #[test]
    fn group_accessors_follow_role() {
        let opts = FleetOptions::new(&base_args());
        assert_eq!(opts.group_count(Role::Server), 2);
        assert_eq!(opts.group_count(Role::Client), 4);
        assert_eq!(opts.machine_type(Role::Server), "n2-standard-8");
        assert_eq!(opts.machine_type(Role::Client), "e2-standard-4");
        assert_eq!(opts.name_prefix(Role::Server), "srv");
        assert_eq!(opts.name_prefix(Role::Client), "cli");
    }
}
