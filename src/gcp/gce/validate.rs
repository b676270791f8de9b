//! Pre-flight existence checks for user-supplied resource identifiers.
//! Everything the request bodies will reference is probed before any
//! descriptor is built, so typos fail fast instead of mid-provisioning.

use crate::config::FleetArgs;
use crate::error::Error;
use crate::gcp::gce::client::ComputeClient;

async fn ensure(
    compute: &ComputeClient,
    kind: &'static str,
    name: &str,
    path: String,
) -> Result<(), Error> {
    if compute.resource_exists(&path).await? {
        Ok(())
    } else {
        Err(Error::MissingResource {
            kind,
            name: name.to_string(),
        })
    }
}

/// Verifies every referenced resource. Optional inputs are only checked
/// when supplied.
pub async fn verify_inputs(compute: &ComputeClient, args: &FleetArgs) -> Result<(), Error> {
    ensure(
        compute,
        "project",
        &args.project,
        format!("projects/{}", args.project),
    )
    .await?;
    ensure(
        compute,
        "region",
        &args.region,
        format!("projects/{}/regions/{}", args.project, args.region),
    )
    .await?;
    ensure(
        compute,
        "zone",
        &args.zone,
        format!("projects/{}/zones/{}", args.project, args.zone),
    )
    .await?;
    ensure(
        compute,
        "image",
        &args.image,
        format!("projects/{}/global/images/{}", args.project, args.image),
    )
    .await?;
    ensure(
        compute,
        "machine type",
        &args.server_type,
        format!(
            "projects/{}/zones/{}/machineTypes/{}",
            args.project, args.zone, args.server_type
        ),
    )
    .await?;
    ensure(
        compute,
        "machine type",
        &args.client_type,
        format!(
            "projects/{}/zones/{}/machineTypes/{}",
            args.project, args.zone, args.client_type
        ),
    )
    .await?;

    if let Some(subnet) = &args.subnet {
        ensure(
            compute,
            "subnet",
            subnet,
            format!(
                "projects/{}/regions/{}/subnetworks/{}",
                args.project, args.region, subnet
            ),
        )
        .await?;
    }

    if let Some(policy) = &args.policy {
        ensure(
            compute,
            "resource policy",
            policy,
            format!(
                "projects/{}/regions/{}/resourcePolicies/{}",
                args.project, args.region, policy
            ),
        )
        .await?;
    }

    Ok(())
}
