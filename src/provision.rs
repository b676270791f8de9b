//! Fleet provisioning flow: compose one bulkInsert request per instance
//! group, submit it, and drive the resulting zone operation to its
//! terminal state. Groups are handled strictly one after the other.

use std::io::Write;

use crate::config::{FleetOptions, Role};
use crate::error::Error;
use crate::gcp::gce::build;
use crate::gcp::gce::client::Compute;
use crate::gcp::gce::types::{BulkInsertRequest, NetworkInterface, Operation, OperationStatus};

/// Submits the bulk-creation request for one instance group and blocks
/// until the resulting operation is terminal. A synchronous rejection
/// aborts the whole invocation, so a later group is never submitted after
/// an earlier one fails.
pub async fn create_instances<C: Compute>(
    compute: &C,
    opts: &FleetOptions,
    net_int: &NetworkInterface,
    role: Role,
) -> Result<Operation, Error> {
    let disks = build::disks(opts, role);
    let instance_properties = build::instance_properties(opts, role, net_int, disks);
    let body = BulkInsertRequest {
        count: opts.group_count(role),
        // Trailing # placeholders are expanded by the API into a numeric
        // suffix per instance.
        name_pattern: format!("{}##", opts.name_prefix(role)),
        instance_properties,
    };

    println!(
        "Creating {} {} instances ({})...",
        body.count,
        role.as_str(),
        body.name_pattern
    );
    let operation = compute.bulk_insert(&opts.project, &opts.zone, &body).await?;
    wait_for_operation(compute, &operation, opts).await
}

/// Polls the named zone operation until it reports DONE. Each query is a
/// provider-side blocking wait, so the loop needs no local sleep and has
/// no retry bound; a non-DONE answer just means ask again. A DONE
/// operation carrying an error payload fails with that payload intact.
///
/// Callers wanting an overall deadline can wrap the returned future in
/// `tokio::time::timeout`; the flow itself never gives up early.
pub async fn wait_for_operation<C: Compute>(
    compute: &C,
    operation: &Operation,
    opts: &FleetOptions,
) -> Result<Operation, Error> {
    let kind = operation.operation_type.as_deref().unwrap_or("compute");
    print!("Waiting for {} operation to finish... ", kind);
    let _ = std::io::stdout().flush();

    loop {
        let result = compute
            .wait_operation(&opts.project, &opts.zone, &operation.name)
            .await?;

        if result.status == OperationStatus::Done {
            println!("done.");
            if let Some(error) = result.error {
                return Err(Error::OperationFailed {
                    operation: kind.to_string(),
                    error,
                });
            }
            return Ok(result);
        }
    }
}

/// Provisions the server group first, then the client group. The client
/// submission never starts until the server operation is terminal.
pub async fn provision_fleet<C: Compute>(compute: &C, opts: &FleetOptions) -> Result<(), Error> {
    let net_int = build::network_interface(opts);

    if opts.server.count > 0 {
        create_instances(compute, opts, &net_int, Role::Server).await?;
    }
    if opts.client.count > 0 {
        create_instances(compute, opts, &net_int, Role::Client).await?;
    }

    Ok(())
}
