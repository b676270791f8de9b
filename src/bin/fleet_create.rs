use clap::Parser;

use gce_fleet::config::{FleetArgs, FleetOptions};
use gce_fleet::error::Error;
use gce_fleet::gcp::gce::client::ComputeClient;
use gce_fleet::gcp::gce::validate;
use gce_fleet::provision;

#[tokio::main]
async fn main() {
    let args = FleetArgs::parse();

    if let Err(err) = run(&args).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(args: &FleetArgs) -> Result<(), Error> {
    args.ensure_instances_requested()?;

    let compute = ComputeClient::connect().await?;
    validate::verify_inputs(&compute, args).await?;

    let opts = FleetOptions::new(args);
    provision::provision_fleet(&compute, &opts).await
}
