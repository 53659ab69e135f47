//! `lucid status`: query the status of a running registry node.

use clap::Args;
use serde::Deserialize;

use super::{api_url, DEFAULT_ENDPOINT};

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[derive(Deserialize)]
struct StatusResponse {
    version: String,
    uptime_secs: u64,
    identity_count: u64,
    path_compression: bool,
}

pub async fn run(args: &StatusArgs) -> anyhow::Result<()> {
    let url = api_url(&args.endpoint, &["status"])?;

    match reqwest::get(url).await {
        Ok(r) if r.status().is_success() => {
            let status: StatusResponse = r.json().await?;
            println!("Node Status:");
            println!("  Version:           {}", status.version);
            println!("  Uptime:            {}s", status.uptime_secs);
            println!("  Identities:        {}", status.identity_count);
            println!(
                "  Path compression:  {}",
                if status.path_compression { "on" } else { "off" }
            );
        }
        Ok(r) => {
            anyhow::bail!("node returned HTTP {}", r.status());
        }
        Err(e) => {
            println!("Could not reach node at {}", args.endpoint);
            println!("  Error: {}", e);
            println!();
            println!("Is the node running? Start it with: lucid-node");
        }
    }

    Ok(())
}
