//! `lucid root`: resolve an identity's account root.

use clap::Args;
use serde::Deserialize;

use super::{api_url, fail, unreachable, DEFAULT_ENDPOINT};

#[derive(Args, Debug)]
pub struct RootArgs {
    /// Identity id to resolve.
    pub id: u64,

    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[derive(Deserialize)]
struct RootResponse {
    id: u64,
    root: u64,
}

pub async fn run(args: &RootArgs) -> anyhow::Result<()> {
    let id = args.id.to_string();
    let url = api_url(&args.endpoint, &["identities", &id, "root"])?;

    match reqwest::get(url).await {
        Ok(r) if r.status().is_success() => {
            let data: RootResponse = r.json().await?;
            println!("{} -> {}", data.id, data.root);
        }
        Ok(r) => fail("root lookup", r).await?,
        Err(e) => unreachable(&args.endpoint, e)?,
    }

    Ok(())
}
