//! `lucid link`: merge identities into one account.

use clap::Args;
use serde::{Deserialize, Serialize};

use super::{api_url, fail, unreachable, DEFAULT_ENDPOINT};

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Identity ids to link (at least two).
    #[arg(required = true, num_args = 2..)]
    pub ids: Vec<u64>,

    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[derive(Serialize)]
struct LinkRequest<'a> {
    ids: &'a [u64],
}

#[derive(Deserialize)]
struct LinkResponse {
    ids: Vec<u64>,
    root: u64,
}

pub async fn run(args: &LinkArgs) -> anyhow::Result<()> {
    let url = api_url(&args.endpoint, &["link"])?;
    let body = LinkRequest { ids: &args.ids };

    let client = reqwest::Client::new();
    match client.post(url).json(&body).send().await {
        Ok(r) if r.status().is_success() => {
            let data: LinkResponse = r.json().await?;
            let ids: Vec<String> = data.ids.iter().map(u64::to_string).collect();
            println!("Identities linked!");
            println!("  Members:  {}", ids.join(", "));
            println!("  Root:     {}", data.root);
        }
        Ok(r) => fail("link", r).await?,
        Err(e) => unreachable(&args.endpoint, e)?,
    }

    Ok(())
}
