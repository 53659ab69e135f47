//! `lucid lookup-social` / `lucid lookup-wallet`: find the account root
//! holding a credential.

use clap::Args;

use super::{api_url, fail, unreachable, IdResponse, DEFAULT_ENDPOINT};

#[derive(Args, Debug)]
pub struct LookupSocialArgs {
    /// Platform name.
    pub platform: String,

    /// Handle on that platform.
    pub handle: String,

    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[derive(Args, Debug)]
pub struct LookupWalletArgs {
    /// Wallet address.
    pub address: String,

    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

async fn lookup(endpoint: &str, segments: &[&str]) -> anyhow::Result<()> {
    let url = api_url(endpoint, segments)?;

    match reqwest::get(url).await {
        Ok(r) if r.status().is_success() => {
            let data: IdResponse = r.json().await?;
            println!("{}", data.id);
        }
        Ok(r) => fail("lookup", r).await?,
        Err(e) => unreachable(endpoint, e)?,
    }

    Ok(())
}

pub async fn run_social(args: &LookupSocialArgs) -> anyhow::Result<()> {
    lookup(
        &args.endpoint,
        &["lookup", "social", &args.platform, &args.handle],
    )
    .await
}

pub async fn run_wallet(args: &LookupWalletArgs) -> anyhow::Result<()> {
    lookup(&args.endpoint, &["lookup", "wallet", &args.address]).await
}
