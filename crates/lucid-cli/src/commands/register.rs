//! `lucid register-social` / `lucid register-wallet`: create new identities.

use clap::Args;
use serde::Serialize;

use super::{api_url, fail, unreachable, IdResponse, DEFAULT_ENDPOINT};

#[derive(Args, Debug)]
pub struct RegisterSocialArgs {
    /// Platform name (e.g., twitter, github).
    pub platform: String,

    /// Handle on that platform.
    pub handle: String,

    /// Display name shown for the account.
    #[arg(long, default_value = "")]
    pub display_name: String,

    /// Avatar image URI.
    #[arg(long, default_value = "")]
    pub avatar_uri: String,

    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[derive(Args, Debug)]
pub struct RegisterWalletArgs {
    /// Wallet address as 40 hex digits, optionally 0x-prefixed.
    pub address: String,

    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[derive(Serialize)]
struct RegisterSocialRequest<'a> {
    platform: &'a str,
    handle: &'a str,
    display_name: &'a str,
    avatar_uri: &'a str,
}

#[derive(Serialize)]
struct RegisterWalletRequest<'a> {
    address: &'a str,
}

pub async fn run_social(args: &RegisterSocialArgs) -> anyhow::Result<()> {
    let url = api_url(&args.endpoint, &["identities", "social"])?;
    let body = RegisterSocialRequest {
        platform: &args.platform,
        handle: &args.handle,
        display_name: &args.display_name,
        avatar_uri: &args.avatar_uri,
    };

    let client = reqwest::Client::new();
    match client.post(url).json(&body).send().await {
        Ok(r) if r.status().is_success() => {
            let data: IdResponse = r.json().await?;
            println!("Social identity registered!");
            println!("  ID:        {}", data.id);
            println!("  Platform:  {}", args.platform);
            println!("  Handle:    {}", args.handle);
        }
        Ok(r) => fail("registration", r).await?,
        Err(e) => unreachable(&args.endpoint, e)?,
    }

    Ok(())
}

pub async fn run_wallet(args: &RegisterWalletArgs) -> anyhow::Result<()> {
    let url = api_url(&args.endpoint, &["identities", "wallet"])?;
    let body = RegisterWalletRequest {
        address: &args.address,
    };

    let client = reqwest::Client::new();
    match client.post(url).json(&body).send().await {
        Ok(r) if r.status().is_success() => {
            let data: IdResponse = r.json().await?;
            println!("Wallet identity registered!");
            println!("  ID:       {}", data.id);
            println!("  Address:  {}", args.address);
        }
        Ok(r) => fail("registration", r).await?,
        Err(e) => unreachable(&args.endpoint, e)?,
    }

    Ok(())
}
