//! `lucid account`: show every credential linked to an identity.

use clap::Args;
use lucid_core::Account;

use super::{api_url, fail, unreachable, DEFAULT_ENDPOINT};

#[derive(Args, Debug)]
pub struct AccountArgs {
    /// Any identity id in the account.
    pub id: u64,

    /// Print the raw JSON instead of a summary.
    #[arg(long)]
    pub json: bool,

    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

pub async fn run(args: &AccountArgs) -> anyhow::Result<()> {
    let id = args.id.to_string();
    let url = api_url(&args.endpoint, &["accounts", &id])?;

    match reqwest::get(url).await {
        Ok(r) if r.status().is_success() => {
            let account: Account = r.json().await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&account)?);
                return Ok(());
            }

            let members: Vec<String> = account.members.iter().map(|m| m.to_string()).collect();
            println!("Account {}", account.root);
            if account.display_name.is_empty() {
                println!("  Name:     (none)");
            } else {
                println!("  Name:     {}", account.display_name);
            }
            println!("  Members:  {}", members.join(", "));
            for wallet in &account.wallets {
                println!("  Wallet:   {}", wallet);
            }
            for social in &account.socials {
                println!("  Social:   {}/{}", social.platform, social.handle);
            }
        }
        Ok(r) => fail("account lookup", r).await?,
        Err(e) => unreachable(&args.endpoint, e)?,
    }

    Ok(())
}
