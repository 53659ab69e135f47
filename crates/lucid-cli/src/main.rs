//! LUCID CLI: command-line client for a running registry node.
//!
//! Subcommands: register-social, register-wallet, link, root, account,
//! lookup-social, lookup-wallet, status.

mod commands;

use clap::{Parser, Subcommand};

/// LUCID: link social and wallet identities into accounts.
#[derive(Parser, Debug)]
#[command(name = "lucid", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a social-platform credential.
    RegisterSocial(commands::register::RegisterSocialArgs),
    /// Register a wallet address.
    RegisterWallet(commands::register::RegisterWalletArgs),
    /// Link two or more identities into one account.
    Link(commands::link::LinkArgs),
    /// Resolve the root id of an identity.
    Root(commands::root::RootArgs),
    /// Show the account an identity belongs to.
    Account(commands::account::AccountArgs),
    /// Find the account root holding a social credential.
    LookupSocial(commands::lookup::LookupSocialArgs),
    /// Find the account root holding a wallet address.
    LookupWallet(commands::lookup::LookupWalletArgs),
    /// Query the status of a running node.
    Status(commands::status::StatusArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::RegisterSocial(args) => commands::register::run_social(args).await,
        Commands::RegisterWallet(args) => commands::register::run_wallet(args).await,
        Commands::Link(args) => commands::link::run(args).await,
        Commands::Root(args) => commands::root::run(args).await,
        Commands::Account(args) => commands::account::run(args).await,
        Commands::LookupSocial(args) => commands::lookup::run_social(args).await,
        Commands::LookupWallet(args) => commands::lookup::run_wallet(args).await,
        Commands::Status(args) => commands::status::run(args).await,
    }
}
