use anyhow::{Context, Result};
use std::process;
use tracing::{debug, error};

use xmr_client::{ClientConfig, Payment, Wallet};

mod cli;
mod report;

#[tokio::main]
async fn main() {
    let args = cli::parse_args();
    init_logging(&args);

    if let Err(e) = run(&args).await {
        error!("walletdump failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run(args: &cli::Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ClientConfig::default(),
    };
    args.apply_overrides(&mut config.wallet);
    debug!(host = %config.wallet.host, port = config.wallet.port, "connecting to wallet");

    let wallet = Wallet::connect(&config.wallet).context("wallet RPC address")?;

    let balances = wallet.balances().await.context("reading balance")?;
    println!("Master address: {}", wallet.address().await?);
    println!("{}", report::balance_line(balances.total, balances.unlocked));

    let accounts = wallet.accounts().await.context("listing accounts")?;
    if accounts.len() > 1 {
        println!("\nWallet has {} account(s):", accounts.len());
        for account in &accounts {
            println!("\nAccount {:02}:", account.index);
            println!("{}", report::balance_line(account.balances.total, account.balances.unlocked));
            println!("{:2} address(es):", account.addresses.len());
            for address in &account.addresses {
                println!("{}", address);
            }
            let scoped = wallet.account(account.index);
            print_transfers(
                &scoped.payments_in().await?,
                &scoped.payments_out().await?,
            );
        }
    } else {
        print_transfers(&wallet.payments_in().await?, &wallet.payments_out().await?);
    }
    Ok(())
}

fn print_transfers(incoming: &[Payment], outgoing: &[Payment]) {
    if let Some(table) = report::payment_table("Incoming payments", incoming) {
        println!("{}", table);
    }
    if let Some(table) = report::payment_table("Outgoing transfers", outgoing) {
        println!("{}", table);
    }
}

fn init_logging(args: &cli::Args) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
