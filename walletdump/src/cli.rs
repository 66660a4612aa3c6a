use clap::Parser;
use std::path::PathBuf;

use xmr_client::TransportConfig;

#[derive(Parser, Debug)]
#[command(name = "walletdump")]
#[command(about = "Display wallet contents", long_about = None)]
pub struct Args {
    /// TOML file with a [wallet] section (optional, uses defaults if not provided)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Wallet RPC host [default: 127.0.0.1]
    #[arg(long)]
    pub host: Option<String>,

    /// Wallet RPC port [default: 18082]
    #[arg(long)]
    pub port: Option<u16>,

    /// Wallet RPC user
    #[arg(short = 'u')]
    pub user: Option<String>,

    /// Wallet RPC password
    #[arg(short = 'p')]
    pub password: Option<String>,

    /// Verbosity (repeat to increase; -v for INFO, -vv for DEBUG)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Args {
    /// Flags given on the command line win over the config file.
    pub fn apply_overrides(&self, wallet: &mut TransportConfig) {
        if let Some(host) = &self.host {
            wallet.host = host.clone();
        }
        if let Some(port) = self.port {
            wallet.port = port;
        }
        if let Some(user) = &self.user {
            wallet.user = user.clone();
        }
        if let Some(password) = &self.password {
            wallet.password = password.clone();
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from(["walletdump", "--port", "28088", "-u", "rpc", "-vv"]);
        let mut wallet = TransportConfig::new("10.0.0.2", 18082).with_credentials("old", "secret");
        args.apply_overrides(&mut wallet);

        assert_eq!(wallet.host, "10.0.0.2");
        assert_eq!(wallet.port, 28088);
        assert_eq!(wallet.user, "rpc");
        assert_eq!(wallet.password, "secret");
        assert_eq!(args.log_level(), "debug");
    }

    #[test]
    fn quiet_by_default() {
        let args = Args::parse_from(["walletdump"]);
        assert_eq!(args.log_level(), "warn");
        assert!(args.config.is_none());
    }
}
