use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use keyway_rpc::{API_VERSION_MAX, API_VERSION_MIN};

#[derive(Parser)]
#[command(
    name = "keyway",
    about = "Keyway: ledger entry lookup by derived key",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve ledger_entry over HTTP
    Serve(ServeArgs),
    /// Run one ledger_entry request against a fixture
    Resolve(ResolveArgs),
    /// Show the key a request resolves to, without a lookup
    Derive(DeriveArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML server config
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// JSON ledger fixture
    #[arg(long)]
    pub fixture: Option<PathBuf>,
}

#[derive(Args)]
pub struct ResolveArgs {
    #[arg(long)]
    pub fixture: PathBuf,
    /// Request parameters as a JSON object
    #[arg(long)]
    pub request: String,
    #[arg(long, value_parser = api_version_parser())]
    pub api_version: Option<u32>,
}

#[derive(Args)]
pub struct DeriveArgs {
    /// Request parameters as a JSON object
    #[arg(long)]
    pub request: String,
    #[arg(long, value_parser = api_version_parser())]
    pub api_version: Option<u32>,
}

fn api_version_parser() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(i64::from(API_VERSION_MIN)..=i64::from(API_VERSION_MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve_defaults() {
        let cli = Cli::try_parse_from(["keyway", "serve"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert!(args.config.is_none());
            assert!(args.bind.is_none());
            assert!(args.fixture.is_none());
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "keyway",
            "serve",
            "--config",
            "keyway.toml",
            "--bind",
            "0.0.0.0:8080",
            "--fixture",
            "ledger.json",
        ])
        .unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.config, Some(PathBuf::from("keyway.toml")));
            assert_eq!(args.bind, Some("0.0.0.0:8080".parse().unwrap()));
            assert_eq!(args.fixture, Some(PathBuf::from("ledger.json")));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_serve_rejects_bad_bind() {
        assert!(Cli::try_parse_from(["keyway", "serve", "--bind", "nowhere"]).is_err());
    }

    #[test]
    fn parse_resolve() {
        let cli = Cli::try_parse_from([
            "keyway",
            "resolve",
            "--fixture",
            "ledger.json",
            "--request",
            r#"{"index": "AB"}"#,
            "--api-version",
            "2",
        ])
        .unwrap();
        if let Command::Resolve(args) = cli.command {
            assert_eq!(args.fixture, PathBuf::from("ledger.json"));
            assert_eq!(args.request, r#"{"index": "AB"}"#);
            assert_eq!(args.api_version, Some(2));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_rejects_unsupported_api_version() {
        for version in ["0", "99"] {
            assert!(Cli::try_parse_from([
                "keyway",
                "derive",
                "--request",
                "{}",
                "--api-version",
                version,
            ])
            .is_err());
            assert!(Cli::try_parse_from([
                "keyway",
                "resolve",
                "--fixture",
                "ledger.json",
                "--request",
                "{}",
                "--api-version",
                version,
            ])
            .is_err());
        }
        let cli = Cli::try_parse_from(["keyway", "derive", "--request", "{}", "--api-version", "1"])
            .unwrap();
        assert!(matches!(cli.command, Command::Derive(DeriveArgs { api_version: Some(1), .. })));
    }

    #[test]
    fn parse_resolve_requires_fixture() {
        assert!(Cli::try_parse_from(["keyway", "resolve", "--request", "{}"]).is_err());
    }

    #[test]
    fn parse_derive() {
        let cli = Cli::try_parse_from(["keyway", "derive", "--request", "{}"]).unwrap();
        if let Command::Derive(args) = cli.command {
            assert_eq!(args.request, "{}");
            assert!(args.api_version.is_none());
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["keyway", "--verbose", "derive", "--request", "{}"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli =
            Cli::try_parse_from(["keyway", "--format", "json", "derive", "--request", "{}"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
