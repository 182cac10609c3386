use anyhow::{anyhow, bail, Context};
use colored::Colorize;
use keyway_rpc::{api_version, do_ledger_entry, resolve, Resolution, API_VERSION_MIN};
use keyway_server::{KeywayServer, ServerConfig};
use keyway_store::{InMemoryLedgerHistory, LedgerHistory};
use serde_json::{json, Map, Value};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Resolve(args) => cmd_resolve(args, &cli.format),
        Command::Derive(args) => cmd_derive(args, &cli.format),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = serve_config(args)?;
    println!(
        "{} Keyway on {} (fixture: {})",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        config
            .fixture
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".into())
    );
    let server = KeywayServer::from_config(config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

/// Config file (or defaults) with command-line overrides applied.
fn serve_config(args: ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if args.fixture.is_some() {
        config.fixture = args.fixture;
    }
    Ok(config)
}

fn cmd_resolve(args: ResolveArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let history = InMemoryLedgerHistory::load_fixture(&args.fixture)
        .with_context(|| format!("loading fixture {}", args.fixture.display()))?;
    let result = run_request(&history, &args.request, args.api_version)?;

    if matches!(format, OutputFormat::Text) {
        match result.get("error").and_then(Value::as_str) {
            Some(error) => println!("{} {}", "✗".red().bold(), error.red()),
            None => println!(
                "{} {}",
                "✓".green().bold(),
                result["index"].as_str().unwrap_or_default().yellow()
            ),
        }
    }
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Run one `ledger_entry` request against `history`.
fn run_request(
    history: &dyn LedgerHistory,
    request: &str,
    version: Option<u32>,
) -> anyhow::Result<Value> {
    let params: Value = serde_json::from_str(request).context("request is not JSON")?;
    let version = match (version, params.as_object()) {
        (Some(version), _) => version,
        (None, Some(object)) => {
            api_version(object, API_VERSION_MIN).map_err(|kind| anyhow!(kind))?
        }
        (None, None) => API_VERSION_MIN,
    };
    Ok(do_ledger_entry(history, &params, version)?)
}

fn cmd_derive(args: DeriveArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let resolution = derive(&args.request, args.api_version)?;
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&derive_json(&resolution))?)
        }
        OutputFormat::Text => match resolution {
            Resolution::Resolved(spec) => {
                println!("{} {}", "✓".green().bold(), spec);
                println!("  Key: {}", spec.key().to_hex().yellow());
                println!("  Expected type: {}", spec.expected_type().to_string().cyan());
            }
            Resolution::Malformed(kind) => {
                println!("{} {}", "✗".red().bold(), kind.token().red());
                println!("  {}", kind.message());
            }
        },
    }
    Ok(())
}

fn derive(request: &str, version: Option<u32>) -> anyhow::Result<Resolution> {
    let params: Value = serde_json::from_str(request).context("request is not JSON")?;
    let Some(object) = params.as_object() else {
        bail!("request must be a JSON object");
    };
    let version = match version {
        Some(version) => version,
        None => api_version(object, API_VERSION_MIN).map_err(|kind| anyhow!(kind))?,
    };
    Ok(resolve(object, version)?)
}

fn derive_json(resolution: &Resolution) -> Value {
    match resolution {
        Resolution::Resolved(spec) => json!({
            "category": spec.category().to_string(),
            "index": spec.key().to_hex(),
            "expected_type": spec.expected_type().to_string(),
        }),
        Resolution::Malformed(kind) => {
            let mut result = Map::new();
            kind.inject(&mut result);
            Value::Object(result)
        }
    }
}
