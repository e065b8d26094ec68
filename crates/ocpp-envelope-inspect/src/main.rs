//! ocpp-envelope inspect tool
//!
//! Decode OCPP response payloads from JSON files the way a transport would,
//! and print the canonical re-encoding.
//!
//! ```bash
//! ocpp-envelope-inspect decode -a BootNotification -p boot.json
//! ocpp-envelope-inspect --config inspect.yaml decode -a Heartbeat -p hb.json -r 19223201
//! ocpp-envelope-inspect failed -a DataTransfer
//! ocpp-envelope-inspect schema-check
//! ```

use std::fs;

use anyhow::{bail, Context, Result};
use argh::FromArgs;
use tracing_subscriber::{fmt, EnvFilter};

use ocpp_envelope_inspect::config::{self, InspectConfig};
use ocpp_envelope_inspect::inspect::{self, Action, Inspection};

#[derive(FromArgs)]
/// Inspect OCPP response payloads
struct Cli {
    /// path to a YAML config file
    #[argh(option, short = 'c')]
    config: Option<String>,

    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Commands {
    Decode(DecodeArgs),
    Failed(FailedArgs),
    SchemaCheck(SchemaCheckArgs),
}

#[derive(FromArgs)]
#[argh(subcommand, name = "decode")]
/// decode a response payload and print its re-encoding
struct DecodeArgs {
    /// OCPP action name, e.g. BootNotification
    #[argh(option, short = 'a')]
    action: String,

    /// path to the JSON payload
    #[argh(option, short = 'p')]
    payload: String,

    /// id of the call this payload answers
    #[argh(option, short = 'r', default = "\"inspect\".into()")]
    request_id: String,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "failed")]
/// print the envelope synthesized for an unanswered request
struct FailedArgs {
    /// OCPP action name
    #[argh(option, short = 'a')]
    action: String,

    /// id of the unanswered call
    #[argh(option, short = 'r', default = "\"inspect\".into()")]
    request_id: String,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "schema-check")]
/// compare every field table with its JSON schema
struct SchemaCheckArgs {}

fn print(cfg: &InspectConfig, inspection: &Inspection) -> Result<()> {
    tracing::info!(
        action = %inspection.action,
        outcome = %inspection.outcome,
        signatures = inspection.signatures,
        "response inspected"
    );
    println!("{}", inspect::render(&inspection.encoded, cfg.output.pretty)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    let cfg = match &cli.config {
        Some(path) => config::load_from_file(path).context("config load failed")?,
        None => InspectConfig::default(),
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log.filter));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match cli.command {
        Commands::Decode(args) => {
            let action = Action::parse(&args.action)?;
            let text = fs::read_to_string(&args.payload)
                .with_context(|| format!("failed to read {}", args.payload))?;
            let payload: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("{} is not JSON", args.payload))?;

            match inspect::decode(action, &args.request_id, &payload, &cfg.codec) {
                Ok(inspection) => print(&cfg, &inspection),
                Err(e) => bail!("{}: {e}", e.error_code().as_str()),
            }
        }
        Commands::Failed(args) => {
            let action = Action::parse(&args.action)?;
            print(&cfg, &inspect::failed(action, &args.request_id))
        }
        Commands::SchemaCheck(_) => {
            let mut drifted = 0;
            for (action, drift) in inspect::schema_check()? {
                if drift.is_empty() {
                    tracing::info!(%action, "field table matches schema");
                }
                for d in &drift {
                    tracing::error!(%action, "{d}");
                }
                drifted += drift.len();
            }
            if drifted > 0 {
                bail!("{drifted} schema drift(s) found");
            }
            Ok(())
        }
    }
}
