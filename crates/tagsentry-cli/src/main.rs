mod options;
mod report;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tagsentry_core::check::{known_checks, lookup_check};
use tagsentry_core::directory::InventoryDirectory;
use tagsentry_core::ledger::FindingLedger;
use tagsentry_core::runner::{run_check, RunConfig};
use tagsentry_core::status::Status;
use tagsentry_core::thresholds::ThresholdSet;

#[derive(Parser)]
#[command(
    name = "check_cloud_tags",
    about = "Check whether required tags are set on cloud resources and report \
             missing tags by monitoring-plugin conventions",
    version
)]
struct Cli {
    /// Region to check; ALL evaluates every discovered region
    #[arg(long, default_value = "eu-west-1")]
    region: String,

    /// The check to execute (mandatory)
    #[arg(long)]
    check: Option<String>,

    /// Comma-separated tag names whose absence raises a WARNING
    #[arg(long)]
    warning: Option<String>,

    /// Comma-separated tag names whose absence raises a CRITICAL
    #[arg(long)]
    critical: Option<String>,

    /// JSON inventory file backing the resource directory
    #[arg(long, env = "TAGSENTRY_INVENTORY")]
    inventory: PathBuf,

    /// Verbose output (-v for more); should not be used in supervisor
    /// configurations
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Check-specific options as trailing '--key value' pairs
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    extra: Vec<String>,
}

fn main() {
    // A clap parse failure must not leak clap's own exit code (2, which
    // the supervisor would read as CRITICAL): argument problems are
    // configuration problems and exit UNKNOWN.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            eprint!("{e}");
            std::process::exit(Status::Unknown.exit_code());
        }
        Err(e) => {
            // --help / --version
            print!("{e}");
            std::process::exit(Status::Ok.exit_code());
        }
    };

    let default_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match execute(&cli) {
        Ok(ledger) => {
            report::print_report(&ledger, cli.verbose > 0);
            std::process::exit(ledger.status().exit_code());
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            eprintln!("{}", usage_guidance(cli.check.as_deref()));
            std::process::exit(Status::Unknown.exit_code());
        }
    }
}

fn execute(cli: &Cli) -> anyhow::Result<FindingLedger> {
    let check = cli
        .check
        .as_deref()
        .context("the --check parameter is mandatory")?;
    let options = options::parse_extra(&cli.extra)?;

    let config = RunConfig {
        check: check.to_string(),
        warning: cli.warning.clone(),
        critical: cli.critical.clone(),
        region: cli.region.clone(),
        options,
    };

    let directory = InventoryDirectory::load(&cli.inventory)
        .with_context(|| format!("failed to open inventory {}", cli.inventory.display()))?;

    Ok(run_check(&directory, &config)?)
}

/// Usage line printed with fatal errors: the named check's own guidance
/// when the name resolves, otherwise the list of recognized checks.
fn usage_guidance(check: Option<&str>) -> String {
    if let Some(name) = check {
        if let Ok(check) = lookup_check(name, &ThresholdSet::default()) {
            return format!("usage: {}", check.usage());
        }
    }
    format!("recognized checks: {}", known_checks().join(", "))
}
