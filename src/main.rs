//! Perf Harness CLI
//!
//! Entry point for the `perf-harness` command-line tool.

use clap::{ArgAction, Args, Parser, Subcommand};
use perf_harness::settings::DEFAULT_ENV_PREFIX;
use perf_harness::{
    ConfigError, ConfigResolver, PlanAudit, PluginFamily, Resolution, SettingsSource,
    SettingsStore, TestType,
};
use std::path::PathBuf;
use std::process;
use tracing::debug;

#[derive(Parser)]
#[command(name = "perf-harness")]
#[command(about = "Resolve load-test run configuration", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve settings and print the run plan
    Resolve {
        #[command(flatten)]
        sources: SourceArgs,

        /// Print the full audit record as JSON instead of the summary line
        #[arg(long)]
        json: bool,

        /// Also write the audit record to this file
        #[arg(long)]
        audit_out: Option<PathBuf>,
    },

    /// Check that settings resolve, listing every correction made
    Verify {
        #[command(flatten)]
        sources: SourceArgs,

        /// Fail if any warning was raised
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Settings file (properties, or TOML with a .toml extension); later files win
    #[arg(long = "config", short = 'c')]
    configs: Vec<PathBuf>,

    /// Ignore environment overrides
    #[arg(long)]
    no_env: bool,

    /// Prefix selecting environment overrides
    #[arg(long, default_value = DEFAULT_ENV_PREFIX)]
    env_prefix: String,

    /// Override one setting (key=value); applied last
    #[arg(short = 'D', long = "set", value_parser = parse_key_value)]
    overrides: Vec<(String, String)>,
}

impl SourceArgs {
    /// Files in order, then environment, then command-line overrides.
    fn sources(&self) -> Vec<SettingsSource> {
        let mut sources: Vec<SettingsSource> = self
            .configs
            .iter()
            .cloned()
            .map(SettingsSource::File)
            .collect();

        if !self.no_env {
            sources.push(SettingsSource::Environment {
                prefix: self.env_prefix.clone(),
            });
        }
        if !self.overrides.is_empty() {
            sources.push(SettingsSource::literal(
                "command-line",
                self.overrides.iter().cloned(),
            ));
        }
        sources
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Resolve {
            sources,
            json,
            audit_out,
        } => run_resolve(&sources, json, audit_out),
        Commands::Verify { sources, strict } => run_verify(&sources, strict),
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("perf_harness={},perf_plugins={}", level, level))
    });
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_and_resolve(args: &SourceArgs) -> Result<(SettingsStore, Resolution), ConfigError> {
    let store = SettingsStore::from_sources(args.sources())?;
    debug!(keys = store.len(), sources = store.sources().len(), "settings merged");
    let resolution = ConfigResolver::new().resolve(&store)?;
    Ok((store, resolution))
}

fn run_resolve(args: &SourceArgs, json: bool, audit_out: Option<PathBuf>) {
    let (store, resolution) = match load_and_resolve(args) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };
    resolution.emit_diagnostics();

    if json || audit_out.is_some() {
        let audit = match PlanAudit::new(&store, &resolution) {
            Ok(audit) => audit,
            Err(e) => {
                eprintln!("Error building audit record: {}", e);
                process::exit(1);
            }
        };

        if let Some(path) = audit_out {
            if let Err(e) = audit.write_to_file(&path) {
                eprintln!("Error writing audit record to {}: {}", path.display(), e);
                process::exit(1);
            }
        }

        if json {
            match audit.to_json() {
                Ok(out) => println!("{}", out),
                Err(e) => {
                    eprintln!("Error serializing output: {}", e);
                    process::exit(1);
                }
            }
            return;
        }
    }

    println!("{}", resolution.plan);
}

fn run_verify(args: &SourceArgs, strict: bool) {
    let (store, resolution) = match load_and_resolve(args) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    let plan = &resolution.plan;
    println!("Configuration valid ({} sources, {} keys)", store.sources().len(), store.len());
    println!();
    println!("  Hosts: {} (port {})", plan.hosts().join(", "), plan.port());
    println!(
        "  Workers: {} ({:?})",
        plan.num_workers(),
        plan.work_partitioning()
    );
    match plan.test_duration() {
        Some(duration) => println!("  Termination: timed, {}s", duration.as_secs()),
        None => println!("  Termination: counted"),
    }
    if let Some(seed) = plan.seed() {
        println!("  Random seed: {}", seed);
    }
    if let Some(percentiles) = plan.report_percentiles() {
        let rendered: Vec<String> = percentiles.iter().map(|p| p.to_string()).collect();
        println!("  Percentiles: {}", rendered.join(", "));
    }
    println!("  {}", test_type_line(plan.test_type()));
    println!("  Sampler: {}", plan.sampler().id());
    println!("  Reporter: {}", plan.reporter().id());
    println!("  Test list: {}", plan.test_list().id());

    if !resolution.diagnostics.is_empty() {
        println!();
        for diagnostic in &resolution.diagnostics {
            println!("  {}", diagnostic);
        }
    }

    if fails_strict(&resolution, strict) {
        process::exit(1);
    }
}

fn test_type_line(test_type: &TestType) -> String {
    if test_type.is_recognized() {
        format!("Test type: {}", test_type)
    } else {
        format!("Test type: {} (unrecognized, default sampler used)", test_type)
    }
}

/// `--strict` turns any warning into a failed verification.
fn fails_strict(resolution: &Resolution, strict: bool) -> bool {
    strict && resolution.has_warnings()
}
