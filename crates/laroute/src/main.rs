//! laroute: inspect and expand Laravel-style route path templates.

mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use laroute_template::{
    compile_pattern, expand_path, extract_params, validate_pattern, ParamValue, Params,
    QueryOptions,
};

use crate::config::{parse_pair, FileConfig, LogFormat};
use crate::logging::events;

#[derive(Parser, Debug)]
#[command(name = "laroute", about = "Laravel-style route path templates", version)]
struct Cli {
    /// YAML config file with constraints and query options.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG).
    #[arg(long, global = true, env = "LAROUTE_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Log output format.
    #[arg(long, global = true, env = "LAROUTE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a pattern into a matcher string (`/users/{id}` -> `/users/:id`).
    Compile {
        pattern: String,

        /// Constraint for a parameter, as name=regex. Repeatable.
        #[arg(short = 'w', long = "where", value_parser = parse_pair)]
        constraints: Vec<(String, String)>,
    },

    /// List the required and optional parameters of a pattern.
    Params {
        pattern: String,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Expand a pattern into a concrete path.
    ///
    /// Values not used by the pattern are appended as a query string.
    Expand {
        pattern: String,

        /// Parameter value, as name=value. Repeat a name to build a list.
        #[arg(short, long = "param", value_parser = parse_pair)]
        params: Vec<(String, String)>,

        /// Constraint for a parameter, as name=regex. Repeatable.
        #[arg(short = 'w', long = "where", value_parser = parse_pair)]
        constraints: Vec<(String, String)>,
    },

    /// Check that patterns are well formed.
    Validate {
        #[arg(required = true, num_args = 1..)]
        patterns: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(&cli.log_level, cli.log_format) {
        eprintln!("warning: {e:#}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(event = events::COMMAND_FAILED, error = %e);
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let file_config = match &cli.config {
        Some(path) => {
            let config = FileConfig::load(path)?;
            tracing::info!(
                event = events::CONFIG_LOADED,
                path = %path.display(),
                constraints = config.constraints.len()
            );
            config
        }
        None => FileConfig::default(),
    };

    match cli.command {
        Commands::Compile {
            pattern,
            constraints,
        } => {
            tracing::info!(event = events::COMMAND_STARTED, command = "compile", %pattern);
            let constraints = file_config.constraints_with(&constraints)?;
            println!("{}", compile_pattern(&pattern, &constraints));
        }
        Commands::Params { pattern, format } => {
            tracing::info!(event = events::COMMAND_STARTED, command = "params", %pattern);
            let inventory = extract_params(&pattern);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string(&inventory)?),
                OutputFormat::Text => {
                    println!("required: {}", inventory.required.join(", "));
                    println!("optional: {}", inventory.optional.join(", "));
                }
            }
        }
        Commands::Expand {
            pattern,
            params,
            constraints,
        } => {
            tracing::info!(event = events::COMMAND_STARTED, command = "expand", %pattern);
            let constraints = file_config.constraints_with(&constraints)?;
            let values = collect_params(params);
            let path = expand(&pattern, &values, &constraints, &file_config.query)?;
            println!("{path}");
        }
        Commands::Validate { patterns } => {
            tracing::info!(event = events::COMMAND_STARTED, command = "validate", count = patterns.len());
            let mut failures = 0;
            for pattern in &patterns {
                match validate_pattern(pattern) {
                    Ok(()) => println!("ok: {pattern}"),
                    Err(e) => {
                        eprintln!("{e}");
                        failures += 1;
                    }
                }
            }
            if failures > 0 {
                anyhow::bail!("{failures} of {} patterns are malformed", patterns.len());
            }
        }
    }

    Ok(())
}

fn expand(
    pattern: &str,
    values: &Params,
    constraints: &laroute_template::ConstraintMap,
    query: &QueryOptions,
) -> anyhow::Result<String> {
    expand_path(pattern, values, constraints, query)
        .with_context(|| format!("failed to expand '{pattern}'"))
}

/// Group `name=value` pairs; a name given more than once becomes a list.
fn collect_params(pairs: Vec<(String, String)>) -> Params {
    let mut params = Params::new();
    for (name, value) in pairs {
        let merged = match params.get(&name) {
            Some(ParamValue::Scalar(first)) => ParamValue::List(vec![first.clone(), value]),
            Some(ParamValue::List(items)) => {
                let mut items = items.clone();
                items.push(value);
                ParamValue::List(items)
            }
            None => ParamValue::Scalar(value),
        };
        params.insert(name, merged);
    }
    params
}
