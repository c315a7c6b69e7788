use std::path::PathBuf;
use std::process;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use colored::*;

use repo_metrics::cli_context::CliContext;
use repo_metrics::commands::{handle_check, handle_collect, handle_show_config, CollectStatus};
use repo_metrics::config::ConfigOverrides;
use repo_metrics::error::MetricsError;
use repo_metrics::logging::{init_logging, LogOptions};

const EXIT_CONFIG_ERROR: i32 = 1;
const EXIT_TRUNCATED: i32 = 2;

fn build_cli() -> Command {
    Command::new("repo-metrics")
        .about("Collect repository metrics from GitHub's GraphQL API as JSONL files")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .help("Path to a JSON config file")
                .value_parser(value_parser!(PathBuf))
                .global(true)
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
                .global(true)
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .help("Emit logs as JSON lines")
                .action(ArgAction::SetTrue)
                .global(true)
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Also write logs to a file in the cache directory")
                .action(ArgAction::SetTrue)
                .global(true)
        )
        .args(repository_args())
        .subcommand(
            Command::new("collect")
                .about("Fetch all metrics and write one JSONL file per resource")
                .arg(
                    Arg::new("output-dir")
                        .long("output-dir")
                        .short('o')
                        .value_name("DIR")
                        .help("Directory for the JSONL files")
                        .value_parser(value_parser!(PathBuf))
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Exit with status 2 if any resource was cut short by a failed request")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("check")
                .about("Print all metrics to the terminal instead of writing files")
                .arg(
                    Arg::new("from-dir")
                        .long("from-dir")
                        .value_name("DIR")
                        .help("Read previously collected JSONL files instead of querying the API")
                        .value_parser(value_parser!(PathBuf))
                )
        )
        .subcommand(
            Command::new("config")
                .about("Show the effective configuration")
        )
}

fn repository_args() -> Vec<Arg> {
    vec![
        Arg::new("owner")
            .long("owner")
            .value_name("OWNER")
            .help("Repository owner (overrides REPO_OWNER)")
            .global(true),
        Arg::new("repo")
            .long("repo")
            .value_name("NAME")
            .help("Repository name (overrides REPO_NAME)")
            .global(true),
        Arg::new("days")
            .long("days")
            .value_name("DAYS")
            .help("Lookback window in days")
            .value_parser(value_parser!(i64).range(0..))
            .global(true),
        Arg::new("page-size")
            .long("page-size")
            .value_name("N")
            .help("Items requested per page (1-100)")
            .value_parser(value_parser!(u32).range(1..=100))
            .global(true),
        Arg::new("timeout")
            .long("timeout")
            .value_name("SECONDS")
            .help("Request timeout in seconds")
            .value_parser(value_parser!(u64).range(1..))
            .global(true),
    ]
}

/// Global args are propagated, so everything is read from the subcommand's matches.
fn overrides_from(matches: &ArgMatches) -> ConfigOverrides {
    ConfigOverrides {
        owner: matches.get_one::<String>("owner").cloned(),
        repo_name: matches.get_one::<String>("repo").cloned(),
        output_dir: matches
            .try_get_one::<PathBuf>("output-dir")
            .ok()
            .flatten()
            .cloned(),
        date_range_days: matches.get_one::<i64>("days").copied(),
        pagination_limit: matches.get_one::<u32>("page-size").copied(),
        request_timeout_secs: matches.get_one::<u64>("timeout").copied(),
    }
}

fn fail(error: MetricsError) -> ! {
    tracing::error!("{}", error);
    eprintln!("{} {}", "Error:".red().bold(), error);
    process::exit(EXIT_CONFIG_ERROR);
}

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();
    let Some((name, sub_matches)) = matches.subcommand() else {
        unreachable!("subcommand is required");
    };

    let log_options = LogOptions {
        verbose: sub_matches.get_flag("verbose"),
        json: sub_matches.get_flag("log-json"),
        log_file: sub_matches.get_flag("log-file"),
    };
    if let Err(e) = init_logging(&log_options) {
        eprintln!("{} {}", "Warning:".yellow(), e);
    }

    let config_path = sub_matches.get_one::<PathBuf>("config").cloned();
    let overrides = overrides_from(sub_matches);
    let mut context = match CliContext::load(config_path, overrides) {
        Ok(context) => context,
        Err(e) => fail(e),
    };

    let result = match name {
        "collect" => match handle_collect(&mut context).await {
            Ok(CollectStatus::Truncated) if sub_matches.get_flag("strict") => {
                tracing::warn!("Some resources are incomplete");
                process::exit(EXIT_TRUNCATED);
            }
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        },
        "check" => {
            let from_dir = sub_matches.get_one::<PathBuf>("from-dir").cloned();
            handle_check(&mut context, from_dir.as_deref()).await
        }
        "config" => handle_show_config(&context),
        _ => unreachable!("unknown subcommand"),
    };

    if let Err(e) = result {
        fail(e);
    }
}
