use clap::Parser;
use colored::Colorize;
use std::process;
use tracing::Level;

mod commands;

/// Exit codes: 0 = resolved, 2 = input/config error, 3 = every provider
/// failed, 4 = deadline exceeded, 1 = other.
const EXIT_OK: i32 = 0;
const EXIT_OTHER: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_ALL_FAILED: i32 = 3;
const EXIT_TIMEOUT: i32 = 4;

#[derive(Parser)]
#[command(
    name = "cepx",
    version,
    about = "Resolve a postal code (CEP) by racing every lookup service"
)]
struct Cli {
    /// Postal code, e.g. 01153000 or 01153-000
    code: String,

    /// Overall deadline in milliseconds
    #[arg(long, env = "CEP_DEADLINE_MS", value_parser = clap::value_parser!(u64).range(1..))]
    deadline_ms: Option<u64>,

    /// Print the address as JSON
    #[arg(long)]
    json: bool,

    /// Log every lookup to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn exit_code_for(err: &commands::CliError) -> i32 {
    use cep_runtime::ResolveError;
    use commands::CliError;

    match err {
        CliError::Config(_) | CliError::Resolve(ResolveError::InvalidInput(_)) => EXIT_INPUT,
        CliError::Resolve(ResolveError::AllFailed { .. }) => EXIT_ALL_FAILED,
        CliError::Resolve(ResolveError::Timeout { .. }) => EXIT_TIMEOUT,
        CliError::Setup(_) | CliError::Render(_) => EXIT_OTHER,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let opts = commands::Options {
        deadline_ms: cli.deadline_ms,
        json: cli.json,
    };

    let code = match commands::lookup(&cli.code, &opts).await {
        Ok(()) => EXIT_OK,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            exit_code_for(&e)
        }
    };
    process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cep_runtime::{Code, ResolveError};
    use commands::CliError;
    use std::time::Duration;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn deadline_falls_back_to_environment() {
        use clap::CommandFactory;
        let cmd = Cli::command();
        let arg = cmd
            .get_arguments()
            .find(|a| a.get_id() == "deadline_ms")
            .unwrap();
        assert_eq!(arg.get_env(), Some(std::ffi::OsStr::new("CEP_DEADLINE_MS")));
    }

    #[test]
    fn code_is_required() {
        assert!(Cli::try_parse_from(["cepx"]).is_err());
    }

    #[test]
    fn zero_deadline_is_rejected() {
        assert!(Cli::try_parse_from(["cepx", "01153000", "--deadline-ms", "0"]).is_err());
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from(["cepx", "01153-000", "--deadline-ms", "500", "--json", "-v"])
            .unwrap();
        assert_eq!(cli.code, "01153-000");
        assert_eq!(cli.deadline_ms, Some(500));
        assert!(cli.json && cli.verbose);
    }

    #[test]
    fn exit_codes_follow_error_kind() {
        assert_eq!(EXIT_OK, 0);
        let distinct = [EXIT_OK, EXIT_OTHER, EXIT_INPUT, EXIT_ALL_FAILED, EXIT_TIMEOUT];
        assert!(distinct.iter().enumerate().all(|(i, c)| !distinct[..i].contains(c)));

        let invalid = CliError::from(Code::parse("123").unwrap_err());
        assert_eq!(exit_code_for(&invalid), EXIT_INPUT);

        let all_failed = CliError::from(ResolveError::AllFailed { first: None });
        assert_eq!(exit_code_for(&all_failed), EXIT_ALL_FAILED);

        let timeout = CliError::from(ResolveError::Timeout {
            deadline: Duration::from_secs(1),
            first: None,
        });
        assert_eq!(exit_code_for(&timeout), EXIT_TIMEOUT);
    }
}
