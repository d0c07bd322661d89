use cep_adapter::{AdapterError, Address};
use cep_config::{ConfigError, Settings};
use cep_runtime::{Code, ResolveError, Resolver};
use colored::Colorize;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("provider setup: {0}")]
    Setup(#[from] AdapterError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("render JSON: {0}")]
    Render(#[from] serde_json::Error),
}

pub struct Options {
    pub deadline_ms: Option<u64>,
    pub json: bool,
}

// ── lookup ──────────────────────────────────────────────────────

pub async fn lookup(raw: &str, opts: &Options) -> Result<(), CliError> {
    // Reject malformed input before touching configuration or the network.
    let code = Code::parse(raw)?;

    let mut settings = Settings::load()?;
    if let Some(ms) = opts.deadline_ms {
        settings.deadline = Duration::from_millis(ms);
    }
    let resolver = Resolver::from_settings(&settings)?;

    if !opts.json {
        println!("{} {}", "Looking up".dimmed(), code.formatted().cyan());
        println!(
            "{}",
            format!(
                "Racing {} (deadline {}ms)",
                resolver.providers().join(", "),
                resolver.deadline().as_millis()
            )
            .dimmed()
        );
        println!();
    }

    let started = Instant::now();
    let address = resolver.resolve(code.as_str()).await?;
    let elapsed = started.elapsed();

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&address)?);
    } else {
        print_address(&address, elapsed);
    }
    Ok(())
}

/// Rows printed for a resolved address: code, non-empty fields, source, timing.
pub fn summary(address: &Address, elapsed: Duration) -> Vec<(&'static str, String)> {
    let mut rows = vec![("CEP", address.code.clone())];
    rows.extend(address.fields().into_iter().map(|(label, v)| (label, v.to_string())));
    rows.push(("Source", address.source.clone()));
    rows.push(("Elapsed", format!("{}ms", elapsed.as_millis())));
    rows
}

fn print_address(address: &Address, elapsed: Duration) {
    println!("{}", "Address:".bold());
    for (label, value) in summary(address, elapsed) {
        let label = format!("{label}:");
        let value = match label.as_str() {
            "Source:" => value.green().bold(),
            "Elapsed:" => value.dimmed(),
            _ => value.normal(),
        };
        println!("  {} {}", format!("{label:<14}").dimmed(), value);
    }
}
