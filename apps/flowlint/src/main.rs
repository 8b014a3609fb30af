//! flowlint CLI binary entry point.
//! Resolves configuration, runs the validator and prints the report.

use clap::Parser;
use flowlint::cli::Cli;
use flowlint::lint::Validator;
use flowlint::repair::{HttpCompleter, RepairMode};
use flowlint::utils::{error_prefix, info_prefix};
use flowlint::{config, logging, output};
use std::path::PathBuf;
use tracing::info;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let eff = config::resolve_effective(&cli, &cwd, |name| std::env::var(name).ok());
    if !eff.config_found {
        info!("no flowlint config found; using defaults");
    }

    // The key is required even without --auto-fix
    let Some(api_key) = eff.api_key.as_deref() else {
        eprintln!(
            "{} API key required. Use --api-key or set the {} environment variable",
            error_prefix(),
            eff.api_key_env
        );
        std::process::exit(1);
    };
    let completer = match HttpCompleter::new(
        &eff.api_url,
        api_key,
        &eff.model,
        eff.timeout,
        eff.insecure,
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            std::process::exit(1);
        }
    };

    let mut validator = Validator::new(&completer, eff.yaml11_booleans);
    let mode = RepairMode::from(eff.auto_fix);
    if validator
        .validate_path(&eff.path, &eff.patterns, mode)
        .is_none()
    {
        eprintln!(
            "{} Path not found: {}",
            error_prefix(),
            eff.path.to_string_lossy()
        );
        std::process::exit(1);
    }

    let report = validator.report();
    if let Some(out) = eff.output.as_ref() {
        if let Err(e) = output::write_report(out, &report) {
            eprintln!(
                "{} failed to write report {}: {}",
                error_prefix(),
                out.to_string_lossy(),
                e
            );
            std::process::exit(1);
        }
        println!("{} Report saved to {}", info_prefix(), out.to_string_lossy());
    }
    output::print_summary(&report);
    std::process::exit(report.exit_code());
}
