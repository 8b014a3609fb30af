//! flowlint-render binary: render a template file with JSON or
//! environment variables.

use anyhow::Context;
use clap::Parser;
use flowlint::cli::RenderCli;
use flowlint::render::{parse_variables, render_template};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let cli = RenderCli::parse();
    flowlint::logging::init_logging(0);

    let variables = cli
        .variables
        .as_deref()
        .map(parse_variables)
        .transpose()
        .context("invalid variables argument")?;
    render_template(Path::new(&cli.template), Path::new(&cli.output), variables)
        .with_context(|| format!("failed to render {}", cli.template))?;
    println!("Template rendered successfully: {}", cli.output);
    Ok(())
}
