//! CLI argument parsing via `clap`.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "flowlint",
    version,
    about = "Validate CI workflow files, optionally repairing them via a completion service",
    long_about = "flowlint — checks workflow YAML files for syntax errors, required top-level keys (name, on, jobs) and job structure (runs-on, steps).\n\nWith --auto-fix, failing files are sent once to a text-completion service; the returned YAML replaces the file after the original is moved to <file>.backup.\n\nConfiguration precedence: CLI > flowlint.toml > defaults.",
    after_help = "Examples:\n  flowlint .github/workflows\n  flowlint .github/workflows/ci.yml --output report.json\n  flowlint .github/workflows --auto-fix --api-url https://llm.example.com"
)]
/// Options for the workflow validator.
pub struct Cli {
    #[arg(help = "Path to a workflow file or directory")]
    pub path: String,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Repair failing files using the completion service")]
    pub auto_fix: bool,
    #[arg(long, help = "Completion service base URL (default: http://localhost:8000)")]
    pub api_url: Option<String>,
    #[arg(long, help = "API key (default: value of FLOWLINT_API_KEY)")]
    pub api_key: Option<String>,
    #[arg(long, help = "Write the JSON report to this file")]
    pub output: Option<String>,
    #[arg(long, help = "Model identifier sent with completion requests")]
    pub model: Option<String>,
    #[arg(long, value_name = "SECS", help = "Completion request timeout in seconds (default: 30)")]
    pub timeout: Option<u64>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Accept invalid TLS certificates from the completion service")]
    pub insecure: bool,
    #[arg(long = "yaml11-booleans", action = clap::ArgAction::SetTrue, help = "Treat unquoted top-level yes/no/on/off keys as booleans (YAML 1.1)")]
    pub yaml11_booleans: bool,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,
}

#[derive(Parser, Debug)]
#[command(
    name = "flowlint-render",
    version,
    about = "Render a template with JSON or environment variables",
    long_about = "Render a Jinja-style template. Variables come from the JSON object given as third argument; without it every environment variable is available, with \"true\"/\"false\" values as booleans.",
    after_help = "Examples:\n  flowlint-render deploy.yaml.j2 deploy.yaml\n  flowlint-render vars.txt.j2 out.txt '{\"replicas\": 3}'"
)]
/// Options for the template renderer.
pub struct RenderCli {
    #[arg(help = "Template file")]
    pub template: String,
    #[arg(help = "Output file")]
    pub output: String,
    #[arg(help = "Variables as a JSON object")]
    pub variables: Option<String>,
}
