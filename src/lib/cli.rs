use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Analyze Kubernetes resource costs
///
/// Connects to your Kubernetes cluster and estimates the cost of running
/// your workloads based on their CPU and memory requests.
#[derive(Parser, Debug)]
#[command(name = "kcost", author, version, about, styles=get_styles())]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress log output to stderr (logs still written to file)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Provide context name
    ///
    /// Use if you have multiple clusters in your kubeconfig
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Path to a kubeconfig file (defaults to $KUBECONFIG, then ~/.kube/config)
    #[arg(long, global = true, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze resource requests and costs for a namespace
    ///
    /// Display pod resource requests, limits, and estimated costs for the
    /// specified namespace.
    Analyze(AnalyzeArgs),

    /// List all namespaces in the cluster
    Namespaces,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Namespace to analyze
    #[arg(short, long, default_value = "default")]
    pub namespace: String,

    /// Cost per CPU core per hour (USD) [default: 0.034]
    #[arg(long, value_name = "RATE")]
    pub cpu_rate: Option<f64>,

    /// Cost per GB memory per hour (USD) [default: 0.004]
    #[arg(long, value_name = "RATE")]
    pub memory_rate: Option<f64>,

    /// Show cost estimates
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pub costs: bool,

    /// YAML file with cpu_per_core_per_hour and memory_per_gb_per_hour
    ///
    /// --cpu-rate and --memory-rate override the values read from the file
    #[arg(long, value_name = "PATH")]
    pub rates_file: Option<PathBuf>,

    /// Output format: table (default), csv or json
    #[arg(short, long, value_name = "FORMAT", default_value = "table")]
    pub output: OutputFormat,
}

/// Output format for analyze results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table with a namespace summary
    Table,
    /// One CSV row per pod
    Csv,
    /// Single JSON document
    Json,
}

/// Set color and variants for help description
///
/// Thanks to [Praveen Perera](https://stackoverflow.com/a/76916424)
fn get_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .usage(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
        )
        .header(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
        )
        .literal(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
        .invalid(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
        )
        .error(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
        )
        .valid(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
        .placeholder(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))),
        )
}
