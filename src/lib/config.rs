use std::path::PathBuf;

use log::debug;

use crate::lib::cli::{AnalyzeArgs, Cli, OutputFormat};
use crate::lib::rates::{DEFAULT_RATES_PATH, Rates};
use crate::{ConfigError, Result};

/// How to reach the cluster
#[derive(Clone, Debug, Default)]
pub struct ClusterConfig {
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
}

impl ClusterConfig {
    pub fn new(kubeconfig: Option<PathBuf>, context: Option<String>) -> Self {
        Self {
            kubeconfig,
            context,
        }
    }

    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(cli.kubeconfig.clone(), cli.context.clone())
    }
}

/// Resolved settings for the analyze command
#[derive(Clone, Debug)]
pub struct AnalyzeConfig {
    pub namespace: String,
    pub rates: Rates,
    /// Rate file checked for staleness
    pub rates_source: PathBuf,
    /// True unless both rates were given as flags
    pub using_default_rates: bool,
    pub show_costs: bool,
    pub output: OutputFormat,
}

impl AnalyzeConfig {
    /// Resolve rates from defaults, then `--rates-file`, then the rate flags
    pub fn from_args(args: &AnalyzeArgs) -> Result<Self> {
        if !args.costs && args.output != OutputFormat::Table {
            return Err(ConfigError::InvalidValue(
                "csv and json output require --costs=true".to_string(),
            )
            .into());
        }

        for (flag, value) in [
            ("--cpu-rate", args.cpu_rate),
            ("--memory-rate", args.memory_rate),
        ] {
            if let Some(value) = value.filter(|v| !v.is_finite() || *v < 0.0) {
                return Err(ConfigError::InvalidValue(format!(
                    "{} must be a non-negative number, got {}",
                    flag, value
                ))
                .into());
            }
        }

        let (base, rates_source) = match &args.rates_file {
            Some(path) => (Rates::load_from_file(path)?, path.clone()),
            None => (Rates::default(), PathBuf::from(DEFAULT_RATES_PATH)),
        };

        let rates = Rates {
            cpu_per_core_per_hour: args.cpu_rate.unwrap_or(base.cpu_per_core_per_hour),
            memory_per_gb_per_hour: args.memory_rate.unwrap_or(base.memory_per_gb_per_hour),
        };
        rates.validate()?;

        debug!(
            "Using rates {}/core-hour, {}/GB-hour",
            rates.cpu_per_core_per_hour, rates.memory_per_gb_per_hour
        );

        Ok(Self {
            namespace: args.namespace.clone(),
            rates,
            rates_source,
            using_default_rates: args.cpu_rate.is_none() || args.memory_rate.is_none(),
            show_costs: args.costs,
            output: args.output,
        })
    }
}
