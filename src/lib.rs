//! Kubernetes Namespace Cost Estimator Library
//!
//! This library reads pod resource requests and limits from a Kubernetes
//! namespace and estimates their running cost with a linear per-core-hour and
//! per-GB-hour pricing model.

pub mod lib {
    pub mod analyzer;
    pub mod calculator;
    pub mod cli;
    pub mod commands;
    pub mod config;
    pub mod error;
    pub mod export;
    pub mod kubernetes;
    pub mod logger;
    pub mod output;
    pub mod rates;
    pub mod resources;
    pub mod table;
}

// Re-export commonly used types at the root level for convenience
pub use lib::analyzer::{NamespaceSummary, aggregate, sort_by_monthly_cost};
pub use lib::calculator::{
    HOURS_PER_DAY, HOURS_PER_MONTH, PodCost, ResourceCost, calculate, calculate_costs,
    calculate_pod_cost,
};
pub use lib::cli::{AnalyzeArgs, Cli, Command, OutputFormat};
pub use lib::commands::{check_rate_staleness, run_analyze, run_namespaces};
pub use lib::config::{AnalyzeConfig, ClusterConfig};
pub use lib::error::{ConfigError, KcostError, KubernetesError, RatesError, Result};
pub use lib::export::write_csv;
pub use lib::kubernetes::{ClusterSource, KubernetesClient, NamespaceInfo};
pub use lib::logger::init_logger;
pub use lib::output::{CostReport, PodCostEntry, SummaryEntry, write_json};
pub use lib::rates::{DEFAULT_RATES_PATH, Rates, STALE_AFTER_DAYS, last_updated};
pub use lib::resources::{PodResourceSummary, extract};
pub use lib::table::{write_cost_table, write_namespace_summary, write_resource_table};
