use std::io::Write;

use log::{debug, info};

use crate::Result;
use crate::lib::analyzer::{aggregate, sort_by_monthly_cost};
use crate::lib::calculator::calculate_costs;
use crate::lib::cli::OutputFormat;
use crate::lib::config::AnalyzeConfig;
use crate::lib::export::write_csv;
use crate::lib::kubernetes::ClusterSource;
use crate::lib::output::write_json;
use crate::lib::rates::stale_age;
use crate::lib::resources::{PodResourceSummary, extract};
use crate::lib::table::{
    write_cost_table, write_namespace_summary, write_namespaces, write_resource_table,
};

/// Warn when default rates come from a rate file older than the staleness threshold.
///
/// The advisory goes to `diag` (stderr in the binary) whatever the log level,
/// so `--quiet` does not hide it. Returns the file's age in days when a
/// warning was emitted.
pub fn check_rate_staleness<W: Write>(config: &AnalyzeConfig, diag: &mut W) -> Option<i64> {
    if !config.show_costs || !config.using_default_rates {
        return None;
    }

    let days = stale_age(&config.rates_source)?;
    debug!(
        "Rate file {} is {} days old",
        config.rates_source.display(),
        days
    );
    let _ = writeln!(
        diag,
        "Warning: Default pricing rates were last updated {} days ago. Consider updating {} or use --cpu-rate and --memory-rate flags.",
        days,
        config.rates_source.display()
    );
    Some(days)
}

/// List the pods of a namespace and report their resources or estimated costs
pub async fn run_analyze<C: ClusterSource, W: Write>(
    cluster: &C,
    config: &AnalyzeConfig,
    out: &mut W,
) -> Result<()> {
    let pods = cluster.list_pods(&config.namespace).await?;
    let summaries: Vec<PodResourceSummary> = pods.iter().map(extract).collect();

    if config.output == OutputFormat::Table {
        if summaries.is_empty() {
            writeln!(out, "No pods found in namespace '{}'", config.namespace)?;
            out.flush()?;
            return Ok(());
        }
        writeln!(
            out,
            "Analyzing {} pods in namespace '{}':",
            summaries.len(),
            config.namespace
        )?;
        writeln!(out)?;
    }

    if !config.show_costs {
        write_resource_table(out, &summaries)?;
        out.flush()?;
        return Ok(());
    }

    let costs = calculate_costs(&summaries, &config.rates);
    let sorted = sort_by_monthly_cost(&costs);
    info!(
        "Priced {} of {} pods in {}",
        costs.len(),
        summaries.len(),
        config.namespace
    );

    match config.output {
        OutputFormat::Table => {
            write_cost_table(out, &sorted)?;
            write_namespace_summary(out, &aggregate(&costs))?;
        }
        OutputFormat::Csv => write_csv(out, &sorted)?,
        OutputFormat::Json => write_json(out, &config.namespace, &sorted)?,
    }

    out.flush()?;
    Ok(())
}

/// List every namespace with its phase
pub async fn run_namespaces<C: ClusterSource, W: Write>(cluster: &C, out: &mut W) -> Result<()> {
    let namespaces = cluster.list_namespaces().await?;
    write_namespaces(out, &namespaces)?;
    out.flush()?;
    Ok(())
}
