use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::lib::analyzer::{NamespaceSummary, aggregate};
use crate::lib::calculator::{PodCost, ResourceCost};

/// Top-level JSON document for a namespace cost report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostReport {
    pub namespace: String,
    pub pods: Vec<PodCostEntry>,
    pub summary: SummaryEntry,
}

/// Cost breakdown of a single pod
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodCostEntry {
    pub name: String,
    pub hourly: ResourceCost,
    pub daily: ResourceCost,
    pub monthly: ResourceCost,
}

/// Namespace totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub total_pods: usize,
    pub hourly_cost: f64,
    pub daily_cost: f64,
    pub monthly_cost: f64,
}

impl CostReport {
    /// Build the report for `costs`, keeping their order
    pub fn new(namespace: &str, costs: &[PodCost]) -> Self {
        let pods = costs
            .iter()
            .map(|cost| PodCostEntry {
                name: cost.name.clone(),
                hourly: cost.hourly,
                daily: cost.daily,
                monthly: cost.monthly,
            })
            .collect();

        Self {
            namespace: namespace.to_string(),
            pods,
            summary: SummaryEntry::from(&aggregate(costs)),
        }
    }
}

impl From<&NamespaceSummary> for SummaryEntry {
    fn from(summary: &NamespaceSummary) -> Self {
        Self {
            total_pods: summary.total_pods,
            hourly_cost: summary.hourly_cost,
            daily_cost: summary.daily_cost,
            monthly_cost: summary.monthly_cost,
        }
    }
}

/// Pretty-print the report with two-space indentation and a trailing newline
pub fn write_json<W: Write>(out: &mut W, namespace: &str, costs: &[PodCost]) -> Result<()> {
    let report = CostReport::new(namespace, costs);
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
