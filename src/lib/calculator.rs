use log::debug;
use serde::{Deserialize, Serialize};

use crate::lib::rates::Rates;
use crate::lib::resources::PodResourceSummary;

pub const HOURS_PER_DAY: f64 = 24.0;

/// Average hours in a month (8760 / 12)
pub const HOURS_PER_MONTH: f64 = 730.0;

/// Cost split into CPU and memory components for one time window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceCost {
    pub cpu_cost: f64,
    pub memory_cost: f64,
    pub total_cost: f64,
}

impl ResourceCost {
    pub fn new(cpu_cost: f64, memory_cost: f64) -> Self {
        Self {
            cpu_cost,
            memory_cost,
            total_cost: cpu_cost + memory_cost,
        }
    }

    fn scaled(&self, hours: f64) -> Self {
        Self {
            cpu_cost: self.cpu_cost * hours,
            memory_cost: self.memory_cost * hours,
            total_cost: self.total_cost * hours,
        }
    }
}

/// Estimated cost of one pod over an hour, a day and a month
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PodCost {
    pub name: String,
    pub namespace: String,
    pub hourly: ResourceCost,
    pub daily: ResourceCost,
    pub monthly: ResourceCost,
}

/// Price a pod's requests
pub fn calculate(summary: &PodResourceSummary, rates: &Rates) -> PodCost {
    calculate_pod_cost(
        &summary.name,
        &summary.namespace,
        summary.cpu_request_cores(),
        summary.memory_request_gb(),
        rates,
    )
}

/// Price `cpu_cores` and `memory_gb` held for one hour, then scale to a day and a month
pub fn calculate_pod_cost(
    name: &str,
    namespace: &str,
    cpu_cores: f64,
    memory_gb: f64,
    rates: &Rates,
) -> PodCost {
    let hourly = ResourceCost::new(
        cpu_cores * rates.cpu_per_core_per_hour,
        memory_gb * rates.memory_per_gb_per_hour,
    );

    PodCost {
        name: name.to_string(),
        namespace: namespace.to_string(),
        hourly,
        daily: hourly.scaled(HOURS_PER_DAY),
        monthly: hourly.scaled(HOURS_PER_MONTH),
    }
}

/// Price every pod that requests CPU or memory; pods requesting neither are skipped
pub fn calculate_costs(summaries: &[PodResourceSummary], rates: &Rates) -> Vec<PodCost> {
    summaries
        .iter()
        .filter(|summary| {
            if !summary.has_requests() {
                debug!("Skipping pod {} without resource requests", summary.name);
            }
            summary.has_requests()
        })
        .map(|summary| calculate(summary, rates))
        .collect()
}
