use crate::lib::calculator::PodCost;

/// Cost totals for all priced pods of a namespace
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamespaceSummary {
    pub namespace: Option<String>,
    pub total_pods: usize,
    pub hourly_cost: f64,
    pub daily_cost: f64,
    pub monthly_cost: f64,
}

/// Sum the hourly, daily and monthly totals of every pod
pub fn aggregate(costs: &[PodCost]) -> NamespaceSummary {
    let Some(first) = costs.first() else {
        return NamespaceSummary::default();
    };

    costs.iter().fold(
        NamespaceSummary {
            namespace: Some(first.namespace.clone()),
            total_pods: costs.len(),
            ..Default::default()
        },
        |mut summary, cost| {
            summary.hourly_cost += cost.hourly.total_cost;
            summary.daily_cost += cost.daily.total_cost;
            summary.monthly_cost += cost.monthly.total_cost;
            summary
        },
    )
}

/// Copy of `costs` ordered by monthly total, most expensive first. Ties keep input order.
pub fn sort_by_monthly_cost(costs: &[PodCost]) -> Vec<PodCost> {
    let mut sorted = costs.to_vec();
    sorted.sort_by(|a, b| b.monthly.total_cost.total_cmp(&a.monthly.total_cost));
    sorted
}
