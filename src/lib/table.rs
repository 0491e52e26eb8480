use std::io::{self, Write};

use tabwriter::TabWriter;

use crate::lib::analyzer::NamespaceSummary;
use crate::lib::calculator::PodCost;
use crate::lib::kubernetes::NamespaceInfo;
use crate::lib::resources::{PodResourceSummary, format_cpu, format_memory};

fn tab_writer<W: Write>(out: W) -> TabWriter<W> {
    TabWriter::new(out).minwidth(0).padding(3)
}

/// Requests and limits per pod
pub fn write_resource_table<W: Write>(
    out: &mut W,
    pods: &[PodResourceSummary],
) -> io::Result<()> {
    let mut tw = tab_writer(out);

    writeln!(tw, "POD\tCPU REQUEST\tMEMORY REQUEST\tCPU LIMIT\tMEMORY LIMIT")?;
    for pod in pods {
        writeln!(
            tw,
            "{}\t{}\t{}\t{}\t{}",
            pod.name,
            format_cpu(pod.cpu_request),
            format_memory(pod.memory_request),
            format_cpu(pod.cpu_limit),
            format_memory(pod.memory_limit)
        )?;
    }

    tw.flush()
}

/// Total cost per pod for each window
pub fn write_cost_table<W: Write>(out: &mut W, costs: &[PodCost]) -> io::Result<()> {
    let mut tw = tab_writer(out);

    writeln!(tw, "POD\tHOURLY\tDAILY\tMONTHLY")?;
    for cost in costs {
        writeln!(
            tw,
            "{}\t${:.4}\t${:.2}\t${:.2}",
            cost.name, cost.hourly.total_cost, cost.daily.total_cost, cost.monthly.total_cost
        )?;
    }

    tw.flush()
}

pub fn write_namespace_summary<W: Write>(
    out: &mut W,
    summary: &NamespaceSummary,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Namespace Summary:")?;
    writeln!(out, "  Total Pods: {}", summary.total_pods)?;
    writeln!(out, "  Estimated Monthly Cost: ${:.2}", summary.monthly_cost)?;
    writeln!(out)?;
    writeln!(
        out,
        "Note: These are estimates based on resource requests, not actual usage."
    )
}

pub fn write_namespaces<W: Write>(out: &mut W, namespaces: &[NamespaceInfo]) -> io::Result<()> {
    writeln!(out, "Found {} namespaces:", namespaces.len())?;
    writeln!(out)?;
    for namespace in namespaces {
        writeln!(out, "  {} (Status: {})", namespace.name, namespace.phase)?;
    }
    Ok(())
}
