use std::io::Write;

use crate::Result;
use crate::lib::calculator::PodCost;

pub const CSV_HEADER: [&str; 10] = [
    "pod_name",
    "hourly_cpu_cost",
    "hourly_memory_cost",
    "hourly_total_cost",
    "daily_cpu_cost",
    "daily_memory_cost",
    "daily_total_cost",
    "monthly_cpu_cost",
    "monthly_memory_cost",
    "monthly_total_cost",
];

/// Write one CSV row per pod, hourly at 4 decimals and daily/monthly at 2
pub fn write_csv<W: Write>(out: &mut W, costs: &[PodCost]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(CSV_HEADER)?;
    for cost in costs {
        writer.write_record([
            cost.name.clone(),
            format!("{:.4}", cost.hourly.cpu_cost),
            format!("{:.4}", cost.hourly.memory_cost),
            format!("{:.4}", cost.hourly.total_cost),
            format!("{:.2}", cost.daily.cpu_cost),
            format!("{:.2}", cost.daily.memory_cost),
            format!("{:.2}", cost.daily.total_cost),
            format!("{:.2}", cost.monthly.cpu_cost),
            format!("{:.2}", cost.monthly.memory_cost),
            format!("{:.2}", cost.monthly.total_cost),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
