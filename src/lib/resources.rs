use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use log::{debug, warn};

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

const BINARY_SUFFIXES: [(&str, f64); 6] = [
    ("Ki", 1024.0),
    ("Mi", 1_048_576.0),
    ("Gi", 1_073_741_824.0),
    ("Ti", 1_099_511_627_776.0),
    ("Pi", 1_125_899_906_842_624.0),
    ("Ei", 1_152_921_504_606_846_976.0),
];

/// Summed requests and limits of every container in a pod.
///
/// CPU is held in millicores and memory in bytes. `None` means no container
/// declared the resource at all, which is rendered differently from an
/// explicit zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PodResourceSummary {
    pub name: String,
    pub namespace: String,
    pub cpu_request: Option<i64>,
    pub cpu_limit: Option<i64>,
    pub memory_request: Option<i64>,
    pub memory_limit: Option<i64>,
}

impl PodResourceSummary {
    /// Requested CPU in cores
    pub fn cpu_request_cores(&self) -> f64 {
        self.cpu_request.unwrap_or(0) as f64 / 1000.0
    }

    /// Requested memory in GB (1024^3 bytes)
    pub fn memory_request_gb(&self) -> f64 {
        self.memory_request.unwrap_or(0) as f64 / BYTES_PER_GB
    }

    /// Pods with neither a CPU nor a memory request carry no cost
    pub fn has_requests(&self) -> bool {
        self.cpu_request.unwrap_or(0) != 0 || self.memory_request.unwrap_or(0) != 0
    }
}

/// Sum CPU/memory requests and limits across the containers of a pod
pub fn extract(pod: &Pod) -> PodResourceSummary {
    let mut summary = PodResourceSummary {
        name: pod.metadata.name.clone().unwrap_or_default(),
        namespace: pod.metadata.namespace.clone().unwrap_or_default(),
        ..Default::default()
    };

    let containers = pod
        .spec
        .as_ref()
        .map(|spec| spec.containers.as_slice())
        .unwrap_or_default();

    for container in containers {
        let Some(resources) = container.resources.as_ref() else {
            continue;
        };
        let site = (summary.name.as_str(), container.name.as_str());

        if let Some(requests) = resources.requests.as_ref() {
            let cpu = requests.get("cpu").map(|q| read(q, site, cpu_millicores));
            let memory = requests.get("memory").map(|q| read(q, site, memory_bytes));
            accumulate(&mut summary.cpu_request, cpu);
            accumulate(&mut summary.memory_request, memory);
        }
        if let Some(limits) = resources.limits.as_ref() {
            let cpu = limits.get("cpu").map(|q| read(q, site, cpu_millicores));
            let memory = limits.get("memory").map(|q| read(q, site, memory_bytes));
            accumulate(&mut summary.cpu_limit, cpu);
            accumulate(&mut summary.memory_limit, memory);
        }
    }

    debug!(
        "Extracted resources for pod {}/{}: cpu {} / {}, memory {} / {}",
        summary.namespace,
        summary.name,
        format_cpu(summary.cpu_request),
        format_cpu(summary.cpu_limit),
        format_memory(summary.memory_request),
        format_memory(summary.memory_limit)
    );

    summary
}

/// Malformed quantities count as zero
fn read(
    quantity: &Quantity,
    (pod, container): (&str, &str),
    parse: fn(&str) -> Option<i64>,
) -> i64 {
    parse(&quantity.0).unwrap_or_else(|| {
        warn!(
            "Ignoring malformed quantity '{}' on container {} of pod {}",
            quantity.0, container, pod
        );
        0
    })
}

fn accumulate(total: &mut Option<i64>, value: Option<i64>) {
    if let Some(value) = value {
        *total = Some(total.unwrap_or(0).saturating_add(value));
    }
}

/// Parse a Kubernetes quantity string into its value in base units.
///
/// Accepts plain and exponent notation (`1.5`, `1e3`), decimal SI suffixes
/// (`n`, `u`, `m`, `k`, `M`, `G`, `T`, `P`, `E`) and binary suffixes
/// (`Ki` through `Ei`). Returns `None` for empty, negative or malformed input.
pub fn parse_quantity(raw: &str) -> Option<f64> {
    let q = raw.trim();
    if q.is_empty() {
        return None;
    }

    let (number, multiplier) = split_suffix(q);
    // f64 parsing also accepts "inf" and "NaN", neither is a quantity
    if !number.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == '+') {
        return None;
    }
    let value = number.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value * multiplier)
}

fn split_suffix(q: &str) -> (&str, f64) {
    for (suffix, multiplier) in BINARY_SUFFIXES {
        if let Some(number) = q.strip_suffix(suffix) {
            return (number, multiplier);
        }
    }

    let multiplier = match q.chars().last() {
        Some('n') => 1e-9,
        Some('u') => 1e-6,
        Some('m') => 1e-3,
        Some('k') => 1e3,
        Some('M') => 1e6,
        Some('G') => 1e9,
        Some('T') => 1e12,
        Some('P') => 1e15,
        Some('E') => 1e18,
        _ => return (q, 1.0),
    };
    (&q[..q.len() - 1], multiplier)
}

/// CPU quantity in millicores, rounded up like the API server does
pub fn cpu_millicores(raw: &str) -> Option<i64> {
    parse_quantity(raw).map(|cores| round_up(cores * 1000.0, 1e6))
}

/// Memory quantity in bytes, rounded up
pub fn memory_bytes(raw: &str) -> Option<i64> {
    parse_quantity(raw).map(|bytes| round_up(bytes, 1e9))
}

// Largest magnitude where an f64 still resolves whole nano units
const MAX_EXACT_NANOS: f64 = 9_007_199_254_740_992.0;

/// Round up to nano precision of the base unit, then up to a whole `value` unit.
///
/// `nanos_per_unit` is how many nano base units one unit of `value` holds.
/// Float noise from suffix scaling (`0.7 * 1000`) snaps to the nearest nano
/// instead of bumping the result.
fn round_up(value: f64, nanos_per_unit: f64) -> i64 {
    let nanos = value * nanos_per_unit;
    if nanos >= MAX_EXACT_NANOS {
        return value.ceil() as i64;
    }

    let nearest = nanos.round();
    let nanos = if (nanos - nearest).abs() < 1e-3 {
        nearest
    } else {
        nanos.ceil()
    };
    (nanos / nanos_per_unit).ceil() as i64
}

/// Render millicores as whole cores (`2`) or millicores (`250m`)
pub fn format_cpu(millicores: Option<i64>) -> String {
    match millicores {
        None => "-".to_string(),
        Some(m) if m % 1000 == 0 => (m / 1000).to_string(),
        Some(m) => format!("{}m", m),
    }
}

/// Render bytes with the largest binary suffix that divides them exactly
pub fn format_memory(bytes: Option<i64>) -> String {
    let Some(bytes) = bytes else {
        return "-".to_string();
    };
    if bytes == 0 {
        return "0".to_string();
    }

    for (suffix, size) in BINARY_SUFFIXES.iter().rev() {
        let size = *size as i64;
        if bytes % size == 0 {
            return format!("{}{}", bytes / size, suffix);
        }
    }
    bytes.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{Container, PodSpec, ResourceRequirements};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use std::collections::BTreeMap;

    fn resources(pairs: &[(&str, &str)]) -> Option<BTreeMap<String, Quantity>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), Quantity(v.to_string())))
                .collect(),
        )
    }

    fn container(name: &str, requests: &[(&str, &str)], limits: &[(&str, &str)]) -> Container {
        Container {
            name: name.to_string(),
            resources: Some(ResourceRequirements {
                requests: resources(requests),
                limits: resources(limits),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn pod(containers: Vec<Container>) -> Pod {
        Pod {
            metadata: ObjectMeta {
                name: Some("web-0".to_string()),
                namespace: Some("shop".to_string()),
                ..Default::default()
            },
            spec: Some(PodSpec {
                containers,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_cpu_quantities() {
        assert_eq!(cpu_millicores("100m"), Some(100));
        assert_eq!(cpu_millicores("700m"), Some(700));
        assert_eq!(cpu_millicores("1"), Some(1000));
        assert_eq!(cpu_millicores("0.5"), Some(500));
        assert_eq!(cpu_millicores("2.25"), Some(2250));
        assert_eq!(cpu_millicores("500000u"), Some(500));
        assert_eq!(cpu_millicores("250000000n"), Some(250));
        assert_eq!(cpu_millicores("  1500m "), Some(1500));

        // sub-millicore values round up
        assert_eq!(cpu_millicores("1u"), Some(1));
        assert_eq!(cpu_millicores("0.0001"), Some(1));
    }

    #[test]
    fn test_sub_nano_precision_rounds_up() {
        // 1000000.1n rounds up to 1000001n before converting to millicores
        assert_eq!(cpu_millicores("0.0010000001"), Some(2));
        assert_eq!(cpu_millicores("1000001n"), Some(2));
        assert_eq!(cpu_millicores("1000000n"), Some(1));
        assert_eq!(cpu_millicores("0.001"), Some(1));
        assert_eq!(memory_bytes("0.1"), Some(1));
        assert_eq!(memory_bytes("1000m"), Some(1));
    }

    #[test]
    fn test_parse_memory_quantities() {
        assert_eq!(memory_bytes("128Mi"), Some(128 * 1024 * 1024));
        assert_eq!(memory_bytes("1Gi"), Some(1024 * 1024 * 1024));
        assert_eq!(memory_bytes("1.5Gi"), Some(1536 * 1024 * 1024));
        assert_eq!(memory_bytes("1k"), Some(1000));
        assert_eq!(memory_bytes("1M"), Some(1_000_000));
        assert_eq!(memory_bytes("2G"), Some(2_000_000_000));
        assert_eq!(memory_bytes("1E"), Some(1_000_000_000_000_000_000));
        assert_eq!(memory_bytes("1e3"), Some(1000));
        assert_eq!(memory_bytes("2E3"), Some(2000));
        assert_eq!(memory_bytes("4096"), Some(4096));
    }

    #[test]
    fn test_parse_malformed_quantities() {
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("   "), None);
        assert_eq!(parse_quantity("lots"), None);
        assert_eq!(parse_quantity("100x"), None);
        assert_eq!(parse_quantity("Mi"), None);
        assert_eq!(parse_quantity("1e"), None);
        assert_eq!(parse_quantity("inf"), None);
        assert_eq!(parse_quantity("NaN"), None);
        assert_eq!(parse_quantity("-1"), None);
    }

    #[test]
    fn test_format_quantities() {
        assert_eq!(format_cpu(None), "-");
        assert_eq!(format_cpu(Some(0)), "0");
        assert_eq!(format_cpu(Some(250)), "250m");
        assert_eq!(format_cpu(Some(2000)), "2");

        assert_eq!(format_memory(None), "-");
        assert_eq!(format_memory(Some(0)), "0");
        assert_eq!(format_memory(Some(128 * 1024 * 1024)), "128Mi");
        assert_eq!(format_memory(Some(1024 * 1024 * 1024)), "1Gi");
        assert_eq!(format_memory(Some(1536 * 1024 * 1024)), "1536Mi");
        assert_eq!(format_memory(Some(1000)), "1000");
    }

    #[test]
    fn test_extract_sums_containers() {
        let pod = pod(vec![
            container(
                "app",
                &[("cpu", "250m"), ("memory", "256Mi")],
                &[("cpu", "500m"), ("memory", "512Mi")],
            ),
            container(
                "sidecar",
                &[("cpu", "50m"), ("memory", "64Mi")],
                &[("memory", "128Mi")],
            ),
        ]);

        let summary = extract(&pod);
        assert_eq!(summary.name, "web-0");
        assert_eq!(summary.namespace, "shop");
        assert_eq!(summary.cpu_request, Some(300));
        assert_eq!(summary.memory_request, Some(320 * 1024 * 1024));
        assert_eq!(summary.cpu_limit, Some(500));
        assert_eq!(summary.memory_limit, Some(640 * 1024 * 1024));
        assert!((summary.cpu_request_cores() - 0.3).abs() < 1e-9);
        assert!((summary.memory_request_gb() - 0.3125).abs() < 1e-9);
    }

    #[test]
    fn test_extract_missing_resources_stay_unset() {
        let pod = pod(vec![
            Container {
                name: "bare".to_string(),
                ..Default::default()
            },
            container("requests-only", &[("cpu", "100m")], &[]),
        ]);

        let summary = extract(&pod);
        assert_eq!(summary.cpu_request, Some(100));
        assert_eq!(summary.memory_request, None);
        assert_eq!(summary.cpu_limit, None);
        assert_eq!(summary.memory_limit, None);
        assert!(summary.has_requests());
    }

    #[test]
    fn test_extract_explicit_zero_differs_from_missing() {
        let pod = pod(vec![container("zero", &[("cpu", "0"), ("memory", "0")], &[])]);

        let summary = extract(&pod);
        assert_eq!(summary.cpu_request, Some(0));
        assert_eq!(summary.memory_request, Some(0));
        assert_eq!(format_cpu(summary.cpu_request), "0");
        assert_eq!(format_cpu(summary.cpu_limit), "-");
        assert!(!summary.has_requests());
    }

    #[test]
    fn test_extract_treats_malformed_quantity_as_zero() {
        let pod = pod(vec![
            container("broken", &[("cpu", "a lot"), ("memory", "64Mi")], &[]),
            container("fine", &[("cpu", "200m")], &[]),
        ]);

        let summary = extract(&pod);
        assert_eq!(summary.cpu_request, Some(200));
        assert_eq!(summary.memory_request, Some(64 * 1024 * 1024));
    }

    #[test]
    fn test_extract_pod_without_spec() {
        let summary = extract(&Pod::default());
        assert_eq!(summary, PodResourceSummary::default());
        assert!(!summary.has_requests());
    }
}
