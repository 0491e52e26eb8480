use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use k8s_openapi::api::core::v1::{Namespace, Pod};
use kube::{
    Api, Client, Config,
    api::ListParams,
    config::{KubeConfigOptions, Kubeconfig},
};
use log::{debug, info};

use crate::lib::config::ClusterConfig;
use crate::{KubernetesError, KubernetesError::ConnectionFailed, Result};

/// A namespace and its lifecycle phase
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceInfo {
    pub name: String,
    pub phase: String,
}

/// Read access to the cluster objects kcost reports on
#[allow(async_fn_in_trait)]
pub trait ClusterSource {
    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>>;

    async fn list_namespaces(&self) -> Result<Vec<NamespaceInfo>>;
}

pub struct KubernetesClient {
    client: Client,
}

impl KubernetesClient {
    /// Connect with in-cluster credentials, falling back to a kubeconfig file.
    ///
    /// An explicit `--kubeconfig` or `--context` skips the in-cluster attempt.
    pub async fn connect(config: &ClusterConfig) -> Result<Self> {
        let kube_config = if config.kubeconfig.is_some() || config.context.is_some() {
            debug!("Using explicitly selected kubeconfig");
            Self::kubeconfig(config).await?
        } else {
            match Config::incluster() {
                Ok(in_cluster) => {
                    debug!("Using in-cluster service account credentials");
                    in_cluster
                }
                Err(e) => {
                    debug!("In-cluster config unavailable: {}", e);
                    Self::kubeconfig(config).await?
                }
            }
        };

        let client = Client::try_from(kube_config).map_err(|e| ConnectionFailed(e.to_string()))?;

        info!("Successfully created Kubernetes client");
        Ok(Self { client })
    }

    async fn kubeconfig(config: &ClusterConfig) -> Result<Config> {
        let path = kubeconfig_path(config.kubeconfig.as_deref()).ok_or_else(|| {
            ConnectionFailed("no kubeconfig found: home directory is unknown".to_string())
        })?;
        debug!("Loading kubeconfig from {}", path.display());

        let kubeconfig = Kubeconfig::read_from(&path).map_err(|e| {
            ConnectionFailed(format!("failed to read kubeconfig {}: {}", path.display(), e))
        })?;
        let options = KubeConfigOptions {
            context: config.context.clone(),
            ..Default::default()
        };

        let kube_config = Config::from_custom_kubeconfig(kubeconfig, &options)
            .await
            .map_err(|e| {
                ConnectionFailed(format!(
                    "failed to build config from kubeconfig {}: {}",
                    path.display(),
                    e
                ))
            })?;
        Ok(kube_config)
    }
}

impl ClusterSource for KubernetesClient {
    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>> {
        debug!("Listing all pods in {namespace} namespace");
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let pods = api
            .list(&ListParams::default())
            .await
            .map_err(|e| list_failed("pods", e))?;

        info!("Retrieved {} pods from {}", pods.items.len(), namespace);
        Ok(pods.items)
    }

    async fn list_namespaces(&self) -> Result<Vec<NamespaceInfo>> {
        debug!("Listing all namespaces");
        let api: Api<Namespace> = Api::all(self.client.clone());
        let namespaces = api
            .list(&ListParams::default())
            .await
            .map_err(|e| list_failed("namespaces", e))?;

        Ok(namespaces
            .items
            .into_iter()
            .map(|ns| NamespaceInfo {
                name: ns.metadata.name.unwrap_or_default(),
                phase: ns
                    .status
                    .and_then(|status| status.phase)
                    .unwrap_or_else(|| "Unknown".to_string()),
            })
            .collect())
    }
}

fn list_failed(resource: &str, e: kube::Error) -> KubernetesError {
    KubernetesError::ListFailed {
        resource: resource.to_string(),
        message: e.to_string(),
    }
}

/// Kubeconfig location: explicit path, then `KUBECONFIG`, then `~/.kube/config`
pub fn kubeconfig_path(explicit: Option<&Path>) -> Option<PathBuf> {
    resolve_kubeconfig_path(
        explicit,
        std::env::var_os("KUBECONFIG"),
        BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()),
    )
}

fn resolve_kubeconfig_path(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    home: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(value));
    }
    home.map(|home| home.join(".kube").join("config"))
}
