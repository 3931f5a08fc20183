use envconfig::Envconfig;

use crate::templates::{DEFAULT_APP_NAME, DEFAULT_IMAGE, WorkloadDefaults};

#[derive(Envconfig, Clone, Debug, PartialEq, Eq)]
pub struct OperatorConfig {
    /// Image for the default container when a CloudflaredDeployment has no
    /// container override.
    /// Env: CF_OPERATOR_DEFAULT_IMAGE
    #[envconfig(
        from = "CF_OPERATOR_DEFAULT_IMAGE",
        default = "docker.io/cloudflare/cloudflared:latest"
    )]
    pub default_image: String,

    /// Value of the default `app` label and name of the default container.
    /// Env: CF_OPERATOR_APP_NAME
    #[envconfig(from = "CF_OPERATOR_APP_NAME", default = "cloudflared")]
    pub app_name: String,

    /// Restrict the controller to one namespace; unset or empty watches all.
    /// Env: CF_OPERATOR_WATCH_NAMESPACE
    #[envconfig(from = "CF_OPERATOR_WATCH_NAMESPACE")]
    pub watch_namespace: Option<String>,

    /// Delay before a retryable reconcile failure is redriven.
    /// Env: CF_OPERATOR_ERROR_REQUEUE_SECS
    #[envconfig(from = "CF_OPERATOR_ERROR_REQUEUE_SECS", default = "60")]
    pub error_requeue_secs: u64,

    #[envconfig(from = "HTTP_PORT", default = "8081")]
    pub http_port: u16,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            default_image: DEFAULT_IMAGE.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            watch_namespace: None,
            error_requeue_secs: 60,
            http_port: 8081,
        }
    }
}

impl OperatorConfig {
    /// Load from the environment and normalize.
    pub fn load() -> Result<Self, envconfig::Error> {
        Ok(Self::init_from_env()?.normalize())
    }

    /// An empty namespace means "all namespaces", same as leaving it unset.
    pub fn normalize(mut self) -> Self {
        if self
            .watch_namespace
            .as_deref()
            .is_some_and(|ns| ns.trim().is_empty())
        {
            self.watch_namespace = None;
        }
        self
    }

    pub fn workload_defaults(&self) -> WorkloadDefaults {
        WorkloadDefaults::new(&self.app_name, &self.default_image)
    }
}
