use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Container;

pub const DEFAULT_APP_NAME: &str = "cloudflared";
pub const DEFAULT_IMAGE: &str = "docker.io/cloudflare/cloudflared:latest";

/// Process-wide workload defaults. Loaded once from config and handed to the
/// reconciler; never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkloadDefaults {
    pub app_name: String,
    pub default_image: String,
}

impl Default for WorkloadDefaults {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            default_image: DEFAULT_IMAGE.to_string(),
        }
    }
}

impl WorkloadDefaults {
    pub fn new(app_name: impl Into<String>, default_image: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            default_image: default_image.into(),
        }
    }

    /// `app=<app_name>`; used as both selector and pod label.
    pub fn labels(&self) -> BTreeMap<String, String> {
        BTreeMap::from([("app".to_string(), self.app_name.clone())])
    }

    pub fn container(&self) -> Container {
        Container {
            name: self.app_name.clone(),
            image: Some(self.default_image.clone()),
            ..Default::default()
        }
    }
}
