use crate::config::{FrameworkConfig, load_config};
use crate::error::Result;
use crate::service::HttpService;

/// Namespace under which the framework settings are looked up, giving
/// `PREDIX_ANALYTICS_FRAMEWORK_ZONE_ID` and `PREDIX_ANALYTICS_FRAMEWORK_URI`.
pub const ENV_NAMESPACE: &str = module_path!();

/// Connection to one zone of the analytics framework.
#[derive(Debug, Clone)]
pub struct Framework<S = HttpService> {
    zone_id: String,
    base_uri: String,
    service: S,
}

impl Framework<HttpService> {
    /// Creates a framework from the environment only.
    ///
    /// This is equivalent to `Framework::new(None, None)`.
    pub fn from_env() -> Result<Self> {
        Self::new(None, None)
    }

    /// Creates a framework using (in order of precedence):
    /// - explicit `zone_id`/`base_uri` arguments
    /// - environment variables `PREDIX_ANALYTICS_FRAMEWORK_ZONE_ID` / `PREDIX_ANALYTICS_FRAMEWORK_URI`
    pub fn new(zone_id: Option<String>, base_uri: Option<String>) -> Result<Self> {
        let cfg = load_config(ENV_NAMESPACE, zone_id, base_uri)?;
        let service = HttpService::new(cfg.zone_id.clone())?;
        Ok(Self::with_service(cfg, service))
    }
}

impl<S> Framework<S> {
    pub fn with_service(config: FrameworkConfig, service: S) -> Self {
        Self {
            zone_id: config.zone_id,
            base_uri: config.base_uri,
            service,
        }
    }

    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}
