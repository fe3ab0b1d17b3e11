use serde_json::{Map, Value};
use std::fmt;
use url::Url;

use crate::error::{Error, Result};
use crate::framework::Framework;
use crate::service::{HttpService, ResponseFormat, Service};
use crate::util::{endpoint, urljoin};

/// Catalog API path, joined onto the framework's base URI.
pub const DEFAULT_CATALOG_API: &str = "/api/v1/catalog";

/// Which catalog namespace a [`Catalog`] talks to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogType {
    #[default]
    Analytics,
    /// Any other catalog namespace, by its path segment.
    Other(String),
}

impl CatalogType {
    pub fn as_str(&self) -> &str {
        match self {
            CatalogType::Analytics => "analytics",
            CatalogType::Other(s) => s,
        }
    }
}

impl From<&str> for CatalogType {
    fn from(s: &str) -> Self {
        match s {
            "analytics" => CatalogType::Analytics,
            other => CatalogType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for CatalogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paging and sort criteria for [`Catalog::get_analytics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsQuery {
    pub page: Option<u32>,
    pub size: u32,
    pub sort_order: String,
    pub sortable_fields: String,
    pub taxonomy_path: Option<String>,
}

impl Default for AnalyticsQuery {
    fn default() -> Self {
        Self {
            page: None,
            size: 25,
            sort_order: "asc".to_string(),
            sortable_fields: "name".to_string(),
            taxonomy_path: None,
        }
    }
}

impl AnalyticsQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("size", self.size.to_string()),
            ("sortOrder", self.sort_order.clone()),
            ("sortableFields", self.sortable_fields.clone()),
        ];
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(taxonomy_path) = &self.taxonomy_path {
            params.push(("taxonomyPath", taxonomy_path.clone()));
        }
        params
    }
}

/// Client for the catalog API of the analytics framework.
///
/// Every call builds its URL afresh from the catalog endpoint, so one
/// instance can serve any sequence of calls.
#[derive(Debug, Clone)]
pub struct Catalog<S = HttpService> {
    framework: Framework<S>,
    catalog_type: CatalogType,
    url: Url,
}

impl Catalog<HttpService> {
    /// An analytics catalog on the default API path, configured from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(
            Framework::from_env()?,
            Some(DEFAULT_CATALOG_API),
            CatalogType::Analytics,
        )
    }
}

impl<S: Service> Catalog<S> {
    pub fn new(
        framework: Framework<S>,
        catalog_api: Option<&str>,
        catalog_type: CatalogType,
    ) -> Result<Self> {
        let catalog_api = catalog_api
            .ok_or_else(|| Error::InvalidArgument("catalog api cannot be None".to_string()))?;

        let url = urljoin(framework.base_uri(), catalog_api)?;
        let url = endpoint(&url, &[catalog_type.as_str()], &[]);
        tracing::debug!(%url, %catalog_type, "catalog endpoint");

        Ok(Self {
            framework,
            catalog_type,
            url,
        })
    }

    pub fn catalog_type(&self) -> &CatalogType {
        &self.catalog_type
    }

    /// The catalog endpoint, `{base_uri}{catalog_api}/{catalog_type}`.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn framework(&self) -> &Framework<S> {
        &self.framework
    }

    fn require(&self, function: &'static str, required: CatalogType) -> Result<()> {
        if self.catalog_type.as_str() != required.as_str() {
            return Err(Error::CapabilityMismatch {
                function,
                attribute: "catalog_type",
                required: required.to_string(),
            });
        }
        Ok(())
    }

    fn get_json(&self, url: Url) -> Result<Value> {
        self.framework
            .service()
            .get(&url, ResponseFormat::Json)?
            .into_json(&url)
    }

    /// Returns all analytic catalog entries as specified by page and sort criteria.
    pub fn get_analytics(&self, query: &AnalyticsQuery) -> Result<Value> {
        self.require("get_analytics", CatalogType::Analytics)?;
        let params = query.to_params();
        let params: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        self.get_json(endpoint(&self.url, &[], &params))
    }

    /// Returns all versions of the analytic catalog entry with the given name.
    pub fn get_analytics_version(&self, analytics_name: &str) -> Result<Value> {
        self.require("get_analytics_version", CatalogType::Analytics)?;
        self.get_json(endpoint(&self.url, &[], &[("name", analytics_name)]))
    }

    pub fn get_analytics_for_id(&self, analytics_id: &str) -> Result<Value> {
        self.require("get_analytics_for_id", CatalogType::Analytics)?;
        require_id("analytics id", analytics_id)?;
        self.get_json(endpoint(&self.url, &[analytics_id], &[]))
    }

    pub fn get_artifact_for_analytics_id(&self, analytics_id: &str) -> Result<Value> {
        self.require("get_artifact_for_analytics_id", CatalogType::Analytics)?;
        require_id("analytics id", analytics_id)?;
        self.get_json(endpoint(&self.url, &[analytics_id, "artifacts"], &[]))
    }

    pub fn get_deployment_status_for_analytics_id(
        &self,
        analytics_id: &str,
        request_id: &str,
    ) -> Result<Value> {
        self.require("get_deployment_status_for_analytics_id", CatalogType::Analytics)?;
        require_id("analytics id", analytics_id)?;
        require_id("request id", request_id)?;
        self.get_json(endpoint(
            &self.url,
            &[analytics_id, "deployment", request_id],
            &[],
        ))
    }

    /// Returns the logs of an analytic as plain text.
    pub fn get_logs_for_analytics_id(&self, analytics_id: &str) -> Result<String> {
        self.require("get_logs_for_analytics_id", CatalogType::Analytics)?;
        require_id("analytics id", analytics_id)?;
        let url = endpoint(&self.url, &[analytics_id, "logs"], &[]);
        Ok(self
            .framework
            .service()
            .get(&url, ResponseFormat::Text)?
            .into_text())
    }

    pub fn get_validation_status_for_analytics_id(
        &self,
        analytics_id: &str,
        validation_request_id: &str,
    ) -> Result<Value> {
        self.require("get_validation_status_for_analytics_id", CatalogType::Analytics)?;
        require_id("analytics id", analytics_id)?;
        require_id("validation request id", validation_request_id)?;
        self.get_json(endpoint(
            &self.url,
            &[analytics_id, "validation", validation_request_id],
            &[],
        ))
    }

    /// Creates a catalog entry. The body must be a JSON object.
    pub fn post_analytics(&self, analytics_body: &Value) -> Result<Value> {
        require_mapping(analytics_body, "analytics body should be a mapping")?;
        self.framework.service().post(&self.url, analytics_body)
    }

    /// Deploys an analytic; a missing body is sent as `{}`.
    pub fn post_analytics_deployment(
        &self,
        analytics_id: &str,
        deployment_body: Option<&Value>,
    ) -> Result<Value> {
        require_id("analytics id", analytics_id)?;
        let empty = Value::Object(Map::new());
        let body = deployment_body.unwrap_or(&empty);
        require_mapping(body, "analytics deployment body should be a mapping")?;

        let url = endpoint(&self.url, &[analytics_id, "deployment"], &[]);
        self.framework.service().post(&url, body)
    }

    pub fn post_analytics_execution(
        &self,
        analytics_id: &str,
        input_id: Option<&str>,
        execution_body: Option<&Value>,
    ) -> Result<Value> {
        require_id("analytics id", analytics_id)?;
        let body = present(execution_body).ok_or_else(|| {
            Error::InvalidArgument("execution body needs a valid value".to_string())
        })?;

        let url = input_endpoint(&self.url, analytics_id, "execution", input_id);
        self.framework.service().post(&url, body)
    }

    pub fn post_analytics_validation(
        &self,
        analytics_id: &str,
        input_id: Option<&str>,
        validation_body: Option<&Value>,
    ) -> Result<Value> {
        require_id("analytics id", analytics_id)?;
        let body = present(validation_body).ok_or_else(|| {
            Error::InvalidArgument("validation body needs a valid value".to_string())
        })?;

        let url = input_endpoint(&self.url, analytics_id, "validation", input_id);
        self.framework.service().post(&url, body)
    }

    /// Replaces a catalog entry. The body must be a JSON object.
    pub fn update_analytics_for_id(
        &self,
        analytics_id: &str,
        analytics_body: &Value,
    ) -> Result<Value> {
        require_id("analytics id", analytics_id)?;
        require_mapping(analytics_body, "analytics body should be a mapping")?;
        let url = endpoint(&self.url, &[analytics_id], &[]);
        self.framework.service().put(&url, analytics_body)
    }
}

fn input_endpoint(base: &Url, analytics_id: &str, action: &str, input_id: Option<&str>) -> Url {
    match input_id {
        Some(input_id) => endpoint(base, &[analytics_id, action], &[("inputId", input_id)]),
        None => endpoint(base, &[analytics_id, action], &[]),
    }
}

/// A JSON `null` body counts as absent.
fn present(body: Option<&Value>) -> Option<&Value> {
    body.filter(|b| !b.is_null())
}

fn require_id(name: &str, id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::InvalidArgument(format!("{} cannot be empty", name)));
    }
    Ok(())
}

fn require_mapping(body: &Value, message: &str) -> Result<()> {
    if !body.is_object() {
        return Err(Error::InvalidArgument(message.to_string()));
    }
    Ok(())
}
