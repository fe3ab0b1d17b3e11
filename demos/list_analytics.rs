use anyhow::Result;
use predix_analytics::{AnalyticsQuery, Catalog, Framework, HttpService, StaticToken};
use predix_analytics::{CatalogType, DEFAULT_CATALOG_API, FrameworkConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Example program that lists the first page of analytics in the catalog.
    // Configure the zone via PREDIX_ANALYTICS_FRAMEWORK_ZONE_ID / _URI and pass
    // a UAA bearer token in PREDIX_TOKEN.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = FrameworkConfig::from_env()?;

    let mut service = HttpService::new(config.zone_id.clone())?;
    if let Ok(token) = std::env::var("PREDIX_TOKEN") {
        service = service.with_token_provider(StaticToken::new(token));
    }

    let catalog = Catalog::new(
        Framework::with_service(config, service),
        Some(DEFAULT_CATALOG_API),
        CatalogType::Analytics,
    )?;

    let page = catalog.get_analytics(&AnalyticsQuery {
        size: 10,
        ..Default::default()
    })?;
    println!("{page:#}");
    Ok(())
}
