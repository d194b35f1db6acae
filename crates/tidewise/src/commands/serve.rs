//! Start the HTTP API server

use anyhow::Result;
use tracing::info;

use super::common::open_engine;
use crate::http::ApiState;
use crate::settings::Settings;

pub async fn serve(
    settings: &Settings,
    port: Option<u16>,
    cors_origin: Option<String>,
) -> Result<()> {
    let handle = open_engine(settings)?;

    let port = port.unwrap_or(settings.http.port);
    let cors_origin = cors_origin.or_else(|| settings.http.cors_origin.clone());

    info!("Starting Tidewise HTTP API server");
    info!("Catalog products: {}", handle.engine.catalog().len());
    info!("Default profile: {}", settings.default_profile);

    let state = ApiState::new(
        handle.engine,
        handle.sqlite,
        settings.default_profile.clone(),
        settings.http.search_timeout(),
    );

    crate::http::serve_http(state, port, cors_origin).await
}
