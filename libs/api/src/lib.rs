use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use crew::Synthesizer;
use toml::{map::Map, Value};
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod generate;
pub mod healthz;
pub mod not_found;
mod response;
pub mod template;

pub static DEFAULT_PORT: u16 = 8080;

#[derive(Debug)]
pub enum ApiError {
    ValidationError(String),
    ResourceError(String),
    UpstreamError(String),
}

#[derive(Clone)]
pub struct ApiState {
    synthesizer: Arc<dyn Synthesizer>,
    template_path: PathBuf,
}

impl ApiState {
    pub fn new(synthesizer: Arc<dyn Synthesizer>) -> Self {
        Self {
            synthesizer,
            template_path: template::default_path(),
        }
    }

    pub fn with_template_path(mut self, template_path: PathBuf) -> Self {
        self.template_path = template_path;
        self
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub cors_origins: Vec<HeaderValue>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Reads the `[server]` table. `port_override` is the `PORT` variable
    /// and wins over the file.
    pub fn from_toml(
        config: &Map<String, Value>,
        port_override: Option<&str>,
    ) -> anyhow::Result<Self> {
        let server = config.get("server");

        let port = match port_override {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid PORT: {port}"))?,
            None => match server.and_then(|s| s.get("port")) {
                Some(port) => port
                    .as_integer()
                    .and_then(|port| u16::try_from(port).ok())
                    .context("failed to parse port config")?,
                None => DEFAULT_PORT,
            },
        };

        let mut cors_origins = Vec::new();
        if let Some(origins) = server.and_then(|s| s.get("cors_origins")) {
            let origins = origins
                .as_array()
                .context("failed to parse cors_origins config")?;
            for origin in origins {
                let origin = origin
                    .as_str()
                    .context("failed to parse cors_origins config")?;
                cors_origins.push(
                    origin
                        .parse()
                        .with_context(|| format!("invalid origin: {origin}"))?,
                );
            }
        }

        Ok(Self { port, cors_origins })
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(healthz::get_health, generate::post_generate),
    components(schemas(
        healthz::HealthResponse,
        generate::request::GenerateRequest,
        generate::response::GenerateResponse,
        response::ErrorResponse
    )),
    tags(
        (name = "newsletter", description = "Newsletter generation API")
    )
)]
struct ApiDoc;

pub fn serve(
    config: &Config,
    synthesizer: Arc<dyn Synthesizer>,
) -> anyhow::Result<Router> {
    info!(task = "start api serving", port = config.port);

    let state = ApiState::new(synthesizer);
    info!(
        task = "template",
        path = state.template_path.display().to_string()
    );

    Ok(router(state, config))
}

pub fn router(state: ApiState, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origins.clone())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(healthz::get_health))
        .route("/generate", post(generate::post_generate))
        .with_state(state)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .fallback(not_found::get_404)
        .layer(CatchPanicLayer::custom(response::handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
