use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use cloudflare::models::{
    text_generation::LLAMA_3_8B_INSTRUCT, Models, DEFAULT_BASE_URL,
};
use crew::{NewsletterCrew, Synthesizer, Unavailable};
use tokio::net::TcpListener;
use toml::{map::Map, Value};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use util::{config_integer, config_str, load_config, load_env, secret};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config("Config.toml")?;
    let secrets = load_env()?;

    let synthesizer = synthesizer(&config, &secrets)?;

    let port = std::env::var("PORT").ok();
    let api_config = api::Config::from_toml(&config, port.as_deref())?;
    let router = api::serve(&api_config, synthesizer)?;

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, api_config.port));
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(task = "listen", address = address.to_string());

    Ok(axum::serve(listener, router).await?)
}

/// The Workers AI crew, or [`Unavailable`] when the credentials are missing
/// so that `/health` still answers and `/generate` reports the cause.
fn synthesizer(
    config: &Map<String, Value>,
    secrets: &Map<String, Value>,
) -> anyhow::Result<Arc<dyn Synthesizer>> {
    let credentials = secret(secrets, "CLOUDFLARE_TOKEN").and_then(|token| {
        Ok((token, secret(secrets, "CLOUDFLARE_ACCOUNT_ID")?))
    });
    let (token, account_id) = match credentials {
        Ok(credentials) => credentials,
        Err(e) => {
            warn!(task = "cloudflare credentials", error = e.to_string());
            return Ok(Arc::new(Unavailable::new(e.to_string())));
        }
    };

    let base_url = config_str(config, "cloudflare", "base_url")
        .unwrap_or(DEFAULT_BASE_URL);
    let model = config_str(config, "cloudflare", "model")
        .unwrap_or(LLAMA_3_8B_INSTRUCT);

    let models = Models::new(base_url, &account_id, &token)
        .context("failed to build workers ai client")?;

    let mut crew = NewsletterCrew::new(models).with_model_name(model);
    if let Ok(max_tokens) = config_integer(config, "cloudflare", "max_tokens")
    {
        let max_tokens = i32::try_from(max_tokens)
            .context("failed to parse max_tokens config")?;
        crew = crew.with_max_tokens(max_tokens);
    }

    Ok(Arc::new(crew))
}
