use std::{fs::File, path::PathBuf, sync::Mutex};

use anyhow::Context;
use clap::Parser;
use client::{
    app::{health_interval, App, HEALTH_REFRESH},
    HttpBackend, DEFAULT_BACKEND_URL,
};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod tui;
mod ui;

#[derive(Parser)]
#[command(name = "newsletter-ui")]
#[command(about = "Generate an HTML newsletter with your team of AI agents")]
struct Cli {
    /// Base URL of the generation service
    #[arg(long, env = "BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,
    /// Directory newsletter.html is downloaded into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
    /// Log file; the terminal itself is taken by the UI
    #[arg(long, default_value = "newsletter-ui.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log_file).with_context(|| {
        format!("failed to create {}", cli.log_file.display())
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();

    info!(task = "start ui", backend_url = cli.backend_url.as_str());
    let mut app = App::new(HttpBackend::new(&cli.backend_url), cli.output_dir);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app).await;
    tui::restore()?;

    result
}

async fn run(
    terminal: &mut tui::Tui,
    app: &mut App<HttpBackend>,
) -> anyhow::Result<()> {
    let mut events = EventStream::new();
    let mut health = health_interval(HEALTH_REFRESH);

    while !app.should_quit {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // The call blocks the loop; the spinner frame above stays on screen.
        if app.session.generating {
            app.session.run_cycle(&app.backend).await;
            continue;
        }

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key)))
                    if key.kind == KeyEventKind::Press =>
                {
                    app.handle_key(key).await;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            _ = health.tick() => {
                app.refresh_health().await;
            }
        }
    }

    Ok(())
}
