use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};

use crate::backend::Backend;

pub static DOWNLOAD_FILE_NAME: &str = "newsletter.html";
pub static EMPTY_FIELDS_WARNING: &str =
    "Please fill in both the topic and personal message fields.";
pub static SUCCESS_MESSAGE: &str = "Newsletter generated successfully!";
pub static GENERATING_MESSAGE: &str =
    "Generating newsletter... This may take a few minutes.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Generating,
    Succeeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submit {
    /// The backend is unavailable; the control is greyed out.
    Disabled,
    Rejected,
    Started,
}

/// Everything one UI session knows. Passed through every render cycle.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub topic: String,
    pub personal_message: String,
    pub newsletter: Option<String>,
    pub generating: bool,
    pub backend_healthy: bool,
    pub notice: Option<Notice>,
}

impl Session {
    pub fn phase(&self) -> Phase {
        if self.generating {
            Phase::Generating
        } else if self.result().is_some() {
            Phase::Succeeded
        } else {
            Phase::Idle
        }
    }

    /// The generated newsletter, if any and non-empty.
    pub fn result(&self) -> Option<&str> {
        self.newsletter.as_deref().filter(|html| !html.is_empty())
    }

    pub fn generate_enabled(&self) -> bool {
        self.backend_healthy && !self.generating
    }

    pub async fn refresh_health<B: Backend>(&mut self, backend: &B) -> bool {
        self.backend_healthy = backend.check_health().await;
        self.backend_healthy
    }

    /// Handles a press of the generate control.
    pub fn submit(&mut self) -> Submit {
        if !self.generate_enabled() {
            return Submit::Disabled;
        }

        if self.topic.is_empty() || self.personal_message.is_empty() {
            self.notice =
                Some(Notice::Warning(EMPTY_FIELDS_WARNING.to_string()));
            return Submit::Rejected;
        }

        self.notice = None;
        self.generating = true;
        Submit::Started
    }

    /// One render cycle. Performs the pending generation call, if any, and
    /// always leaves the generating flag cleared.
    pub async fn run_cycle<B: Backend>(&mut self, backend: &B) -> Phase {
        if self.generating {
            info!(task = "generate", topic = self.topic.as_str());

            match backend.generate(&self.topic, &self.personal_message).await {
                Ok(newsletter) => self.newsletter = Some(newsletter),
                Err(e) => {
                    warn!(task = "generate", error = e.to_string());
                    self.newsletter = None;
                    self.notice = Some(Notice::Error(e.to_string()));
                }
            }

            self.generating = false;
        }

        self.phase()
    }

    /// Saves the newsletter as `newsletter.html` inside `dir`.
    pub fn download(&mut self, dir: &Path) -> anyhow::Result<PathBuf> {
        let html = self
            .result()
            .context("there is no newsletter to download yet")?;

        let path = dir.join(DOWNLOAD_FILE_NAME);
        std::fs::write(&path, html)
            .with_context(|| format!("failed to write {}", path.display()))?;

        info!(task = "download", path = path.display().to_string());
        self.notice = Some(Notice::Info(format!("Saved {}", path.display())));
        Ok(path)
    }
}
