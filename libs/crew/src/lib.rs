//! The newsletter crew: turns a topic, a personal message and an HTML
//! template into a finished newsletter.
//!
//! The service only sees the [`Synthesizer`] capability. [`NewsletterCrew`]
//! is the production implementation backed by a Workers AI text model;
//! [`Unavailable`] stands in when the model cannot be reached at all.

pub use futures_util::future::BoxFuture;

mod newsletter;
mod unavailable;

pub use newsletter::{extract_html, NewsletterCrew};
pub use unavailable::Unavailable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsletterInputs {
    pub topic: String,
    pub personal_message: String,
    pub html_template: String,
}

pub trait Synthesizer: Send + Sync {
    /// Produces the newsletter HTML. May take minutes; callers apply no
    /// timeout of their own.
    fn synthesize(
        &self,
        inputs: NewsletterInputs,
    ) -> BoxFuture<'_, anyhow::Result<String>>;
}
