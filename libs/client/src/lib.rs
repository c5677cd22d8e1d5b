//! Terminal front end for the newsletter service.
//!
//! [`Session`] holds the UI state and drives the
//! `idle -> generating -> (success | failed) -> idle` cycle against any
//! [`Backend`]; [`HttpBackend`] talks to the real service.

pub mod app;
pub mod backend;
pub mod session;

pub use backend::{Backend, ClientError, HttpBackend, DEFAULT_BACKEND_URL};
pub use session::{Notice, Phase, Session, Submit};
