//! Client for Cloudflare Workers AI.

pub mod models;
