//! Talks to a sinopia registry's authorization endpoints.

mod api;
mod client;
mod error;
mod scope;

pub use api::authorize::{authorize_url, Authorize};
pub use client::SinopiaClient;
pub use error::SinopiaClientError;
pub use reqwest::StatusCode;
pub use scope::scope_key;
