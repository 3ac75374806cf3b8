//! HTTP plumbing: deadline-bounded client and bearer-authorized requests

pub mod authorized;
pub mod client;

pub use authorized::AuthorizedClient;
pub use client::{HttpClient, HttpClientBuilder, HttpResponse};
