// src/linkedin_analysis/mod.rs
//! LinkedIn authentication and profile retrieval

pub mod auth;
pub mod profile_fetcher;
pub mod types;

pub use auth::{authenticate, Credentials, LinkedinConnector, ProfileConnector};
pub use profile_fetcher::{extract_summary, fetch_summary, LinkedinClient, ProfileService};
pub use types::ProfileRecord;
