pub mod config;
pub mod error;
pub mod linkedin_analysis;
pub mod narrative;
pub mod pipeline;
pub mod report;
pub mod text_analysis;
pub mod web;

pub use config::AppConfig;
pub use error::AnalyzerError;
pub use narrative::{generate_narrative, NarrativeResult};
pub use pipeline::ProfileAnalyzer;
pub use report::ProfileReport;
pub use text_analysis::{find_improvement_mentions, Annotator, RuleTable};
pub use web::start_web_server;

