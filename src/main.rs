use anyhow::Result;
use clap::{Parser, Subcommand};
use profile_analyzer::text_analysis::Annotator;
use profile_analyzer::{start_web_server, AppConfig, ProfileAnalyzer, RuleTable};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "profile-analyzer")]
#[command(about = "Analyze LinkedIn profiles with pattern matching and AI summaries")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// YAML file with non-secret settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a profile and print its AI summary, recommendations and pattern matches
    Analyze {
        profile_url: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the pattern annotator on a piece of text, offline
    Annotate {
        text: String,
        /// Also print every token with its part-of-speech tag
        #[arg(long)]
        tags: bool,
    },
    /// Serve the JSON API
    Serve {
        /// Overrides ROCKET_PORT and the config file
        #[arg(long)]
        port: Option<u16>,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("profile_analyzer=info,rocket::server=off"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Analyze { profile_url, json } => {
            let analyzer = ProfileAnalyzer::from_config(&config)?;
            match analyzer.analyze(&profile_url).await {
                Ok(report) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&report)?);
                    } else {
                        print!("{}", report.render_text());
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) if e.is_warning() => {
                    eprintln!("⚠️  {}", e);
                    Ok(ExitCode::from(2))
                }
                Err(e) => {
                    eprintln!("❌ {}", e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        Command::Annotate { text, tags } => {
            let rules = RuleTable::load_or_default(config.rules_path.as_deref())?;
            let annotator = Annotator::new(rules);

            if tags {
                for token in annotator.tag(&text) {
                    println!("{:<20} {}", token.text, token.pos);
                }
                println!();
            }

            let spans = annotator.annotate(&text);
            if spans.is_empty() {
                println!("No pattern matches.");
            }
            for span in spans {
                println!("[{}] {}", span.label, span.text);
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Serve { port } => {
            let port = port.unwrap_or(config.port);

            let analyzer = ProfileAnalyzer::from_config(&config)?;
            info!("Tagger: {}", analyzer.annotator().tagger_version());
            start_web_server(analyzer, port).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
