use clap::{Parser, Subcommand};
use log::info;
use sp_people::logging::config::LogConfig;
use sp_people::logging::LoggingSystem;
use sp_people::{load_client_config, PeopleClient, Person};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the client configuration file (TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(long, default_value = "WARN")]
    log_level: String,

    /// Answer from a built-in sample directory instead of a live site
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for people with a keyword query
    Search {
        /// Keyword query text
        query: String,
        /// Request every property the Person record maps from search
        #[arg(long)]
        extra: bool,
        /// Maximum number of results (defaults to the configured row limit)
        #[arg(long)]
        row_limit: Option<u32>,
    },
    /// Load a single user profile by account name
    Profile {
        /// Account name, e.g. i:0#.f|membership|user@contoso.com
        account: String,
    },
    /// List the enterprise keyword terms
    Terms,
}

fn build_client(cli: &Cli) -> Result<PeopleClient, Box<dyn std::error::Error>> {
    if cli.mock {
        #[cfg(feature = "mock")]
        {
            info!("Using sample directory");
            return Ok(PeopleClient::with_transport(
                std::sync::Arc::new(sp_people::MockTransport::sample_directory()),
                sp_people::config::DEFAULT_ROW_LIMIT,
            ));
        }
        #[cfg(not(feature = "mock"))]
        return Err("--mock needs the `mock` feature".into());
    }

    let config = load_client_config(cli.config.as_deref())?;
    info!("Connecting to {}", config.site_root());
    Ok(PeopleClient::new(config)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_config = LogConfig {
        default_level: cli.log_level.clone(),
        ..LogConfig::default()
    };
    LoggingSystem::init_with_config(log_config)?;

    let client = build_client(&cli)?;

    match cli.command {
        Commands::Search {
            query,
            extra,
            row_limit,
        } => {
            let row_limit = row_limit.unwrap_or_else(|| client.row_limit());
            let people: Vec<Person> = client.get_people_by_query(&query, extra, row_limit).await?;
            info!("Found {} people", people.len());
            println!("{}", serde_json::to_string_pretty(&people)?);
        }
        Commands::Profile { account } => {
            let person = client.get_person(&account).await?;
            println!("{}", serde_json::to_string_pretty(&person)?);
        }
        Commands::Terms => {
            let terms = client.get_all_terms().await?;
            info!("Found {} terms", terms.len());
            println!("{}", serde_json::to_string_pretty(&terms)?);
        }
    }

    Ok(())
}
