use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use byteguide_agent::{DirectoryToolbox, MallGuide, OpenAiResponder, STORE_NOT_FOUND};
use byteguide_core::AppConfig;
use byteguide_directory::{DirectoryCache, DirectoryClient, StoreSearch};

/// The showcase queries run by `demo`.
const DEMO_QUERIES: [&str; 3] = [
    "Hi I'm looking for a hot coffee",
    "Help me, I'm looking for kids clothes",
    "Recommend me attractions for families",
];

#[derive(Debug, Parser)]
#[command(name = "byteguide")]
#[command(about = "Conversational store finder for Mall of America")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the showcase queries through the guide.
    Demo,
    /// Ask the guide one free-text question.
    Ask {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Search the directory directly, without the agent.
    Stores {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Look up a store's hours directly, without the agent.
    Hours {
        #[arg(required = true)]
        name: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = byteguide_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => {
            let guide = build_guide(&config, build_search(&config)?)?;
            for query in DEMO_QUERIES {
                run_query(&guide, query).await;
            }
        }
        Commands::Ask { query } => {
            let guide = build_guide(&config, build_search(&config)?)?;
            run_query(&guide, &query.join(" ")).await;
        }
        Commands::Stores { query } => {
            let search = build_search(&config)?;
            let results = search.search(&query.join(" ")).await;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Hours { name } => {
            let search = build_search(&config)?;
            match search.hours_for(&name.join(" ")).await {
                Some(hours) => println!("{}", serde_json::to_string_pretty(&hours)?),
                None => println!("{STORE_NOT_FOUND}"),
            }
        }
    }

    Ok(())
}

fn build_search(config: &AppConfig) -> anyhow::Result<StoreSearch> {
    let client = DirectoryClient::new(
        &config.directory_url,
        config.directory_timeout_secs,
        &config.user_agent,
    )?;
    Ok(StoreSearch::new(Arc::new(DirectoryCache::new(client))))
}

fn build_guide(
    config: &AppConfig,
    search: StoreSearch,
) -> anyhow::Result<MallGuide<OpenAiResponder>> {
    let api_key = config
        .require_openai_api_key()
        .context("agent commands need an OpenAI API key")?;
    let responder = OpenAiResponder::with_base_url(
        api_key,
        &config.model,
        config.temperature,
        config.max_tool_steps,
        &config.openai_base_url,
    )?;
    Ok(MallGuide::new(
        responder,
        Box::new(DirectoryToolbox::new(search)),
    ))
}

async fn run_query(guide: &MallGuide<OpenAiResponder>, query: &str) {
    println!("\n🔍 Searching for: {query}");
    let result = guide.find_store(query).await;
    println!("{result}");
    println!("{}", "-".repeat(50));
}
