use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eventhub::cli::{Cli, Commands, OutputFormat};
use eventhub::output::{format_output, pretty};
use eventhub::{AppContext, Config};
use eventhub_client::EventHubClient;
use eventhub_core::catalog::{CheckoutRequest, EventQuery};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventhub=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;

    // Checkout is remote only and never opens the cache
    if let Commands::Checkout {
        id,
        quantity,
        name,
        email,
    } = &cli.command
    {
        let client = EventHubClient::with_timeout(&config.api_url, config.remote_timeout())?;
        let request = CheckoutRequest::new(id.as_str(), *quantity, name.as_str(), email.as_str());
        let response = client.checkout(&request).await?;
        match cli.format {
            OutputFormat::Json => println!("{}", format_output(&response, cli.format)),
            OutputFormat::Pretty => println!("{}", pretty::format_checkout(&response)),
        }
        return Ok(());
    }

    let context = AppContext::open(config).await?;

    let result = run(&context, cli).await;

    context.shutdown().await?;
    result
}

async fn run(context: &AppContext, cli: Cli) -> Result<()> {
    let sync = context.sync();
    let page_size = context.config().page_size;

    match cli.command {
        Commands::Events {
            page,
            query,
            category,
        } => {
            let mut request = EventQuery::new(page)
                .with_page_size(page_size)
                .with_category(category);
            if let Some(text) = query {
                request = request.with_search(text);
            }
            let response = sync.fetch_events(&request).await;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&response, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_catalog(&response)),
            }
        }
        Commands::Event { id } => {
            let response = sync.fetch_event_detail(&id).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&response, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_detail(&response)),
            }
        }
        Commands::Favorites => {
            let favorites = sync.favorites().await;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&favorites, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_favorites(&favorites)),
            }
        }
        Commands::Toggle { id } => {
            let is_favorite = sync.toggle_favorite(&id).await?;
            match cli.format {
                OutputFormat::Json => println!(
                    "{}",
                    format_output(
                        &serde_json::json!({ "id": id, "isFavorite": is_favorite }),
                        cli.format
                    )
                ),
                OutputFormat::Pretty => println!("{}", pretty::format_toggle(&id, is_favorite)),
            }
        }
        Commands::Evict => {
            let removed = context.cache().evict_stale(context.config().retention()).await;
            match cli.format {
                OutputFormat::Json => println!(
                    "{}",
                    format_output(&serde_json::json!({ "removed": removed }), cli.format)
                ),
                OutputFormat::Pretty => println!("Evicted {removed} stale events"),
            }
        }
        Commands::Clear => {
            let removed = context.cache().clear_all().await;
            match cli.format {
                OutputFormat::Json => println!(
                    "{}",
                    format_output(&serde_json::json!({ "removed": removed }), cli.format)
                ),
                OutputFormat::Pretty => println!("Cleared {removed} cached events"),
            }
        }
        // Handled before the context is opened
        Commands::Checkout { .. } => {}
    }

    Ok(())
}
