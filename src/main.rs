use anyhow::{Context, Result};
use hive_assistant::integration::{Assistant, AssistantConfig};
use hive_assistant::ui::{render_event, Console};
use std::thread;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hive_assistant=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting HiveMarket assistant");

    let config = AssistantConfig::load_default().context("loading assistant config")?;
    let (assistant, events) = Assistant::new(config)?;

    // Render events on their own thread so replies show up while we wait
    // for input. The loop ends once every assistant handle is gone.
    let renderer = thread::spawn(move || {
        for event in events {
            if let Some(line) = render_event(&event) {
                println!("{}", line);
            }
        }
    });

    let mut console = Console::new(assistant, std::io::stdout());
    println!("Type /help for commands.");
    console.show_alerts()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !console.handle_line(&line)? {
            break;
        }
    }

    info!("Shutting down");
    console.finish().await?;

    if renderer.join().is_err() {
        anyhow::bail!("event renderer panicked");
    }
    Ok(())
}
