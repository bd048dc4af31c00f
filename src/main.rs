use anyhow::{Context, Result};
use config::Config;
use github::GithubClient;
use log_subscriber::MinimalTracer;
use tracing::error;

mod config;
mod github;
mod log_subscriber;

fn print_info() {
    println!("Description: {}", config::DESCRIPTION);
    println!("Input variables:");
    for (name, required, description) in config::INPUT_VARIABLES {
        let required = if *required { "required" } else { "optional" };
        println!("    {name} ({required}): {description}");
    }
    println!("Output variables:");
    for (name, description) in config::OUTPUT_VARIABLES {
        println!("    {name}: {description}");
    }
}

async fn run() -> Result<()> {
    let config = Config::from_env()?;
    let client = GithubClient::new(
        &config.api_url,
        config.github_token.as_deref(),
        config.timeout,
    )?;

    let info = release_selector::find_release_info(&client, &config.selector).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&info).context("Failed to serialize outputs")?
    );

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    _ = dotenvy::dotenv();
    _ = MinimalTracer::register();

    if std::env::args().nth(1).as_deref() == Some("info") {
        print_info();
        return;
    }

    if let Err(e) = run().await {
        error!("{e:#}");
        std::process::exit(1);
    }
}
