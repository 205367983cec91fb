mod client;
mod error;
mod models;
mod render;
mod utils;
mod video;

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use crate::client::{OllamaApiClient, RecipeService, RetryPolicy};
use crate::models::{ModelOptions, RecipeQuery};
use crate::render::{render_failure, render_json, render_text};
use crate::utils::{AppConfig, init_logger, normalize_ingredients};
use crate::video::VideoResolver;

#[derive(Debug, Parser)]
#[command(name = "recipe-suggest", version)]
#[command(about = "Suggest recipes from the ingredients on hand using a local Ollama model", long_about = None)]
struct Cli {
    /// Comma-separated ingredients
    #[arg(long)]
    ingredients: String,

    /// Number of servings
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    servings: u32,

    /// Dietary preference
    #[arg(long)]
    diet: Option<String>,

    /// Ollama model name (default: mistral)
    #[arg(long)]
    model: Option<String>,

    /// Ollama base URL (default: http://localhost:11434)
    #[arg(long)]
    base_url: Option<String>,

    /// Sampling temperature passed to the model
    #[arg(long)]
    temperature: Option<f64>,

    /// Don't re-ask the model when its first reply has no usable dishes
    #[arg(long)]
    no_retry: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Config file (default: ./recipe-suggest.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if self.temperature.is_some() {
            config.temperature = self.temperature;
        }
        if self.no_retry {
            config.retry_on_malformed = false;
        }
    }

    fn query(&self) -> RecipeQuery {
        RecipeQuery {
            ingredients: self.ingredients.clone(),
            servings: self.servings,
            diet: self.diet.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::from_file(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    config.validate()?;

    // Initialize logging
    let _log_guard = init_logger(&config);

    info!("Configuration:");
    info!("  Base URL: {}", config.base_url);
    info!("  Model: {}", config.model);
    info!("  Request timeout: {}s", config.request_timeout_secs);
    info!("  Retry on malformed: {}", config.retry_on_malformed);

    if normalize_ingredients(&cli.ingredients).is_empty() {
        bail!("--ingredients must name at least one ingredient");
    }

    let model = OllamaApiClient::new(&config.base_url, &config.model, config.request_timeout())?;
    let video_resolver = VideoResolver::new(&config.oembed_endpoint, config.video_timeout())?;
    let options = config.temperature.map(|temperature| ModelOptions {
        temperature: Some(temperature),
        ..ModelOptions::default()
    });
    let service = RecipeService::new(
        Box::new(model),
        video_resolver,
        RetryPolicy::from_flag(config.retry_on_malformed),
        options,
    );

    eprintln!("Contacting local model...");
    let suggestions = service
        .suggest(&cli.query())
        .await
        .map_err(|e| {
            error!("Recipe request failed: {}", e);
            e
        })
        .context("Could not get recipes from the model")?;

    if !suggestions.response.has_dishes() {
        print!("{}", render_failure(&suggestions.response));
        return Ok(ExitCode::FAILURE);
    }

    if cli.json {
        println!("{}", render_json(&suggestions)?);
    } else {
        print!("{}", render_text(&suggestions));
    }

    Ok(ExitCode::SUCCESS)
}
