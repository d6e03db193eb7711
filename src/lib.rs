pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{AdviceDesk, Selection};
use anyhow::Result;
use tracing::{debug, info};

/// Dashboard views and actions that need a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Summary,
    Chart,
    Platforms,
    Advise {
        product: Option<String>,
        question: String,
    },
}

/// Loads the configuration, applies the platform selection and runs `command`.
///
/// `platform` picks the platform by id; the first configured platform is used
/// when it is `None`.
pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    platform: Option<&str>,
) -> Result<()> {
    info!("E-Commerce Strategy Advisor starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let catalog = &config.catalog;
    let mut selection = Selection::new(catalog)?;
    if let Some(id) = platform {
        selection.select_platform(catalog, id)?;
    }

    match command {
        AppCommand::Summary => cli::summary::run(catalog, &selection),
        AppCommand::Chart => cli::chart::run(catalog, &selection),
        AppCommand::Platforms => {
            cli::platforms::run(catalog, &selection);
            Ok(())
        }
        AppCommand::Advise { product, question } => {
            if let Some(id) = product.as_deref() {
                selection.select_product(catalog, Some(id))?;
            }
            let provider = providers::GeminiAdviceProvider::from_config(&config.providers.gemini);
            let desk = AdviceDesk::new(provider);
            cli::advise::run(&desk, catalog, &selection, &question).await
        }
    }
}
