use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use assist_client::{AssistClient, AssistService};
use metalift_common::Config;
use metalift_overlay::controller::{OverlayController, PanelAction};
use metalift_overlay::panel::LogPanel;
use metalift_overlay::settings::EnvSettings;
use metalift_page::fixtures::FixturePage;

/// Dry run: drive the whole pipeline against a bundled fixture page.
/// Exercises injection, scoring, and generation without a host page; with
/// ASSIST_API_KEY set it exercises the generative path too.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("metalift=info".parse()?))
        .init();

    info!("Metalift dry run starting...");

    let config = Config::from_env();
    let assist: Option<Arc<dyn AssistService>> = if config.assist_configured() {
        info!("Assist credential configured, generative path enabled");
        Some(Arc::new(AssistClient::new(
            &config.assist_base_url,
            &config.assist_api_key,
        )))
    } else {
        info!("No assist credential, heuristic path only");
        None
    };

    let page = Arc::new(FixturePage::studio());
    let mut controller = OverlayController::new(
        page.clone(),
        Arc::new(LogPanel),
        Arc::new(EnvSettings::new(config.clone())),
        assist,
        &config,
    );

    let state = controller.inject().await;
    info!(%state, "Injection sequence complete");

    controller.handle_action(PanelAction::Analyze).await;
    controller.handle_action(PanelAction::GenerateTitle).await;
    controller.handle_action(PanelAction::GenerateTags).await;

    // Simulate the user rewriting the title, then re-analyze.
    page.edit_field("aria-label", "title", "A Short Title");
    controller.on_edit_activity();
    controller.handle_action(PanelAction::Analyze).await;

    info!("Dry run complete");
    Ok(())
}
