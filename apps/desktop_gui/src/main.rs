mod backend_bridge;
mod controller;
mod ui;

use std::sync::Arc;

use anyhow::anyhow;
use clap::Parser;
use client_core::{load_settings, HttpRotaClient, RotaApi};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{theme::Theme, RotaDesktopApp};

const APP_TITLE: &str = "Duty Rotation Admin";

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the rotation API; overrides `rota.toml` and the environment.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    rotation_id: Option<i64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let settings = load_settings()?.with_overrides(args.api_url, args.rotation_id);
    let client = HttpRotaClient::from_settings(&settings)?;
    tracing::info!(
        api_url = client.base_url(),
        rotation_id = %settings.rotation_id,
        "starting desktop client"
    );
    let api: Arc<dyn RotaApi> = Arc::new(client);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(api, cmd_rx, ui_tx);

    let theme = Theme::standard();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    let api_url = settings.api_url.clone();
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(theme.visuals());
            Ok(Box::new(RotaDesktopApp::new(cmd_tx, ui_rx, theme, api_url)))
        }),
    )
    .map_err(|err| anyhow!("desktop ui exited with an error: {err}"))
}
