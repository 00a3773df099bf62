use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::{pricing, HttpProductApi};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use backend_bridge::{commands::BackendCommand, runtime};
use controller::events::UiEvent;
use ui::{ProductEditorApp, APP_TITLE};

fn main() -> anyhow::Result<()> {
    let args = config::Args::parse();
    let settings = config::load_settings(&args)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();
    tracing::info!(
        api_url = %settings.api_url,
        currency = %settings.currency,
        sync_policy = %settings.sync_policy,
        "starting product editor"
    );

    let api = HttpProductApi::with_timeout(&settings.api_url, settings.request_timeout)
        .context("failed to configure the products API client")?;
    let currency = pricing::find_currency(&settings.currency)
        .with_context(|| format!("unknown currency code '{}'", settings.currency))?;
    let api_url = api.base_url().to_string();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    let _backend = runtime::launch(api, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1024.0, 640.0])
            .with_min_inner_size([720.0, 420.0]),
        ..Default::default()
    };
    let sync_policy = settings.sync_policy;
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ProductEditorApp::new(
                cmd_tx,
                ui_rx,
                sync_policy,
                currency,
                api_url,
            )))
        }),
    )
    .map_err(|err| anyhow!("failed to run the desktop UI: {err}"))
}
