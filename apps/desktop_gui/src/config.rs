use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use clap::Parser;
use client_core::{pricing, SyncPolicy, DEFAULT_API_URL};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "product_editor.toml";

#[derive(Parser, Debug, Default)]
#[command(name = "product-editor", about = "Desktop editor for the products REST API")]
pub struct Args {
    /// Settings file; defaults to ./product_editor.toml when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Base URL of the REST API, e.g. http://127.0.0.1:8000/api/
    #[arg(long)]
    pub api_url: Option<String>,
    /// ISO-4217 code used to display prices.
    #[arg(long)]
    pub currency: Option<String>,
    /// `refetch` or `apply_response`.
    #[arg(long)]
    pub sync_policy: Option<SyncPolicy>,
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub currency: String,
    pub sync_policy: SyncPolicy,
    pub request_timeout: Duration,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            currency: pricing::DEFAULT_CURRENCY.into(),
            sync_policy: SyncPolicy::default(),
            request_timeout: Duration::from_secs(10),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_url: Option<String>,
    currency: Option<String>,
    sync_policy: Option<SyncPolicy>,
    request_timeout_secs: Option<u64>,
    log_filter: Option<String>,
}

/// Defaults, then the settings file, then environment, then command line.
pub fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    if let Some(file_cfg) = read_settings_file(&path, args.config.is_some())? {
        settings.apply_file(file_cfg);
    }

    settings.apply_env(|name| std::env::var(name).ok())?;
    settings.apply_args(args);
    settings.validate()?;
    Ok(settings)
}

fn read_settings_file(path: &Path, required: bool) -> anyhow::Result<Option<FileSettings>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => return Ok(None),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    };
    let parsed = toml::from_str(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
    Ok(Some(parsed))
}

impl Settings {
    fn apply_file(&mut self, file_cfg: FileSettings) {
        if let Some(v) = file_cfg.api_url {
            self.api_url = v;
        }
        if let Some(v) = file_cfg.currency {
            self.currency = v;
        }
        if let Some(v) = file_cfg.sync_policy {
            self.sync_policy = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            self.request_timeout = Duration::from_secs(v);
        }
        if let Some(v) = file_cfg.log_filter {
            self.log_filter = v;
        }
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = read("PRODUCT_API_URL") {
            self.api_url = v;
        }
        if let Some(v) = read("APP__API_URL") {
            self.api_url = v;
        }
        if let Some(v) = read("APP__CURRENCY") {
            self.currency = v;
        }
        if let Some(v) = read("APP__SYNC_POLICY") {
            self.sync_policy = v
                .parse()
                .map_err(anyhow::Error::msg)
                .context("invalid APP__SYNC_POLICY")?;
        }
        if let Some(v) = read("APP__REQUEST_TIMEOUT_SECS") {
            let secs = v
                .trim()
                .parse::<u64>()
                .context("invalid APP__REQUEST_TIMEOUT_SECS")?;
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(v) = read("APP__LOG_FILTER") {
            self.log_filter = v;
        }
        Ok(())
    }

    fn apply_args(&mut self, args: &Args) {
        if let Some(v) = &args.api_url {
            self.api_url = v.clone();
        }
        if let Some(v) = &args.currency {
            self.currency = v.clone();
        }
        if let Some(v) = args.sync_policy {
            self.sync_policy = v;
        }
        if let Some(v) = args.request_timeout_secs {
            self.request_timeout = Duration::from_secs(v);
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.trim().is_empty() {
            bail!("api_url must not be empty");
        }
        if pricing::find_currency(&self.currency).is_none() {
            bail!("unknown currency code '{}'", self.currency);
        }
        if self.request_timeout.is_zero() {
            bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
