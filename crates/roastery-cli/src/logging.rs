// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable that replaces `[logging].level` when set.
pub const LOG_FILTER_ENV: &str = "ROASTERY_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub dir: PathBuf,
    pub file_name: String,
}

impl LogSettings {
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// Installs the global subscriber. Output goes to a file because the
/// terminal belongs to the interface while it runs.
pub fn init(settings: &LogSettings) -> Result<()> {
    fs::create_dir_all(&settings.dir)
        .with_context(|| format!("create log directory {}", settings.dir.display()))?;

    let filter = build_filter(&settings.level, env::var(LOG_FILTER_ENV).ok())?;
    let appender = tracing_appender::rolling::never(&settings.dir, &settings.file_name);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))?;

    tracing::info!(
        file = %settings.file_path().display(),
        level = %settings.level,
        "logging initialized"
    );
    Ok(())
}

fn build_filter(level: &str, env_override: Option<String>) -> Result<EnvFilter> {
    let directive = env_override
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| level.to_owned());
    EnvFilter::try_new(&directive).with_context(|| {
        format!(
            "invalid log filter {directive:?}; use a tracing directive such as \"info\" or \"roastery_db=debug\""
        )
    })
}
