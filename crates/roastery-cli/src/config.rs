// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use roastery_app::Locale;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";
pub const CONFIG_PATH_ENV: &str = "ROASTERY_CONFIG_PATH";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub logging: Logging,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            logging: Logging::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub locale: Option<String>,
    pub start_dir: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            locale: Some(Locale::default().as_str().to_owned()),
            start_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    pub level: Option<String>,
    pub dir: Option<String>,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            dir: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;

        let app_dir = config_root.join(roastery_db::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` and keep values under [ui] and [logging]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(locale) = &self.ui.locale
            && Locale::parse(locale).is_none()
        {
            let supported = Locale::ALL
                .iter()
                .map(|locale| format!("{:?}", locale.as_str()))
                .collect::<Vec<_>>()
                .join(", ");
            bail!(
                "ui.locale in {} must be one of {supported}, got {locale:?}",
                path.display()
            );
        }

        if let Some(start_dir) = &self.ui.start_dir
            && start_dir.trim().is_empty()
        {
            bail!(
                "ui.start_dir in {} is empty; remove it or set a directory",
                path.display()
            );
        }

        if let Some(level) = &self.logging.level {
            if level.trim().is_empty() {
                bail!(
                    "logging.level in {} is empty; use a tracing directive such as \"info\"",
                    path.display()
                );
            }
            EnvFilter::try_new(level).with_context(|| {
                format!(
                    "logging.level in {} is not a valid filter directive",
                    path.display()
                )
            })?;
        }

        if let Some(dir) = &self.logging.dir
            && dir.trim().is_empty()
        {
            bail!(
                "logging.dir in {} is empty; remove it to use the default log directory",
                path.display()
            );
        }

        Ok(())
    }

    pub fn locale(&self) -> Locale {
        self.ui
            .locale
            .as_deref()
            .and_then(Locale::parse)
            .unwrap_or_default()
    }

    pub fn start_dir(&self) -> Option<PathBuf> {
        self.ui
            .start_dir
            .as_deref()
            .map(|dir| expand_home(dir, dirs::home_dir().as_deref()))
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.logging.dir {
            return Ok(expand_home(dir, dirs::home_dir().as_deref()));
        }
        let data_root = dirs::data_local_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [logging].dir in the config file")
        })?;
        Ok(data_root.join(roastery_db::APP_NAME).join("logs"))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# roastery config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\n# \"en\" or \"ru\"\nlocale = \"en\"\n# Optional. Directory the open prompt starts in.\n# start_dir = \"~/coffee\"\n\n[logging]\n# tracing filter directive; {} overrides it\nlevel = \"{}\"\n# Optional. Default is the platform data dir (for example ~/.local/share/roastery/logs)\n# dir = \"/absolute/path/to/logs\"\n",
            path.display(),
            crate::logging::LOG_FILTER_ENV,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn expand_home(raw: &str, home: Option<&Path>) -> PathBuf {
    match (raw.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ if raw == "~" => home.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(raw)),
        _ => PathBuf::from(raw),
    }
}
