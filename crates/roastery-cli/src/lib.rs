// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod config;
pub mod fault;
pub mod logging;
pub mod options;
pub mod runtime;

use anyhow::{Context, Result};
use config::Config;
use logging::LogSettings;
use options::{help_text, parse_cli_args};
use roastery_app::{BrowserState, EditorState};
use roastery_db::{AccessMode, Store};
use roastery_tui::UiOptions;
use runtime::StoreRuntime;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    Browser,
    Editor,
}

impl Program {
    pub const fn binary_name(self) -> &'static str {
        match self {
            Self::Browser => "roastery-browser",
            Self::Editor => "roastery-editor",
        }
    }

    pub const fn summary(self) -> &'static str {
        match self {
            Self::Browser => "read-only coffee catalog listing",
            Self::Editor => "coffee catalog table editor",
        }
    }

    pub const fn access_mode(self) -> AccessMode {
        match self {
            Self::Browser => AccessMode::ReadOnly,
            Self::Editor => AccessMode::ReadWrite,
        }
    }

    fn log_settings(self, config: &Config) -> Result<LogSettings> {
        Ok(LogSettings {
            level: config.log_level().to_owned(),
            dir: config.log_dir()?,
            file_name: format!("{}.log", self.binary_name()),
        })
    }
}

/// Entry point shared by both binaries. Errors returned here end the
/// process with status 1.
pub fn run<I, S>(program: Program, args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fault::install_panic_hook();
    let options = parse_cli_args(program, args, Config::default_path()?)?;
    if options.show_help {
        print!("{}", help_text(program));
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `{} --print-example-config` to generate a v1 template",
            options.config_path.display(),
            program.binary_name()
        )
    })?;
    let log_settings = program.log_settings(&config)?;
    if options.check_only {
        println!(
            "config ok: {} (logs: {})",
            options.config_path.display(),
            log_settings.file_path().display()
        );
        return Ok(());
    }

    logging::init(&log_settings)?;
    info!(
        program = program.binary_name(),
        config = %options.config_path.display(),
        locale = config.locale().as_str(),
        "starting"
    );

    if let Some(path) = &options.init_path {
        return init_catalog(path);
    }

    let ui = UiOptions {
        start_dir: config.start_dir(),
    };
    let mut runtime = StoreRuntime::new(program.access_mode());
    let result = match program {
        Program::Browser => {
            let mut state = BrowserState::new(config.locale());
            roastery_tui::run_browser(&mut state, &mut runtime, &ui)
        }
        Program::Editor => {
            let mut state = EditorState::new(config.locale());
            roastery_tui::run_editor(&mut state, &mut runtime, &ui)
        }
    };
    if let Err(error) = &result {
        tracing::error!(error = %format!("{error:#}"), "event loop failed");
    } else {
        info!(program = program.binary_name(), "closed");
    }
    result
}

fn init_catalog(path: &Path) -> Result<()> {
    Store::create(path).with_context(|| {
        format!(
            "initialize catalog {}; choose a path that does not exist yet",
            path.display()
        )
    })?;
    println!("created {}", path.display());
    Ok(())
}
