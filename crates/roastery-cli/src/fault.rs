// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::any::Any;
use std::panic;
use std::process;

/// Replaces the default panic handler: give the terminal back, record the
/// panic and end the process with status 1.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        if let Err(error) = roastery_tui::restore_terminal() {
            tracing::warn!(error = %format!("{error:#}"), "terminal restore failed");
        }

        let location = info
            .location()
            .map(|location| format!("{}:{}", location.file(), location.line()))
            .unwrap_or_else(|| "unknown location".to_owned());
        let message = panic_message(info.payload());

        tracing::error!(%location, %message, "panic");
        eprintln!("fatal error at {location}: {message}");
        process::exit(1);
    }));
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_owned();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "non-string panic payload".to_owned()
}
