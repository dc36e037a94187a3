// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Single-line text entry used by the open prompt and the cell editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct LineInput {
    value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputOutcome {
    Pending,
    Submit(String),
    Cancel,
}

impl LineInput {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputOutcome {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => InputOutcome::Cancel,
            (KeyCode::Enter, _) => InputOutcome::Submit(self.value.clone()),
            (KeyCode::Backspace, _) => {
                self.value.pop();
                InputOutcome::Pending
            }
            (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.clear();
                InputOutcome::Pending
            }
            (KeyCode::Char(ch), modifiers) => {
                if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT {
                    self.value.push(ch);
                }
                InputOutcome::Pending
            }
            _ => InputOutcome::Pending,
        }
    }
}

/// Initial text of the open prompt: the start directory with a trailing
/// separator, so a file name can be typed straight away.
pub(crate) fn path_prefill(start_dir: Option<&Path>) -> String {
    let Some(dir) = start_dir else {
        return String::new();
    };
    let mut text = dir.display().to_string();
    if !text.ends_with(MAIN_SEPARATOR) {
        text.push(MAIN_SEPARATOR);
    }
    text
}

/// Resolves prompt text to a path. Blank input yields `None`, which callers
/// treat as a cancelled selection.
pub(crate) fn resolve_path(input: &str) -> Option<PathBuf> {
    resolve_path_with_home(input, dirs::home_dir().as_deref())
}

fn resolve_path_with_home(input: &str, home: Option<&Path>) -> Option<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(home) = home {
        if trimmed == "~" {
            return Some(home.to_path_buf());
        }
        if let Some(rest) = trimmed.strip_prefix("~/") {
            return Some(home.join(rest));
        }
    }
    Some(PathBuf::from(trimmed))
}

#[cfg(test)]
mod tests {
    use super::{InputOutcome, LineInput, path_prefill, resolve_path_with_home};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::path::{Path, PathBuf};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_and_submitting() {
        let mut input = LineInput::new("ab");
        assert_eq!(input.handle_key(key(KeyCode::Char('c'))), InputOutcome::Pending);
        assert_eq!(input.handle_key(key(KeyCode::Backspace)), InputOutcome::Pending);
        assert_eq!(
            input.handle_key(KeyEvent::new(KeyCode::Char('Z'), KeyModifiers::SHIFT)),
            InputOutcome::Pending
        );
        assert_eq!(
            input.handle_key(key(KeyCode::Enter)),
            InputOutcome::Submit("abZ".to_owned())
        );
    }

    #[test]
    fn control_keys_do_not_insert_text() {
        let mut input = LineInput::new("coffee");
        input.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));
        assert_eq!(input.value(), "coffee");
        input.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(input.value(), "");
        assert_eq!(input.handle_key(key(KeyCode::Esc)), InputOutcome::Cancel);
    }

    #[test]
    fn blank_paths_resolve_to_nothing() {
        assert_eq!(resolve_path_with_home("   ", None), None);
        assert_eq!(
            resolve_path_with_home(" /tmp/coffee.sqlite ", None),
            Some(PathBuf::from("/tmp/coffee.sqlite"))
        );
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = Path::new("/home/barista");
        assert_eq!(
            resolve_path_with_home("~/beans.sqlite", Some(home)),
            Some(home.join("beans.sqlite"))
        );
        assert_eq!(resolve_path_with_home("~", Some(home)), Some(home.to_path_buf()));
        assert_eq!(
            resolve_path_with_home("~other/beans", Some(home)),
            Some(PathBuf::from("~other/beans"))
        );
    }

    #[test]
    fn prefill_ends_with_separator() {
        assert_eq!(path_prefill(None), "");
        let text = path_prefill(Some(Path::new("/srv/catalogs")));
        assert!(text.starts_with("/srv/catalogs"));
        assert!(text.ends_with(std::path::MAIN_SEPARATOR));
    }
}
