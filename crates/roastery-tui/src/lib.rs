// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod browser;
mod cursor;
mod editor;
mod input;
mod status;
mod terminal;
mod widgets;

use anyhow::Result;
use roastery_app::{CatalogError, Notice};
use std::path::PathBuf;
use tracing::warn;

pub use browser::{BrowserRuntime, run_browser};
pub use editor::{EditorRuntime, run_editor};
pub use terminal::restore_terminal;

/// Settings that shape the interface but not the catalog itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiOptions {
    /// Directory the open prompt starts in.
    pub start_dir: Option<PathBuf>,
}

/// Turns an expected storage condition into the notice shown to the user.
/// Everything else is handed back as a fault.
pub(crate) fn notice_for(error: anyhow::Error) -> Result<Notice> {
    match error.downcast_ref::<CatalogError>() {
        Some(condition) => {
            warn!(
                path = %condition.path().display(),
                notice = condition.notice().code(),
                error = %format!("{error:#}"),
                "catalog operation failed"
            );
            Ok(condition.notice())
        }
        None => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::notice_for;
    use anyhow::{Context, anyhow};
    use roastery_app::{CatalogError, Notice};
    use std::path::PathBuf;

    #[test]
    fn catalog_errors_become_notices() {
        let error = anyhow::Error::new(CatalogError::FileNotFound {
            path: PathBuf::from("/tmp/nope.sqlite"),
        });
        assert_eq!(notice_for(error).ok(), Some(Notice::FileNotFound));
    }

    #[test]
    fn context_does_not_hide_the_condition() {
        let error = Err::<(), _>(CatalogError::storage_read("/tmp/junk", "not a database"))
            .context("open catalog")
            .expect_err("error expected");
        assert_eq!(notice_for(error).ok(), Some(Notice::ReadError));
    }

    #[test]
    fn other_errors_are_faults() {
        let error = notice_for(anyhow!("socket closed")).expect_err("must propagate");
        assert_eq!(error.to_string(), "socket closed");
    }
}
