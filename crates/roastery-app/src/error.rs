// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::error::Error as StdError;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// User-facing message kinds for the two recoverable storage conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Notice {
    FileNotFound,
    ReadError,
}

impl Notice {
    pub const fn code(self) -> &'static str {
        match self {
            Self::FileNotFound => "file-not-found",
            Self::ReadError => "read-error",
        }
    }
}

/// Expected failures when touching a catalog file. Anything that is not one
/// of these is a fault and terminates the program.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("database file {} not found", path.display())]
    FileNotFound { path: PathBuf },
    #[error("read database {}: {source}", path.display())]
    StorageRead {
        path: PathBuf,
        #[source]
        source: Box<dyn StdError + Send + Sync + 'static>,
    },
}

impl CatalogError {
    pub fn storage_read(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        Self::StorageRead {
            path: path.into(),
            source: source.into(),
        }
    }

    pub const fn notice(&self) -> Notice {
        match self {
            Self::FileNotFound { .. } => Notice::FileNotFound,
            Self::StorageRead { .. } => Notice::ReadError,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::FileNotFound { path } | Self::StorageRead { path, .. } => path,
        }
    }
}
