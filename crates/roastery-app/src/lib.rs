// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod error;
pub mod grid;
pub mod ids;
pub mod locale;
pub mod model;
pub mod state;

pub use error::*;
pub use grid::*;
pub use ids::*;
pub use locale::*;
pub use model::*;
pub use state::*;
