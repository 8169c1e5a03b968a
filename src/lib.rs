pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{Settings, TomlConfig};

pub use adapters::{DelimitedFileCatalog, EmbeddedCatalog};
pub use app::{Command, Outcome, Session};
pub use crate::core::{catalog::Catalog, engine::SelectionEngine, engine::SelectionState};
pub use domain::model::{BlockReason, Course, CourseId, CourseRow, DerivedView, SelectionSummary};
pub use utils::error::{PickerError, Result};
