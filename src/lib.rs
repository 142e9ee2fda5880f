pub mod cli;
pub mod error;
pub mod git;
pub mod language;
pub mod model;
pub mod render;
pub mod report;
pub mod run;
pub mod util;

pub use error::{BragError, Result};
pub use model::{ChangeRecord, FilterSet, RenderOptions, Totals};
