//! Go tool installation.
//!
//! Resolves a tool selection against the [`Catalog`](crate::catalog::Catalog)
//! and runs `go get` / `go install` for each package, one at a time.
//!
//! ## Module structure
//! - `types` - Step, outcome and install-policy types
//! - `runner` - CommandRunner trait, real subprocess runner, `go` binary lookup
//! - `selection` - `tools=` parsing and package ordering
//! - `installer` - Devops batch executor
//! - `listing` - Catalog table rendering

mod installer;
mod listing;
mod runner;
mod selection;
mod types;

pub use installer::Devops;
pub use listing::render_table;
pub use runner::go_binary_available;
pub use types::{default_install_markers, BatchReport, InstallPolicy, ItemStatus};
