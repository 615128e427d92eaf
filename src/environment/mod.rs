//! Go environment resolution.
//!
//! Works out the effective `GOROOT`/`GOPATH` for an install batch from the
//! command options, the process environment and the config file. Resolution
//! itself is pure; the only side effect (creating a derived `GOPATH` and
//! exporting it) lives in `EnvResolution::apply` and runs once, before any
//! `go` subprocess is spawned.
//!
//! ## Module structure
//! - `view` - Snapshot of the Go-related environment variables
//! - `resolver` - Option adoption, path normalization, `GOPATH` derivation

mod resolver;
mod view;

pub use resolver::resolve;
pub use view::EnvironmentView;
