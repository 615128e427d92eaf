use std::path::{Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

use crate::error::{DragonError, Result};
use crate::options::{Options, GOPATH, GOROOT};

use super::view::EnvironmentView;

/// Name of the directory derived next to `GOROOT` when `GOPATH` collides with it.
const DERIVED_GO_PATH: &str = "go_path";

/// Outcome of resolving options against the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvResolution {
    /// Options with `GOROOT`/`GOPATH` filled in.
    pub options: Options,
    /// Derived `GOPATH` that still has to be created and exported.
    pub go_path_write: Option<PathBuf>,
}

/// Resolve the effective `GOROOT`/`GOPATH` without touching the process.
///
/// An option that is absent, or empty while the environment has a value,
/// adopts the environment value. When both end up naming the same directory
/// `GOPATH` moves to a `go_path` sibling of `GOROOT`.
pub fn resolve(options: &Options, env: &EnvironmentView) -> EnvResolution {
    tracing::info!("GOROOT: {}", env.go_root.as_deref().unwrap_or_default());
    tracing::info!("GOPATH: {}", env.go_path.as_deref().unwrap_or_default());
    tracing::info!("GOPROXY: {}", env.go_proxy.as_deref().unwrap_or_default());

    let go_root = normalize_separators(&adopt(options, GOROOT, env.go_root.as_deref()));
    let mut go_path = normalize_separators(&adopt(options, GOPATH, env.go_path.as_deref()));

    let mut go_path_write = None;
    if !go_root.is_empty() && go_root == go_path {
        let derived = derive_go_path(Path::new(&go_root));
        tracing::warn!(
            "GOROOT and GOPATH are both {}, using {} as GOPATH",
            go_root,
            derived.display()
        );
        go_path = derived.to_string_lossy().into_owned();
        go_path_write = Some(derived);
    }

    EnvResolution {
        options: options.clone().with(GOROOT, go_root).with(GOPATH, go_path),
        go_path_write,
    }
}

impl EnvResolution {
    /// Create the derived `GOPATH` if needed and export it.
    ///
    /// Failing to create the directory is a configuration error; the batch
    /// must not start with a broken `GOPATH`.
    pub fn apply(&self) -> Result<()> {
        if let Some(ref path) = self.go_path_write {
            create_go_path(path)?;
            std::env::set_var("GOPATH", path);
            tracing::info!("GOPATH set to {}", path.display());
        }
        Ok(())
    }
}

fn adopt(options: &Options, key: &str, env_value: Option<&str>) -> String {
    match (options.get(key), env_value) {
        (Some(value), _) if !value.is_empty() => value.to_string(),
        (_, Some(value)) => value.to_string(),
        (Some(value), None) => value.to_string(),
        (None, None) => String::new(),
    }
}

/// Paths written with `/` on a platform using another separator are rewritten
/// to the native one. Values already containing the native separator are kept.
fn normalize_separators(value: &str) -> String {
    if value.contains(MAIN_SEPARATOR) {
        value.to_string()
    } else {
        value.replace('/', MAIN_SEPARATOR_STR)
    }
}

fn derive_go_path(go_root: &Path) -> PathBuf {
    go_root.parent().unwrap_or(go_root).join(DERIVED_GO_PATH)
}

fn create_go_path(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|e| {
        DragonError::Config(format!(
            "Failed to create GOPATH directory {}: {}",
            path.display(),
            e
        ))
    })
}
