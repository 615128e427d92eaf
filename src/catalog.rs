//! Catalog of installable Go tools.
//!
//! Maps a short tool name (`dlv`, `golint`, ...) to the package reference
//! handed to `go get`. The catalog is built once and never mutated; iteration
//! is always in name order so listings and install batches are reproducible.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Short identifier of a tool, unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ToolName(String);

impl ToolName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ToolName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fetchable Go package, optionally pinned to a version (`path@version`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PackageRef(String);

impl PackageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Package path without any version suffix.
    pub fn path(&self) -> &str {
        self.0.split_once('@').map_or(self.0.as_str(), |(path, _)| path)
    }

    #[cfg(test)]
    pub fn version(&self) -> Option<&str> {
        self.0.split_once('@').map(|(_, version)| version)
    }

    /// Pin this reference to `version`. An existing pin is replaced and
    /// anything after an `@` inside `version` is dropped, so the result never
    /// carries two `@` suffixes.
    pub fn join(&self, version: &str) -> PackageRef {
        let version = version.split('@').next().unwrap_or_default();
        PackageRef(format!("{}@{}", self.path(), version))
    }

    /// `...` patterns match many packages and never name a single binary.
    pub fn is_wildcard(&self) -> bool {
        self.0.contains("...")
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One `name -> package` row, as exposed by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub name: ToolName,
    pub package: PackageRef,
}

/// Immutable registry of installable tools.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    tools: BTreeMap<ToolName, PackageRef>,
}

/// `go get -u -v <package>` targets installed when no selection is given.
const DEFAULT_TOOLS: &[(&str, &str)] = &[
    ("gocode", "github.com/mdempsky/gocode"),
    ("gopkgs", "github.com/tpng/gopkgs"),
    ("go-outline", "github.com/ramya-rao-a/go-outline"),
    ("go-symbols", "github.com/acroca/go-symbols"),
    ("guru", "golang.org/x/tools/cmd/guru"),
    ("gorename", "golang.org/x/tools/cmd/gorename"),
    ("dlv", "github.com/go-delve/delve/cmd/dlv"),
    ("stamblerre_gocode", "github.com/stamblerre/gocode"),
    ("godef", "github.com/rogpeppe/godef"),
    ("goreturns", "github.com/sqs/goreturns"),
    ("golint", "golang.org/x/lint/golint"),
    ("gotests", "github.com/cweill/gotests/..."),
    ("gomodifytags", "github.com/fatih/gomodifytags"),
    ("impl", "github.com/josharian/impl"),
    ("fillstruct", "github.com/davidrjenni/reftools/cmd/fillstruct"),
    ("goplay", "github.com/haya14busa/goplay/cmd/goplay"),
    ("godoctor", "github.com/godoctor/godoctor"),
];

impl Catalog {
    /// Build a catalog from `(name, package)` pairs. A repeated name keeps
    /// the last package given for it.
    pub fn new<N, P, I>(entries: I) -> Self
    where
        N: Into<String>,
        P: Into<String>,
        I: IntoIterator<Item = (N, P)>,
    {
        let tools = entries
            .into_iter()
            .map(|(name, package)| (ToolName::new(name), PackageRef::new(package)))
            .collect();
        Self { tools }
    }

    /// The built-in set of Go editor and debugging tools.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_TOOLS.iter().copied())
    }

    /// Return a new catalog with `extra` entries layered on top; an extra
    /// entry replaces a built-in one of the same name.
    pub fn extended<N, P, I>(mut self, extra: I) -> Self
    where
        N: Into<String>,
        P: Into<String>,
        I: IntoIterator<Item = (N, P)>,
    {
        for (name, package) in extra {
            self.tools
                .insert(ToolName::new(name), PackageRef::new(package));
        }
        self
    }

    pub fn resolve(&self, name: &str) -> Option<&PackageRef> {
        self.tools.get(name)
    }

    #[cfg(test)]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&ToolName, &PackageRef)> {
        self.tools.iter()
    }

    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.iter()
            .map(|(name, package)| CatalogEntry {
                name: name.clone(),
                package: package.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
