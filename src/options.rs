//! Key/value options for a single `dragon tools` invocation.

use std::collections::BTreeMap;

use serde::Serialize;

pub const GOROOT: &str = "GOROOT";
pub const GOPATH: &str = "GOPATH";
/// Comma-separated selection, entries are `name` or `name@version`.
pub const TOOLS: &str = "tools";
/// Presence-only flag: print the catalog instead of installing.
pub const LISTS: &str = "lists";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Options(BTreeMap<String, String>);

impl Options {
    /// Parse positional `key=value` arguments. Only the first `=` splits, and
    /// a bare `key` maps to an empty value.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        args.into_iter()
            .map(|arg| match arg.as_ref().split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (arg.as_ref().to_string(), String::new()),
            })
            .collect()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value for `key`, treating an empty string as absent.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn go_root(&self) -> Option<&str> {
        self.non_empty(GOROOT)
    }

    pub fn go_path(&self) -> Option<&str> {
        self.non_empty(GOPATH)
    }

    pub fn tools(&self) -> Option<&str> {
        self.get(TOOLS)
    }

    pub fn wants_listing(&self) -> bool {
        self.contains(LISTS)
    }
}

impl FromIterator<(String, String)> for Options {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_args_key_value() {
        let options = Options::from_args(["tools=dlv,golint@v0.1", "GOROOT=/usr/local/go"]);
        assert_eq!(options.tools(), Some("dlv,golint@v0.1"));
        assert_eq!(options.go_root(), Some("/usr/local/go"));
        assert!(!options.wants_listing());
    }

    #[test]
    fn test_from_args_bare_key() {
        let options = Options::from_args(["lists"]);
        assert!(options.wants_listing());
        assert_eq!(options.get(LISTS), Some(""));
    }

    #[test]
    fn test_from_args_splits_on_first_equals() {
        let options = Options::from_args(["GOPATH=/tmp/a=b"]);
        assert_eq!(options.go_path(), Some("/tmp/a=b"));
    }

    #[test]
    fn test_empty_values_are_absent_for_paths() {
        let options = Options::default().with(GOROOT, "").with(TOOLS, "");
        assert!(options.contains(GOROOT));
        assert_eq!(options.go_root(), None);
        // An empty selection is still a selection.
        assert_eq!(options.tools(), Some(""));
    }
}
