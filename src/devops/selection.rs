//! Turns the `tools` option into the ordered list of packages to install.

use crate::catalog::{Catalog, PackageRef};
use crate::options::Options;

/// One element of a `tools=` selection: a tool name and an optional pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selected<'a> {
    pub name: &'a str,
    pub version: Option<&'a str>,
}

/// Split a comma-separated selection (`dlv,golint@v0.1`) into its elements.
/// Blank elements are skipped and `name@` counts as unpinned. Only the text
/// up to a second `@` is kept as the version.
pub fn parse_selection(selection: &str) -> Vec<Selected<'_>> {
    selection
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| match item.split_once('@') {
            Some((name, version)) => Selected {
                name,
                version: version.split('@').next().filter(|v| !v.is_empty()),
            },
            None => Selected {
                name: item,
                version: None,
            },
        })
        .collect()
}

/// Packages to install, sorted lexicographically and without repeats.
///
/// Without a `tools` option every catalog entry is selected. Names the
/// catalog does not know are dropped.
pub fn resolve_selection(catalog: &Catalog, options: &Options) -> Vec<PackageRef> {
    let mut packages: Vec<PackageRef> = match options.tools() {
        None => catalog.iter().map(|(_, package)| package.clone()).collect(),
        Some(selection) => parse_selection(selection)
            .into_iter()
            .filter_map(|selected| {
                let Some(package) = catalog.resolve(selected.name) else {
                    tracing::debug!("Unknown tool '{}', skipping", selected.name);
                    return None;
                };
                Some(match selected.version {
                    Some(version) => package.join(version),
                    None => package.clone(),
                })
            })
            .collect(),
    };

    packages.sort();
    packages.dedup();
    packages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TOOLS;

    fn strings(packages: &[PackageRef]) -> Vec<&str> {
        packages.iter().map(PackageRef::as_str).collect()
    }

    #[test]
    fn test_no_tools_selects_whole_catalog_sorted() {
        let catalog = Catalog::with_defaults();
        let packages = resolve_selection(&catalog, &Options::default());

        let mut expected: Vec<&str> = catalog.iter().map(|(_, p)| p.as_str()).collect();
        expected.sort();

        assert_eq!(packages.len(), 17);
        assert_eq!(strings(&packages), expected);
    }

    #[test]
    fn test_selection_with_version_pin() {
        let catalog = Catalog::with_defaults();
        let options = Options::default().with(TOOLS, "golint,dlv@v1.22.0");
        let packages = resolve_selection(&catalog, &options);

        assert_eq!(
            strings(&packages),
            vec![
                "github.com/go-delve/delve/cmd/dlv@v1.22.0",
                "golang.org/x/lint/golint",
            ]
        );
    }

    #[test]
    fn test_unknown_names_are_dropped() {
        let catalog = Catalog::with_defaults();
        let options = Options::default().with(TOOLS, "nope,impl,also-nope@v2");
        let packages = resolve_selection(&catalog, &options);
        assert_eq!(strings(&packages), vec!["github.com/josharian/impl"]);
    }

    #[test]
    fn test_only_unknown_names_select_nothing() {
        let catalog = Catalog::with_defaults();
        let options = Options::default().with(TOOLS, "nope");
        assert!(resolve_selection(&catalog, &options).is_empty());
    }

    #[test]
    fn test_empty_selection_selects_nothing() {
        let catalog = Catalog::with_defaults();
        let options = Options::default().with(TOOLS, "");
        assert!(resolve_selection(&catalog, &options).is_empty());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let catalog = Catalog::with_defaults();
        let options = Options::default().with(TOOLS, "guru,dlv@latest,gotests");
        assert_eq!(
            resolve_selection(&catalog, &options),
            resolve_selection(&catalog, &options)
        );
    }

    #[test]
    fn test_repeated_selection_is_deduplicated() {
        let catalog = Catalog::with_defaults();
        let options = Options::default().with(TOOLS, "dlv, dlv ,godef");
        let packages = resolve_selection(&catalog, &options);
        assert_eq!(
            strings(&packages),
            vec!["github.com/go-delve/delve/cmd/dlv", "github.com/rogpeppe/godef"]
        );
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(
            parse_selection("a, b@v1,,c@"),
            vec![
                Selected { name: "a", version: None },
                Selected { name: "b", version: Some("v1") },
                Selected { name: "c", version: None },
            ]
        );
        assert_eq!(
            parse_selection("a@v1@v2,b@@v3"),
            vec![
                Selected { name: "a", version: Some("v1") },
                Selected { name: "b", version: None },
            ]
        );
    }

    #[test]
    fn test_extra_version_suffix_is_dropped() {
        let catalog = Catalog::with_defaults();
        let options = Options::default().with(TOOLS, "dlv@v1@v2,golint@latest@");
        let packages = resolve_selection(&catalog, &options);

        assert_eq!(
            strings(&packages),
            vec![
                "github.com/go-delve/delve/cmd/dlv@v1",
                "golang.org/x/lint/golint@latest",
            ]
        );
        assert!(packages.iter().all(|p| p.as_str().matches('@').count() <= 1));
    }

    #[test]
    fn test_custom_catalog_is_used() {
        let catalog = Catalog::new([("one", "example.com/one"), ("two", "example.com/two")]);
        let packages = resolve_selection(&catalog, &Options::default());
        assert_eq!(strings(&packages), vec!["example.com/one", "example.com/two"]);
    }
}
