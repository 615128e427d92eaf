//! Catalog listing as a plain two-column table.

use crate::catalog::Catalog;

const NAME_HEADER: &str = "name";
const PACKAGE_HEADER: &str = "pkg_src";
/// Spaces between the name and package columns.
const COLUMN_GAP: usize = 4;

/// Render the catalog sorted by name. Pure: nothing is spawned or exported.
pub fn render_table(catalog: &Catalog) -> String {
    let name_width = catalog
        .iter()
        .map(|(name, _)| name.as_str().len())
        .chain(std::iter::once(NAME_HEADER.len()))
        .max()
        .unwrap_or_default()
        + COLUMN_GAP;
    let rule_width = catalog
        .iter()
        .map(|(_, package)| name_width + package.as_str().len())
        .chain(std::iter::once(name_width + PACKAGE_HEADER.len()))
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    out.push_str(&format!("{:<name_width$}{}\n", NAME_HEADER, PACKAGE_HEADER));
    out.push_str(&"-".repeat(rule_width));
    out.push('\n');
    for (name, package) in catalog.iter() {
        out.push_str(&format!("{:<name_width$}{}\n", name.as_str(), package));
    }
    out
}
