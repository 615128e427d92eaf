use console::style;

use crate::catalog::Catalog;
use crate::devops::render_table;
use crate::error::Result;

pub fn execute(catalog: &Catalog, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog.entries())?);
        return Ok(());
    }

    if catalog.is_empty() {
        println!("{}", style("No tools in the catalog.").dim());
        return Ok(());
    }

    print!("{}", render_table(catalog));
    println!();
    println!(
        "{}",
        style(format!(
            "{} tools. Install with: dragon tools tools=<name>[@version],...",
            catalog.len()
        ))
        .dim()
    );

    Ok(())
}
