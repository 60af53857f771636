//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use yeti::ResultPage;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print every item of a page, one JSON document per line.
pub fn page(page: &ResultPage, pretty: bool) -> Result<()> {
    if page.items.is_empty() {
        eprintln!("{}", "No results.".dimmed());
        return Ok(());
    }

    for item in &page.items {
        if pretty {
            json_pretty(item)?;
        } else {
            json(item)?;
        }
    }

    if let Some(next) = page.next_page() {
        eprintln!("{}: {}", "Next page".dimmed(), next.page);
    }
    Ok(())
}
