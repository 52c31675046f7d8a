use std::io::Write;

use crate::error::InventoryError;
use crate::inventory::Inventory;

/// Full `--list` document, 2-space indented.
pub fn render(inventory: &Inventory) -> Result<String, InventoryError> {
    Ok(serde_json::to_string_pretty(inventory)?)
}

/// `--host` document: the host's vars, or `{}` when the host is unknown.
pub fn render_host(inventory: &Inventory, host: &str) -> Result<String, InventoryError> {
    let rendered = match inventory.host_vars(host) {
        Some(vars) => serde_json::to_string_pretty(vars)?,
        None => serde_json::to_string_pretty(&serde_json::json!({}))?,
    };
    Ok(rendered)
}

/// Writes a rendered document followed by a newline.
pub fn write_document<W: Write>(out: &mut W, rendered: &str) -> Result<(), InventoryError> {
    writeln!(out, "{}", rendered)?;
    out.flush()?;
    Ok(())
}
