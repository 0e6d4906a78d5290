pub mod table;

use anyhow::Result;
use serde::Serialize;

pub use table::render_summary_table;

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
