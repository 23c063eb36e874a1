use std::io::Write;

use serde::Serialize;

use crate::error::CliError;

/// Write each item as one line of JSON.
pub fn write_lines<W: Write, I: Serialize>(writer: &mut W, items: &[I]) -> Result<(), CliError> {
    for item in items {
        serde_json::to_writer(&mut *writer, item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
