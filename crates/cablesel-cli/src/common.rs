//! Output helpers shared by the cablesel commands.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Output format for tabular/structured data.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable aligned table (default for interactive use)
    #[default]
    Table,
    /// JSON object or array (pipe-friendly, structured)
    Json,
    /// JSON Lines - one JSON object per line (streaming-friendly)
    Jsonl,
    /// Comma-separated values (pipe to awk/cut/etc)
    Csv,
}

/// Write data as JSON to the given writer.
pub fn write_json<W: Write, T: Serialize + ?Sized>(
    data: &T,
    writer: &mut W,
    pretty: bool,
) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, data).map_err(io::Error::other)?;
    } else {
        serde_json::to_writer(&mut *writer, data).map_err(io::Error::other)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Write data as JSON Lines (one JSON object per line) to the given writer.
pub fn write_jsonl<W: Write, T: Serialize>(data: &[T], writer: &mut W) -> io::Result<()> {
    for item in data {
        serde_json::to_writer(&mut *writer, item).map_err(io::Error::other)?;
        writeln!(writer)?;
    }
    Ok(())
}

/// Write flat rows as CSV with a header taken from the field names.
pub fn write_csv<W: Write, T: Serialize>(rows: &[T], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write rows in a structured format.
///
/// Returns `false` for [`OutputFormat::Table`], which each command renders
/// itself.
pub fn write_structured<W: Write, T: Serialize>(
    rows: &[T],
    format: OutputFormat,
    writer: &mut W,
) -> Result<bool> {
    match format {
        OutputFormat::Table => return Ok(false),
        OutputFormat::Json => write_json(rows, writer, true)?,
        OutputFormat::Jsonl => write_jsonl(rows, writer)?,
        OutputFormat::Csv => write_csv(rows, &mut *writer)?,
    }
    Ok(true)
}

/// Write text to `out`, creating parent directories, or to stdout.
pub fn emit_text(text: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Fixed-precision value, or `-` when absent.
pub fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: u32,
        name: &'static str,
        rating: Option<f64>,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: 1,
                name: "1x70 mm2",
                rating: Some(279.0),
            },
            Row {
                id: 9,
                name: "3x16+10 mm2",
                rating: None,
            },
        ]
    }

    #[test]
    fn test_write_jsonl_to_string() {
        let mut buf = Vec::new();
        write_jsonl(&rows(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with(r#"{"id":1,"name":"1x70 mm2","rating":279.0}"#));
    }

    #[test]
    fn test_write_csv_empty_optional() {
        let mut buf = Vec::new();
        write_csv(&rows(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "id,name,rating\n1,1x70 mm2,279.0\n9,3x16+10 mm2,\n");
    }

    #[test]
    fn test_table_is_left_to_caller() {
        let mut buf = Vec::new();
        assert!(!write_structured(&rows(), OutputFormat::Table, &mut buf).unwrap());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(195.3), 1), "195.3");
        assert_eq!(fmt_opt(None, 1), "-");
    }
}
