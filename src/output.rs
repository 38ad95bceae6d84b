use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, ScrapeError};
use crate::parser::Row;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// One line per row, cells separated by tabs.
    #[default]
    Tsv,
    /// A JSON array of string arrays.
    Json,
}

impl TableFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            TableFormat::Tsv => "table_data.txt",
            TableFormat::Json => "table_data.json",
        }
    }
}

/// Create `dir` (and parents) if needed. Returns true when it was newly created.
pub fn ensure_folder(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        tracing::info!("Folder {:?} already exists", dir);
        return Ok(false);
    }
    fs::create_dir_all(dir).map_err(|e| ScrapeError::io(dir, e))?;
    tracing::info!("Folder {:?} created", dir);
    Ok(true)
}

/// Write rows as tab-separated lines. Every row, the last included, ends with `\n`.
pub fn write_tsv<W: Write>(mut w: W, rows: &[Row]) -> io::Result<()> {
    for row in rows {
        w.write_all(row.join("\t").as_bytes())?;
        w.write_all(b"\n")?;
    }
    w.flush()
}

pub fn write_json<W: Write>(mut w: W, rows: &[Row]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut w, rows)?;
    w.write_all(b"\n")?;
    w.flush()
}

/// Write the extracted rows into `dir` using the file name of `format`.
pub fn save_table_data(dir: &Path, format: TableFormat, rows: &[Row]) -> Result<PathBuf> {
    let path = dir.join(format.file_name());
    let file = File::create(&path).map_err(|e| ScrapeError::io(&path, e))?;
    let out = BufWriter::new(file);

    let written = match format {
        TableFormat::Tsv => write_tsv(out, rows),
        TableFormat::Json => write_json(out, rows),
    };
    written.map_err(|e| ScrapeError::io(&path, e))?;

    tracing::info!("Table data saved to {:?} ({} rows)", path, rows.len());
    Ok(path)
}
