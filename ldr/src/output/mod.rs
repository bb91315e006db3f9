use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

mod table;

use table::render_table;
pub use table::{TableRow, render_table_dynamic};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Pretty,
    Table,
    Quiet,
}

/// Where and how command results are written
#[derive(Clone, Debug)]
pub struct Output {
    format: OutputFormat,
    path: Option<PathBuf>,
}

impl Output {
    pub fn new(format: OutputFormat, path: Option<PathBuf>) -> Self {
        Self { format, path }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn emit_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let data = match self.format {
            OutputFormat::Quiet => return Ok(()),
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
            _ => serde_json::to_string(value)?,
        };
        self.write(&data)
    }

    /// Table in table mode, json otherwise.
    pub fn emit_table<T: TableRow + Serialize>(&self, items: &[T]) -> Result<()> {
        match self.format {
            OutputFormat::Table => self.write(&render_table(items)),
            OutputFormat::Quiet => Ok(()),
            _ => self.emit_json(items),
        }
    }

    pub fn emit_text(&self, text: &str) -> Result<()> {
        if self.format == OutputFormat::Quiet {
            return Ok(());
        }
        self.write(text)
    }

    fn write(&self, data: &str) -> Result<()> {
        let mut output = data.to_string();
        if !output.ends_with('\n') {
            output.push('\n');
        }

        match &self.path {
            Some(path) => fs::write(path, output)
                .with_context(|| format!("writing output to {}", path.display()))?,
            None => print!("{output}"),
        }
        Ok(())
    }
}
