//! Output management module
//!
//! Writes sanitized records to numbered output files with buffering.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SanitizeError};

/// Default buffer size for file writing (1MB)
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Output file writer with buffering
pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    lines_written: u64,
}

impl OutputWriter {
    /// Create a new output writer, refusing to overwrite an existing file
    pub fn create(path: PathBuf, buffer_size: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| SanitizeError::Output(format!("cannot create {:?}: {}", path, e)))?;

        Ok(Self {
            writer: BufWriter::with_capacity(buffer_size, file),
            path,
            lines_written: 0,
        })
    }

    /// Write a record followed by a newline
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line).map_err(|e| self.write_error(e))?;
        self.lines_written += 1;
        Ok(())
    }

    /// Write all records in order
    pub fn write_all<I, S>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.write_line(line.as_ref())?;
        }
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| self.write_error(e))
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    fn write_error(&self, e: std::io::Error) -> SanitizeError {
        SanitizeError::Output(format!("cannot write {:?}: {}", self.path, e))
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// First free `<base>_NN.txt` in `dir`, for NN in `00..=max_number`
pub fn find_available_filename(dir: &Path, base_name: &str, max_number: u32) -> Option<PathBuf> {
    (0..=max_number)
        .map(|n| dir.join(format!("{}_{:02}.txt", base_name, n)))
        .find(|path| !path.exists())
}

/// Write records to the next free numbered file and return its path
pub fn write_numbered(
    dir: &Path,
    base_name: &str,
    max_number: u32,
    records: &[String],
) -> Result<PathBuf> {
    let path = find_available_filename(dir, base_name, max_number).ok_or_else(|| {
        SanitizeError::Output(format!(
            "too many {} files already exist in {:?}, please clean up the directory",
            base_name, dir
        ))
    })?;

    let mut writer = OutputWriter::create(path.clone(), DEFAULT_BUFFER_SIZE)?;
    writer.write_all(records)?;
    writer.flush()?;

    log::info!("Wrote {} records to {:?}", writer.lines_written(), path);
    Ok(path)
}

/// Ensure output directory exists
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .map_err(|e| SanitizeError::Output(format!("cannot create {:?}: {}", path, e)))?;
    }
    Ok(())
}
