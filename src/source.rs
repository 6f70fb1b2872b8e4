//! Input line source
//!
//! Reads an export file line by line. Content is treated as UTF-8; invalid
//! sequences are replaced rather than rejected.

use bstr::ByteSlice;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::{Result, SanitizeError};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Lazy, fallible sequence of lines from a file
pub struct LineSource<R: Read = File> {
    reader: BufReader<R>,
    path: PathBuf,
    line_buffer: Vec<u8>,
    first_line: bool,
    lossy_lines: u64,
}

impl LineSource<File> {
    /// Open a file for reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| SanitizeError::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::from_reader(file, path))
    }
}

impl<R: Read> LineSource<R> {
    /// Wrap any reader; `path` is only used in error messages
    pub fn from_reader(reader: R, path: &Path) -> Self {
        Self {
            reader: BufReader::with_capacity(READ_BUFFER_SIZE, reader),
            path: path.to_path_buf(),
            line_buffer: Vec::with_capacity(4096),
            first_line: true,
            lossy_lines: 0,
        }
    }

    /// Number of lines that needed lossy decoding so far
    pub fn lossy_lines(&self) -> u64 {
        self.lossy_lines
    }
}

impl<R: Read> Iterator for LineSource<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.line_buffer.clear();

        match self.reader.read_until(b'\n', &mut self.line_buffer) {
            Ok(0) => None, // EOF
            Ok(_) => {
                // Remove trailing newline characters
                while self.line_buffer.last() == Some(&b'\n')
                    || self.line_buffer.last() == Some(&b'\r')
                {
                    self.line_buffer.pop();
                }

                let mut bytes = self.line_buffer.as_slice();
                if self.first_line {
                    self.first_line = false;
                    bytes = bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes);
                }

                match bytes.to_str() {
                    Ok(s) => Some(Ok(s.to_string())),
                    Err(_) => {
                        self.lossy_lines += 1;
                        log::debug!("Invalid UTF-8 in {:?}, using lossy conversion", self.path);
                        Some(Ok(bytes.to_str_lossy().into_owned()))
                    }
                }
            }
            Err(source) => Some(Err(SanitizeError::SourceRead {
                path: self.path.clone(),
                source,
            })),
        }
    }
}
