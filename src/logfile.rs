use crate::error::Result;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes the numbered status lines of a run log.
///
/// The first write truncates the file and every later write appends, so a
/// writer always starts a fresh log. The line counter belongs to the writer.
#[derive(Debug)]
pub struct LogWriter {
    path: PathBuf,
    next_number: usize,
}

impl LogWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            next_number: 1,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number the next line will get.
    pub fn next_number(&self) -> usize {
        self.next_number
    }

    fn open(&self) -> Result<File> {
        let file = if self.next_number == 1 {
            File::create(&self.path)?
        } else {
            OpenOptions::new().append(true).open(&self.path)?
        };
        Ok(file)
    }

    pub fn line(&mut self, message: &str) -> Result<()> {
        let mut file = self.open()?;
        writeln!(file, "{}. {}", self.next_number, message)?;
        self.next_number += 1;
        Ok(())
    }

    /// Appends unnumbered text, such as the final record table.
    pub fn append_block(&mut self, block: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", block)?;
        Ok(())
    }
}
