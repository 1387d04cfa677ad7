//! The FileStore port: loading and saving lines.
//!
//! The editor only ever talks to `dyn FileStore`. [`FsStore`] is the real
//! filesystem; [`MemoryStore`] keeps files in a map, which makes command
//! tests (`:w`, `:e`) independent of the disk.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use ropey::Rope;

/// FileStore failures. None of them touch the in-memory buffer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Cannot read {}: {source}", path.display())]
    NotReadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {}: {source}", path.display())]
    NotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load/save capability consumed by the editor.
pub trait FileStore {
    /// Reads a file as an ordered sequence of lines without terminators.
    fn load(&self, path: &Path) -> Result<Vec<String>, StoreError>;

    /// Writes lines to a file, replacing its content.
    fn save(&mut self, path: &Path, lines: &[String]) -> Result<(), StoreError>;
}

/// Filesystem-backed store.
#[derive(Debug, Clone)]
pub struct FsStore {
    /// Terminate the last line with a newline
    final_newline: bool,
}

impl FsStore {
    /// Creates a store that writes a newline after every line.
    pub fn new() -> Self {
        Self {
            final_newline: true,
        }
    }

    /// Sets whether the last line gets a trailing newline.
    pub fn with_final_newline(mut self, final_newline: bool) -> Self {
        self.final_newline = final_newline;
        self
    }

    fn write_lines(&self, path: &Path, lines: &[String]) -> std::io::Result<()> {
        // Write to a temporary sibling first, then rename (atomic write)
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_path = path.with_file_name(format!(".{}.vix-tmp", file_name));

        let written = File::create(&temp_path)
            .and_then(|file| self.write_to(BufWriter::new(file), lines))
            .and_then(|()| std::fs::rename(&temp_path, path));
        if written.is_err() {
            let _ = std::fs::remove_file(&temp_path);
        }
        written
    }

    fn write_to<W: Write>(&self, mut writer: W, lines: &[String]) -> std::io::Result<()> {
        for (i, line) in lines.iter().enumerate() {
            writer.write_all(line.as_bytes())?;
            if self.final_newline || i + 1 < lines.len() {
                writer.write_all(b"\n")?;
            }
        }
        writer.flush()
    }
}

impl Default for FsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStore for FsStore {
    fn load(&self, path: &Path) -> Result<Vec<String>, StoreError> {
        let file = File::open(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
            _ => StoreError::NotReadable {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let rope = Rope::from_reader(BufReader::new(file)).map_err(|source| {
            StoreError::NotReadable {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let mut lines: Vec<String> = rope
            .lines()
            .map(|line| strip_line_break(line.to_string()))
            .collect();

        // A terminated last line leaves an empty trailing rope line.
        if lines.len() > 1 && lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }

        tracing::info!("Loaded {} ({} lines)", path.display(), lines.len());
        Ok(lines)
    }

    fn save(&mut self, path: &Path, lines: &[String]) -> Result<(), StoreError> {
        self.write_lines(path, lines)
            .map_err(|source| StoreError::NotWritable {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!("Saved {} ({} lines)", path.display(), lines.len());
        Ok(())
    }
}

/// Removes one trailing `\n`, `\r\n` or `\r`.
///
/// Ropey is built with `cr_lines` only, so these are the only breaks it
/// splits on; form feeds and Unicode separators stay inside the line.
fn strip_line_break(mut line: String) -> String {
    if line.ends_with("\r\n") {
        line.truncate(line.len() - 2);
    } else if line.ends_with(['\n', '\r']) {
        line.pop();
    }
    line
}

/// In-memory store keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: HashMap<PathBuf, Vec<String>>,
    read_only: bool,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file.
    pub fn with_file(mut self, path: impl Into<PathBuf>, lines: &[&str]) -> Self {
        self.files
            .insert(path.into(), lines.iter().map(|l| l.to_string()).collect());
        self
    }

    /// Makes every save fail with `NotWritable`.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Returns a file's lines.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&[String]> {
        self.files.get(path.as_ref()).map(Vec::as_slice)
    }
}

impl FileStore for MemoryStore {
    fn load(&self, path: &Path) -> Result<Vec<String>, StoreError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_path_buf()))
    }

    fn save(&mut self, path: &Path, lines: &[String]) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::NotWritable {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.files.insert(path.to_path_buf(), lines.to_vec());
        Ok(())
    }
}
