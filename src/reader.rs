//! # File Content Streaming
//!
//! After a run's clones land on disk (or for an existing local tree), this
//! module walks the destination root and prints the textual contents of
//! every file worth printing.
//!
//! Three filters apply, in order:
//!
//! 1. any entry whose path contains a version-control metadata component
//!    (`.git`, `.svn`, `.hg`) is skipped,
//! 2. entries whose name matches the opaque-format exclusion list (images,
//!    fonts, archives, compiled databases, trace dumps) are skipped
//!    silently,
//! 3. directories are skipped; everything left is a file whose full
//!    contents are emitted as one textual unit.
//!
//! The walk visits entries in sorted order so output is deterministic for a
//! fixed tree. A read failure anywhere aborts the whole walk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use regex::Regex;
use walkdir::WalkDir;

use crate::error::Result;

/// Directory names that mark version-control metadata.
const VCS_DIRS: &[&str] = &[".git", ".svn", ".hg"];

/// File-name pattern for opaque formats that are never worth printing:
/// images, fonts, archives, compiled databases, and trace dumps.
const EXCLUDED_NAMES: &str =
    r"(?i)\.(png|jpe?g|gif|bmp|ico|svgz?|ttf|otf|eot|woff2?|zip|jar|tar|gz|tgz|bz2|7z|db|sqlite3?|_trace)$";

/// Streams the printable files of a directory tree to a writer.
pub struct FileStreamer {
    excluded: Regex,
}

impl FileStreamer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            excluded: Regex::new(EXCLUDED_NAMES)?,
        })
    }

    /// Walk `root` and write every printable file's contents to `out`.
    ///
    /// Contents are read in full and written as one unit, followed by a
    /// newline; bytes that are not valid UTF-8 are replaced rather than
    /// aborting the run.
    pub fn stream(&self, root: &Path, out: &mut dyn Write) -> Result<()> {
        for path in self.collect_files(root)? {
            debug!("printing {}", path.display());
            let contents = fs::read(&path)?;
            out.write_all(String::from_utf8_lossy(&contents).as_bytes())?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    /// The printable files under `root`, in deterministic (sorted) order.
    ///
    /// Exposed separately so callers and tests can inspect the filter
    /// decisions without reading any contents.
    pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            let path = entry.path();
            if contains_vcs_component(path) {
                continue;
            }
            if entry.file_type().is_dir() {
                continue;
            }
            if self.is_excluded(path) {
                continue;
            }
            files.push(path.to_path_buf());
        }
        Ok(files)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => self.excluded.is_match(name),
            // A name that is not valid UTF-8 cannot be printed sensibly.
            None => true,
        }
    }
}

/// Whether any component of `path` is version-control metadata.
fn contains_vcs_component(path: &Path) -> bool {
    path.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .is_some_and(|name| VCS_DIRS.contains(&name))
    })
}
