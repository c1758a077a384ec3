//! File merger: concatenate selected source files into one text blob for
//! sharing or review.
//!
//! Files are discovered recursively, filtered by extension, and sorted by
//! relative path before writing, so an unchanged tree always produces a
//! byte-identical blob.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("No matching files under {0}")]
    NoFiles(PathBuf),
}

/// Statistics from a merge run.
#[derive(Debug, Default)]
pub struct MergeStats {
    pub files_merged: usize,
    pub bytes_written: u64,
}

pub struct Merger {
    root: PathBuf,
    output: Option<PathBuf>,
    extensions: Vec<String>,
}

impl Merger {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            output: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Output file; stdout when unset.
    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Run the merge.
    pub fn merge(&self) -> Result<MergeStats, MergeError> {
        if !self.root.is_dir() {
            return Err(MergeError::NotADirectory(self.root.clone()));
        }

        let mut files = Vec::new();
        self.collect_files(&self.root, &mut files)?;
        if files.is_empty() {
            return Err(MergeError::NoFiles(self.root.clone()));
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));

        match &self.output {
            Some(path) => {
                let writer = BufWriter::new(File::create(path)?);
                self.write_blob(&files, writer)
            }
            None => {
                let stdout = io::stdout();
                let writer = BufWriter::new(stdout.lock());
                self.write_blob(&files, writer)
            }
        }
    }

    fn collect_files(
        &self,
        dir: &Path,
        files: &mut Vec<(String, PathBuf)>,
    ) -> Result<(), MergeError> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name();
            let name = name.to_string_lossy();

            if name.starts_with('.') || name == "node_modules" {
                continue;
            }

            if path.is_dir() {
                self.collect_files(&path, files)?;
            } else if self.matches_extension(&path) && Some(&path) != self.output.as_ref() {
                let relative = path
                    .strip_prefix(&self.root)
                    .unwrap_or(&path)
                    .to_string_lossy()
                    .replace('\\', "/");
                files.push((relative, path));
            }
        }
        Ok(())
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            })
            .unwrap_or(false)
    }

    fn write_blob<W: Write>(
        &self,
        files: &[(String, PathBuf)],
        mut writer: W,
    ) -> Result<MergeStats, MergeError> {
        let mut stats = MergeStats::default();

        for (relative, path) in files {
            let banner = format!("// ===== {relative} =====\n");
            let mut content = fs::read_to_string(path)?;
            if !content.ends_with('\n') {
                content.push('\n');
            }

            writer.write_all(banner.as_bytes())?;
            writer.write_all(content.as_bytes())?;
            writer.write_all(b"\n")?;

            stats.files_merged += 1;
            stats.bytes_written += (banner.len() + content.len() + 1) as u64;
        }

        writer.flush()?;
        Ok(stats)
    }
}
