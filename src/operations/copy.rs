// Copy Engine
// Non-recursive, overwriting copy of a source directory into the tracked directory

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SyncError};

/// Kind of a direct source entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file (or symlink to one); copied
    File,
    /// Directory or other non-file entry; counted but not copied
    Other,
}

/// A direct entry of the source directory
#[derive(Debug, Clone)]
pub struct SourceEntry {
    /// File name relative to the source directory
    pub name: PathBuf,
    /// Full path inside the source directory
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Listing of the source directory's direct, non-hidden entries
#[derive(Debug, Clone, Default)]
pub struct SourceListing {
    pub entries: Vec<SourceEntry>,
}

impl SourceListing {
    /// Read the direct entries of `source_dir`, sorted by name
    pub fn read(source_dir: &Path) -> Result<Self> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(source_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| SyncError::Io(e.into()))?;

            let name = PathBuf::from(entry.file_name());
            if is_hidden(&name) {
                continue;
            }

            let kind = if entry.file_type().is_file() {
                EntryKind::File
            } else {
                EntryKind::Other
            };

            entries.push(SourceEntry {
                name,
                path: entry.path().to_path_buf(),
                kind,
            });
        }

        Ok(Self { entries })
    }

    /// Number of direct entries, files and non-files alike
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Entries that will be copied
    pub fn files(&self) -> impl Iterator<Item = &SourceEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::File)
    }

    /// Entries that are skipped by the non-recursive copy
    pub fn skipped(&self) -> impl Iterator<Item = &SourceEntry> {
        self.entries.iter().filter(|e| e.kind != EntryKind::File)
    }
}

fn is_hidden(name: &Path) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// A single completed copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedFile {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Engine for copying the source listing into a destination directory
pub struct CopyEngine<'a> {
    destination: &'a Path,
}

impl<'a> CopyEngine<'a> {
    pub fn new(destination: &'a Path) -> Self {
        Self { destination }
    }

    /// Copy every file in the listing, stopping at the first failure
    ///
    /// `on_copy` is called after each file lands.
    pub fn copy_all<F>(&self, listing: &SourceListing, mut on_copy: F) -> Result<Vec<CopiedFile>>
    where
        F: FnMut(&CopiedFile),
    {
        fs::create_dir_all(self.destination)?;

        let mut copied = Vec::new();
        for entry in listing.files() {
            let file = self.copy_file(entry)?;
            on_copy(&file);
            copied.push(file);
        }

        Ok(copied)
    }

    /// Copy a single file, overwriting the destination
    pub fn copy_file(&self, entry: &SourceEntry) -> Result<CopiedFile> {
        let to = self.destination.join(&entry.name);

        fs::copy(&entry.path, &to).map_err(|source| SyncError::Copy {
            from: entry.path.clone(),
            to: to.clone(),
            source,
        })?;

        Ok(CopiedFile {
            from: entry.path.clone(),
            to,
        })
    }
}
