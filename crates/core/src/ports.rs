//! Collaborators the audit reads from.
//!
//! The audit never talks to a concrete library or to `std::fs` directly; it
//! goes through these two traits so any catalog (a beets `library.db`, an
//! in-memory fixture) and any filesystem view can be plugged in.

use crate::error::{Error, Result};
use crate::types::{Album, Item};
use std::path::{Path, PathBuf};

/// Read-only view of the music catalog
pub trait Catalog {
    /// Every album in the catalog, in the catalog's own enumeration order
    fn albums(&self) -> Result<Vec<Album>>;

    /// Tracks belonging to `album`
    fn items(&self, album: &Album) -> Result<Vec<Item>>;

    /// Raw path at which an image named `image` would be stored for `album`.
    ///
    /// Only the extension of `image` is guaranteed to carry over; the stem is
    /// up to the catalog's own art naming rules.
    fn art_destination(&self, album: &Album, image: &str) -> Result<Vec<u8>>;

    /// Directory holding `album` on disk.
    ///
    /// There is no direct accessor for this on the catalog, so the default
    /// derives it: ask where `cover.png` would go and take its parent. A
    /// catalog that knows the album folder directly should override this.
    fn resolve_album_directory(&self, album: &Album) -> Result<PathBuf> {
        let destination = decode_path(self.art_destination(album, "cover.png")?)?;
        destination
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                Error::Resolution(format!(
                    "art destination '{}' for {} has no parent directory",
                    destination.display(),
                    album.label()
                ))
            })
    }
}

/// Read-only filesystem queries
pub trait Filesystem {
    /// Whether `path` exists. I/O failures other than "not found" are errors.
    fn exists(&self, path: &Path) -> Result<bool>;

    /// Number of entries under `dir`, at any depth, whose file name ends with
    /// `suffix`. Directories themselves are not counted.
    fn count_matching(&self, dir: &Path, suffix: &str) -> Result<usize>;
}

/// Decode raw catalog path bytes into a path.
///
/// Catalog paths are stored as UTF-8 bytes; anything else cannot be resolved.
pub fn decode_path(raw: Vec<u8>) -> Result<PathBuf> {
    String::from_utf8(raw)
        .map(PathBuf::from)
        .map_err(|e| Error::Resolution(format!("path is not valid UTF-8: {}", e)))
}
