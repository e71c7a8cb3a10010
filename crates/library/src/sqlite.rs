//! Read-only [`Catalog`] over a beets `library.db`.
//!
//! beets keeps albums and items in two SQLite tables. Item paths are stored
//! as raw bytes (BLOB in current libraries, TEXT in some older ones) and are
//! handed to the audit untouched.

use beets_audit_core::{Album, Catalog, Error, Item, Result};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row, params};
use std::path::{MAIN_SEPARATOR, Path};
use tracing::debug;

/// Catalog backed by a beets library database
#[derive(Debug)]
pub struct BeetsLibrary {
    conn: Connection,
    art_filename: String,
}

impl BeetsLibrary {
    /// Open the library at `path` read-only.
    ///
    /// `art_filename` is the stem beets uses for album art, normally "cover".
    /// The database is never created; a missing file is an error.
    pub fn open<P: AsRef<Path>>(path: P, art_filename: &str) -> Result<Self> {
        let path = path.as_ref();
        if !path.try_exists()? {
            return Err(Error::Catalog(format!(
                "library database not found: {}",
                path.display()
            )));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(catalog_error)?;

        let album_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM albums", [], |r| r.get(0))
            .map_err(catalog_error)?;
        debug!("Opened {} with {} albums", path.display(), album_count);

        Ok(Self {
            conn,
            art_filename: art_filename.to_string(),
        })
    }

    fn parse_album_row(row: &Row) -> rusqlite::Result<Album> {
        let disctotal: Option<i64> = row.get(3)?;
        Ok(Album {
            id: row.get(0)?,
            albumartist: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            album: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            disctotal: disctotal
                .map(|n| u32::try_from(n.max(0)).unwrap_or(u32::MAX))
                .unwrap_or(0),
        })
    }

    fn parse_item_row(row: &Row) -> rusqlite::Result<Item> {
        Ok(Item {
            id: row.get(0)?,
            path: raw_bytes(row, 1)?,
            media: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        })
    }
}

impl Catalog for BeetsLibrary {
    fn albums(&self) -> Result<Vec<Album>> {
        // beets' default album order: albumartist+ album+, case-insensitive
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, albumartist, album, disctotal FROM albums
                 ORDER BY LOWER(albumartist), LOWER(album), id",
            )
            .map_err(catalog_error)?;

        let albums = stmt
            .query_map([], Self::parse_album_row)
            .map_err(catalog_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(catalog_error)?;
        Ok(albums)
    }

    fn items(&self, album: &Album) -> Result<Vec<Item>> {
        // beets' default item order: artist+ album+ disc+ track+, case-insensitive
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, path, media FROM items
                 WHERE album_id = ?1
                 ORDER BY LOWER(artist), LOWER(album), disc, track, id",
            )
            .map_err(catalog_error)?;

        let items = stmt
            .query_map(params![album.id], Self::parse_item_row)
            .map_err(catalog_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(catalog_error)?;
        Ok(items)
    }

    fn art_destination(&self, album: &Album, image: &str) -> Result<Vec<u8>> {
        let items = self.items(album)?;
        let first = items.first().ok_or(Error::EmptyAlbum(album.id))?;

        let extension = Path::new(image)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let filename = format!("{}{}", self.art_filename, extension);

        Ok(join_bytes(dirname(&first.path), filename.as_bytes()))
    }
}

fn catalog_error(err: rusqlite::Error) -> Error {
    Error::Catalog(err.to_string())
}

/// Column value as raw bytes, accepting either BLOB or TEXT storage
fn raw_bytes(row: &Row, idx: usize) -> rusqlite::Result<Vec<u8>> {
    match row.get_ref(idx)? {
        ValueRef::Blob(bytes) | ValueRef::Text(bytes) => Ok(bytes.to_vec()),
        other => Err(rusqlite::Error::InvalidColumnType(
            idx,
            "path".to_string(),
            other.data_type(),
        )),
    }
}

fn is_separator(b: u8) -> bool {
    b == b'/' || (cfg!(windows) && b == b'\\')
}

/// Directory part of a byte path: everything before the last separator
fn dirname(path: &[u8]) -> &[u8] {
    match path.iter().rposition(|&b| is_separator(b)) {
        Some(0) => &path[..1],
        Some(i) => &path[..i],
        None => &[],
    }
}

fn join_bytes(dir: &[u8], name: &[u8]) -> Vec<u8> {
    let mut out = dir.to_vec();
    if !dir.is_empty() && !dir.last().copied().is_some_and(is_separator) {
        out.push(MAIN_SEPARATOR as u8);
    }
    out.extend_from_slice(name);
    out
}
