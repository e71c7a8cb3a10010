use beets_audit_core::ports::decode_path;
use beets_audit_core::{Album, Catalog, CoverArtAudit, Filesystem, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// Cover image extensions, in lookup order
pub const COVER_EXTENSIONS: &[&str] = &[".jpg", ".png"];

/// First existing cover image for `album`, if any
pub fn find_cover_art<C: Catalog, F: Filesystem>(
    catalog: &C,
    fs: &F,
    album: &Album,
) -> Result<Option<PathBuf>> {
    for extension in COVER_EXTENSIONS {
        let destination = catalog.art_destination(album, &format!("cover{}", extension))?;
        let art_path = decode_path(destination)?;
        if fs.exists(&art_path)? {
            return Ok(Some(art_path));
        }
    }
    Ok(None)
}

pub fn audit_cover_art<C: Catalog, F: Filesystem>(catalog: &C, fs: &F) -> Result<CoverArtAudit> {
    Ok(CoverArtAudit {
        missing: audit_cover_art_missing(catalog, fs)?,
    })
}

/// Directories of albums with no cover image, in catalog order
fn audit_cover_art_missing<C: Catalog, F: Filesystem>(catalog: &C, fs: &F) -> Result<Vec<String>> {
    info!("Checking for missing cover art...");

    let mut results = Vec::new();
    for album in catalog.albums()? {
        match find_cover_art(catalog, fs, &album)? {
            Some(path) => debug!("Cover art for {}: {}", album.label(), path.display()),
            None => {
                let album_path = catalog.resolve_album_directory(&album)?;
                results.push(album_path.to_string_lossy().into_owned());
            }
        }
    }

    info!("{} albums are missing cover art", results.len());
    Ok(results)
}
