use crate::media::dominant_media;
use beets_audit_core::{CD_MEDIA, Catalog, Filesystem, LogAudit, MissingLogs, Result};
use tracing::{debug, info};

/// Suffix a rip log is recognised by.
///
/// Only the name is checked; the contents are never read, so any `.log` file
/// counts whether or not a ripper wrote it.
pub const LOG_SUFFIX: &str = ".log";

pub fn audit_log<C: Catalog, F: Filesystem>(catalog: &C, fs: &F) -> Result<LogAudit> {
    Ok(LogAudit {
        missing: audit_log_missing(catalog, fs)?,
    })
}

/// CD albums holding fewer rip logs than they have discs
fn audit_log_missing<C: Catalog, F: Filesystem>(catalog: &C, fs: &F) -> Result<Vec<MissingLogs>> {
    info!("Checking for missing rip logs...");

    let mut results = Vec::new();
    for album in catalog.albums()? {
        let media = dominant_media(catalog, &album)?;
        if media != CD_MEDIA {
            debug!("Skipping {} with media '{}'", album.label(), media);
            continue;
        }

        let album_path = catalog.resolve_album_directory(&album)?;
        let disctotal = album.disctotal;
        let num_log_files = fs.count_matching(&album_path, LOG_SUFFIX)?;

        if num_log_files < disctotal as usize {
            results.push(MissingLogs {
                path: album_path.to_string_lossy().into_owned(),
                disctotal,
                num_log_files,
            });
        } else if num_log_files > disctotal as usize {
            info!(
                "More log files found than disctotal for an album: {}",
                album_path.display()
            );
        }
    }

    info!("{} albums are missing logs", results.len());
    Ok(results)
}
