//! Library audit: albums missing cover art, and CD rips missing their logs.
//!
//! Everything here is read-only. The catalog and the filesystem are reached
//! through the [`Catalog`] and [`Filesystem`] traits, and any failure aborts
//! the whole audit so a report is either complete or not produced at all.

pub mod cover_art;
pub mod fs;
pub mod media;
pub mod rip_log;

#[cfg(test)]
mod testing;

pub use cover_art::{audit_cover_art, find_cover_art};
pub use fs::StdFilesystem;
pub use media::dominant_media;
pub use rip_log::audit_log;

use beets_audit_core::{AuditReport, Catalog, Filesystem, Result};

/// Run both audits over the whole catalog
pub fn perform_audit<C: Catalog, F: Filesystem>(catalog: &C, fs: &F) -> Result<AuditReport> {
    Ok(AuditReport {
        cover_art: audit_cover_art(catalog, fs)?,
        log: audit_log(catalog, fs)?,
    })
}
