use serde::Serialize;

/// Media label that marks an item as ripped from a compact disc
pub const CD_MEDIA: &str = "CD";

/// Album row as the catalog exposes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: i64,
    pub albumartist: String,
    pub album: String,
    /// Declared number of discs, expected to match the number of rip logs
    pub disctotal: u32,
}

impl Album {
    /// Human-readable label for log lines
    pub fn label(&self) -> String {
        match (self.albumartist.is_empty(), self.album.is_empty()) {
            (false, false) => format!("{} - {}", self.albumartist, self.album),
            (true, false) => self.album.clone(),
            (false, true) => self.albumartist.clone(),
            (true, true) => format!("album {}", self.id),
        }
    }
}

/// Track belonging to exactly one album
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: i64,
    /// Raw path bytes as stored by the catalog
    pub path: Vec<u8>,
    /// Free-text media label, e.g. "CD" or "Digital Media"
    pub media: String,
}

/// Complete audit output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub cover_art: CoverArtAudit,
    pub log: LogAudit,
}

/// Albums without a cover image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverArtAudit {
    pub missing: Vec<String>,
}

/// CD albums with fewer rip logs than discs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogAudit {
    pub missing: Vec<MissingLogs>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingLogs {
    pub path: String,
    pub disctotal: u32,
    pub num_log_files: usize,
}
