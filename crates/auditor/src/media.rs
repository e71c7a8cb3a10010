use beets_audit_core::{Album, Catalog, Error, Result};

/// Most frequent media label across the album's tracks.
///
/// An album with no tracks has no media and is an error.
pub fn dominant_media<C: Catalog>(catalog: &C, album: &Album) -> Result<String> {
    let items = catalog.items(album)?;
    most_common(items.iter().map(|item| item.media.as_str()))
        .ok_or(Error::EmptyAlbum(album.id))
}

/// Most frequent label; on a tie the label seen first wins
fn most_common<'a>(labels: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for label in labels {
        match tally.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => tally.push((label, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (label, count) in tally {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label.to_string())
}
