// In-memory catalog whose albums live in real scratch directories

use beets_audit_core::{Album, Catalog, Error, Item, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Default)]
pub struct FakeCatalog {
    albums: Vec<(Album, PathBuf, Vec<Item>)>,
}

impl FakeCatalog {
    pub fn add(&mut self, album: Album, dir: &Path, media: &[&str]) {
        let items = media
            .iter()
            .enumerate()
            .map(|(i, label)| Item {
                id: album.id * 100 + i as i64,
                path: dir
                    .join(format!("{:02}.flac", i + 1))
                    .to_string_lossy()
                    .into_owned()
                    .into_bytes(),
                media: label.to_string(),
            })
            .collect();
        self.albums.push((album, dir.to_path_buf(), items));
    }

    fn entry(&self, album: &Album) -> Result<&(Album, PathBuf, Vec<Item>)> {
        self.albums
            .iter()
            .find(|(a, _, _)| a.id == album.id)
            .ok_or_else(|| Error::Catalog(format!("no album with id {}", album.id)))
    }
}

impl Catalog for FakeCatalog {
    fn albums(&self) -> Result<Vec<Album>> {
        Ok(self.albums.iter().map(|(a, _, _)| a.clone()).collect())
    }

    fn items(&self, album: &Album) -> Result<Vec<Item>> {
        Ok(self.entry(album)?.2.clone())
    }

    fn art_destination(&self, album: &Album, image: &str) -> Result<Vec<u8>> {
        let (_, dir, items) = self.entry(album)?;
        if items.is_empty() {
            return Err(Error::EmptyAlbum(album.id));
        }
        let ext = Path::new(image)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        Ok(dir
            .join(format!("cover{}", ext))
            .to_string_lossy()
            .into_owned()
            .into_bytes())
    }
}

pub fn album(id: i64, disctotal: u32) -> Album {
    Album {
        id,
        albumartist: format!("Artist {}", id),
        album: format!("Album {}", id),
        disctotal,
    }
}

/// Create `name` as an empty file under `dir`, making parents as needed
pub fn touch(dir: &Path, name: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"").unwrap();
}

/// Log lines emitted at info level and above while `capture` runs
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
