use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use super::error::{DocsError, DocsResult};
use crate::catalog::SourceMap;

/// File name of a source's location map.
pub const MAP_FILENAME: &str = "map.json";
/// File name of a source's documentation body.
pub const BODY_FILENAME: &str = "description.md";

#[async_trait]
/// Read access to location maps, documentation bodies and supplementary documents.
pub trait DocumentSource: Send + Sync {
    /// Location map for `source` (e.g. `native`, `custom`).
    async fn location_map(&self, source: &str) -> DocsResult<SourceMap>;
    /// Full documentation body for `source`.
    async fn documentation(&self, source: &str) -> DocsResult<String>;
    /// Supplementary document by relative key (e.g. `custom/filters.md`).
    async fn supplement(&self, key: &str) -> DocsResult<String>;
}

/// Documents laid out on disk under a single root:
/// `<root>/<source>/map.json`, `<root>/<source>/description.md`, `<root>/<key>`.
#[derive(Debug, Clone)]
pub struct FsDocumentSource {
    root: PathBuf,
}

impl FsDocumentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> DocsResult<PathBuf> {
        sanitize_key(key)
            .map(|rel| self.root.join(rel))
            .ok_or_else(|| DocsError::InvalidKey {
                key: key.to_string(),
            })
    }

    async fn read(&self, path: PathBuf) -> DocsResult<String> {
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(DocsError::NotFound { path })
            }
            Err(e) => Err(DocsError::Io {
                path,
                reason: e.to_string(),
            }),
        }
    }
}

#[async_trait]
impl DocumentSource for FsDocumentSource {
    async fn location_map(&self, source: &str) -> DocsResult<SourceMap> {
        let path = self.resolve(source)?.join(MAP_FILENAME);
        let raw = self.read(path).await?;
        SourceMap::from_json_str(&raw).map_err(|e| DocsError::MalformedMap {
            source_tag: source.to_string(),
            reason: e.to_string(),
        })
    }

    async fn documentation(&self, source: &str) -> DocsResult<String> {
        let path = self.resolve(source)?.join(BODY_FILENAME);
        self.read(path).await
    }

    async fn supplement(&self, key: &str) -> DocsResult<String> {
        let path = self.resolve(key)?;
        self.read(path).await
    }
}

/// Keeps `key` inside the root: only normal components are allowed.
pub(crate) fn sanitize_key(key: &str) -> Option<PathBuf> {
    if key.is_empty() {
        return None;
    }

    let mut out = PathBuf::new();
    for c in Path::new(key).components() {
        match c {
            Component::Normal(seg) => out.push(seg),
            Component::CurDir => continue,
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if out.as_os_str().is_empty() {
        None
    } else {
        Some(out)
    }
}

#[cfg(any(test, feature = "mock"))]
#[derive(Default, Clone)]
/// In-memory [`DocumentSource`] that records how many reads it served.
pub struct MockDocumentSource {
    maps: std::sync::Arc<parking_lot::RwLock<std::collections::HashMap<String, SourceMap>>>,
    bodies: std::sync::Arc<parking_lot::RwLock<std::collections::HashMap<String, String>>>,
    supplements: std::sync::Arc<parking_lot::RwLock<std::collections::HashMap<String, String>>>,
    reads: std::sync::Arc<std::sync::atomic::AtomicUsize>,
}

#[cfg(any(test, feature = "mock"))]
impl MockDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_map(&self, source: &str, map: SourceMap) {
        self.maps.write().insert(source.to_string(), map);
    }

    pub fn insert_body(&self, source: &str, body: &str) {
        self.bodies
            .write()
            .insert(source.to_string(), body.to_string());
    }

    pub fn insert_supplement(&self, key: &str, content: &str) {
        self.supplements
            .write()
            .insert(key.to_string(), content.to_string());
    }

    /// Total reads served (successful or not).
    pub fn reads(&self) -> usize {
        self.reads.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn record_read(&self) {
        self.reads.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(any(test, feature = "mock"))]
#[async_trait]
impl DocumentSource for MockDocumentSource {
    async fn location_map(&self, source: &str) -> DocsResult<SourceMap> {
        self.record_read();
        self.maps
            .read()
            .get(source)
            .cloned()
            .ok_or_else(|| DocsError::NotFound {
                path: PathBuf::from(source).join(MAP_FILENAME),
            })
    }

    async fn documentation(&self, source: &str) -> DocsResult<String> {
        self.record_read();
        self.bodies
            .read()
            .get(source)
            .cloned()
            .ok_or_else(|| DocsError::NotFound {
                path: PathBuf::from(source).join(BODY_FILENAME),
            })
    }

    async fn supplement(&self, key: &str) -> DocsResult<String> {
        self.record_read();
        self.supplements
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| DocsError::NotFound {
                path: PathBuf::from(key),
            })
    }
}
