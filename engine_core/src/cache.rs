use std::{
    collections::HashMap,
    fmt, fs,
    ops::Deref,
    path::{Component, Path, PathBuf},
    rc::Rc,
};

use log::{debug, warn};

use crate::error::LoadError;

/// Cache key: resource id plus a numeric variant (font size, scale, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    pub id: String,
    pub variant: u32,
}

impl ResourceKey {
    pub fn new(id: impl Into<String>, variant: u32) -> Self {
        Self { id: id.into(), variant }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.variant)
    }
}

/// A loaded resource. The renderer decides what the bytes mean.
#[derive(Debug)]
pub struct Resource {
    key: ResourceKey,
    bytes: Vec<u8>,
}

impl Resource {
    pub fn new(key: ResourceKey, bytes: Vec<u8>) -> Self {
        Self { key, bytes }
    }

    #[inline]
    pub fn key(&self) -> &ResourceKey {
        &self.key
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_text(&self) -> Result<&str, LoadError> {
        std::str::from_utf8(&self.bytes)
            .map_err(|e| LoadError::Other(format!("'{}' is not utf-8: {e}", self.key)))
    }
}

/// Shared handle to a cached resource.
#[derive(Debug, Clone)]
pub struct ResourceHandle(Rc<Resource>);

impl ResourceHandle {
    /// Both handles point at the same cache entry.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl Deref for ResourceHandle {
    type Target = Resource;

    fn deref(&self) -> &Resource {
        &self.0
    }
}

/// Performs the actual (fallible) load on a cache miss.
pub trait ResourceLoader {
    fn load(&mut self, key: &ResourceKey) -> Result<Resource, LoadError>;
}

/// Reads `root/<id>` from disk. Ids must stay inside `root`.
pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, id: &str) -> Result<PathBuf, LoadError> {
        let rel = Path::new(id);
        let escapes = id.is_empty()
            || rel
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(LoadError::InvalidId(id.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

impl ResourceLoader for FileLoader {
    fn load(&mut self, key: &ResourceKey) -> Result<Resource, LoadError> {
        let path = self.resolve(&key.id)?;
        let bytes = fs::read(&path).map_err(|source| LoadError::Io { path, source })?;
        Ok(Resource::new(key.clone(), bytes))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub failures: u64,
}

/// Load-once, keep-forever resource cache.
///
/// At most one entry exists per [`ResourceKey`] and entries are never evicted;
/// memory is reclaimed when the run ends. Handles are `Rc`, so the cache is
/// `!Send` and stays on the loop thread. A renderer that loads from several
/// threads has to serialize `get_or_load` behind a lock to keep the
/// one-entry-per-key guarantee.
pub struct ResourceCache {
    loader: Box<dyn ResourceLoader>,
    entries: HashMap<ResourceKey, ResourceHandle>,
    stats: CacheStats,
}

impl ResourceCache {
    pub fn new(loader: impl ResourceLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Returns the cached handle for `(id, variant)`, loading it on first use.
    /// Failed loads are not cached; the next call tries again.
    pub fn get_or_load(&mut self, id: &str, variant: u32) -> Result<ResourceHandle, LoadError> {
        let key = ResourceKey::new(id, variant);
        if let Some(handle) = self.entries.get(&key) {
            self.stats.hits += 1;
            return Ok(handle.clone());
        }

        self.stats.misses += 1;
        match self.loader.load(&key) {
            Ok(resource) => {
                debug!(target: "phi::cache", "loaded {} ({} bytes)", key, resource.bytes().len());
                let handle = ResourceHandle(Rc::new(resource));
                self.entries.insert(key, handle.clone());
                Ok(handle)
            }
            Err(e) => {
                self.stats.failures += 1;
                warn!(target: "phi::cache", "load {} failed: {}", key, e);
                Err(e)
            }
        }
    }

    pub fn contains(&self, id: &str, variant: u32) -> bool {
        self.entries.contains_key(&ResourceKey::new(id, variant))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
