//! Configuration loading with two-tier memoization
//!
//! Each [`ConfigLoader`] owns two tables:
//! - resolve cache: `(cwd, config path hint)` → resolved file path or `None`
//! - config cache: resolved file path (or "missing" for a resolve context) → document
//!
//! Entries never expire. A cached document is returned even if the file
//! changed on disk; pass `use_cache: false` to re-read. Failed loads are
//! not cached.

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use tracing::{debug, info};

use super::document::ConfigDocument;
use super::parser::read_document;
use super::resolver::{normalize_path, resolve_config_path};
use crate::cache::Memo;
use crate::error::{ConfigError, Result};

/// Options for a single load
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Directory the search starts from; defaults to the process working directory
    pub cwd: Option<PathBuf>,

    /// Explicit config file, absolute or relative to `cwd`
    pub config_path: Option<PathBuf>,

    /// Read and populate the caches (default `true`)
    pub use_cache: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            cwd: None,
            config_path: None,
            use_cache: true,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_config_path(mut self, config_path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(config_path.into());
        self
    }

    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }
}

/// Identity of a resolution request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolveKey {
    cwd: PathBuf,
    config_path: Option<PathBuf>,
}

impl ResolveKey {
    fn new(cwd: &Path, config_path: Option<&Path>) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            config_path: config_path
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf),
        }
    }
}

/// Key of the parsed-config cache
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigCacheKey {
    /// Config file found at this path
    Found(PathBuf),
    /// No config file for this resolution request
    Missing(ResolveKey),
}

impl ConfigCacheKey {
    fn new(resolved_path: Option<&Path>, resolve_key: &ResolveKey) -> Self {
        match resolved_path {
            Some(path) => ConfigCacheKey::Found(path.to_path_buf()),
            None => ConfigCacheKey::Missing(resolve_key.clone()),
        }
    }
}

static SHARED_LOADER: LazyLock<ConfigLoader> = LazyLock::new(ConfigLoader::new);

/// Resolves, parses and memoizes configuration files
pub struct ConfigLoader {
    resolve_cache: Memo<ResolveKey, Option<PathBuf>>,
    config_cache: Memo<ConfigCacheKey, Arc<ConfigDocument>>,
}

impl ConfigLoader {
    /// Create a loader with empty caches
    pub fn new() -> Self {
        Self {
            resolve_cache: Memo::new(),
            config_cache: Memo::new(),
        }
    }

    /// The process-wide loader used by [`load_config`]
    pub fn shared() -> &'static ConfigLoader {
        &SHARED_LOADER
    }

    /// Load the configuration that applies to `options.cwd`
    ///
    /// Returns an empty document when no config file is found. Fails only if
    /// a resolved file cannot be read or parsed, or if `cwd` is omitted and
    /// the process working directory is unavailable.
    pub async fn load(&self, options: LoadOptions) -> Result<Arc<ConfigDocument>> {
        let cwd = working_directory(options.cwd.as_deref())?;
        let resolve_key = ResolveKey::new(&cwd, options.config_path.as_deref());

        let resolved_path = if options.use_cache {
            let key = resolve_key.clone();
            self.resolve_cache
                .get_or_try_insert_with(resolve_key.clone(), move || async move {
                    Ok(resolve_config_path(&key.cwd, key.config_path.as_deref()).await)
                })
                .await?
        } else {
            debug!("Cache bypassed for {}", cwd.display());
            resolve_config_path(&cwd, options.config_path.as_deref()).await
        };

        let config_key = ConfigCacheKey::new(resolved_path.as_deref(), &resolve_key);

        let Some(path) = resolved_path else {
            if !options.use_cache {
                return Ok(Arc::new(ConfigDocument::new()));
            }
            return self
                .config_cache
                .get_or_try_insert_with(config_key, || async {
                    Ok(Arc::new(ConfigDocument::new()))
                })
                .await;
        };

        if !options.use_cache {
            return load_file(path).await;
        }

        self.config_cache
            .get_or_try_insert_with(config_key, move || load_file(path))
            .await
    }

    /// Number of memoized resolutions
    pub fn cached_resolutions(&self) -> usize {
        self.resolve_cache.len()
    }

    /// Number of memoized documents, including "no config" results
    pub fn cached_documents(&self) -> usize {
        self.config_cache.len()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration through the process-wide [`ConfigLoader`]
pub async fn load_config(options: LoadOptions) -> Result<Arc<ConfigDocument>> {
    ConfigLoader::shared().load(options).await
}

/// Read and parse `path`, naming it in any failure
async fn load_file(path: PathBuf) -> Result<Arc<ConfigDocument>> {
    match read_document(&path).await {
        Ok(document) => {
            info!("Loaded config from: {}", path.display());
            Ok(Arc::new(document))
        }
        Err(source) => Err(ConfigError::load(path, source)),
    }
}

/// Absolute search start with `.` and `..` folded out
///
/// Relative paths are taken from the process working directory. Both
/// spellings of a directory produce the same cache key.
fn working_directory(cwd: Option<&Path>) -> Result<PathBuf> {
    let absolute = match cwd {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => std::path::absolute(dir).map_err(ConfigError::working_directory)?,
        None => std::env::current_dir().map_err(ConfigError::working_directory)?,
    };
    Ok(normalize_path(&absolute))
}
