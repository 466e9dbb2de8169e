//! The caller-facing entry point: option resolution, caching and transforms
//! wrapped around the search engine.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::UpwardResult;
use crate::engine::{Search, run_async, run_blocking};
use crate::error::UpwardError;
use crate::format::{ModuleLoader, default_module_loader};
use crate::fs::{AsyncFileSystem, FileSystem, NativeFileSystem};
use crate::loaded::LoadedConfig;
use crate::options::SearchOptions;
use crate::walk::resolve;

type Transform = Arc<dyn Fn(LoadedConfig) -> UpwardResult<LoadedConfig> + Send + Sync>;

type Outcome = Option<LoadedConfig>;

#[derive(Debug, Default)]
struct Caches {
    search: Mutex<HashMap<PathBuf, Outcome>>,
    file: Mutex<HashMap<PathBuf, Outcome>>,
}

/// Finds and loads configuration for one module name.
///
/// The explorer owns the [`SearchOptions`], the filesystem and the module
/// loader. Successful outcomes (found and not found) are cached per start
/// directory and per explicit path; failures are never cached.
///
/// # Examples
///
/// ```rust,no_run
/// use upward_config::{ConfigExplorer, SearchOptions};
///
/// # async fn run() -> upward_config::UpwardResult<()> {
/// let explorer = ConfigExplorer::new(SearchOptions::builder("myapp").build());
/// match explorer.search(None).await? {
///     Some(found) => println!("{} -> {}", found.filepath.display(), found.config),
///     None => println!("no configuration"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct ConfigExplorer<F = NativeFileSystem> {
    options: SearchOptions,
    fs: F,
    loader: Arc<dyn ModuleLoader>,
    transform: Option<Transform>,
    caches: Option<Caches>,
}

impl<F: fmt::Debug> fmt::Debug for ConfigExplorer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigExplorer")
            .field("options", &self.options)
            .field("fs", &self.fs)
            .field("transform", &self.transform.is_some())
            .field("caches", &self.caches)
            .finish_non_exhaustive()
    }
}

impl ConfigExplorer {
    /// Creates an explorer over the host filesystem with caching enabled.
    #[must_use]
    pub fn new(options: SearchOptions) -> Self {
        Self {
            options,
            fs: NativeFileSystem,
            loader: default_module_loader(),
            transform: None,
            caches: Some(Caches::default()),
        }
    }
}

impl<F> ConfigExplorer<F> {
    /// Replaces the filesystem, keeping every other setting.
    #[must_use]
    pub fn with_filesystem<G>(self, fs: G) -> ConfigExplorer<G> {
        ConfigExplorer {
            options: self.options,
            fs,
            loader: self.loader,
            transform: self.transform,
            caches: self.caches.map(|_| Caches::default()),
        }
    }

    /// Replaces the loader used for `.js` candidates.
    #[must_use]
    pub fn with_module_loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    /// Applies `transform` to every configuration found, before caching.
    ///
    /// # Examples
    ///
    /// ```
    /// use upward_config::{ConfigExplorer, MemoryFileSystem, SearchOptions};
    ///
    /// let explorer = ConfigExplorer::new(SearchOptions::builder("foo").build())
    ///     .with_filesystem(MemoryFileSystem::new().with_file("/r/.foorc", "a: 1"))
    ///     .with_transform(|mut found| {
    ///         found.config["seen"] = serde_json::Value::Bool(true);
    ///         Ok(found)
    ///     });
    /// let found = explorer
    ///     .search_sync(Some("/r".as_ref()))
    ///     .expect("search succeeds")
    ///     .expect("config exists");
    /// assert_eq!(found.config, serde_json::json!({ "a": 1, "seen": true }));
    /// ```
    #[must_use]
    pub fn with_transform<T>(mut self, transform: T) -> Self
    where
        T: Fn(LoadedConfig) -> UpwardResult<LoadedConfig> + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Enables or disables result caching. Enabled by default.
    #[must_use]
    pub fn cache(mut self, enabled: bool) -> Self {
        self.caches = enabled.then(Caches::default);
        self
    }

    /// The options this explorer searches with.
    #[must_use]
    pub const fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// The filesystem searches run against.
    #[must_use]
    pub const fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Forgets cached directory searches.
    pub fn clear_search_cache(&self) {
        if let Some(caches) = &self.caches {
            caches.search.lock().clear();
        }
    }

    /// Forgets cached explicit loads.
    pub fn clear_file_cache(&self) {
        if let Some(caches) = &self.caches {
            caches.file.lock().clear();
        }
    }

    /// Forgets every cached outcome.
    pub fn clear_caches(&self) {
        self.clear_search_cache();
        self.clear_file_cache();
    }

    /// Resolves the start and stop directories of a walk.
    fn bounds(&self, start: Option<&Path>) -> UpwardResult<(PathBuf, PathBuf)> {
        let requested = start
            .or_else(|| self.options.start_dir())
            .unwrap_or_else(|| Path::new("."));
        let start_dir = resolve(requested).map_err(|err| UpwardError::input(requested, err))?;
        let stop_dir = match self.options.stop_dir() {
            Some(stop) => resolve(stop).map_err(|err| UpwardError::input(stop, err))?,
            None => start_dir
                .ancestors()
                .last()
                .map_or_else(|| start_dir.clone(), Path::to_path_buf),
        };
        Ok((start_dir, stop_dir))
    }

    fn cached(&self, kind: CacheKind, key: &Path) -> Option<Outcome> {
        let caches = self.caches.as_ref()?;
        let hit = kind.map(caches).lock().get(key).cloned();
        if hit.is_some() {
            tracing::debug!(key = %key.display(), ?kind, "configuration cache hit");
        }
        hit
    }

    fn finish(
        &self,
        kind: CacheKind,
        key: PathBuf,
        result: UpwardResult<Outcome>,
    ) -> UpwardResult<Outcome> {
        let outcome = match (result?, &self.transform) {
            (Some(found), Some(transform)) => Some(transform(found)?),
            (found, _) => found,
        };
        tracing::debug!(
            key = %key.display(),
            found = outcome.is_some(),
            "configuration search finished"
        );
        if let Some(caches) = &self.caches {
            kind.map(caches).lock().insert(key, outcome.clone());
        }
        Ok(outcome)
    }
}

impl<F: FileSystem> ConfigExplorer<F> {
    /// Searches upward from `start` (or the configured start directory, or
    /// the current directory) with blocking I/O.
    ///
    /// When the options name an explicit `config_path` that file is loaded
    /// instead and no directory is walked.
    ///
    /// # Errors
    ///
    /// Returns the classified failure that stopped the search.
    pub fn search_sync(&self, start: Option<&Path>) -> UpwardResult<Outcome> {
        if let Some(path) = self.options.config_path() {
            return self.load_path_sync(path);
        }
        let (start_dir, stop_dir) = self.bounds(start)?;
        if let Some(hit) = self.cached(CacheKind::Search, &start_dir) {
            return Ok(hit);
        }
        let search = Search::walk(
            start_dir.clone(),
            stop_dir,
            &self.options,
            self.loader.as_ref(),
        );
        let result = run_blocking(search, &self.fs);
        self.finish(CacheKind::Search, start_dir, result)
    }

    /// Loads exactly `path` with blocking I/O.
    ///
    /// # Errors
    ///
    /// Returns [`UpwardError::Input`] when the file does not exist or cannot
    /// be read, and the classified parse failure otherwise.
    pub fn load_path_sync(&self, path: &Path) -> UpwardResult<Outcome> {
        let resolved = resolve(path).map_err(|err| UpwardError::input(path, err))?;
        if let Some(hit) = self.cached(CacheKind::File, &resolved) {
            return Ok(hit);
        }
        let result = run_blocking(
            Search::explicit(&resolved, &self.options, self.loader.as_ref()),
            &self.fs,
        );
        self.finish(CacheKind::File, resolved, result)
    }
}

impl<F: AsyncFileSystem> ConfigExplorer<F> {
    /// Async counterpart of [`search_sync`](Self::search_sync).
    ///
    /// # Errors
    ///
    /// Returns the classified failure that stopped the search.
    pub async fn search(&self, start: Option<&Path>) -> UpwardResult<Outcome> {
        if let Some(path) = self.options.config_path() {
            return self.load_path(path).await;
        }
        let (start_dir, stop_dir) = self.bounds(start)?;
        if let Some(hit) = self.cached(CacheKind::Search, &start_dir) {
            return Ok(hit);
        }
        let search = Search::walk(
            start_dir.clone(),
            stop_dir,
            &self.options,
            self.loader.as_ref(),
        );
        let result = run_async(search, &self.fs).await;
        self.finish(CacheKind::Search, start_dir, result)
    }

    /// Async counterpart of [`load_path_sync`](Self::load_path_sync).
    ///
    /// # Errors
    ///
    /// Returns [`UpwardError::Input`] when the file does not exist or cannot
    /// be read, and the classified parse failure otherwise.
    pub async fn load_path(&self, path: &Path) -> UpwardResult<Outcome> {
        let resolved = resolve(path).map_err(|err| UpwardError::input(path, err))?;
        if let Some(hit) = self.cached(CacheKind::File, &resolved) {
            return Ok(hit);
        }
        let result = run_async(
            Search::explicit(&resolved, &self.options, self.loader.as_ref()),
            &self.fs,
        )
        .await;
        self.finish(CacheKind::File, resolved, result)
    }
}

#[derive(Debug, Clone, Copy)]
enum CacheKind {
    Search,
    File,
}

impl CacheKind {
    const fn map(self, caches: &Caches) -> &Mutex<HashMap<PathBuf, Outcome>> {
        match self {
            Self::Search => &caches.search,
            Self::File => &caches.file,
        }
    }
}

#[cfg(test)]
mod tests;
