//! Explorer behaviour: bounds, caching and transforms.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use serde_json::json;

use super::*;
use crate::fs::MemoryFileSystem;

fn explorer(fs: MemoryFileSystem) -> ConfigExplorer<MemoryFileSystem> {
    ConfigExplorer::new(SearchOptions::builder("foo").build()).with_filesystem(fs)
}

fn tree() -> MemoryFileSystem {
    MemoryFileSystem::new()
        .with_dir("/repo/a/b")
        .with_file("/repo/.foorc", "found: true")
}

#[test]
fn repeated_searches_are_served_from_the_cache() -> Result<()> {
    let explorer = explorer(tree());
    let first = explorer.search_sync(Some(Path::new("/repo/a/b")))?;
    let calls = explorer.fs.calls().len();
    let second = explorer.search_sync(Some(Path::new("/repo/a/b")))?;
    ensure!(first == second, "cached result differs");
    ensure!(explorer.fs.calls().len() == calls, "cache hit must not touch the filesystem");
    Ok(())
}

#[test]
fn not_found_outcomes_are_cached_too() -> Result<()> {
    let explorer = explorer(MemoryFileSystem::new().with_dir("/empty"));
    ensure!(explorer.search_sync(Some(Path::new("/empty")))?.is_none(), "nothing to find");
    explorer.fs.clear_calls();
    ensure!(explorer.search_sync(Some(Path::new("/empty")))?.is_none(), "nothing to find");
    ensure!(explorer.fs.calls().is_empty(), "cached miss must not touch the filesystem");
    Ok(())
}

#[test]
fn disabled_cache_searches_every_time() -> Result<()> {
    let explorer = explorer(tree()).cache(false);
    explorer.search_sync(Some(Path::new("/repo/a")))?;
    let calls = explorer.fs.calls().len();
    explorer.search_sync(Some(Path::new("/repo/a")))?;
    ensure!(explorer.fs.calls().len() == calls * 2, "every search must hit the filesystem");
    Ok(())
}

#[rstest]
#[case::search(true)]
#[case::everything(false)]
fn clearing_caches_forces_a_new_search(#[case] search_only: bool) -> Result<()> {
    let explorer = explorer(tree());
    explorer.search_sync(Some(Path::new("/repo/a")))?;
    if search_only {
        explorer.clear_search_cache();
    } else {
        explorer.clear_caches();
    }
    explorer.fs.clear_calls();
    explorer.search_sync(Some(Path::new("/repo/a")))?;
    ensure!(!explorer.fs.calls().is_empty(), "cleared cache must search again");
    Ok(())
}

#[test]
fn file_cache_is_separate_from_search_cache() -> Result<()> {
    let explorer = explorer(tree());
    explorer.load_path_sync(Path::new("/repo/.foorc"))?;
    explorer.clear_search_cache();
    explorer.fs.clear_calls();
    explorer.load_path_sync(Path::new("/repo/.foorc"))?;
    ensure!(explorer.fs.calls().is_empty(), "file cache must survive a search-cache clear");
    explorer.clear_file_cache();
    explorer.load_path_sync(Path::new("/repo/.foorc"))?;
    ensure!(explorer.fs.reads().len() == 1, "cleared file cache must read again");
    Ok(())
}

#[test]
fn failures_are_never_cached() -> Result<()> {
    let explorer = explorer(
        MemoryFileSystem::new().with_file("/bad/.foorc", "found: true: broken"),
    );
    ensure!(explorer.search_sync(Some(Path::new("/bad"))).is_err(), "must fail");
    explorer.fs.clear_calls();
    ensure!(explorer.search_sync(Some(Path::new("/bad"))).is_err(), "must fail again");
    ensure!(!explorer.fs.calls().is_empty(), "failure must not be served from cache");
    Ok(())
}

#[test]
fn stop_dir_bounds_the_walk() -> Result<()> {
    let options = SearchOptions::builder("foo").stop_dir("/repo/a").build();
    let explorer = ConfigExplorer::new(options).with_filesystem(tree());
    let result = explorer.search_sync(Some(Path::new("/repo/a/b")))?;
    ensure!(result.is_none(), "config above stop_dir must not be found");
    ensure!(
        !explorer.fs.reads().contains(&PathBuf::from("/repo/.foorc")),
        "nothing above stop_dir may be probed"
    );
    Ok(())
}

#[test]
fn start_dir_option_is_the_default_start() -> Result<()> {
    let options = SearchOptions::builder("foo").start_dir("/repo/a/b").build();
    let explorer = ConfigExplorer::new(options).with_filesystem(tree());
    let found = explorer
        .search_sync(None)?
        .ok_or_else(|| anyhow!("expected config"))?;
    ensure!(found.filepath == Path::new("/repo/.foorc"), "wrong file");
    ensure!(
        explorer.fs.calls().first() == Some(&crate::fs::FsCall::IsDirectory(PathBuf::from("/repo/a/b"))),
        "search must begin at start_dir"
    );
    Ok(())
}

#[test]
fn start_paths_are_normalised() -> Result<()> {
    let explorer = explorer(tree());
    let found = explorer
        .search_sync(Some(Path::new("/repo/a/b/../b/./")))?
        .ok_or_else(|| anyhow!("expected config"))?;
    ensure!(found.filepath == Path::new("/repo/.foorc"), "wrong file");
    Ok(())
}

#[test]
fn config_path_bypasses_the_walk() -> Result<()> {
    let fs = tree().with_file("/elsewhere/custom.json", r#"{ "custom": 1 }"#);
    let options = SearchOptions::builder("foo")
        .config_path("/elsewhere/custom.json")
        .build();
    let explorer = ConfigExplorer::new(options).with_filesystem(fs);
    let found = explorer
        .search_sync(Some(Path::new("/repo/a/b")))?
        .ok_or_else(|| anyhow!("expected config"))?;
    ensure!(found.config == json!({ "custom": 1 }), "wrong config");
    ensure!(
        explorer.fs.reads() == [PathBuf::from("/elsewhere/custom.json")],
        "only the explicit file may be read"
    );
    Ok(())
}

#[test]
fn transform_runs_once_before_caching() -> Result<()> {
    let runs = std::sync::Arc::new(AtomicUsize::new(0));
    let counter = std::sync::Arc::clone(&runs);
    let explorer = explorer(tree()).with_transform(move |mut found| {
        counter.fetch_add(1, Ordering::SeqCst);
        found.config = json!({ "wrapped": found.config });
        Ok(found)
    });
    let first = explorer
        .search_sync(Some(Path::new("/repo")))?
        .ok_or_else(|| anyhow!("expected config"))?;
    let second = explorer
        .search_sync(Some(Path::new("/repo")))?
        .ok_or_else(|| anyhow!("expected config"))?;
    ensure!(first.config == json!({ "wrapped": { "found": true } }), "transform not applied");
    ensure!(first == second, "cached value must be the transformed one");
    ensure!(runs.load(Ordering::SeqCst) == 1, "transform must run once");
    Ok(())
}

#[test]
fn transform_errors_propagate() -> Result<()> {
    let explorer = explorer(tree())
        .with_transform(|found| Err(UpwardError::transform(&found.filepath, "rejected")));
    let err = explorer
        .search_sync(Some(Path::new("/repo")))
        .err()
        .ok_or_else(|| anyhow!("expected failure"))?;
    ensure!(
        matches!(err.as_ref(), UpwardError::Transform { message, .. } if message == "rejected"),
        "unexpected error {err}"
    );
    Ok(())
}

#[test]
fn custom_module_loader_is_used() -> Result<()> {
    let fs = MemoryFileSystem::new().with_file("/js/foo.config.js", "anything at all");
    let explorer = explorer(fs).with_module_loader(
        |_: &Path, _: &str| -> std::result::Result<Option<serde_json::Value>, crate::ModuleError> {
            Ok(Some(json!({ "from": "loader" })))
        },
    );
    let found = explorer
        .search_sync(Some(Path::new("/js")))?
        .ok_or_else(|| anyhow!("expected config"))?;
    ensure!(found.config == json!({ "from": "loader" }), "wrong config");
    Ok(())
}

#[test]
fn missing_explicit_path_is_an_input_error() -> Result<()> {
    let explorer = explorer(MemoryFileSystem::new());
    let err = explorer
        .load_path_sync(Path::new("/nowhere/config.yml"))
        .err()
        .ok_or_else(|| anyhow!("expected failure"))?;
    ensure!(
        matches!(err.as_ref(), UpwardError::Input { source, .. } if source.kind() == io::ErrorKind::NotFound),
        "unexpected error {err}"
    );
    Ok(())
}

#[tokio::test]
async fn async_search_matches_blocking_search() -> Result<()> {
    let blocking = explorer(tree()).cache(false);
    let non_blocking = explorer(tree()).cache(false);
    let expected = blocking.search_sync(Some(Path::new("/repo/a/b")))?;
    let actual = non_blocking.search(Some(Path::new("/repo/a/b"))).await?;
    ensure!(expected == actual, "drivers disagree");
    ensure!(
        blocking.fs.calls() == non_blocking.fs.calls(),
        "drivers must issue identical requests"
    );
    Ok(())
}

#[tokio::test]
async fn async_load_path_reads_the_file() -> Result<()> {
    let explorer = explorer(tree());
    let found = explorer
        .load_path(Path::new("/repo/.foorc"))
        .await?
        .ok_or_else(|| anyhow!("expected config"))?;
    ensure!(found.config == json!({ "found": true }), "wrong config");
    Ok(())
}
