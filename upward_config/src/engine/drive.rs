//! Executors for [`Search`] requests.

use crate::UpwardResult;
use crate::fs::{AsyncFileSystem, FileSystem};
use crate::loaded::LoadedConfig;

use super::{Reply, Request, Search, Step};

/// Runs `search` to completion with blocking I/O.
///
/// # Errors
///
/// Returns the classified failure that terminated the search.
pub fn run_blocking<F>(mut search: Search<'_>, fs: &F) -> UpwardResult<Option<LoadedConfig>>
where
    F: FileSystem + ?Sized,
{
    loop {
        let reply = match search.next_step() {
            Step::Request(Request::InspectDirectory(dir)) => {
                tracing::debug!(dir = %dir.display(), "inspecting directory");
                Reply::Directory(fs.is_directory(&dir))
            }
            Step::Request(Request::ReadFile(path)) => {
                tracing::trace!(path = %path.display(), "probing candidate");
                Reply::File(fs.read_to_string(&path))
            }
            Step::Finished(result) => return result,
        };
        search.complete(reply);
    }
}

/// Runs `search` to completion, awaiting each I/O request.
///
/// # Errors
///
/// Returns the classified failure that terminated the search.
pub async fn run_async<F>(mut search: Search<'_>, fs: &F) -> UpwardResult<Option<LoadedConfig>>
where
    F: AsyncFileSystem,
{
    loop {
        let reply = match search.next_step() {
            Step::Request(Request::InspectDirectory(dir)) => {
                tracing::debug!(dir = %dir.display(), "inspecting directory");
                Reply::Directory(fs.is_directory(&dir).await)
            }
            Step::Request(Request::ReadFile(path)) => {
                tracing::trace!(path = %path.display(), "probing candidate");
                Reply::File(fs.read_to_string(&path).await)
            }
            Step::Finished(result) => return result,
        };
        search.complete(reply);
    }
}
