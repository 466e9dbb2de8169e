//! The search algorithm as a sans-IO state machine.
//!
//! [`Search`] never touches the filesystem. It emits one [`Request`] at a
//! time through [`Search::next_step`] and is fed the matching [`Reply`]
//! through [`Search::complete`]. The blocking and async drivers in this
//! module are thin loops over that protocol, so both share one algorithm.
//!
//! ```text
//! Inspect ─▶ AwaitInspect ─▶ Probe ─▶ AwaitProbe ─▶ Finished
//!    ▲                         ▲  │        │
//!    └──── next ancestor ──────┼──┘        │ not found / absent
//!                              └───────────┘
//! ```

mod drive;
pub mod probe;

use std::collections::VecDeque;
use std::fmt;
use std::io;
use std::mem;
use std::path::{Path, PathBuf};

pub use drive::{run_async, run_blocking};

use crate::UpwardResult;
use crate::candidates::{Candidate, candidates_for, explicit_candidate};
use crate::error::UpwardError;
use crate::format::{ModuleLoader, dispatch};
use crate::loaded::LoadedConfig;
use crate::options::SearchOptions;
use crate::walk::AncestorWalk;
use probe::{ProbeOutcome, classify};

/// An I/O operation the engine needs performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Answer with [`Reply::Directory`].
    InspectDirectory(PathBuf),
    /// Answer with [`Reply::File`].
    ReadFile(PathBuf),
}

/// The answer to a [`Request`].
#[derive(Debug)]
pub enum Reply {
    /// Outcome of inspecting a directory.
    Directory(io::Result<bool>),
    /// Outcome of reading a candidate file.
    File(io::Result<String>),
}

/// What the engine wants next.
#[derive(Debug)]
pub enum Step {
    /// Perform the request and pass the result to [`Search::complete`].
    Request(Request),
    /// The search is over.
    Finished(UpwardResult<Option<LoadedConfig>>),
}

#[derive(Debug)]
enum State {
    Inspect {
        dir: PathBuf,
        origin: bool,
    },
    AwaitInspect {
        dir: PathBuf,
        origin: bool,
    },
    /// `dir` is `None` for an explicit path, which has no directory to
    /// ascend from.
    Probe {
        dir: Option<PathBuf>,
        pending: VecDeque<Candidate>,
    },
    AwaitProbe {
        dir: Option<PathBuf>,
        candidate: Candidate,
        pending: VecDeque<Candidate>,
    },
    Finished(UpwardResult<Option<LoadedConfig>>),
}

/// One configuration search.
///
/// # Examples
///
/// Driving the machine by hand against a scripted filesystem:
///
/// ```
/// use std::io;
/// use std::path::{Path, PathBuf};
/// use upward_config::SearchOptions;
/// use upward_config::engine::{Reply, Request, Search, Step};
///
/// let options = SearchOptions::builder("foo").build();
/// let loader = upward_config::default_module_loader();
/// let mut search = Search::walk("/repo".into(), "/repo".into(), &options, loader.as_ref());
/// let result = loop {
///     match search.next_step() {
///         Step::Request(Request::InspectDirectory(_)) => search.complete(Reply::Directory(Ok(true))),
///         Step::Request(Request::ReadFile(path)) if path == Path::new("/repo/.foorc") => {
///             search.complete(Reply::File(Ok(String::from("found: true"))));
///         }
///         Step::Request(Request::ReadFile(_)) => {
///             search.complete(Reply::File(Err(io::ErrorKind::NotFound.into())));
///         }
///         Step::Finished(result) => break result,
///     }
/// };
/// let found = result.expect("no failure").expect("config found");
/// assert_eq!(found.filepath, PathBuf::from("/repo/.foorc"));
/// ```
pub struct Search<'a> {
    options: &'a SearchOptions,
    loader: &'a dyn ModuleLoader,
    walk: Option<AncestorWalk>,
    state: State,
}

impl fmt::Debug for Search<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Search")
            .field("module_name", &self.options.module_name())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'a> Search<'a> {
    /// Starts an upward search at `start` that never inspects anything above
    /// `stop`. Both paths must already be absolute and normalised.
    #[must_use]
    pub fn walk(
        start: PathBuf,
        stop: PathBuf,
        options: &'a SearchOptions,
        loader: &'a dyn ModuleLoader,
    ) -> Self {
        let mut walk = AncestorWalk::new(start, stop);
        let state = walk.next().map_or_else(
            || State::Finished(Ok(None)),
            |dir| State::Inspect { dir, origin: true },
        );
        Self {
            options,
            loader,
            walk: Some(walk),
            state,
        }
    }

    /// Loads exactly `path`, inferring its format from the extension unless
    /// the options force one.
    #[must_use]
    pub fn explicit(path: &Path, options: &'a SearchOptions, loader: &'a dyn ModuleLoader) -> Self {
        let candidate = explicit_candidate(path, options.format());
        Self {
            options,
            loader,
            walk: None,
            state: State::Probe {
                dir: None,
                pending: VecDeque::from([candidate]),
            },
        }
    }

    /// Returns the next request, or the final result.
    ///
    /// Calling this again without [`complete`](Self::complete) repeats the
    /// outstanding request; once finished it keeps returning the result.
    pub fn next_step(&mut self) -> Step {
        loop {
            match mem::replace(&mut self.state, State::Finished(Ok(None))) {
                State::Inspect { dir, origin } | State::AwaitInspect { dir, origin } => {
                    let request = Request::InspectDirectory(dir.clone());
                    self.state = State::AwaitInspect { dir, origin };
                    return Step::Request(request);
                }
                State::Probe { dir, mut pending } => {
                    let Some(candidate) = pending.pop_front() else {
                        self.state = self.ascend();
                        continue;
                    };
                    let request = Request::ReadFile(candidate.path.clone());
                    self.state = State::AwaitProbe {
                        dir,
                        candidate,
                        pending,
                    };
                    return Step::Request(request);
                }
                State::AwaitProbe {
                    dir,
                    candidate,
                    pending,
                } => {
                    let request = Request::ReadFile(candidate.path.clone());
                    self.state = State::AwaitProbe {
                        dir,
                        candidate,
                        pending,
                    };
                    return Step::Request(request);
                }
                State::Finished(result) => {
                    self.state = State::Finished(result.clone());
                    return Step::Finished(result);
                }
            }
        }
    }

    /// Feeds the outcome of the last request back into the machine.
    ///
    /// A reply that does not match the outstanding request is ignored.
    pub fn complete(&mut self, reply: Reply) {
        let state = mem::replace(&mut self.state, State::Finished(Ok(None)));
        self.state = match (state, reply) {
            (State::AwaitInspect { dir, origin }, Reply::Directory(outcome)) => {
                self.inspected(dir, origin, outcome)
            }
            (
                State::AwaitProbe {
                    dir,
                    candidate,
                    pending,
                },
                Reply::File(outcome),
            ) => self.probed(dir, &candidate, pending, outcome),
            (state, reply) => {
                tracing::trace!(?reply, "ignoring reply that matches no request");
                state
            }
        };
    }

    /// Returns `true` once the result is known.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.state, State::Finished(_))
    }

    fn inspected(&mut self, dir: PathBuf, origin: bool, outcome: io::Result<bool>) -> State {
        match outcome {
            Ok(true) => {
                let pending = candidates_for(&dir, self.options).into();
                State::Probe {
                    dir: Some(dir),
                    pending,
                }
            }
            // A file given as the start path searches from its directory.
            Ok(false) if origin => self.ascend(),
            Ok(false) => State::Finished(Err(UpwardError::input(
                &dir,
                io::Error::from(io::ErrorKind::NotADirectory),
            ))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => self.ascend(),
            Err(err) => State::Finished(Err(UpwardError::input(&dir, err))),
        }
    }

    fn probed(
        &mut self,
        dir: Option<PathBuf>,
        candidate: &Candidate,
        pending: VecDeque<Candidate>,
        outcome: io::Result<String>,
    ) -> State {
        let explicit = dir.is_none();
        match classify(outcome) {
            ProbeOutcome::Found(text) => match dispatch(candidate, &text, self.loader) {
                Ok(Some(config)) => State::Finished(Ok(Some(LoadedConfig::new(
                    config,
                    candidate.path.clone(),
                )))),
                Ok(None) => State::Probe { dir, pending },
                Err(err) => State::Finished(Err(err)),
            },
            ProbeOutcome::NotFound(err) if explicit => {
                State::Finished(Err(UpwardError::input(&candidate.path, err)))
            }
            ProbeOutcome::NotFound(_) => State::Probe { dir, pending },
            // A path the caller named is input, not a searched candidate.
            ProbeOutcome::Failed(err) if explicit => {
                State::Finished(Err(UpwardError::input(&candidate.path, err)))
            }
            ProbeOutcome::Failed(err) => {
                State::Finished(Err(UpwardError::read(&candidate.path, err)))
            }
        }
    }

    fn ascend(&mut self) -> State {
        self.walk.as_mut().and_then(Iterator::next).map_or_else(
            || State::Finished(Ok(None)),
            |dir| State::Inspect { dir, origin: false },
        )
    }
}
