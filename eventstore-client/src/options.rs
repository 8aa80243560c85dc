//! Per-operation options descriptors.
//!
//! Each public operation takes an explicit options value rather than a loose
//! keyword bag. Integer cursors are **exclusive**: reading forwards `from:
//! Revision(0)` yields the event numbered 1 next. `Start` and `End` are
//! inclusive on the first chunk only.

use std::fmt;
use std::time::Duration;

use crate::event::ResolvedEvent;
use crate::proto::streams::read_req::options::FilterOptions;

/// What to read from: a named stream or the global `$all` log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadTarget {
    Stream(String),
    All,
}

impl ReadTarget {
    pub fn stream(name: impl Into<String>) -> ReadTarget {
        ReadTarget::Stream(name.into())
    }
}

impl From<&str> for ReadTarget {
    fn from(name: &str) -> ReadTarget {
        if name == "$all" {
            ReadTarget::All
        } else {
            ReadTarget::Stream(name.to_owned())
        }
    }
}

impl From<String> for ReadTarget {
    fn from(name: String) -> ReadTarget {
        ReadTarget::from(name.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forwards,
    Backwards,
}

/// Read/subscription cursor.
///
/// `Revision` and `Position` are exclusive; `Position` applies to `$all`
/// targets only. An event handle converts into the cursor that resumes
/// right after (or, backwards, right before) that event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Start,
    End,
    Revision(u64),
    Position { commit: u64, prepare: u64 },
}

impl From<&ResolvedEvent> for Cursor {
    fn from(event: &ResolvedEvent) -> Cursor {
        match event.commit_position {
            Some(commit) => Cursor::Position {
                commit,
                prepare: event.recorded().map(|e| e.position.prepare).unwrap_or(commit),
            },
            None => Cursor::Revision(event.cursor_revision()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReadOptions {
    pub from: Cursor,
    pub direction: Direction,
    /// Chunk size for `stream`, bound for `read_chunk`. Must be positive.
    pub max_count: u64,
    /// Server-side filter, passed through opaquely. `$all` targets only.
    pub filter: Option<FilterOptions>,
    pub resolve_links: bool,
    /// Per-chunk deadline for `stream`, per-request otherwise. `None` uses
    /// the connection default.
    pub timeout: Option<Duration>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            from: Cursor::Start,
            direction: Direction::Forwards,
            max_count: 128,
            filter: None,
            resolve_links: true,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubscribeOptions {
    pub from: Cursor,
    pub filter: Option<FilterOptions>,
    pub resolve_links: bool,
    /// Deadline for the subscription confirmation, not for delivery.
    pub timeout: Option<Duration>,
    /// Deliver raw read responses (including checkpoints) instead of
    /// converted domain events.
    pub raw: bool,
}

impl Default for SubscribeOptions {
    fn default() -> Self {
        SubscribeOptions {
            from: Cursor::Start,
            filter: None,
            resolve_links: true,
            timeout: None,
            raw: false,
        }
    }
}

/// Precondition on the stream evaluated atomically with an append or
/// delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedRevision {
    Any,
    StreamExists,
    NoStream,
    Exact(u64),
}

impl fmt::Display for ExpectedRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedRevision::Any => f.write_str("any"),
            ExpectedRevision::StreamExists => f.write_str("stream exists"),
            ExpectedRevision::NoStream => f.write_str("no stream"),
            ExpectedRevision::Exact(revision) => write!(f, "{}", revision),
        }
    }
}

/// The actual stream state reported by a failed expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentRevision {
    NoStream,
    Revision(u64),
}

impl fmt::Display for CurrentRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrentRevision::NoStream => f.write_str("no stream"),
            CurrentRevision::Revision(revision) => write!(f, "{}", revision),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppendOptions {
    pub expect: ExpectedRevision,
    pub timeout: Option<Duration>,
}

impl Default for AppendOptions {
    fn default() -> Self {
        AppendOptions {
            expect: ExpectedRevision::Any,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeleteOptions {
    pub expect: ExpectedRevision,
    /// Use the `Tombstone` RPC: a permanent deletion that forbids all
    /// future writes to the stream name.
    pub tombstone: bool,
    pub timeout: Option<Duration>,
}

impl Default for DeleteOptions {
    fn default() -> Self {
        DeleteOptions {
            expect: ExpectedRevision::Any,
            tombstone: false,
            timeout: None,
        }
    }
}
