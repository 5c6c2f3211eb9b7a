//! The mutable path buffer threaded through validation.
//!
//! Keywords that recurse into an instance by key or index push a segment
//! before the recursive call and pop it after, on every exit path. Errors
//! snapshot the buffer at the moment of failure.
use std::fmt;

/// One segment of a path into a JSON instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathChunk {
    Name(String),
    Index(usize),
}

impl From<String> for PathChunk {
    fn from(name: String) -> Self {
        PathChunk::Name(name)
    }
}

impl From<&str> for PathChunk {
    fn from(name: &str) -> Self {
        PathChunk::Name(name.to_string())
    }
}

impl From<usize> for PathChunk {
    fn from(index: usize) -> Self {
        PathChunk::Index(index)
    }
}

impl fmt::Display for PathChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathChunk::Name(name) => write!(f, "{}", name),
            PathChunk::Index(index) => write!(f, "{}", index),
        }
    }
}

/// The per-validation path stack. Owned by the caller of `validate`/`is_valid`
/// (in practice, allocated fresh inside those two entrypoints) and never
/// shared across threads.
#[derive(Debug, Default)]
pub struct InstancePath {
    chunks: Vec<PathChunk>,
}

impl InstancePath {
    pub fn new() -> Self {
        InstancePath { chunks: Vec::new() }
    }

    pub fn push(&mut self, chunk: impl Into<PathChunk>) {
        self.chunks.push(chunk.into());
    }

    pub fn pop(&mut self) {
        self.chunks.pop();
    }

    /// Snapshot the current path as an owned, string-based sequence, the
    /// shape `ValidationError` carries.
    pub fn snapshot(&self) -> Vec<String> {
        self.chunks.iter().map(ToString::to_string).collect()
    }
}

/// RAII guard that pops a single pushed segment when dropped, restoring the
/// path even if the guarded region returns early via `?`.
pub struct PathGuard<'a> {
    path: &'a mut InstancePath,
}

impl<'a> PathGuard<'a> {
    pub fn new(path: &'a mut InstancePath, chunk: impl Into<PathChunk>) -> Self {
        path.push(chunk);
        PathGuard { path }
    }

    pub fn path(&mut self) -> &mut InstancePath {
        self.path
    }
}

impl Drop for PathGuard<'_> {
    fn drop(&mut self) {
        self.path.pop();
    }
}
