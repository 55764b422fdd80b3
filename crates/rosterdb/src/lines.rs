//! Lazy, restartable line reader

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Reads a text file one trimmed line at a time
///
/// Nothing is opened until the first line is pulled. Every call to
/// [`LineReader::lines`] starts again from the top of the file.
#[derive(Debug, Clone)]
pub struct LineReader {
    path: PathBuf,
}

impl LineReader {
    /// Create a reader for the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path this reader reads from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start a fresh pass over the file
    pub fn lines(&self) -> Lines {
        Lines {
            path: self.path.clone(),
            state: State::Pending,
        }
    }
}

impl<'a> IntoIterator for &'a LineReader {
    type Item = Result<String>;
    type IntoIter = Lines;

    fn into_iter(self) -> Lines {
        self.lines()
    }
}

enum State {
    Pending,
    Open(std::io::Lines<BufReader<File>>),
    Done,
}

/// One pass over a file; the handle is released on exhaustion, error or drop
pub struct Lines {
    path: PathBuf,
    state: State,
}

impl Lines {
    /// Check if the underlying file is currently open
    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }
}

impl Iterator for Lines {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if let State::Pending = self.state {
            match File::open(&self.path) {
                Ok(file) => self.state = State::Open(BufReader::new(file).lines()),
                Err(e) => {
                    self.state = State::Done;
                    return Some(Err(e.into()));
                }
            }
        }

        let next = match &mut self.state {
            State::Open(lines) => lines.next(),
            _ => return None,
        };

        match next {
            Some(Ok(line)) => Some(Ok(line.trim().to_string())),
            Some(Err(e)) => {
                self.state = State::Done;
                Some(Err(e.into()))
            }
            None => {
                // Drop the handle as soon as the file is exhausted
                self.state = State::Done;
                None
            }
        }
    }
}

impl FusedIterator for Lines {}
