//! Dotted name accumulator used to qualify nested entry names.
//!
//! A [`DottedPath`] is a stack of non-empty segments. Strings handed to
//! [`DottedPath::append`] and [`DottedPath::pop_dotted`] are split on `.`, so a
//! multi-level name like `"consumer.Kafka"` is pushed and popped as one unit.

use std::fmt;
use std::ops::Add;

use crate::error::PathError;

/// Segment delimiter.
pub const DELIMITER: char = '.';

/// Split a dotted string into its non-empty segments.
fn segments(dotted: &str) -> impl DoubleEndedIterator<Item = &str> + '_ {
    dotted.split(DELIMITER).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DottedPath {
    segments: Vec<String>,
}

impl DottedPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a path by appending each chunk in order.
    pub fn from_chunks<'a>(chunks: impl IntoIterator<Item = &'a str>) -> Self {
        let mut path = Self::new();
        for chunk in chunks {
            path.append(chunk);
        }
        path
    }

    /// Push every non-empty segment of `dotted`. Empty and delimiter-only
    /// strings are no-ops.
    pub fn append(&mut self, dotted: &str) {
        self.segments.extend(segments(dotted).map(str::to_string));
    }

    /// Remove and return the innermost segment.
    pub fn pop(&mut self) -> Result<String, PathError> {
        self.segments.pop().ok_or(PathError::Underflow {
            requested: 1,
            depth: 0,
        })
    }

    /// Remove the segments of `dotted` from the tail, checking each one.
    ///
    /// The whole tail is validated before anything is removed, so on error the
    /// path is left exactly as it was.
    pub fn pop_dotted(&mut self, dotted: &str) -> Result<(), PathError> {
        let expected: Vec<&str> = segments(dotted).collect();
        if expected.len() > self.segments.len() {
            return Err(PathError::Underflow {
                requested: expected.len(),
                depth: self.segments.len(),
            });
        }

        let tail_start = self.segments.len() - expected.len();
        // Compare innermost first, matching the order segments come off the stack.
        for (found, want) in self.segments[tail_start..]
            .iter()
            .rev()
            .zip(expected.iter().rev())
        {
            if found != want {
                return Err(PathError::Consistency {
                    expected: (*want).to_string(),
                    found: found.clone(),
                    path: self.to_string(),
                });
            }
        }

        self.segments.truncate(tail_start);
        Ok(())
    }

    /// Join this path with `other`, returning a new string.
    pub fn concat(&self, other: &str) -> String {
        if self.is_empty() {
            return other.to_string();
        }
        if other.is_empty() {
            return self.to_string();
        }
        format!("{}{}{}", self, DELIMITER, other)
    }

    /// Whether `segment` occurs anywhere in the path.
    pub fn contains(&self, segment: &str) -> bool {
        self.segments.iter().any(|s| s == segment)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for DottedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, "{}", DELIMITER)?;
            }
            f.write_str(segment)?;
            first = false;
        }
        Ok(())
    }
}

impl Add<&str> for &DottedPath {
    type Output = String;

    fn add(self, other: &str) -> String {
        self.concat(other)
    }
}

impl Add<&DottedPath> for &DottedPath {
    type Output = String;

    fn add(self, other: &DottedPath) -> String {
        self.concat(&other.to_string())
    }
}
