//! Selection paths into a projection tree.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Zero-based address of a group (`leaf = None`) or a leaf.
///
/// The textual form is one-based: `2` is the second group, `2.1` its first
/// leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreePath {
    pub group: usize,
    pub leaf: Option<usize>,
}

impl TreePath {
    pub fn group(group: usize) -> Self {
        Self { group, leaf: None }
    }

    pub fn leaf(group: usize, leaf: usize) -> Self {
        Self {
            group,
            leaf: Some(leaf),
        }
    }
}

impl Display for TreePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.leaf {
            None => write!(f, "{}", self.group + 1),
            Some(leaf) => write!(f, "{}.{}", self.group + 1, leaf + 1),
        }
    }
}

/// Tree path parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreePathError {
    Empty,
    InvalidSegment(String),
    TooManySegments(String),
}

impl Display for TreePathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "tree path must not be empty"),
            Self::InvalidSegment(segment) => {
                write!(f, "tree path segment `{segment}` must be a number >= 1")
            }
            Self::TooManySegments(value) => {
                write!(f, "tree path `{value}` must have the form G or G.L")
            }
        }
    }
}

impl Error for TreePathError {}

impl FromStr for TreePath {
    type Err = TreePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TreePathError::Empty);
        }

        let mut segments = trimmed.split('.');
        let group = parse_segment(segments.next().unwrap_or_default())?;
        let leaf = segments.next().map(parse_segment).transpose()?;
        if segments.next().is_some() {
            return Err(TreePathError::TooManySegments(trimmed.to_string()));
        }

        Ok(Self { group, leaf })
    }
}

fn parse_segment(segment: &str) -> Result<usize, TreePathError> {
    match segment.parse::<usize>() {
        Ok(value) if value >= 1 => Ok(value - 1),
        _ => Err(TreePathError::InvalidSegment(segment.to_string())),
    }
}
