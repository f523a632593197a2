//! A line within a sequence difference file.

use std::str::FromStr;

use crate::mismatch;
use crate::mismatch::Pair;

/// The prefix of a line that sets the chromosome context.
pub const CHROMOSOME_PREFIX: &str = "Chromosome:";

/// The prefix of a comment line (after any leading whitespace).
pub const COMMENT_PREFIX: char = '#';

/// An error associated with parsing a line.
#[derive(Debug)]
pub enum Error {
    /// A chromosome line without a chromosome name.
    MissingChromosomeName(String),

    /// An invalid mismatch record.
    InvalidMismatch(mismatch::Error, String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingChromosomeName(line) => {
                write!(f, "missing chromosome name\n\nline: {line}")
            }
            Error::InvalidMismatch(err, line) => {
                write!(f, "invalid mismatch record: {err}\n\nline: {line}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A line within a sequence difference file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Line {
    /// An empty (or whitespace only) line.
    Empty,

    /// A comment line.
    Comment(String),

    /// A line setting the chromosome for the mismatch records that follow.
    Chromosome(String),

    /// A mismatch record.
    Mismatch(Pair),
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Line::Empty => write!(f, ""),
            Line::Comment(comment) => write!(f, "{comment}"),
            Line::Chromosome(name) => write!(f, "{CHROMOSOME_PREFIX} {name}"),
            Line::Mismatch(pair) => write!(f, "{pair}"),
        }
    }
}

impl FromStr for Line {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_start();

        if trimmed.trim_end().is_empty() {
            Ok(Self::Empty)
        } else if trimmed.starts_with(COMMENT_PREFIX) {
            Ok(Self::Comment(s.to_string()))
        } else if let Some(name) = trimmed.strip_prefix(CHROMOSOME_PREFIX) {
            let name = name.trim();

            if name.is_empty() {
                return Err(Error::MissingChromosomeName(s.into()));
            }

            Ok(Self::Chromosome(name.to_string()))
        } else {
            s.parse::<Pair>()
                .map(Line::Mismatch)
                .map_err(|e| Error::InvalidMismatch(e, s.into()))
        }
    }
}
