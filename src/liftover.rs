//! Facilities for lifting records from one release to another.

use crate::alignment::cigar;
use crate::mismatch::Position;
use crate::record::Record;

pub(crate) mod alignment;
pub mod chain;
pub(crate) mod feature;

pub use chain::Chain;

/// Whether a lift should continue on to the next mismatch pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Flow {
    /// Apply the next pair.
    Continue,

    /// The record has reached its final state.
    Stop,
}

/// An error related to lifting a record.
#[derive(Debug)]
pub enum Error {
    /// An alignment overlaps an inverted region, which alignments do not
    /// support.
    UnsupportedInversion {
        /// The chromosome of the alignment.
        chromosome: String,

        /// The (0-based) start of the inverted region.
        start: Position,
    },

    /// An alignment has a mapped mate on another chromosome.
    CrossChromosomeMate {
        /// The chromosome of the read.
        chromosome: String,

        /// The chromosome of the mate.
        mate_chromosome: String,
    },

    /// The alignment operations could not be edited.
    Cigar(cigar::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnsupportedInversion { chromosome, start } => write!(
                f,
                "cannot lift an alignment across the inversion at {chromosome}:{start}"
            ),
            Error::CrossChromosomeMate {
                chromosome,
                mate_chromosome,
            } => write!(
                f,
                "cannot lift a read on {chromosome} with its mate on {mate_chromosome}"
            ),
            Error::Cigar(err) => write!(f, "cigar error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A record before and after it was lifted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lifted {
    /// The record as it was provided.
    original: Record,

    /// The record after lifting.
    lifted: Record,
}

impl Lifted {
    /// Gets the record as it was provided.
    pub fn original(&self) -> &Record {
        &self.original
    }

    /// Gets the lifted record.
    pub fn lifted(&self) -> &Record {
        &self.lifted
    }

    /// Consumes `self` to return the original and lifted records.
    pub fn into_parts(self) -> (Record, Record) {
        (self.original, self.lifted)
    }
}
