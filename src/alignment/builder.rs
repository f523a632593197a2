//! A builder for an [`Alignment`].

use crate::alignment::Alignment;
use crate::alignment::Cigar;
use crate::alignment::Flags;
use crate::alignment::UNMAPPED_CHROMOSOME;
use crate::feature::Outcome;
use crate::mismatch::Position;

/// An error that occurs when a required field was never provided to the
/// [`Builder`].
#[derive(Debug)]
pub enum MissingError {
    /// No chromosome was provided to the [`Builder`].
    Chromosome,

    /// No start was provided to the [`Builder`].
    Start,
}

impl std::fmt::Display for MissingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingError::Chromosome => write!(f, "chromosome"),
            MissingError::Start => write!(f, "start"),
        }
    }
}

impl std::error::Error for MissingError {}

/// An error that occurs when a singular field was provided multiple times to
/// the [`Builder`].
#[derive(Debug)]
pub enum MultipleError {
    /// The chromosome was provided multiple times to the [`Builder`].
    Chromosome,

    /// The start was provided multiple times to the [`Builder`].
    Start,
}

impl std::fmt::Display for MultipleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MultipleError::Chromosome => write!(f, "chromosome"),
            MultipleError::Start => write!(f, "start"),
        }
    }
}

impl std::error::Error for MultipleError {}

/// An error related to a [`Builder`].
#[derive(Debug)]
pub enum Error {
    /// An error where a required field was never provided to the [`Builder`].
    Missing(MissingError),

    /// An error where a singular field was provided to the [`Builder`] more
    /// than once.
    Multiple(MultipleError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Missing(err) => write!(f, "missing required field: {err}"),
            Error::Multiple(err) => write!(f, "singular field set multiple times: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A builder for an [`Alignment`].
///
/// The chromosome and start are required. A read without a mate defaults to a
/// mate chromosome of `*` at position `0`.
#[derive(Debug, Default)]
pub struct Builder {
    /// The chromosome.
    chromosome: Option<String>,

    /// The start.
    start: Option<Position>,

    /// The alignment operations.
    cigar: Cigar,

    /// The mate chromosome and start.
    mate: Option<(String, Position)>,

    /// The inferred insert size.
    insert_size: Position,

    /// The flags.
    flags: Flags,
}

impl Builder {
    /// Sets the chromosome for the [`Builder`].
    pub fn chromosome(mut self, chromosome: impl Into<String>) -> Result<Self> {
        if self.chromosome.is_some() {
            return Err(Error::Multiple(MultipleError::Chromosome));
        }

        self.chromosome = Some(chromosome.into());
        Ok(self)
    }

    /// Sets the start for the [`Builder`].
    pub fn start(mut self, start: Position) -> Result<Self> {
        if self.start.is_some() {
            return Err(Error::Multiple(MultipleError::Start));
        }

        self.start = Some(start);
        Ok(self)
    }

    /// Sets the alignment operations for the [`Builder`].
    pub fn cigar(mut self, cigar: Cigar) -> Self {
        self.cigar = cigar;
        self
    }

    /// Sets the mate chromosome and start for the [`Builder`].
    pub fn mate(mut self, chromosome: impl Into<String>, start: Position) -> Self {
        self.mate = Some((chromosome.into(), start));
        self
    }

    /// Sets the inferred insert size for the [`Builder`].
    pub fn insert_size(mut self, insert_size: Position) -> Self {
        self.insert_size = insert_size;
        self
    }

    /// Sets the flags for the [`Builder`].
    pub fn flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Consumes `self` to attempt to build an [`Alignment`].
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::alignment::Builder;
    /// use seqdiff::alignment::Flags;
    ///
    /// let alignment = Builder::default()
    ///     .chromosome("I")?
    ///     .start(9949500)?
    ///     .cigar("50M".parse()?)
    ///     .flags(Flags::from_bits(131))
    ///     .mate("=", 9949430)
    ///     .insert_size(-120)
    ///     .try_build()?;
    ///
    /// assert_eq!(alignment.chromosome(), "I");
    /// assert_eq!(alignment.mate_start(), 9949430);
    /// assert!(alignment.flags().is_second_of_pair());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_build(self) -> Result<Alignment> {
        let chromosome = self
            .chromosome
            .ok_or(Error::Missing(MissingError::Chromosome))?;
        let start = self.start.ok_or(Error::Missing(MissingError::Start))?;
        let (mate_chromosome, mate_start) = self
            .mate
            .unwrap_or_else(|| (UNMAPPED_CHROMOSOME.to_string(), 0));

        Ok(Alignment {
            chromosome,
            start,
            cigar: self.cigar,
            mate_chromosome,
            mate_start,
            insert_size: self.insert_size,
            flags: self.flags,
            outcome: Outcome::default(),
        })
    }
}
