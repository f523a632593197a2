//! Mismatch pairs within a sequence difference file.
//!
//! A mismatch pair documents one region of a chromosome that differs between
//! two adjacent releases of an assembly: the [`Span`] the region occupied in
//! the previous release, the [`Span`] it occupies in the current release, and
//! whether the region was inverted. Spans are 0-based and half-open as they
//! are stored on disk.

use std::num::ParseIntError;
use std::str::FromStr;

/// The delimiter for a mismatch record.
pub const DELIMITER: char = '\t';

/// The number of expected fields in a mismatch record.
pub const NUM_FIELDS: usize = 7;

/// A position on a chromosome.
///
/// Positions are signed because lifting applies signed length deltas to them.
pub type Position = i64;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// A field within a mismatch record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Field {
    /// The start of the mismatch in the previous release.
    PreviousStart,

    /// The end of the mismatch in the previous release.
    PreviousEnd,

    /// The length of the mismatch in the previous release.
    PreviousLength,

    /// The start of the mismatch in the current release.
    CurrentStart,

    /// The end of the mismatch in the current release.
    CurrentEnd,

    /// The length of the mismatch in the current release.
    CurrentLength,

    /// The inversion flag.
    Inverted,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::PreviousStart => write!(f, "previous start"),
            Field::PreviousEnd => write!(f, "previous end"),
            Field::PreviousLength => write!(f, "previous length"),
            Field::CurrentStart => write!(f, "current start"),
            Field::CurrentEnd => write!(f, "current end"),
            Field::CurrentLength => write!(f, "current length"),
            Field::Inverted => write!(f, "inversion flag"),
        }
    }
}

/// An error related to the parsing of a mismatch record.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of fields in the mismatch line.
    IncorrectNumberOfFields(usize),

    /// A field that could not be parsed as an integer.
    InvalidField(Field, ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in mismatch record: expected at least {NUM_FIELDS} \
                 fields, found {n} fields"
            ),
            ParseError::InvalidField(field, err) => write!(f, "invalid {field}: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to a [`Span`] or a [`Pair`].
#[derive(Debug)]
pub enum Error {
    /// The end of a span is before its start.
    EndBeforeStart(Position, Position),

    /// A parse error.
    Parse(ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EndBeforeStart(start, end) => {
                write!(f, "span end ({end}) is before span start ({start})")
            }
            Error::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Span
////////////////////////////////////////////////////////////////////////////////////////

/// The extent of a mismatch within one release.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Span {
    /// The first position that differs.
    start: Position,

    /// The first position past the mismatch that matches again.
    end: Position,

    /// The length of the mismatch.
    length: Position,
}

impl Span {
    /// Attempts to create a new [`Span`].
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::mismatch::Span;
    ///
    /// let span = Span::try_new(10, 12, 2)?;
    /// assert_eq!(span.start(), 10);
    /// assert_eq!(span.end(), 12);
    /// assert_eq!(span.length(), 2);
    ///
    /// assert!(Span::try_new(12, 10, 2).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(start: Position, end: Position, length: Position) -> Result<Self> {
        if end < start {
            return Err(Error::EndBeforeStart(start, end));
        }

        Ok(Self { start, end, length })
    }

    /// Gets the start of the span.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Gets the end of the span.
    pub fn end(&self) -> Position {
        self.end
    }

    /// Gets the length of the span.
    pub fn length(&self) -> Position {
        self.length
    }

    /// Returns a copy of the span moved by `offset` positions.
    pub(crate) fn shifted(self, offset: Position) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            length: self.length,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Pair
////////////////////////////////////////////////////////////////////////////////////////

/// A documented difference between two adjacent releases on one chromosome.
///
/// Pairs are [`Copy`]. The lifters always work on their own copy of a pair, so
/// the pairs held by a [`Chain`](crate::liftover::Chain) are never modified.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pair {
    /// The span within the previous release.
    previous: Span,

    /// The span within the current release.
    current: Span,

    /// Whether the region was inverted.
    flipped: bool,
}

impl Pair {
    /// Creates a new [`Pair`].
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::mismatch::Pair;
    /// use seqdiff::mismatch::Span;
    ///
    /// let pair = Pair::new(Span::try_new(10, 10, 0)?, Span::try_new(10, 12, 2)?, false);
    /// assert_eq!(pair.length_delta(), 2);
    /// assert!(!pair.is_flipped());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(previous: Span, current: Span, flipped: bool) -> Self {
        Self {
            previous,
            current,
            flipped,
        }
    }

    /// Gets the span within the previous release.
    pub fn previous(&self) -> Span {
        self.previous
    }

    /// Gets the span within the current release.
    pub fn current(&self) -> Span {
        self.current
    }

    /// Whether the region was inverted between the two releases.
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// The change in length from the previous release to the current release.
    pub fn length_delta(&self) -> Position {
        self.current.length - self.previous.length
    }

    /// Returns the pair as seen when lifting from the current release back to
    /// the previous release.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::mismatch::Pair;
    ///
    /// let pair = "10\t12\t2\t10\t10\t0\t0".parse::<Pair>()?;
    /// let inverted = pair.inverted();
    ///
    /// assert_eq!(inverted.previous(), pair.current());
    /// assert_eq!(inverted.current(), pair.previous());
    /// assert_eq!(inverted.length_delta(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn inverted(self) -> Self {
        Self {
            previous: self.current,
            current: self.previous,
            flipped: self.flipped,
        }
    }
}

/// Parses one field of a mismatch record.
fn parse_field(value: &str, field: Field) -> Result<Position> {
    value
        .trim()
        .parse()
        .map_err(|err| Error::Parse(ParseError::InvalidField(field, err)))
}

impl FromStr for Pair {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts = s.split(DELIMITER).collect::<Vec<_>>();

        if parts.len() < NUM_FIELDS {
            return Err(Error::Parse(ParseError::IncorrectNumberOfFields(
                parts.len(),
            )));
        }

        let previous = Span::try_new(
            parse_field(parts[0], Field::PreviousStart)?,
            parse_field(parts[1], Field::PreviousEnd)?,
            parse_field(parts[2], Field::PreviousLength)?,
        )?;

        let current = Span::try_new(
            parse_field(parts[3], Field::CurrentStart)?,
            parse_field(parts[4], Field::CurrentEnd)?,
            parse_field(parts[5], Field::CurrentLength)?,
        )?;

        // Any nonzero value marks an inversion.
        let flipped = parse_field(parts[6], Field::Inverted)? != 0;

        Ok(Pair::new(previous, current, flipped))
    }
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
            self.previous.start,
            self.previous.end,
            self.previous.length,
            self.current.start,
            self.current.end,
            self.current.length,
            if self.flipped { 1 } else { 0 },
        )
    }
}
