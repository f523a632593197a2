//! Run-length encoded alignment operations (CIGAR).
//!
//! Only the operations that describe how a read sits on the reference are
//! supported: matches (`M`), insertions (`I`), deletions (`D`), and skipped
//! regions (`N`).
//!
//! The editing operations ([`Cigar::insert_at()`] and [`Cigar::delete_at()`])
//! address the reference by an offset counted in reference-consuming bases
//! from the start of the alignment. Both expand the CIGAR to one operation per
//! base, edit that sequence, and compress it back, so adjacent runs of the
//! same kind are always merged in the result.

use std::iter;
use std::str::FromStr;

/// The string rendered for an empty [`Cigar`].
pub const EMPTY: &str = "*";

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to parsing a [`Cigar`].
#[derive(Debug)]
pub enum ParseError {
    /// An unsupported operation character.
    InvalidKind(char),

    /// An operation without a length, or with a length that is not a number.
    InvalidLength(String),

    /// Trailing digits without an operation.
    MissingKind(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidKind(c) => write!(f, "invalid operation: {c}"),
            ParseError::InvalidLength(value) => write!(f, "invalid length: {value:?}"),
            ParseError::MissingKind(value) => {
                write!(f, "length without an operation: {value}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to a [`Cigar`].
#[derive(Debug)]
pub enum Error {
    /// A parse error.
    Parse(ParseError),

    /// Reference bases were inserted past the end of the alignment.
    InsertPastEnd {
        /// The requested offset.
        offset: usize,

        /// The number of reference bases covered by the alignment.
        reference_len: usize,
    },

    /// Reference bases were deleted past the end of the alignment.
    DeletePastEnd {
        /// The requested offset.
        offset: usize,

        /// The requested number of bases.
        length: usize,

        /// The number of reference bases covered by the alignment.
        reference_len: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "parse error: {err}"),
            Error::InsertPastEnd {
                offset,
                reference_len,
            } => write!(
                f,
                "cannot insert at offset {offset} past the end of an alignment covering \
                 {reference_len} reference bases"
            ),
            Error::DeletePastEnd {
                offset,
                length,
                reference_len,
            } => write!(
                f,
                "cannot delete {length} bases at offset {offset} past the end of an alignment \
                 covering {reference_len} reference bases"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Operations
////////////////////////////////////////////////////////////////////////////////////////

/// The kind of an alignment operation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    /// An alignment match (`M`).
    Match,

    /// An insertion to the reference (`I`).
    Insertion,

    /// A deletion from the reference (`D`).
    Deletion,

    /// A skipped region of the reference (`N`).
    Skip,
}

impl Kind {
    /// Whether the operation consumes reference bases.
    pub fn consumes_reference(&self) -> bool {
        matches!(self, Kind::Match | Kind::Deletion | Kind::Skip)
    }

    /// Whether the operation consumes read bases.
    pub fn consumes_read(&self) -> bool {
        matches!(self, Kind::Match | Kind::Insertion)
    }

    /// The SAM character of the operation.
    pub fn as_char(&self) -> char {
        match self {
            Kind::Match => 'M',
            Kind::Insertion => 'I',
            Kind::Deletion => 'D',
            Kind::Skip => 'N',
        }
    }
}

impl TryFrom<char> for Kind {
    type Error = ParseError;

    fn try_from(value: char) -> std::result::Result<Self, Self::Error> {
        match value {
            'M' => Ok(Kind::Match),
            'I' => Ok(Kind::Insertion),
            'D' => Ok(Kind::Deletion),
            'N' => Ok(Kind::Skip),
            c => Err(ParseError::InvalidKind(c)),
        }
    }
}

/// A run of one kind of alignment operation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Op {
    /// The kind of operation.
    kind: Kind,

    /// The number of bases in the run.
    len: usize,
}

impl Op {
    /// Creates a new [`Op`].
    pub fn new(kind: Kind, len: usize) -> Self {
        Self { kind, len }
    }

    /// Gets the kind of the operation.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Gets the length of the run.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the run has no bases.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.len, self.kind.as_char())
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Cigar
////////////////////////////////////////////////////////////////////////////////////////

/// An ordered sequence of alignment operations.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Cigar(Vec<Op>);

impl Cigar {
    /// Creates a new [`Cigar`] from a list of operations.
    ///
    /// Empty runs are dropped and adjacent runs of the same kind are merged.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::alignment::cigar::Cigar;
    /// use seqdiff::alignment::cigar::Kind;
    /// use seqdiff::alignment::cigar::Op;
    ///
    /// let cigar = Cigar::new(vec![
    ///     Op::new(Kind::Match, 10),
    ///     Op::new(Kind::Match, 5),
    ///     Op::new(Kind::Deletion, 0),
    ///     Op::new(Kind::Insertion, 2),
    /// ]);
    /// assert_eq!(cigar.to_string(), "15M2I");
    /// ```
    pub fn new(ops: Vec<Op>) -> Self {
        let mut merged: Vec<Op> = Vec::with_capacity(ops.len());

        for op in ops.into_iter().filter(|op| !op.is_empty()) {
            match merged.last_mut() {
                Some(last) if last.kind == op.kind => last.len += op.len,
                _ => merged.push(op),
            }
        }

        Self(merged)
    }

    /// Gets the operations.
    pub fn ops(&self) -> &[Op] {
        &self.0
    }

    /// Whether there are no operations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of reference bases covered by the alignment.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::alignment::cigar::Cigar;
    ///
    /// let cigar = "5M5D5I5M".parse::<Cigar>()?;
    /// assert_eq!(cigar.reference_len(), 15);
    /// assert_eq!(cigar.read_len(), 15);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn reference_len(&self) -> usize {
        self.0
            .iter()
            .filter(|op| op.kind.consumes_reference())
            .map(|op| op.len)
            .sum()
    }

    /// The number of read bases described by the alignment.
    pub fn read_len(&self) -> usize {
        self.0
            .iter()
            .filter(|op| op.kind.consumes_read())
            .map(|op| op.len)
            .sum()
    }

    /// Expands the operations to one [`Kind`] per base.
    fn expand(&self) -> Vec<Kind> {
        self.0
            .iter()
            .flat_map(|op| iter::repeat(op.kind).take(op.len))
            .collect()
    }

    /// Compresses one [`Kind`] per base back into runs.
    fn compress(bases: Vec<Kind>) -> Self {
        Self::new(bases.into_iter().map(|kind| Op::new(kind, 1)).collect())
    }

    /// Returns a new [`Cigar`] with `length` reference bases inserted after the
    /// `offset`-th reference base of the alignment.
    ///
    /// The inserted bases are not present in the read, so they appear as a
    /// deletion. When the base at `offset` is part of a deletion or a skipped
    /// region, that run grows instead. An `offset` of zero prepends the
    /// deletion.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::alignment::cigar::Cigar;
    ///
    /// let cigar = "5M5D5I5M".parse::<Cigar>()?;
    /// assert_eq!(cigar.insert_at(3, 2)?.to_string(), "3M2D2M5D5I5M");
    /// assert_eq!(cigar.insert_at(7, 2)?.to_string(), "5M7D5I5M");
    ///
    /// assert!(cigar.insert_at(16, 2).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn insert_at(&self, offset: usize, length: usize) -> Result<Self> {
        let reference_len = self.reference_len();

        if offset > reference_len {
            return Err(Error::InsertPastEnd {
                offset,
                reference_len,
            });
        }

        let bases = self.expand();
        let mut result = Vec::with_capacity(bases.len() + length);

        if offset == 0 {
            result.extend(iter::repeat(Kind::Deletion).take(length));
            result.extend(bases);
            return Ok(Self::compress(result));
        }

        let mut consumed = 0usize;

        for kind in bases {
            result.push(kind);

            if kind.consumes_reference() {
                consumed += 1;

                if consumed == offset {
                    let grown = match kind {
                        Kind::Skip => Kind::Skip,
                        _ => Kind::Deletion,
                    };

                    result.extend(iter::repeat(grown).take(length));
                }
            }
        }

        Ok(Self::compress(result))
    }

    /// Returns a new [`Cigar`] with the reference bases in
    /// `[offset, offset + length)` removed from the alignment.
    ///
    /// Matched read bases in the removed span no longer have a reference
    /// position and become insertions. Deletions and skips in the span are
    /// dropped. Insertions in the span are kept and moved after the span.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::alignment::cigar::Cigar;
    ///
    /// let cigar = "5M5D5I5M".parse::<Cigar>()?;
    /// assert_eq!(cigar.delete_at(1, 2)?.to_string(), "1M2I2M5D5I5M");
    /// assert_eq!(cigar.delete_at(6, 2)?.to_string(), "5M3D5I5M");
    /// assert_eq!(cigar.delete_at(10, 2)?.to_string(), "5M5D7I3M");
    /// assert_eq!(cigar.delete_at(4, 2)?.to_string(), "4M1I4D5I5M");
    ///
    /// assert!(cigar.delete_at(14, 2).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn delete_at(&self, offset: usize, length: usize) -> Result<Self> {
        let reference_len = self.reference_len();

        if offset + length > reference_len {
            return Err(Error::DeletePastEnd {
                offset,
                length,
                reference_len,
            });
        }

        let mut bases = self.expand().into_iter();
        let mut result = Vec::new();
        let mut consumed = 0usize;

        while consumed < offset {
            let Some(kind) = bases.next() else { break };

            if kind.consumes_reference() {
                consumed += 1;
            }

            result.push(kind);
        }

        let mut relocated = 0usize;

        while consumed < offset + length {
            let Some(kind) = bases.next() else { break };

            match kind {
                Kind::Match => {
                    consumed += 1;
                    result.push(Kind::Insertion);
                }
                Kind::Deletion | Kind::Skip => consumed += 1,
                Kind::Insertion => relocated += 1,
            }
        }

        result.extend(iter::repeat(Kind::Insertion).take(relocated));
        result.extend(bases);

        Ok(Self::compress(result))
    }
}

impl std::fmt::Display for Cigar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "{EMPTY}");
        }

        for op in &self.0 {
            write!(f, "{op}")?;
        }

        Ok(())
    }
}

impl FromStr for Cigar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == EMPTY || s.is_empty() {
            return Ok(Self::default());
        }

        let mut ops = Vec::new();
        let mut digits = String::new();

        for c in s.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }

            let kind = Kind::try_from(c).map_err(Error::Parse)?;
            let len = digits
                .parse::<usize>()
                .map_err(|_| Error::Parse(ParseError::InvalidLength(digits.clone())))?;

            ops.push(Op::new(kind, len));
            digits.clear();
        }

        if !digits.is_empty() {
            return Err(Error::Parse(ParseError::MissingKind(digits)));
        }

        Ok(Self::new(ops))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert_eq!("50M".parse::<Cigar>()?.to_string(), "50M");
        assert_eq!("10M2N3M".parse::<Cigar>()?.to_string(), "10M2N3M");
        assert!("*".parse::<Cigar>()?.is_empty());
        assert_eq!(Cigar::default().to_string(), "*");
        assert_eq!("5M5M".parse::<Cigar>()?.to_string(), "10M");
        Ok(())
    }

    #[test]
    fn test_parse_errors() {
        let err = "5S45M".parse::<Cigar>().unwrap_err();
        assert_eq!(err.to_string(), "parse error: invalid operation: S");

        let err = "M".parse::<Cigar>().unwrap_err();
        assert_eq!(err.to_string(), "parse error: invalid length: \"\"");

        let err = "5M10".parse::<Cigar>().unwrap_err();
        assert_eq!(err.to_string(), "parse error: length without an operation: 10");
    }

    #[test]
    fn test_insert_within_match() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let cigar = "50M".parse::<Cigar>()?;
        assert_eq!(cigar.insert_at(10, 2)?.to_string(), "10M2D40M");
        Ok(())
    }

    #[test]
    fn test_insert_at_start_prepends() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let cigar = "50M".parse::<Cigar>()?;
        assert_eq!(cigar.insert_at(0, 3)?.to_string(), "3D50M");
        Ok(())
    }

    #[test]
    fn test_insert_within_skip() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let cigar = "5M10N5M".parse::<Cigar>()?;
        assert_eq!(cigar.insert_at(8, 4)?.to_string(), "5M14N5M");
        Ok(())
    }

    #[test]
    fn test_insert_past_end() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = "5M".parse::<Cigar>()?.insert_at(6, 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot insert at offset 6 past the end of an alignment covering 5 reference bases"
        );
        Ok(())
    }

    #[test]
    fn test_delete_within_match() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let cigar = "50M".parse::<Cigar>()?;
        assert_eq!(cigar.delete_at(10, 2)?.to_string(), "10M2I38M");
        assert_eq!(cigar.delete_at(0, 1)?.to_string(), "1I49M");
        assert_eq!(cigar.delete_at(49, 1)?.to_string(), "49M1I");
        Ok(())
    }

    #[test]
    fn test_delete_past_end() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = "5M".parse::<Cigar>()?.delete_at(4, 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot delete 2 bases at offset 4 past the end of an alignment covering 5 \
             reference bases"
        );
        Ok(())
    }

    #[test]
    fn test_delete_undoes_insert() -> std::result::Result<(), Box<dyn std::error::Error>> {
        for cigar in ["5M5D5I5M", "50M", "3M2I4M6N2M", "1M"] {
            let cigar = cigar.parse::<Cigar>()?;

            for offset in 0..=cigar.reference_len() {
                for length in [1, 2, 7] {
                    let edited = cigar.insert_at(offset, length)?;
                    assert_eq!(edited.reference_len(), cigar.reference_len() + length);
                    assert_eq!(edited.delete_at(offset, length)?, cigar);
                }
            }
        }

        Ok(())
    }

    #[test]
    fn test_edits_keep_read_length() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let cigar = "5M5D5I5M".parse::<Cigar>()?;

        for offset in 0..cigar.reference_len() - 2 {
            assert_eq!(cigar.delete_at(offset, 2)?.read_len(), cigar.read_len());
            assert_eq!(cigar.insert_at(offset, 2)?.read_len(), cigar.read_len());
        }

        Ok(())
    }
}
