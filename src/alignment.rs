//! Paired-end read alignments.
//!
//! An [`Alignment`] carries the parts of a SAM record that depend on reference
//! coordinates: the position of the read and of its mate, the inferred insert
//! size, the [`Cigar`], and the flags that describe pairing and mapping.
//! Positions are 1-based and inclusive. A position of `0` means "unmapped".

use omics::coordinate::Strand;

use crate::feature::Outcome;
use crate::mismatch::Position;

pub mod builder;
pub mod cigar;

pub use builder::Builder;
pub use cigar::Cigar;

/// The reference name of an unmapped read or mate.
pub const UNMAPPED_CHROMOSOME: &str = "*";

/// The mate reference name meaning "same chromosome as the read".
pub const SAME_CHROMOSOME: &str = "=";

/// The flags of an alignment record.
///
/// The bits without a dedicated accessor are kept as they were read.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Flags(u16);

impl Flags {
    /// The read is paired in sequencing.
    pub const PAIRED: u16 = 0x1;

    /// The read is unmapped.
    pub const UNMAPPED: u16 = 0x4;

    /// The mate is unmapped.
    pub const MATE_UNMAPPED: u16 = 0x8;

    /// The read is reverse complemented.
    pub const REVERSE: u16 = 0x10;

    /// The read is the first of its pair.
    pub const FIRST_OF_PAIR: u16 = 0x40;

    /// The read is the second of its pair.
    pub const SECOND_OF_PAIR: u16 = 0x80;

    /// Creates flags from the raw SAM bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::alignment::Flags;
    ///
    /// let flags = Flags::from_bits(67);
    /// assert!(flags.is_paired());
    /// assert!(flags.is_first_of_pair());
    /// assert!(!flags.is_second_of_pair());
    /// assert!(!flags.is_unmapped());
    /// assert_eq!(flags.bits(), 67);
    /// ```
    pub fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Gets the raw SAM bits.
    pub fn bits(&self) -> u16 {
        self.0
    }

    /// Whether a bit is set.
    fn is_set(&self, bit: u16) -> bool {
        self.0 & bit != 0
    }

    /// Sets or clears a bit.
    fn set(&mut self, bit: u16, value: bool) {
        if value {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
    }

    /// Whether the read is paired.
    pub fn is_paired(&self) -> bool {
        self.is_set(Self::PAIRED)
    }

    /// Whether the read is unmapped.
    pub fn is_unmapped(&self) -> bool {
        self.is_set(Self::UNMAPPED)
    }

    /// Whether the mate is unmapped.
    pub fn is_mate_unmapped(&self) -> bool {
        self.is_set(Self::MATE_UNMAPPED)
    }

    /// Whether the read is reverse complemented.
    pub fn is_reverse(&self) -> bool {
        self.is_set(Self::REVERSE)
    }

    /// Whether the read is the first of its pair.
    pub fn is_first_of_pair(&self) -> bool {
        self.is_set(Self::FIRST_OF_PAIR)
    }

    /// Whether the read is the second of its pair.
    pub fn is_second_of_pair(&self) -> bool {
        self.is_set(Self::SECOND_OF_PAIR)
    }

    /// Whether the read has a role (first or second) within its pair.
    pub fn has_pair_role(&self) -> bool {
        self.is_first_of_pair() || self.is_second_of_pair()
    }

    /// Sets whether the read is unmapped.
    pub fn set_unmapped(&mut self, value: bool) {
        self.set(Self::UNMAPPED, value);
    }

    /// Sets whether the mate is unmapped.
    pub fn set_mate_unmapped(&mut self, value: bool) {
        self.set(Self::MATE_UNMAPPED, value);
    }

    /// Sets whether the read is the first of its pair.
    pub fn set_first_of_pair(&mut self, value: bool) {
        self.set(Self::FIRST_OF_PAIR, value);
    }

    /// Sets whether the read is the second of its pair.
    pub fn set_second_of_pair(&mut self, value: bool) {
        self.set(Self::SECOND_OF_PAIR, value);
    }
}

/// A read alignment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Alignment {
    /// The chromosome the read is aligned to.
    chromosome: String,

    /// The first aligned position of the read.
    start: Position,

    /// The alignment operations.
    cigar: Cigar,

    /// The chromosome of the mate.
    mate_chromosome: String,

    /// The first aligned position of the mate.
    mate_start: Position,

    /// The inferred insert size.
    insert_size: Position,

    /// The flags.
    flags: Flags,

    /// The outcome of lifting the alignment.
    outcome: Outcome,
}

impl Alignment {
    /// Gets the chromosome the read is aligned to.
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    /// Gets the first aligned position of the read.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Gets the last aligned position of the read.
    ///
    /// Returns [`None`] when the read is unmapped.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::alignment::Builder;
    ///
    /// let alignment = Builder::default()
    ///     .chromosome("I")?
    ///     .start(9949430)?
    ///     .cigar("50M".parse()?)
    ///     .try_build()?;
    ///
    /// assert_eq!(alignment.end(), Some(9949479));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn end(&self) -> Option<Position> {
        if self.flags.is_unmapped() {
            return None;
        }

        Some(self.start + self.cigar.reference_len() as Position - 1)
    }

    /// Gets the strand the read is aligned to.
    pub fn strand(&self) -> Strand {
        if self.flags.is_reverse() {
            Strand::Negative
        } else {
            Strand::Positive
        }
    }

    /// Gets the alignment operations.
    pub fn cigar(&self) -> &Cigar {
        &self.cigar
    }

    /// Gets the chromosome of the mate.
    pub fn mate_chromosome(&self) -> &str {
        &self.mate_chromosome
    }

    /// Whether the mate is aligned to the same chromosome as the read.
    pub fn is_mate_on_same_chromosome(&self) -> bool {
        self.mate_chromosome == SAME_CHROMOSOME || self.mate_chromosome == self.chromosome
    }

    /// Gets the first aligned position of the mate.
    pub fn mate_start(&self) -> Position {
        self.mate_start
    }

    /// Gets the last aligned position of the mate, as far as it can be told
    /// from this record.
    ///
    /// The end of the mate is only known when the read is paired, the mate is
    /// mapped downstream of the read, and the insert size is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::alignment::Builder;
    /// use seqdiff::alignment::Flags;
    ///
    /// let read = Builder::default()
    ///     .chromosome("I")?
    ///     .start(9949430)?
    ///     .cigar("50M".parse()?)
    ///     .flags(Flags::from_bits(67))
    ///     .mate("=", 9949500)
    ///     .insert_size(120)
    ///     .try_build()?;
    /// assert_eq!(read.mate_end(), Some(9949549));
    ///
    /// let mate = Builder::default()
    ///     .chromosome("I")?
    ///     .start(9949500)?
    ///     .cigar("50M".parse()?)
    ///     .flags(Flags::from_bits(131))
    ///     .mate("=", 9949430)
    ///     .insert_size(-120)
    ///     .try_build()?;
    /// assert_eq!(mate.mate_end(), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn mate_end(&self) -> Option<Position> {
        if !self.flags.is_paired()
            || self.flags.is_mate_unmapped()
            || self.mate_start <= self.start
            || self.insert_size == 0
        {
            return None;
        }

        Some(self.start + self.insert_size - 1)
    }

    /// Gets the inferred insert size.
    pub fn insert_size(&self) -> Position {
        self.insert_size
    }

    /// Gets the flags.
    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    /// Gets the outcome of lifting the alignment.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Whether the read is mapped.
    pub fn is_mapped(&self) -> bool {
        !self.flags.is_unmapped()
    }

    /// Whether the read is paired and its mate is mapped.
    pub fn is_mate_mapped(&self) -> bool {
        self.flags.is_paired() && !self.flags.is_mate_unmapped()
    }

    /// Sets the first aligned position of the read.
    pub fn set_start(&mut self, start: Position) {
        self.start = start;
    }

    /// Sets the alignment operations.
    pub fn set_cigar(&mut self, cigar: Cigar) {
        self.cigar = cigar;
    }

    /// Sets the first aligned position of the mate.
    pub fn set_mate_start(&mut self, mate_start: Position) {
        self.mate_start = mate_start;
    }

    /// Sets the inferred insert size.
    pub fn set_insert_size(&mut self, insert_size: Position) {
        self.insert_size = insert_size;
    }

    /// Gets a mutable reference to the flags.
    pub fn flags_mut(&mut self) -> &mut Flags {
        &mut self.flags
    }

    /// Gets a mutable reference to the outcome.
    pub fn outcome_mut(&mut self) -> &mut Outcome {
        &mut self.outcome
    }

    /// Marks the read as unmapped and clears everything that placed it.
    pub fn unmap(&mut self) {
        self.chromosome = UNMAPPED_CHROMOSOME.to_string();
        self.start = 0;
        self.cigar = Cigar::default();
        self.insert_size = 0;
        self.flags.set_unmapped(true);
        self.flags.set_first_of_pair(false);
        self.flags.set_second_of_pair(false);
    }

    /// Marks the mate as unmapped and clears everything that placed it.
    pub fn unmap_mate(&mut self) {
        self.mate_start = 0;
        self.insert_size = 0;
        self.flags.set_mate_unmapped(true);
        self.flags.set_first_of_pair(false);
        self.flags.set_second_of_pair(false);
    }
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.flags.bits(),
            self.chromosome,
            self.start,
            self.cigar,
            self.mate_chromosome,
            self.mate_start,
            self.insert_size,
        )
    }
}
