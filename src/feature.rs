//! Located features and the outcome of lifting them.

use omics::coordinate::Strand;

use crate::mismatch::Position;

/// The prefix for comment lines written above a changed feature.
pub const COMMENT_PREFIX: &str = "#liftover: ";

/// The flags recorded on a feature by a lift.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Outcome {
    /// A mismatch overlapped the feature.
    changed: bool,

    /// The feature was inverted.
    flipped: bool,

    /// The feature overlapped an inversion boundary and cannot be placed.
    dropped: bool,

    /// The feature overlapped a mismatch whose effect on its length cannot be
    /// determined.
    indeterminate: bool,
}

impl Outcome {
    /// Whether a mismatch overlapped the feature.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Whether the feature was inverted.
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Whether the feature was dropped because of an inversion.
    pub fn is_dropped(&self) -> bool {
        self.dropped
    }

    /// Whether the lifted length of the feature is indeterminate.
    pub fn is_indeterminate(&self) -> bool {
        self.indeterminate
    }

    /// Whether the lifted coordinates should not be used.
    pub fn is_discarded(&self) -> bool {
        self.dropped || self.indeterminate
    }

    /// Marks the feature as changed.
    pub fn set_changed(&mut self) {
        self.changed = true;
    }

    /// Marks the feature as inverted.
    pub fn set_flipped(&mut self) {
        self.flipped = true;
    }

    /// Marks the feature as dropped.
    pub fn set_dropped(&mut self) {
        self.dropped = true;
    }

    /// Marks the feature as indeterminate.
    pub fn set_indeterminate(&mut self) {
        self.indeterminate = true;
    }

    /// The note describing what happened to the feature, if anything did.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::feature::Outcome;
    ///
    /// let mut outcome = Outcome::default();
    /// assert_eq!(outcome.annotation(), None);
    ///
    /// outcome.set_changed();
    /// assert_eq!(
    ///     outcome.annotation(),
    ///     Some("The following feature's internal structure changed")
    /// );
    ///
    /// outcome.set_flipped();
    /// assert_eq!(outcome.annotation(), Some("The following feature was inverted"));
    /// ```
    pub fn annotation(&self) -> Option<&'static str> {
        if self.indeterminate {
            Some("Following feature dropped due to indeterminate length after lifting")
        } else if self.dropped {
            Some("Following feature dropped due to inversion")
        } else if self.flipped {
            Some("The following feature was inverted")
        } else if self.changed {
            Some("The following feature's internal structure changed")
        } else {
            None
        }
    }
}

/// A feature located on a chromosome by an inclusive, 1-based interval.
///
/// A feature without a start or an end has no location, and lifting it does
/// nothing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Feature {
    /// The chromosome.
    chromosome: String,

    /// The first position of the feature.
    start: Option<Position>,

    /// The last position of the feature.
    end: Option<Position>,

    /// The strand, if known.
    strand: Option<Strand>,

    /// The outcome of lifting the feature.
    outcome: Outcome,
}

impl Feature {
    /// Creates a new [`Feature`].
    ///
    /// # Examples
    ///
    /// ```
    /// use omics::coordinate::Strand;
    /// use seqdiff::feature::Feature;
    ///
    /// let feature = Feature::new("I", Some(10), Some(20), Some(Strand::Positive));
    /// assert_eq!(feature.chromosome(), "I");
    /// assert_eq!(feature.start(), Some(10));
    /// assert_eq!(feature.end(), Some(20));
    /// assert_eq!(feature.strand(), Some(Strand::Positive));
    /// assert!(feature.has_location());
    /// assert!(!feature.outcome().is_changed());
    /// ```
    pub fn new(
        chromosome: impl Into<String>,
        start: Option<Position>,
        end: Option<Position>,
        strand: Option<Strand>,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            start,
            end,
            strand,
            outcome: Outcome::default(),
        }
    }

    /// Gets the chromosome.
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    /// Gets the start.
    pub fn start(&self) -> Option<Position> {
        self.start
    }

    /// Gets the end.
    pub fn end(&self) -> Option<Position> {
        self.end
    }

    /// Gets the strand.
    pub fn strand(&self) -> Option<Strand> {
        self.strand
    }

    /// Whether the feature has both a start and an end.
    pub fn has_location(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Gets the outcome of lifting the feature.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Sets the start.
    pub fn set_start(&mut self, start: Option<Position>) {
        self.start = start;
    }

    /// Sets the end.
    pub fn set_end(&mut self, end: Option<Position>) {
        self.end = end;
    }

    /// Sets the strand.
    pub fn set_strand(&mut self, strand: Option<Strand>) {
        self.strand = strand;
    }

    /// Gets a mutable reference to the outcome.
    pub fn outcome_mut(&mut self) -> &mut Outcome {
        &mut self.outcome
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.chromosome)?;

        match (self.start, self.end) {
            (Some(start), Some(end)) => write!(f, "{start}-{end}")?,
            _ => write!(f, ".")?,
        }

        match self.strand {
            Some(Strand::Positive) => write!(f, ":+"),
            Some(Strand::Negative) => write!(f, ":-"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_priority() {
        let mut outcome = Outcome::default();
        outcome.set_changed();
        outcome.set_flipped();
        outcome.set_dropped();
        assert_eq!(
            outcome.annotation(),
            Some("Following feature dropped due to inversion")
        );

        outcome.set_indeterminate();
        assert_eq!(
            outcome.annotation(),
            Some("Following feature dropped due to indeterminate length after lifting")
        );
        assert!(outcome.is_discarded());
    }

    #[test]
    fn test_display() {
        let feature = Feature::new("II", Some(5), Some(9), Some(Strand::Negative));
        assert_eq!(feature.to_string(), "II:5-9:-");

        let feature = Feature::new("II", None, Some(9), None);
        assert_eq!(feature.to_string(), "II:.");
        assert!(!feature.has_location());
    }
}
