//! A record that can be lifted.

use crate::alignment::Alignment;
use crate::feature::Feature;
use crate::feature::Outcome;

/// A located record of any supported kind.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Record {
    /// A feature with an interval and a strand.
    Feature(Feature),

    /// A read alignment.
    Alignment(Alignment),
}

impl Record {
    /// Gets the chromosome of the record.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::feature::Feature;
    /// use seqdiff::record::Record;
    ///
    /// let record = Record::from(Feature::new("X", Some(1), Some(5), None));
    /// assert_eq!(record.chromosome(), "X");
    /// assert!(!record.outcome().is_changed());
    /// ```
    pub fn chromosome(&self) -> &str {
        match self {
            Record::Feature(feature) => feature.chromosome(),
            Record::Alignment(alignment) => alignment.chromosome(),
        }
    }

    /// Gets the outcome of lifting the record.
    pub fn outcome(&self) -> &Outcome {
        match self {
            Record::Feature(feature) => feature.outcome(),
            Record::Alignment(alignment) => alignment.outcome(),
        }
    }
}

impl From<Feature> for Record {
    fn from(feature: Feature) -> Self {
        Record::Feature(feature)
    }
}

impl From<Alignment> for Record {
    fn from(alignment: Alignment) -> Self {
        Record::Alignment(alignment)
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Record::Feature(feature) => write!(f, "{feature}"),
            Record::Alignment(alignment) => write!(f, "{alignment}"),
        }
    }
}
