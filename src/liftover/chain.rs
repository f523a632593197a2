//! A chain of release steps for lifting records between two releases.

use std::collections::HashMap;

use tracing::debug;

use crate::alignment::Alignment;
use crate::diff::Release;
use crate::diff::ReleaseDiff;
use crate::feature::Feature;
use crate::liftover::alignment;
use crate::liftover::feature;
use crate::liftover::Error;
use crate::liftover::Flow;
use crate::liftover::Lifted;
use crate::mismatch::Pair;
use crate::mismatch::Position;
use crate::record::Record;

pub mod builder;

pub use builder::Builder;
pub use builder::Error as LoadError;

/// The mismatch pairs of one release, ready to be applied.
///
/// Within a chromosome, pairs are applied in the reverse of the order they
/// appear in their source. A [`Step`] only ever hands them out in that order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Step {
    /// The release the differences lead to.
    release: Release,

    /// The pairs for each chromosome, in application order.
    pairs: HashMap<String, Vec<Pair>>,
}

impl Step {
    /// Creates a [`Step`] from a [`ReleaseDiff`].
    ///
    /// When `inverted` is set, the previous and current spans of every pair
    /// are swapped so that the step lifts from release `n` back to `n - 1`.
    pub(crate) fn new(diff: ReleaseDiff, inverted: bool) -> Self {
        let release = diff.release();
        let pairs = diff
            .into_chromosomes()
            .into_iter()
            .map(|(chromosome, pairs)| {
                let pairs = pairs
                    .into_iter()
                    .rev()
                    .map(|pair| if inverted { pair.inverted() } else { pair })
                    .collect::<Vec<_>>();

                (chromosome, pairs)
            })
            .collect();

        Self { release, pairs }
    }

    /// Gets the release the differences of this step lead to.
    pub fn release(&self) -> Release {
        self.release
    }

    /// Gets the pairs for a chromosome in the order they are applied.
    ///
    /// A chromosome without differences has no pairs.
    pub fn pairs(&self, chromosome: &str) -> &[Pair] {
        self.pairs
            .get(chromosome)
            .map(|pairs| pairs.as_slice())
            .unwrap_or_default()
    }
}

/// An ordered series of [`Step`]s from a start release to a destination
/// release.
///
/// A chain is built once by a [`Builder`] and only read afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Chain {
    /// The release records are lifted from.
    start: Release,

    /// The release records are lifted to.
    destination: Release,

    /// The steps in the order they are applied.
    steps: Vec<Step>,
}

impl Chain {
    /// Creates a chain that leaves every record as it is.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::liftover::Chain;
    ///
    /// let chain = Chain::identity(140);
    /// assert_eq!(chain.start(), 140);
    /// assert_eq!(chain.destination(), 140);
    /// assert!(chain.steps().is_empty());
    /// ```
    pub fn identity(release: Release) -> Self {
        Self {
            start: release,
            destination: release,
            steps: Vec::new(),
        }
    }

    /// Gets the release records are lifted from.
    pub fn start(&self) -> Release {
        self.start
    }

    /// Gets the release records are lifted to.
    pub fn destination(&self) -> Release {
        self.destination
    }

    /// Gets the steps in the order they are applied.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The total change in length of a chromosome across the chain.
    pub fn length_delta(&self, chromosome: &str) -> Position {
        self.steps
            .iter()
            .flat_map(|step| step.pairs(chromosome))
            .map(Pair::length_delta)
            .sum()
    }

    /// Lifts a feature in place.
    ///
    /// A feature without a location is left untouched. Once a feature is
    /// found to be indeterminate or crosses an inversion boundary, no further
    /// pairs are applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use omics::coordinate::Strand;
    /// use seqdiff::diff;
    /// use seqdiff::feature::Feature;
    /// use seqdiff::liftover::chain::Builder;
    ///
    /// // Five bases inserted after position 10 in release 141.
    /// let diff = diff::Builder::default()
    ///     .release(141)?
    ///     .push("I", "10\t10\t0\t10\t15\t5\t0".parse()?)
    ///     .try_build()?;
    /// let source = HashMap::from([(diff.release(), diff)]);
    ///
    /// let chain = Builder.try_build_from(&source, 140, 141)?;
    /// let mut feature = Feature::new("I", Some(100), Some(200), Some(Strand::Positive));
    /// chain.lift_feature(&mut feature);
    ///
    /// assert_eq!(feature.start(), Some(105));
    /// assert_eq!(feature.end(), Some(205));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn lift_feature(&self, feature: &mut Feature) {
        if !feature.has_location() {
            return;
        }

        let chromosome = feature.chromosome().to_string();

        for step in &self.steps {
            for pair in step.pairs(&chromosome) {
                if feature::apply(pair, feature) == Flow::Stop {
                    debug!(
                        "stopped lifting {feature} at release {}: {:?}",
                        step.release(),
                        feature.outcome().annotation()
                    );
                    return;
                }
            }
        }
    }

    /// Lifts an alignment in place.
    ///
    /// An unmapped read is left untouched. Pairs are selected by the
    /// chromosome of the read when the lift starts, so the mate is still
    /// lifted after the read itself is deleted. The alignment is marked as
    /// changed if anything about it moved.
    ///
    /// On error, the alignment is left exactly as it was provided.
    pub fn lift_alignment(&self, alignment: &mut Alignment) -> Result<(), Error> {
        if !alignment.is_mapped() {
            return Ok(());
        }

        let chromosome = alignment.chromosome().to_string();
        let mut lifted = alignment.clone();

        for step in &self.steps {
            for pair in step.pairs(&chromosome) {
                alignment::apply(pair, &chromosome, &mut lifted)?;
            }
        }

        if lifted != *alignment {
            lifted.outcome_mut().set_changed();
        }

        if !lifted.is_mapped() {
            debug!("read at {chromosome}:{} was deleted", alignment.start());
        }

        *alignment = lifted;
        Ok(())
    }

    /// Lifts any record in place.
    pub fn lift(&self, record: &mut Record) -> Result<(), Error> {
        match record {
            Record::Feature(feature) => {
                self.lift_feature(feature);
                Ok(())
            }
            Record::Alignment(alignment) => self.lift_alignment(alignment),
        }
    }

    /// Lifts a record, keeping a copy of it as it was provided.
    pub fn lift_owned(&self, record: Record) -> Result<Lifted, Error> {
        let mut lifted = record.clone();
        self.lift(&mut lifted)?;

        Ok(Lifted {
            original: record,
            lifted,
        })
    }
}
