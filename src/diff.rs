//! The sequence differences between two adjacent releases.

use std::collections::HashMap;

use nonempty::NonEmpty;

use crate::line::CHROMOSOME_PREFIX;
use crate::mismatch::Pair;
use crate::mismatch::Position;

pub mod builder;

pub use builder::Builder;

/// A release number of an assembly.
pub type Release = usize;

/// The prefix of the header line written when rendering a [`ReleaseDiff`].
pub const RELEASE_PREFIX: &str = "# RELEASE";

/// The documented differences between release `n - 1` and release `n`.
///
/// Each chromosome maps to the mismatch pairs in the order they were
/// encountered in the source.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReleaseDiff {
    /// The release these differences lead to.
    release: Release,

    /// The mismatch pairs for each chromosome.
    chromosomes: HashMap<String, NonEmpty<Pair>>,
}

impl ReleaseDiff {
    /// Gets the release.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::diff::Builder;
    ///
    /// let diff = Builder::default().release(140)?.try_build()?;
    /// assert_eq!(diff.release(), 140);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn release(&self) -> Release {
        self.release
    }

    /// Gets the mismatch pairs for a chromosome in source order.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::diff::Builder;
    ///
    /// let diff = Builder::default()
    ///     .release(140)?
    ///     .push("I", "10\t10\t0\t10\t12\t2\t0".parse()?)
    ///     .push("I", "20\t22\t2\t20\t20\t0\t0".parse()?)
    ///     .try_build()?;
    ///
    /// let pairs = diff.pairs("I").unwrap();
    /// assert_eq!(pairs.len(), 2);
    /// assert_eq!(pairs.first().length_delta(), 2);
    /// assert!(diff.pairs("II").is_none());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn pairs(&self, chromosome: &str) -> Option<&NonEmpty<Pair>> {
        self.chromosomes.get(chromosome)
    }

    /// Gets the chromosomes with documented differences, sorted by name.
    pub fn chromosomes(&self) -> Vec<&str> {
        let mut names = self
            .chromosomes
            .keys()
            .map(|name| name.as_str())
            .collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    /// Whether any differences were documented for this release.
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// The net change in length of a chromosome across this release.
    pub fn length_delta(&self, chromosome: &str) -> Position {
        self.pairs(chromosome)
            .map(|pairs| pairs.iter().map(|pair| pair.length_delta()).sum())
            .unwrap_or_default()
    }

    /// Consumes `self` and returns the per-chromosome mismatch pairs.
    pub fn into_chromosomes(self) -> HashMap<String, NonEmpty<Pair>> {
        self.chromosomes
    }
}

impl std::fmt::Display for ReleaseDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{RELEASE_PREFIX} {}", self.release)?;

        for name in self.chromosomes() {
            writeln!(f, "{CHROMOSOME_PREFIX} {name}")?;

            for pair in self.pairs(name).into_iter().flat_map(|pairs| pairs.iter()) {
                writeln!(f, "{pair}")?;
            }
        }

        Ok(())
    }
}
