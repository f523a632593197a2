//! A builder for a [`Chain`].

use tracing::debug;
use tracing::info;

use crate::diff::Release;
use crate::liftover::chain::Step;
use crate::liftover::Chain;
use crate::source;
use crate::source::Source;

/// An error related to building a [`Chain`].
#[derive(Debug)]
pub enum Error {
    /// The differences for a release could not be loaded.
    Source(Release, source::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Source(release, err) => {
                write!(f, "failed to load release {release}: {err}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A builder for a [`Chain`].
#[derive(Debug, Default)]
pub struct Builder;

impl Builder {
    /// Builds a [`Chain`] lifting records from release `start` to release
    /// `destination`.
    ///
    /// Every release after the lower of the two, up to and including the
    /// higher, must be available from `source`. Lifting backward applies the
    /// same differences with their spans swapped, last release first.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use seqdiff::diff;
    /// use seqdiff::liftover::chain::Builder;
    ///
    /// let mut source = HashMap::<diff::Release, diff::ReleaseDiff>::new();
    /// source.insert(141, diff::Builder::default().release(141)?.try_build()?);
    /// source.insert(142, diff::Builder::default().release(142)?.try_build()?);
    ///
    /// let chain = Builder.try_build_from(&source, 142, 140)?;
    /// let releases = chain
    ///     .steps()
    ///     .iter()
    ///     .map(|step| step.release())
    ///     .collect::<Vec<_>>();
    /// assert_eq!(releases, [142, 141]);
    ///
    /// let err = Builder.try_build_from(&source, 140, 143).unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "failed to load release 143: no sequence differences for release 143"
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_build_from(
        &self,
        source: impl Source,
        start: Release,
        destination: Release,
    ) -> Result<Chain> {
        if start == destination {
            debug!("release {start} is its own destination");
            return Ok(Chain::identity(start));
        }

        let inverted = start > destination;
        let (low, high) = if inverted {
            (destination, start)
        } else {
            (start, destination)
        };

        info!("loading sequence differences for releases {} to {high}", low + 1);

        let mut steps = Vec::with_capacity(high - low);

        for release in (low + 1)..=high {
            let diff = source
                .release_diff(release)
                .map_err(|err| Error::Source(release, err))?;

            debug!(
                "release {release}: differences on {} chromosome(s)",
                diff.chromosomes().len()
            );

            steps.push(Step::new(diff, inverted));
        }

        if inverted {
            steps.reverse();
        }

        Ok(Chain {
            start,
            destination,
            steps,
        })
    }
}
