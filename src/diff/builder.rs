//! A builder for a [`ReleaseDiff`].

use std::collections::HashMap;

use nonempty::NonEmpty;

use crate::diff::Release;
use crate::diff::ReleaseDiff;
use crate::mismatch::Pair;

/// An error that occurs when a required field was never provided to the
/// [`Builder`].
#[derive(Debug)]
pub enum MissingError {
    /// No release was provided to the [`Builder`].
    Release,
}

impl std::fmt::Display for MissingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingError::Release => write!(f, "release"),
        }
    }
}

impl std::error::Error for MissingError {}

/// An error that occurs when a singular field was provided multiple times to
/// the [`Builder`].
#[derive(Debug)]
pub enum MultipleError {
    /// The release was provided multiple times to the [`Builder`].
    Release,
}

impl std::fmt::Display for MultipleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MultipleError::Release => write!(f, "release"),
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

/// A builder for a [`ReleaseDiff`].
#[derive(Debug, Default)]
pub struct Builder {
    /// The release.
    release: Option<Release>,

    /// The mismatch pairs pushed so far for each chromosome.
    chromosomes: HashMap<String, NonEmpty<Pair>>,
}

impl Builder {
    /// Sets the release for the [`Builder`].
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::diff::Builder;
    ///
    /// let builder = Builder::default().release(140)?;
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn release(mut self, release: Release) -> Result<Self> {
        if self.release.is_some() {
            return Err(Error::Multiple(MultipleError::Release));
        }

        self.release = Some(release);
        Ok(self)
    }

    /// Pushes a mismatch [`Pair`] for a chromosome into the [`Builder`].
    ///
    /// Pairs are kept in the order they are pushed.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::diff::Builder;
    ///
    /// let builder = Builder::default().push("I", "10\t10\t0\t10\t12\t2\t0".parse()?);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn push(mut self, chromosome: impl Into<String>, pair: Pair) -> Self {
        self.push_mut(chromosome, pair);
        self
    }

    /// Pushes a mismatch [`Pair`] for a chromosome without consuming the
    /// [`Builder`].
    pub(crate) fn push_mut(&mut self, chromosome: impl Into<String>, pair: Pair) {
        let chromosome = chromosome.into();

        match self.chromosomes.get_mut(&chromosome) {
            Some(pairs) => pairs.push(pair),
            None => {
                self.chromosomes.insert(chromosome, NonEmpty::new(pair));
            }
        }
    }

    /// Consumes `self` to attempt to build a [`ReleaseDiff`].
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::diff::Builder;
    ///
    /// let diff = Builder::default()
    ///     .release(140)?
    ///     .push("I", "10\t10\t0\t10\t12\t2\t0".parse()?)
    ///     .try_build()?;
    ///
    /// assert_eq!(diff.release(), 140);
    /// assert_eq!(diff.chromosomes(), vec!["I"]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_build(self) -> Result<ReleaseDiff> {
        let release = self.release.ok_or(Error::Missing(MissingError::Release))?;

        Ok(ReleaseDiff {
            release,
            chromosomes: self.chromosomes,
        })
    }
}
