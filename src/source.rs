//! Sources of per-release sequence differences.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use flate2::read::GzDecoder;
use tracing::debug;

use crate::diff::Release;
use crate::diff::ReleaseDiff;
use crate::reader;
use crate::Reader;

/// The default directory containing sequence difference files.
pub const DEFAULT_ROOT: &str = "CHROMOSOME_DIFFERENCES";

/// The file name prefix of a sequence difference file. The release number is
/// appended directly.
pub const FILE_PREFIX: &str = "sequence_differences.WS";

/// The suffix of a gzipped sequence difference file.
pub const GZIP_SUFFIX: &str = ".gz";

/// An error related to a [`Source`].
#[derive(Debug)]
pub enum Error {
    /// No differences are available for the release.
    Missing(Release),

    /// Neither the plain nor the gzipped difference file exists.
    FileNotFound(Release, PathBuf),

    /// The difference file could not be opened.
    Io(PathBuf, io::Error),

    /// The difference file could not be read.
    Reader(PathBuf, reader::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Missing(release) => {
                write!(f, "no sequence differences for release {release}")
            }
            Error::FileNotFound(release, path) => write!(
                f,
                "no sequence differences for release {release}: {} does not exist",
                path.display()
            ),
            Error::Io(path, err) => write!(f, "i/o error for {}: {err}", path.display()),
            Error::Reader(path, err) => write!(f, "reader error for {}: {err}", path.display()),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Something that can produce the [`ReleaseDiff`] leading to a release.
pub trait Source {
    /// Gets the differences between release `release - 1` and `release`.
    fn release_diff(&self, release: Release) -> Result<ReleaseDiff>;
}

impl Source for HashMap<Release, ReleaseDiff> {
    fn release_diff(&self, release: Release) -> Result<ReleaseDiff> {
        self.get(&release).cloned().ok_or(Error::Missing(release))
    }
}

impl<S> Source for &S
where
    S: Source + ?Sized,
{
    fn release_diff(&self, release: Release) -> Result<ReleaseDiff> {
        (**self).release_diff(release)
    }
}

/// A directory of sequence difference files.
///
/// The differences leading to release `n` are read from
/// `<root>/sequence_differences.WS<n>`, or from the same path with a `.gz`
/// suffix when only the gzipped file exists.
#[derive(Clone, Debug)]
pub struct Directory {
    /// The directory containing the files.
    root: PathBuf,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

impl Directory {
    /// Creates a new [`Directory`] rooted at `root`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    ///
    /// use seqdiff::source::Directory;
    ///
    /// let directory = Directory::new("diffs");
    /// assert_eq!(directory.root(), Path::new("diffs"));
    /// assert_eq!(
    ///     directory.path_for(140),
    ///     Path::new("diffs/sequence_differences.WS140")
    /// );
    ///
    /// let directory = Directory::default();
    /// assert_eq!(directory.root(), Path::new("CHROMOSOME_DIFFERENCES"));
    /// ```
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Gets the root of the directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Gets the path of the uncompressed difference file for a release.
    pub fn path_for(&self, release: Release) -> PathBuf {
        self.root.join(format!("{FILE_PREFIX}{release}"))
    }
}

/// Reads the differences for `release` from the file at `path`.
fn read_from<T>(inner: T, path: &Path, release: Release) -> Result<ReleaseDiff>
where
    T: io::Read,
{
    Reader::new(BufReader::new(inner))
        .read_diff(release)
        .map_err(|err| Error::Reader(path.to_path_buf(), err))
}

impl Source for Directory {
    fn release_diff(&self, release: Release) -> Result<ReleaseDiff> {
        let path = self.path_for(release);

        if path.is_file() {
            debug!("reading sequence differences from {}", path.display());
            let file = File::open(&path).map_err(|err| Error::Io(path.clone(), err))?;
            return read_from(file, &path, release);
        }

        let mut gzipped = path.clone().into_os_string();
        gzipped.push(GZIP_SUFFIX);
        let gzipped = PathBuf::from(gzipped);

        if gzipped.is_file() {
            debug!("reading sequence differences from {}", gzipped.display());
            let file = File::open(&gzipped).map_err(|err| Error::Io(gzipped.clone(), err))?;
            return read_from(GzDecoder::new(file), &gzipped, release);
        }

        Err(Error::FileNotFound(release, path))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use flate2::Compression;
    use flate2::write::GzEncoder;

    use super::*;

    /// The contents of a small difference file.
    const DIFF: &str = "Chromosome: I\n10\t10\t0\t10\t12\t2\t0\n";

    #[test]
    fn test_plain_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("sequence_differences.WS140"), DIFF)?;

        let diff = Directory::new(dir.path()).release_diff(140)?;
        assert_eq!(diff.release(), 140);
        assert_eq!(diff.length_delta("I"), 2);

        Ok(())
    }

    #[test]
    fn test_gzipped_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;

        let file = File::create(dir.path().join("sequence_differences.WS141.gz"))?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(DIFF.as_bytes())?;
        encoder.finish()?;

        let diff = Directory::new(dir.path()).release_diff(141)?;
        assert_eq!(diff.release(), 141);
        assert_eq!(diff.chromosomes(), vec!["I"]);

        Ok(())
    }

    #[test]
    fn test_missing_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let err = Directory::new(dir.path()).release_diff(9).unwrap_err();

        assert!(matches!(err, Error::FileNotFound(9, _)));
        assert!(
            err.to_string()
                .starts_with("no sequence differences for release 9: ")
        );

        Ok(())
    }

    #[test]
    fn test_malformed_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        std::fs::write(
            dir.path().join("sequence_differences.WS2"),
            "Chromosome: I\n10\tx\t0\t10\t12\t2\t0\n",
        )?;

        let err = Directory::new(dir.path()).release_diff(2).unwrap_err();
        assert!(matches!(
            err,
            Error::Reader(_, reader::Error::Line(_, 2))
        ));

        Ok(())
    }

    #[test]
    fn test_in_memory_source() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut diffs = HashMap::<Release, ReleaseDiff>::new();
        diffs.insert(5, crate::diff::Builder::default().release(5)?.try_build()?);

        assert_eq!(diffs.release_diff(5)?.release(), 5);
        assert_eq!(
            diffs.release_diff(6).unwrap_err().to_string(),
            "no sequence differences for release 6"
        );

        Ok(())
    }
}
