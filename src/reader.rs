//! A sequence difference file reader.

use std::io::BufRead;
use std::io::{self};
use std::iter;

use crate::diff;
use crate::diff::Release;
use crate::diff::ReleaseDiff;
use crate::line;
use crate::Line;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A line error from a single line read outside of a whole file.
    InvalidLine(line::Error),

    /// A line error along with the line number where it occurred.
    Line(line::Error, usize),

    /// A mismatch record appeared before any chromosome line.
    MismatchOutsideChromosome(usize),

    /// A builder error.
    Builder(diff::builder::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::InvalidLine(err) => write!(f, "line error: {err}"),
            Error::Line(err, line_no) => write!(f, "line error at line {line_no}: {err}"),
            Error::MismatchOutsideChromosome(line_no) => write!(
                f,
                "found mismatch record before any chromosome line: line {line_no}"
            ),
            Error::Builder(err) => write!(f, "builder error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A sequence difference file reader.
#[derive(Clone, Debug)]
pub struct Reader<T>(T)
where
    T: BufRead;

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a sequence difference file reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"Chromosome: I\n10\t10\t0\t10\t12\t2\t0\n";
    /// let reader = seqdiff::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self::from(inner)
    }

    /// Gets a reference to the inner reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b"Chromosome: I\n10\t10\t0\t10\t12\t2\t0\n";
    /// let cursor = io::Cursor::new(data);
    ///
    /// let reader = seqdiff::Reader::new(cursor);
    /// assert_eq!(reader.inner().position(), 0);
    /// ```
    pub fn inner(&self) -> &T {
        &self.0
    }

    /// Gets a mutable reference to the inner reader.
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.0
    }

    /// Consumes self and returns the inner reader.
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Reads a raw, textual line from the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b"Chromosome: I\r\n10\t10\t0\t10\t12\t2\t0";
    /// let mut reader = seqdiff::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 15);
    /// assert_eq!(buffer, "Chromosome: I");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 17);
    /// assert_eq!(buffer, "10\t10\t0\t10\t12\t2\t0");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 0);
    ///
    /// # Ok::<(), io::Error>(())
    /// ```
    pub fn read_line_raw(&mut self, buffer: &mut String) -> io::Result<usize> {
        read_line(self.inner_mut(), buffer)
    }

    /// Attempts to read a [`Line`] from the underlying reader.
    ///
    /// The line number reported in errors is always `0` here; use
    /// [`Reader::read_diff()`] for errors with line numbers.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqdiff::Line;
    ///
    /// let data = b"# comment\nChromosome: I\n10\t10\t0\t10\t12\t2\t0";
    /// let mut reader = seqdiff::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    /// assert!(matches!(reader.read_line(&mut buffer)?, Some(Line::Comment(_))));
    /// assert!(matches!(reader.read_line(&mut buffer)?, Some(Line::Chromosome(_))));
    /// assert!(matches!(reader.read_line(&mut buffer)?, Some(Line::Mismatch(_))));
    /// assert!(reader.read_line(&mut buffer)?.is_none());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_line(&mut self, buffer: &mut String) -> Result<Option<Line>, Error> {
        let read = self.read_line_raw(buffer).map_err(Error::Io)?;

        match read {
            0 => Ok(None),
            _ => {
                let line = buffer.parse::<Line>().map_err(Error::InvalidLine)?;
                Ok(Some(line))
            }
        }
    }

    /// Returns an iterator over the `Line`s in the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"# comment\n\nChromosome: I\n10\t10\t0\t10\t12\t2\t0";
    /// let mut reader = seqdiff::Reader::new(&data[..]);
    ///
    /// let lines = reader.lines().collect::<Vec<_>>();
    /// assert_eq!(lines.len(), 4);
    /// ```
    pub fn lines(&mut self) -> impl Iterator<Item = io::Result<Line>> + '_ {
        let mut buffer = String::new();

        iter::from_fn(move || {
            buffer.clear();

            match self.read_line_raw(&mut buffer) {
                Ok(0) => None,
                Ok(_) => Some(
                    buffer
                        .parse()
                        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
                ),
                Err(e) => Some(Err(e)),
            }
        })
    }

    /// Reads the remainder of the underlying reader as the differences leading
    /// to `release`.
    ///
    /// Comments and blank lines are skipped. Each mismatch record belongs to
    /// the chromosome named by the closest preceding chromosome line.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"# RELEASE 140\nChromosome: I\n10\t10\t0\t10\t12\t2\t0\n\nChromosome: II\n5\t6\t1\t5\t5\t0\t0\n";
    /// let mut reader = seqdiff::Reader::new(&data[..]);
    ///
    /// let diff = reader.read_diff(140)?;
    /// assert_eq!(diff.release(), 140);
    /// assert_eq!(diff.chromosomes(), vec!["I", "II"]);
    /// assert_eq!(diff.length_delta("II"), -1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_diff(&mut self, release: Release) -> Result<ReleaseDiff, Error> {
        let mut builder = diff::Builder::default()
            .release(release)
            .map_err(Error::Builder)?;

        let mut buffer = String::new();
        let mut chromosome: Option<String> = None;
        let mut line_no = 0usize;

        loop {
            if self.read_line_raw(&mut buffer).map_err(Error::Io)? == 0 {
                break;
            }

            line_no += 1;

            match buffer
                .parse::<Line>()
                .map_err(|e| Error::Line(e, line_no))?
            {
                Line::Empty | Line::Comment(_) => {}
                Line::Chromosome(name) => chromosome = Some(name),
                Line::Mismatch(pair) => match &chromosome {
                    Some(name) => builder.push_mut(name.as_str(), pair),
                    None => return Err(Error::MismatchOutsideChromosome(line_no)),
                },
            }
        }

        builder.try_build().map_err(Error::Builder)
    }
}

impl<T> From<T> for Reader<T>
where
    T: BufRead,
{
    fn from(inner: T) -> Self {
        Self(inner)
    }
}

/// Reads a line from a buffered reader, stripping the line terminator.
fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead,
{
    buffer.clear();

    match reader.read_line(buffer) {
        Ok(0) => Ok(0),
        Ok(n) => {
            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }

            Ok(n)
        }
        Err(e) => Err(e),
    }
}
