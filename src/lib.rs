//! `seqdiff` is a crate for lifting genomic features from one assembly release
//! to another using per-release sequence difference files.
//!
//! Each release of an assembly comes with a file documenting how every
//! chromosome changed since the release before it. A change is recorded as a
//! [mismatch pair](crate::mismatch::Pair): a span in the previous release, the
//! span that replaced it in the current release, and whether the region was
//! inverted.
//!
//! The crate provides two main points of entry:
//!
//! - Parsing and reading sequence difference files directly.
//! - Building a chain of releases for lifting records between any two
//!   releases.
//!
//! ## Parsing and reading sequence difference files
//!
//! If you're interested in the differences themselves, you can use the
//! [`Reader`] facility to parse each [`Line`] of a file, or read the whole
//! file into a [`ReleaseDiff`](crate::diff::ReleaseDiff) with
//! [`Reader::read_diff()`].
//!
//! ```
//! use seqdiff::Reader;
//!
//! let data = b"# comment\nChromosome: I\n10\t10\t0\t10\t12\t2\t0\n";
//! let mut reader = Reader::new(&data[..]);
//! let diff = reader.read_diff(141)?;
//!
//! assert_eq!(diff.chromosomes(), ["I"]);
//! assert_eq!(diff.length_delta("I"), 2);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Lifting records
//!
//! Most users will want to lift [features](crate::feature::Feature) or
//! [alignments](crate::alignment::Alignment) instead. A
//! [`liftover::Chain`] is built once from a
//! [`Source`](crate::source::Source) of differences, such as a
//! [`Directory`](crate::source::Directory) of (optionally gzipped) files, using
//! [`liftover::chain::Builder::try_build_from()`]. It can lift forward or
//! backward between any two releases the source covers.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use omics::coordinate::Strand;
//! use seqdiff::feature::Feature;
//! use seqdiff::liftover::chain::Builder;
//!
//! let data = b"Chromosome: I\n10\t10\t0\t10\t12\t2\t0\n";
//! let diff = seqdiff::Reader::new(&data[..]).read_diff(141)?;
//! let source = HashMap::from([(diff.release(), diff)]);
//!
//! let chain = Builder.try_build_from(&source, 141, 140)?;
//!
//! let mut feature = Feature::new("I", Some(100), Some(200), Some(Strand::Positive));
//! chain.lift_feature(&mut feature);
//! assert_eq!(feature.to_string(), "I:98-198:+");
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod alignment;
pub mod diff;
pub mod feature;
pub mod liftover;
pub mod line;
pub mod mismatch;
pub mod reader;
pub mod record;
pub mod source;

pub use line::Line;

pub use self::reader::Reader;
