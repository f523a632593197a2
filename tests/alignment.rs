//! Lifting a read pair through single sequence differences.
//!
//! The read is `50M` at 9949430 with its mate at 9949500 and an inferred
//! insert size of 120. Its mate is the same pair seen from the other side.

use std::collections::HashMap;

use seqdiff::alignment::Alignment;
use seqdiff::alignment::Builder;
use seqdiff::alignment::Flags;
use seqdiff::diff;
use seqdiff::diff::Release;
use seqdiff::diff::ReleaseDiff;
use seqdiff::liftover;
use seqdiff::liftover::Chain;
use seqdiff::record::Record;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const READ_START: i64 = 9949430;
const READ_END: i64 = 9949479;
const MATE_START: i64 = 9949500;
const MATE_END: i64 = 9949549;

fn read() -> Result<Alignment> {
    Ok(Builder::default()
        .chromosome("I")?
        .start(READ_START)?
        .cigar("50M".parse()?)
        .flags(Flags::from_bits(67))
        .mate("=", MATE_START)
        .insert_size(120)
        .try_build()?)
}

fn mate() -> Result<Alignment> {
    Ok(Builder::default()
        .chromosome("I")?
        .start(MATE_START)?
        .cigar("50M".parse()?)
        .flags(Flags::from_bits(131))
        .mate("=", READ_START)
        .insert_size(-120)
        .try_build()?)
}

fn chain(pair: &str) -> Result<Chain> {
    let diff = diff::Builder::default()
        .release(2)?
        .push("I", pair.parse()?)
        .try_build()?;
    let source: HashMap<Release, ReleaseDiff> = HashMap::from([(2, diff)]);

    Ok(liftover::chain::Builder.try_build_from(source, 1, 2)?)
}

/// Lifts both records of the pair through a single mismatch pair.
fn lift(pair: &str) -> Result<(Alignment, Alignment)> {
    let chain = chain(pair)?;

    let mut read = read()?;
    chain.lift_alignment(&mut read)?;

    let mut mate = mate()?;
    chain.lift_alignment(&mut mate)?;

    Ok((read, mate))
}

#[test]
fn an_insertion_before_the_pair_shifts_both() -> Result<()> {
    let (read, mate) = lift("9949400\t9949400\t0\t9949400\t9949402\t2\t0")?;

    assert_eq!(read.start(), READ_START + 2);
    assert_eq!(read.end(), Some(READ_END + 2));
    assert_eq!(read.mate_start(), MATE_START + 2);
    assert_eq!(read.mate_end(), Some(MATE_END + 2));
    assert_eq!(read.insert_size(), 120);
    assert_eq!(read.cigar().to_string(), "50M");
    assert!(read.outcome().is_changed());

    assert_eq!(mate.start(), MATE_START + 2);
    assert_eq!(mate.end(), Some(MATE_END + 2));
    assert_eq!(mate.mate_start(), READ_START + 2);
    assert_eq!(mate.insert_size(), -120);
    assert_eq!(mate.cigar().to_string(), "50M");

    Ok(())
}

#[test]
fn a_deletion_before_the_pair_shifts_both() -> Result<()> {
    let (read, mate) = lift("9949400\t9949402\t2\t9949400\t9949400\t0\t0")?;

    assert_eq!(read.start(), READ_START - 2);
    assert_eq!(read.end(), Some(READ_END - 2));
    assert_eq!(read.mate_start(), MATE_START - 2);
    assert_eq!(read.insert_size(), 120);

    assert_eq!(mate.start(), MATE_START - 2);
    assert_eq!(mate.mate_start(), READ_START - 2);
    assert_eq!(mate.insert_size(), -120);

    Ok(())
}

#[test]
fn a_growing_region_before_the_pair_shifts_both() -> Result<()> {
    let (read, mate) = lift("9949400\t9949401\t1\t9949400\t9949402\t2\t0")?;

    assert_eq!(read.start(), READ_START + 1);
    assert_eq!(read.mate_start(), MATE_START + 1);
    assert_eq!(mate.start(), MATE_START + 1);
    assert_eq!(mate.mate_start(), READ_START + 1);

    Ok(())
}

#[test]
fn a_shrinking_region_before_the_pair_shifts_both() -> Result<()> {
    let (read, mate) = lift("9949400\t9949402\t2\t9949400\t9949401\t1\t0")?;

    assert_eq!(read.start(), READ_START - 1);
    assert_eq!(read.mate_start(), MATE_START - 1);
    assert_eq!(mate.start(), MATE_START - 1);
    assert_eq!(mate.mate_start(), READ_START - 1);

    Ok(())
}

#[test]
fn an_insertion_between_the_reads_grows_the_insert() -> Result<()> {
    let (read, mate) = lift("9949490\t9949490\t0\t9949490\t9949492\t2\t0")?;

    assert_eq!(read.start(), READ_START);
    assert_eq!(read.mate_start(), MATE_START + 2);
    assert_eq!(read.insert_size(), 122);
    assert_eq!(read.mate_end(), Some(MATE_END + 2));

    assert_eq!(mate.start(), MATE_START + 2);
    assert_eq!(mate.mate_start(), READ_START);
    assert_eq!(mate.insert_size(), -122);

    Ok(())
}

#[test]
fn a_deletion_between_the_reads_shrinks_the_insert() -> Result<()> {
    let (read, mate) = lift("9949490\t9949492\t2\t9949490\t9949490\t0\t0")?;

    assert_eq!(read.start(), READ_START);
    assert_eq!(read.mate_start(), MATE_START - 2);
    assert_eq!(read.insert_size(), 118);

    assert_eq!(mate.start(), MATE_START - 2);
    assert_eq!(mate.insert_size(), -118);

    Ok(())
}

#[test]
fn differences_after_the_pair_change_nothing() -> Result<()> {
    for pair in [
        "9949560\t9949560\t0\t9949560\t9949562\t2\t0",
        "9949560\t9949562\t2\t9949560\t9949560\t0\t0",
    ] {
        let (read, mate) = lift(pair)?;

        assert_eq!(read, self::read()?);
        assert!(!read.outcome().is_changed());
        assert_eq!(mate, self::mate()?);
    }

    Ok(())
}

#[test]
fn an_insertion_inside_the_read_adds_a_deletion_to_its_cigar() -> Result<()> {
    let (read, mate) = lift("9949440\t9949440\t0\t9949440\t9949442\t2\t0")?;

    assert_eq!(read.start(), READ_START);
    assert_eq!(read.cigar().to_string(), "10M2D40M");
    assert_eq!(read.end(), Some(READ_END + 2));
    assert_eq!(read.mate_start(), MATE_START + 2);
    assert_eq!(read.insert_size(), 122);

    assert_eq!(mate.start(), MATE_START + 2);
    assert_eq!(mate.cigar().to_string(), "50M");
    assert_eq!(mate.insert_size(), -122);

    Ok(())
}

#[test]
fn a_deletion_inside_the_read_adds_an_insertion_to_its_cigar() -> Result<()> {
    let (read, mate) = lift("9949440\t9949442\t2\t9949440\t9949440\t0\t0")?;

    assert_eq!(read.start(), READ_START);
    assert_eq!(read.cigar().to_string(), "10M2I38M");
    assert_eq!(read.end(), Some(READ_END - 2));
    assert_eq!(read.mate_start(), MATE_START - 2);
    assert_eq!(read.insert_size(), 118);

    assert_eq!(mate.start(), MATE_START - 2);
    assert_eq!(mate.insert_size(), -118);

    Ok(())
}

#[test]
fn an_insertion_inside_the_mate_grows_the_insert() -> Result<()> {
    let (read, mate) = lift("9949510\t9949510\t0\t9949510\t9949512\t2\t0")?;

    assert_eq!(read.start(), READ_START);
    assert_eq!(read.mate_start(), MATE_START);
    assert_eq!(read.insert_size(), 122);
    assert_eq!(read.mate_end(), Some(MATE_END + 2));

    assert_eq!(mate.start(), MATE_START);
    assert_eq!(mate.end(), Some(MATE_END + 2));
    assert_eq!(mate.cigar().to_string(), "10M2D40M");
    assert_eq!(mate.insert_size(), -122);

    Ok(())
}

#[test]
fn a_deletion_inside_the_mate_shrinks_the_insert() -> Result<()> {
    let (read, mate) = lift("9949510\t9949512\t2\t9949510\t9949510\t0\t0")?;

    assert_eq!(read.insert_size(), 118);
    assert_eq!(read.cigar().to_string(), "50M");

    assert_eq!(mate.start(), MATE_START);
    assert_eq!(mate.cigar().to_string(), "10M2I38M");
    assert_eq!(mate.end(), Some(MATE_END - 2));
    assert_eq!(mate.insert_size(), -118);

    Ok(())
}

#[test]
fn a_deletion_across_the_read_start_trims_it() -> Result<()> {
    let (read, mate) = lift("9949429\t9949431\t2\t9949429\t9949429\t0\t0")?;

    assert_eq!(read.start(), READ_START - 1);
    assert_eq!(read.cigar().to_string(), "1I49M");
    assert_eq!(read.end(), Some(READ_END - 2));
    assert_eq!(read.mate_start(), MATE_START - 2);
    assert_eq!(read.insert_size(), 119);
    assert_eq!(read.mate_end(), Some(MATE_END - 2));

    // Seen from the mate, the read start falls inside the deleted region and
    // its end cannot be known.
    assert_eq!(mate.start(), MATE_START - 2);
    assert_eq!(mate.end(), Some(MATE_END - 2));
    assert_eq!(mate.mate_start(), 0);
    assert_eq!(mate.insert_size(), 0);
    assert!(mate.flags().is_mate_unmapped());
    assert!(!mate.is_mate_mapped());

    Ok(())
}

#[test]
fn a_deletion_across_the_read_end_trims_it() -> Result<()> {
    let (read, mate) = lift("9949479\t9949481\t2\t9949479\t9949479\t0\t0")?;

    assert_eq!(read.start(), READ_START);
    assert_eq!(read.cigar().to_string(), "49M1I");
    assert_eq!(read.end(), Some(READ_END - 1));
    assert_eq!(read.mate_start(), MATE_START - 2);
    assert_eq!(read.insert_size(), 118);

    assert_eq!(mate.start(), MATE_START - 2);
    assert_eq!(mate.end(), Some(MATE_END - 2));
    assert_eq!(mate.insert_size(), -118);

    Ok(())
}

#[test]
fn a_deletion_across_the_mate_start_trims_it() -> Result<()> {
    let (read, mate) = lift("9949499\t9949501\t2\t9949499\t9949499\t0\t0")?;

    assert_eq!(read.start(), READ_START);
    assert_eq!(read.mate_start(), MATE_START - 1);
    assert_eq!(read.insert_size(), 118);
    assert!(read.is_mate_mapped());

    assert_eq!(mate.start(), MATE_START - 1);
    assert_eq!(mate.end(), Some(MATE_END - 2));
    assert_eq!(mate.cigar().to_string(), "1I49M");
    assert_eq!(mate.insert_size(), -118);

    Ok(())
}

#[test]
fn a_deletion_across_the_mate_end_trims_it() -> Result<()> {
    let (read, mate) = lift("9949549\t9949551\t2\t9949549\t9949549\t0\t0")?;

    assert_eq!(read.start(), READ_START);
    assert_eq!(read.mate_start(), MATE_START);
    assert_eq!(read.insert_size(), 119);
    assert_eq!(read.mate_end(), Some(MATE_END - 1));

    assert_eq!(mate.start(), MATE_START);
    assert_eq!(mate.cigar().to_string(), "49M1I");
    assert_eq!(mate.end(), Some(MATE_END - 1));
    assert_eq!(mate.insert_size(), -119);

    Ok(())
}

#[test]
fn deleting_the_whole_read_unmaps_it() -> Result<()> {
    let (read, mate) = lift("9949429\t9949481\t52\t9949429\t9949429\t0\t0")?;

    assert_eq!(read.chromosome(), "*");
    assert_eq!(read.start(), 0);
    assert_eq!(read.end(), None);
    assert_eq!(read.cigar().to_string(), "*");
    assert_eq!(read.insert_size(), 0);
    assert_eq!(read.mate_start(), MATE_START - 52);
    assert!(!read.is_mapped());
    assert!(read.flags().is_unmapped());
    assert!(!read.flags().is_first_of_pair());
    assert!(!read.flags().is_second_of_pair());
    assert!(read.outcome().is_changed());

    assert_eq!(mate.start(), MATE_START - 52);
    assert_eq!(mate.end(), Some(MATE_END - 52));
    assert_eq!(mate.mate_start(), 0);
    assert_eq!(mate.insert_size(), 0);
    assert!(mate.flags().is_mate_unmapped());

    Ok(())
}

#[test]
fn an_inversion_fails_and_leaves_the_read_alone() -> Result<()> {
    let chain = chain("9949400\t9949420\t20\t9949400\t9949420\t20\t1")?;
    let mut read = read()?;

    let err = chain.lift_alignment(&mut read).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot lift an alignment across the inversion at I:9949400"
    );
    assert_eq!(read, self::read()?);

    Ok(())
}

#[test]
fn an_unmapped_read_is_not_lifted() -> Result<()> {
    let chain = chain("9949400\t9949400\t0\t9949400\t9949402\t2\t0")?;

    let mut read = read()?;
    read.unmap();
    let unmapped = read.clone();

    chain.lift_alignment(&mut read)?;
    assert_eq!(read, unmapped);

    Ok(())
}

#[test]
fn lifting_an_owned_record_keeps_the_original() -> Result<()> {
    let chain = chain("9949400\t9949400\t0\t9949400\t9949402\t2\t0")?;
    let lifted = chain.lift_owned(Record::from(read()?))?;

    assert_eq!(lifted.original(), &Record::from(read()?));
    assert!(lifted.lifted().outcome().is_changed());

    match lifted.lifted() {
        Record::Alignment(alignment) => assert_eq!(alignment.start(), READ_START + 2),
        Record::Feature(_) => unreachable!(),
    }

    Ok(())
}
