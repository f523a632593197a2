//! Lifting an [`Alignment`] across one mismatch pair.
//!
//! Unlike features, alignments are compared against the stored (0-based)
//! previous span of a pair without conversion. Each pair may move the read,
//! move or unmap its mate, adjust the inferred insert size, and rewrite the
//! CIGAR when reference bases appear or disappear beneath the read.

use crate::alignment::Alignment;
use crate::alignment::Cigar;
use crate::alignment::SAME_CHROMOSOME;
use crate::liftover::Error;
use crate::mismatch::Pair;
use crate::mismatch::Position;

/// The positions of a read and its mate before a pair is applied.
#[derive(Clone, Copy, Debug)]
struct Snapshot {
    /// The start of the read.
    start: Position,

    /// The end of the read.
    end: Option<Position>,

    /// The start of the mate.
    mate_start: Position,

    /// The end of the mate, known only when the read precedes it.
    mate_end: Option<Position>,
}

impl Snapshot {
    /// Captures the positions of an alignment.
    fn of(alignment: &Alignment) -> Self {
        let start = alignment.start();
        let mate_start = alignment.mate_start();

        Self {
            start,
            end: alignment.end(),
            mate_start,
            mate_end: if start < mate_start {
                alignment.mate_end()
            } else {
                None
            },
        }
    }

    /// Whether the read lies upstream of its mate.
    fn read_precedes_mate(&self) -> bool {
        self.start < self.mate_start
    }

    /// Whether the read lies downstream of its mate.
    fn read_follows_mate(&self) -> bool {
        self.start > self.mate_start
    }
}

/// Converts a non-negative position difference to a CIGAR offset or length.
fn to_len(value: Position) -> usize {
    usize::try_from(value).unwrap_or_default()
}

/// Applies one mismatch pair to an alignment on `chromosome`.
///
/// Nothing is modified when an error is returned.
pub(crate) fn apply(pair: &Pair, chromosome: &str, alignment: &mut Alignment) -> Result<(), Error> {
    if pair.is_flipped() {
        return Err(Error::UnsupportedInversion {
            chromosome: chromosome.to_string(),
            start: pair.previous().start(),
        });
    }

    if alignment.is_mate_mapped()
        && alignment.mate_chromosome() != SAME_CHROMOSOME
        && alignment.mate_chromosome() != chromosome
    {
        return Err(Error::CrossChromosomeMate {
            chromosome: chromosome.to_string(),
            mate_chromosome: alignment.mate_chromosome().to_string(),
        });
    }

    let snapshot = Snapshot::of(alignment);
    let mapped = alignment.is_mapped();

    let cigar = match (mapped, snapshot.end) {
        (true, Some(end)) => edit_cigar(pair, alignment.cigar(), snapshot.start, end)?,
        _ => None,
    };

    if mapped {
        lift_start(pair, alignment);
    }

    if alignment.is_mate_mapped() {
        lift_mate_start(pair, &snapshot, alignment);
    }

    // Everything below describes the read itself, which may have just been
    // deleted.
    if !alignment.is_mapped() {
        return Ok(());
    }

    if pair.length_delta() != 0 && alignment.is_mate_mapped() {
        lift_insert_size(pair, &snapshot, alignment);
    }

    if let Some(cigar) = cigar {
        alignment.set_cigar(cigar);
    }

    lift_mate_end(pair, &snapshot, alignment);

    Ok(())
}

/// Moves, clamps, or unmaps the read.
fn lift_start(pair: &Pair, alignment: &mut Alignment) {
    let previous = pair.previous();
    let current = pair.current();
    let start = alignment.start();
    let end = alignment.end().unwrap_or(start);

    if start >= previous.end() {
        alignment.set_start(start + pair.length_delta());
    } else if start >= previous.start()
        && end <= previous.end()
        && current.length() < previous.length()
    {
        alignment.unmap();
    } else if start >= previous.start() && start - previous.start() > current.length() {
        alignment.set_start(previous.start() + current.length());
    }
}

/// Moves, clamps, or unmaps the mate.
fn lift_mate_start(pair: &Pair, snapshot: &Snapshot, alignment: &mut Alignment) {
    let previous = pair.previous();
    let current = pair.current();
    let mate_start = alignment.mate_start();

    if mate_start >= previous.end() {
        alignment.set_mate_start(mate_start + pair.length_delta());
    } else if mate_start >= previous.start() && mate_start - previous.start() > current.length() {
        // Without the end of the mate there is no telling how much of it is
        // left, so it is treated as deleted.
        let deleted = snapshot.read_follows_mate()
            || snapshot
                .mate_end
                .map_or(true, |mate_end| previous.end() >= mate_end);

        if deleted {
            alignment.unmap_mate();
        } else {
            alignment.set_mate_start(previous.start() + current.length());
        }
    }
}

/// Adjusts the inferred insert size for a change in length between the
/// outer boundaries of the pair.
fn lift_insert_size(pair: &Pair, snapshot: &Snapshot, alignment: &mut Alignment) {
    let previous = pair.previous();
    let delta = pair.length_delta();
    let insert_size = alignment.insert_size();

    let between = (snapshot.read_precedes_mate()
        && previous.start() > snapshot.start
        && alignment
            .mate_end()
            .is_some_and(|mate_end| previous.end() < mate_end))
        || (snapshot.read_follows_mate()
            && previous.start() > snapshot.mate_start
            && snapshot.end.is_some_and(|end| previous.end() < end));

    if between {
        if snapshot.read_precedes_mate() {
            alignment.set_insert_size(insert_size + delta);
        } else {
            alignment.set_insert_size(insert_size - delta);
        }
    } else if snapshot.read_precedes_mate()
        && previous.start() < snapshot.start
        && previous.end() > snapshot.start
    {
        // Only the part of the change at or after the read start counts.
        let offset = previous.start() - snapshot.start;
        alignment.set_insert_size(insert_size + (delta - offset));
    } else if snapshot.read_follows_mate()
        && previous.start() < snapshot.mate_start
        && previous.end() > snapshot.mate_start
    {
        let offset = previous.start() - snapshot.mate_start;
        alignment.set_insert_size(insert_size - (delta - offset));
    } else if let Some(end) = snapshot.end {
        if snapshot.read_follows_mate()
            && alignment.flags().has_pair_role()
            && previous.start() <= end
            && previous.end() > end
        {
            // Only the part of the change before the read end counts.
            alignment.set_insert_size(insert_size - (delta + ((previous.end() - 1) - end)));
        }
    }
}

/// Computes the CIGAR of a read spanning `[start, end]` after the pair is
/// applied, or [`None`] if it does not change.
fn edit_cigar(
    pair: &Pair,
    cigar: &Cigar,
    start: Position,
    end: Position,
) -> Result<Option<Cigar>, Error> {
    let previous = pair.previous();
    let current = pair.current();

    if previous.length() == current.length() {
        return Ok(None);
    }

    if start < previous.end() && end > previous.end() {
        let mut offset = previous.start() - start;
        let mut shift = pair.length_delta();

        // The pair begins before the read: only the overlapping part applies.
        if offset < 0 {
            if shift > 0 {
                shift += offset;
            } else {
                shift -= offset;
            }

            offset = 0;
        }

        let edited = if shift > 0 {
            Some(cigar.insert_at(to_len(offset), to_len(shift)))
        } else if shift < 0 {
            Some(cigar.delete_at(to_len(offset), to_len(-shift)))
        } else {
            None
        };

        return edited.transpose().map_err(Error::Cigar);
    }

    if end < previous.end() && end >= previous.start() && start < previous.start() {
        let offset = previous.start() - start;
        let length = (previous.length() - current.length()) - ((previous.end() - 1) - end);

        if length > 0 {
            return cigar
                .delete_at(to_len(offset), to_len(length))
                .map(Some)
                .map_err(Error::Cigar);
        }
    }

    Ok(None)
}

/// Adjusts the insert size when the pair removes bases across the end of the
/// mate.
fn lift_mate_end(pair: &Pair, snapshot: &Snapshot, alignment: &mut Alignment) {
    let previous = pair.previous();
    let current = pair.current();

    if !snapshot.read_precedes_mate() || !alignment.flags().has_pair_role() {
        return;
    }

    if let Some(mate_end) = snapshot.mate_end {
        if mate_end < previous.end() && mate_end >= previous.start() {
            let length = (previous.length() - current.length()) - ((previous.end() - 1) - mate_end);
            alignment.set_insert_size(alignment.insert_size() - length);
        }
    }
}
