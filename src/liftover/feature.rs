//! Lifting a [`Feature`] across one mismatch pair.
//!
//! Mismatch spans are stored 0-based and half-open, while features are 1-based
//! and inclusive. Before a pair is compared to a feature, its previous span is
//! moved one position to the right: the start becomes 1-based and the end
//! stays exclusive.

use omics::coordinate::Strand;
use tracing::trace;

use crate::feature::Feature;
use crate::liftover::Flow;
use crate::mismatch::Pair;
use crate::mismatch::Position;

/// Applies one mismatch pair to a located feature.
///
/// Returns [`Flow::Stop`] when the feature has reached a final state and no
/// further pairs may be applied to it.
pub(crate) fn apply(pair: &Pair, feature: &mut Feature) -> Flow {
    let (Some(start), Some(end)) = (feature.start(), feature.end()) else {
        return Flow::Stop;
    };

    let previous = pair.previous().shifted(1);
    let current = pair.current();

    if pair.is_flipped() {
        return invert(previous.start(), previous.end(), start, end, feature);
    }

    if start < previous.end() && end >= previous.start() {
        feature.outcome_mut().set_changed();

        let contained = start <= previous.start() && end >= previous.end() - 1;

        if !contained && previous.length() != current.length() {
            if previous.length() != 0 && current.length() != 0 {
                trace!("feature {feature} overlaps a mismatch of indeterminate length");
                feature.outcome_mut().set_indeterminate();
                return Flow::Stop;
            }

            // A point mismatch over a boundary: the overlapped bases are gone.
            let length = end - start + 1;
            let overlap_start = start.max(previous.start());
            let overlap_end = end.min(previous.end() - 1);
            let overlap = overlap_end - overlap_start + 1;

            let start = start.min(previous.start());
            feature.set_start(Some(start));
            feature.set_end(Some(start + length - overlap - 1));

            return Flow::Stop;
        }
    }

    let delta = pair.length_delta();
    let clamp = previous.start() + current.length();
    let start_inside_shrunk =
        |start: Position| start >= previous.start() && start - previous.start() > current.length();

    if start >= previous.end() {
        feature.set_start(Some(start + delta));
    } else if start_inside_shrunk(start) {
        feature.set_start(Some(clamp));
    }

    // The end is clamped on the start's condition, evaluated against the
    // start as updated above. A start clamped above never satisfies it.
    if end >= previous.end() {
        feature.set_end(Some(end + delta));
    } else if feature.start().is_some_and(start_inside_shrunk) {
        feature.set_end(Some(clamp));
    }

    Flow::Continue
}

/// Applies an inverted region spanning `[region_start, region_end)` to a
/// feature spanning `[start, end]`.
fn invert(
    region_start: Position,
    region_end: Position,
    start: Position,
    end: Position,
    feature: &mut Feature,
) -> Flow {
    let start_inside = start >= region_start && start < region_end;
    let end_inside = end >= region_start && end < region_end;

    if start_inside && end_inside {
        let strand = match feature.strand() {
            Some(Strand::Negative) => Strand::Positive,
            _ => Strand::Negative,
        };

        let mirror = region_start + region_end;
        let (start, end) = (mirror - start, mirror - end);

        feature.set_strand(Some(strand));
        feature.set_start(Some(start.min(end)));
        feature.set_end(Some(start.max(end)));
        feature.outcome_mut().set_changed();
        feature.outcome_mut().set_flipped();

        Flow::Continue
    } else if start_inside || end_inside {
        trace!("feature {feature} crosses the boundary of an inversion");
        feature.outcome_mut().set_changed();
        feature.outcome_mut().set_dropped();

        Flow::Stop
    } else {
        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lifts a feature through a single pair.
    fn lift(
        pair: &str,
        start: Position,
        end: Position,
    ) -> Result<Feature, Box<dyn std::error::Error>> {
        let pair = pair.parse::<Pair>()?;
        let mut feature = Feature::new("I", Some(start), Some(end), Some(Strand::Positive));
        apply(&pair, &mut feature);
        Ok(feature)
    }

    #[test]
    fn a_pair_before_the_feature_shifts_it() -> Result<(), Box<dyn std::error::Error>> {
        let feature = lift("10\t10\t0\t10\t15\t5\t0", 100, 200)?;

        assert_eq!(feature.start(), Some(105));
        assert_eq!(feature.end(), Some(205));
        assert_eq!(feature.strand(), Some(Strand::Positive));
        assert!(!feature.outcome().is_changed());

        Ok(())
    }

    #[test]
    fn a_pair_after_the_feature_does_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let feature = lift("500\t510\t10\t500\t500\t0\t0", 100, 200)?;

        assert_eq!(feature.start(), Some(100));
        assert_eq!(feature.end(), Some(200));
        assert!(!feature.outcome().is_changed());

        Ok(())
    }

    #[test]
    fn a_point_insertion_inside_the_feature_grows_it() -> Result<(), Box<dyn std::error::Error>> {
        let feature = lift("149\t149\t0\t149\t152\t3\t0", 100, 200)?;

        assert_eq!(feature.start(), Some(100));
        assert_eq!(feature.end(), Some(203));
        assert!(feature.outcome().is_changed());
        assert!(!feature.outcome().is_dropped());

        Ok(())
    }

    #[test]
    fn a_deletion_inside_the_feature_shrinks_it() -> Result<(), Box<dyn std::error::Error>> {
        let feature = lift("149\t159\t10\t149\t149\t0\t0", 100, 200)?;

        assert_eq!(feature.start(), Some(100));
        assert_eq!(feature.end(), Some(190));
        assert!(feature.outcome().is_changed());

        Ok(())
    }

    #[test]
    fn a_deletion_over_the_start_trims_the_feature() -> Result<(), Box<dyn std::error::Error>> {
        // Deleted positions 91-110 (1-based).
        let feature = lift("90\t110\t20\t90\t90\t0\t0", 100, 200)?;

        assert_eq!(feature.start(), Some(91));
        assert_eq!(feature.end(), Some(180));
        assert!(feature.outcome().is_changed());
        assert!(!feature.outcome().is_indeterminate());

        Ok(())
    }

    #[test]
    fn a_deletion_over_the_end_trims_the_feature() -> Result<(), Box<dyn std::error::Error>> {
        // Deleted positions 191-210 (1-based).
        let feature = lift("190\t210\t20\t190\t190\t0\t0", 100, 200)?;

        assert_eq!(feature.start(), Some(100));
        assert_eq!(feature.end(), Some(190));

        Ok(())
    }

    #[test]
    fn a_clamped_start_leaves_the_end_in_place() -> Result<(), Box<dyn std::error::Error>> {
        // A twenty base span recorded as five bases long on both sides.
        let pair = "0\t20\t5\t0\t20\t5\t0".parse::<Pair>()?;
        let mut feature = Feature::new("I", Some(10), Some(15), Some(Strand::Positive));

        assert_eq!(apply(&pair, &mut feature), Flow::Continue);
        assert_eq!(feature.start(), Some(6));
        assert_eq!(feature.end(), Some(15));
        assert!(feature.outcome().is_changed());

        Ok(())
    }

    #[test]
    fn a_partial_overlap_of_unequal_lengths_is_indeterminate(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let feature = lift("90\t110\t20\t90\t100\t10\t0", 100, 200)?;

        assert_eq!(feature.start(), Some(100));
        assert_eq!(feature.end(), Some(200));
        assert!(feature.outcome().is_changed());
        assert!(feature.outcome().is_indeterminate());

        Ok(())
    }

    #[test]
    fn a_substitution_over_a_boundary_keeps_the_feature() -> Result<(), Box<dyn std::error::Error>> {
        let feature = lift("90\t110\t20\t90\t110\t20\t0", 100, 200)?;

        assert_eq!(feature.start(), Some(100));
        assert_eq!(feature.end(), Some(200));
        assert!(feature.outcome().is_changed());
        assert!(!feature.outcome().is_indeterminate());

        Ok(())
    }

    #[test]
    fn a_feature_inside_an_inversion_is_mirrored() -> Result<(), Box<dyn std::error::Error>> {
        let feature = lift("4\t29\t25\t4\t29\t25\t1", 10, 20)?;

        assert_eq!(feature.start(), Some(15));
        assert_eq!(feature.end(), Some(25));
        assert_eq!(feature.strand(), Some(Strand::Negative));
        assert!(feature.outcome().is_changed());
        assert!(feature.outcome().is_flipped());

        Ok(())
    }

    #[test]
    fn an_unstranded_feature_inside_an_inversion_becomes_negative(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let pair = "4\t29\t25\t4\t29\t25\t1".parse::<Pair>()?;
        let mut feature = Feature::new("I", Some(10), Some(20), None);
        apply(&pair, &mut feature);

        assert_eq!(feature.strand(), Some(Strand::Negative));

        Ok(())
    }

    #[test]
    fn a_feature_across_an_inversion_boundary_is_dropped(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let pair = "4\t29\t25\t4\t29\t25\t1".parse::<Pair>()?;
        let mut feature = Feature::new("I", Some(20), Some(40), Some(Strand::Positive));

        assert_eq!(apply(&pair, &mut feature), Flow::Stop);
        assert_eq!(feature.start(), Some(20));
        assert_eq!(feature.end(), Some(40));
        assert!(feature.outcome().is_dropped());
        assert!(feature.outcome().is_changed());

        Ok(())
    }

    #[test]
    fn a_feature_containing_an_inversion_is_untouched() -> Result<(), Box<dyn std::error::Error>> {
        let feature = lift("4\t29\t25\t4\t29\t25\t1", 1, 40)?;

        assert_eq!(feature.start(), Some(1));
        assert_eq!(feature.end(), Some(40));
        assert_eq!(feature.strand(), Some(Strand::Positive));
        assert!(!feature.outcome().is_changed());

        Ok(())
    }
}
