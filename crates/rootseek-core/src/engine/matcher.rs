/// Match evaluation — decides whether one entry satisfies one target.
///
/// Pure and non-blocking. Two stages run in order, the filename stage and
/// the attribute stage; either can force a failure, and an entry that
/// survives both is a match.
use crate::model::{CompiledTarget, FileAttributes, FoundEntry, MatchStyle};

/// Evaluate `entry` against `target`.
pub fn evaluate(target: &CompiledTarget, entry: &FoundEntry) -> bool {
    name_stage(target, &entry.name) && attribute_stage(target, entry.attributes)
}

fn name_stage(target: &CompiledTarget, name: &str) -> bool {
    let style = target.target.name_match_style;
    if style.is_skip() {
        return true;
    }

    // No patterns is a vacuous match-all.
    let (matched_one, failed_one) = if target.predicates.is_empty() {
        (true, false)
    } else {
        target
            .predicates
            .iter()
            .fold((false, false), |(hit, miss), predicate| {
                if predicate.is_match(name) {
                    (true, miss)
                } else {
                    (hit, true)
                }
            })
    };

    let inverted = style.is_inverted();

    if style.contains(MatchStyle::MATCH_ALL) {
        let fails = if inverted { matched_one } else { failed_one };
        if fails {
            return false;
        }
    }

    if style.contains(MatchStyle::MATCH_ANY) {
        let passes = if inverted { failed_one } else { matched_one };
        if !passes {
            return false;
        }
    }

    true
}

fn attribute_stage(target: &CompiledTarget, attributes: FileAttributes) -> bool {
    let style = target.target.attribute_match_style;
    let mask = target.target.attribute_mask;

    // A zero mask, or one carrying the "no special attributes" marker,
    // disables the stage regardless of style.
    if style.is_skip() || mask.is_empty() || mask.contains(FileAttributes::NORMAL) {
        return true;
    }

    // Only the inverted exact-match case fails here. A non-inverted mask
    // that does not equal the entry's attributes is not a failure.
    if style.contains(MatchStyle::MATCH_ALL) && mask == attributes && style.is_inverted() {
        return false;
    }

    // INVERT has no effect on MATCH_ANY.
    if style.contains(MatchStyle::MATCH_ANY) && !mask.intersects(attributes) {
        return false;
    }

    true
}
