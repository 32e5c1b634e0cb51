use crate::payload::SessionPayload;
use crate::slots::{SlotCollection, SlotKind, SUBMITTABLE_COUNTS};

/// Verdict produced by checking a slot collection against the submission
/// rules, together with the canonical request body.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub payload: SessionPayload,
}

/// Check submittability and project the backend payload. Deterministic and
/// side-effect-free, safe to call on every configuration change.
pub fn validate(collection: &SlotCollection) -> Validation {
    let mut errors = Vec::new();

    if !SUBMITTABLE_COUNTS.contains(&collection.len()) {
        errors.push(format!(
            "slot count {} is not submittable; expected 1, 2, 4, or 6",
            collection.len()
        ));
    }

    for (position, slot) in collection.slots().iter().enumerate() {
        if slot.kind() == SlotKind::TimeSeries
            && slot.subcarriers().map_or(true, |s| s.is_empty())
        {
            errors.push(format!(
                "graph {}: time series requires a subcarrier selection",
                position + 1
            ));
        }
    }

    Validation {
        valid: errors.is_empty(),
        errors,
        payload: SessionPayload::project(collection),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::{SlotChoice, SlotMode, SubcarrierSelection};

    fn ts_choice() -> SlotChoice {
        SlotChoice::new(SlotKind::TimeSeries, Some(SlotMode::Magnitude))
    }

    fn collection_of(n: usize) -> SlotCollection {
        let mut collection = SlotCollection::new();
        for _ in 0..n {
            collection.add_slot(ts_choice()).unwrap();
        }
        collection
    }

    #[test]
    fn submittable_counts_pass() {
        for n in [1, 2, 4, 6] {
            let verdict = validate(&collection_of(n));
            assert!(verdict.valid, "count {} should be submittable", n);
            assert!(verdict.errors.is_empty());
            assert_eq!(verdict.payload.total_graphs, n);
        }
    }

    #[test]
    fn transient_counts_block_submission() {
        for n in [0, 3, 5] {
            let verdict = validate(&collection_of(n));
            assert!(!verdict.valid, "count {} should block submission", n);
        }
    }

    #[test]
    fn empty_subcarrier_selection_blocks_submission() {
        let mut collection = collection_of(1);
        let id = collection.slots()[0].id();
        collection.set_subcarriers(id, SubcarrierSelection::from_indices([]));
        let verdict = validate(&collection);
        assert!(!verdict.valid);
        assert_eq!(
            verdict.errors,
            vec!["graph 1: time series requires a subcarrier selection".to_string()]
        );
    }

    #[test]
    fn revalidation_is_stable() {
        let collection = collection_of(2);
        assert_eq!(validate(&collection), validate(&collection));
    }
}
