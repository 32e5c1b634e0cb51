use crate::slots::slot::{Slot, SlotId, SlotKind, SlotMode, SubcarrierSelection};

/// One selectable (kind, mode) pairing offered by the configuration surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotChoice {
    pub kind: SlotKind,
    pub mode: Option<SlotMode>,
}

impl SlotChoice {
    pub const fn new(kind: SlotKind, mode: Option<SlotMode>) -> Self {
        Self { kind, mode }
    }
}

/// The full selection menu: camera, both heatmap modes, both time-series
/// modes.
pub const SLOT_CHOICES: [SlotChoice; 5] = [
    SlotChoice::new(SlotKind::Camera, None),
    SlotChoice::new(SlotKind::Heatmap, Some(SlotMode::Magnitude)),
    SlotChoice::new(SlotKind::Heatmap, Some(SlotMode::Phase)),
    SlotChoice::new(SlotKind::TimeSeries, Some(SlotMode::Magnitude)),
    SlotChoice::new(SlotKind::TimeSeries, Some(SlotMode::Phase)),
];

/// Collection sizes accepted by the backend layout engine.
pub const SUBMITTABLE_COUNTS: [usize; 4] = [1, 2, 4, 6];

/// Hard cap on configured slots.
pub const MAX_SLOTS: usize = 6;

/// Ordered collection of configured slots. Owns id minting and the
/// duplicate/size invariants.
#[derive(Debug, Clone, Default)]
pub struct SlotCollection {
    slots: Vec<Slot>,
    next_id: u64,
}

impl SlotCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slot for the given choice. Returns `None` without touching
    /// the collection when it is full or the non-time-series pairing is
    /// already present.
    pub fn add_slot(&mut self, choice: SlotChoice) -> Option<SlotId> {
        if self.slots.len() >= MAX_SLOTS {
            return None;
        }
        if choice.kind != SlotKind::TimeSeries && self.contains_pair(choice) {
            return None;
        }
        let id = SlotId::new(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot::new(id, choice.kind, choice.mode));
        Some(id)
    }

    /// Delete the slot and its subcarrier state. Unknown ids are ignored.
    pub fn remove_slot(&mut self, id: SlotId) {
        self.slots.retain(|slot| slot.id() != id);
    }

    /// Replace a time-series slot's subcarrier selection. Returns whether
    /// the selection was applied.
    pub fn set_subcarriers(&mut self, id: SlotId, selection: SubcarrierSelection) -> bool {
        match self
            .slots
            .iter_mut()
            .find(|slot| slot.id() == id && slot.kind() == SlotKind::TimeSeries)
        {
            Some(slot) => {
                slot.set_subcarriers(selection);
                true
            }
            None => false,
        }
    }

    /// Choices still offerable from the menu: present non-time-series
    /// pairings are excluded, time-series pairings never are, and a full
    /// collection offers nothing.
    pub fn offerable(&self) -> Vec<SlotChoice> {
        if self.slots.len() >= MAX_SLOTS {
            return Vec::new();
        }
        SLOT_CHOICES
            .iter()
            .copied()
            .filter(|choice| {
                choice.kind == SlotKind::TimeSeries || !self.contains_pair(*choice)
            })
            .collect()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn get(&self, id: SlotId) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.id() == id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn contains_pair(&self, choice: SlotChoice) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.kind() == choice.kind && slot.mode() == choice.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heatmap_mag() -> SlotChoice {
        SlotChoice::new(SlotKind::Heatmap, Some(SlotMode::Magnitude))
    }

    fn ts_mag() -> SlotChoice {
        SlotChoice::new(SlotKind::TimeSeries, Some(SlotMode::Magnitude))
    }

    #[test]
    fn duplicate_heatmap_is_a_noop() {
        let mut collection = SlotCollection::new();
        assert!(collection.add_slot(heatmap_mag()).is_some());
        assert!(collection.add_slot(heatmap_mag()).is_none());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn duplicate_timeseries_is_allowed() {
        let mut collection = SlotCollection::new();
        let first = collection.add_slot(ts_mag()).unwrap();
        let second = collection.add_slot(ts_mag()).unwrap();
        assert_ne!(first, second);
        collection.set_subcarriers(second, SubcarrierSelection::from_indices([0, 1]));
        assert_eq!(collection.len(), 2);
        assert_eq!(
            collection.get(first).unwrap().subcarriers(),
            Some(&SubcarrierSelection::All)
        );
    }

    #[test]
    fn ids_are_never_reused() {
        let mut collection = SlotCollection::new();
        let first = collection.add_slot(heatmap_mag()).unwrap();
        collection.remove_slot(first);
        let second = collection.add_slot(heatmap_mag()).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut collection = SlotCollection::new();
        let id = collection.add_slot(heatmap_mag()).unwrap();
        collection.remove_slot(id);
        collection.remove_slot(id);
        assert!(collection.is_empty());
    }

    #[test]
    fn set_subcarriers_ignores_non_timeseries_slots() {
        let mut collection = SlotCollection::new();
        let id = collection.add_slot(heatmap_mag()).unwrap();
        assert!(!collection.set_subcarriers(id, SubcarrierSelection::from_indices([1])));
        assert!(collection.get(id).unwrap().subcarriers().is_none());
    }

    #[test]
    fn offerable_excludes_present_pairings() {
        let mut collection = SlotCollection::new();
        collection.add_slot(heatmap_mag());
        let offered = collection.offerable();
        assert_eq!(offered.len(), 4);
        assert!(!offered.contains(&heatmap_mag()));
        assert!(offered.contains(&ts_mag()));
    }

    #[test]
    fn full_collection_offers_nothing() {
        let mut collection = SlotCollection::new();
        for _ in 0..MAX_SLOTS {
            collection.add_slot(ts_mag()).unwrap();
        }
        assert!(collection.offerable().is_empty());
        assert!(collection.add_slot(ts_mag()).is_none());
    }
}
