use crate::prelude::{subcarrier_universe, SUBCARRIER_BASE, SUBCARRIER_COUNT};
use crate::selector::format::format_ranges;
use crate::slots::SubcarrierSelection;
use std::collections::BTreeSet;

/// Working subcarrier selection for a single time-series slot.
///
/// The picker starts with every subcarrier selected and unlocked. `confirm`
/// locks the working set and emits the canonical selection; `unlock` reopens
/// the same working set for further edits. All mutators are no-ops while
/// locked.
#[derive(Debug, Clone)]
pub struct SubcarrierPicker {
    working: BTreeSet<u8>,
    locked: bool,
}

impl SubcarrierPicker {
    pub fn new() -> Self {
        Self {
            working: subcarrier_universe().collect(),
            locked: false,
        }
    }

    pub fn select_all(&mut self) {
        if self.locked {
            return;
        }
        self.working = subcarrier_universe().collect();
    }

    pub fn deselect_all(&mut self) {
        if self.locked {
            return;
        }
        self.working.clear();
    }

    /// Flip one index in or out of the working set. Indices outside the
    /// universe are ignored.
    pub fn toggle(&mut self, index: u8) {
        if self.locked || !in_universe(index) {
            return;
        }
        if !self.working.remove(&index) {
            self.working.insert(index);
        }
    }

    /// Lock the working set and emit it as the slot's canonical selection.
    pub fn confirm(&mut self) -> SubcarrierSelection {
        self.locked = true;
        SubcarrierSelection::from_indices(self.working.iter().copied())
    }

    /// Reopen the same working selection for editing.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn working(&self) -> &BTreeSet<u8> {
        &self.working
    }

    /// Compact display form of the working selection.
    pub fn summary(&self) -> String {
        format_ranges(self.working.iter().copied())
    }
}

impl Default for SubcarrierPicker {
    fn default() -> Self {
        Self::new()
    }
}

fn in_universe(index: u8) -> bool {
    (SUBCARRIER_BASE..SUBCARRIER_BASE + SUBCARRIER_COUNT as u8).contains(&index)
}
