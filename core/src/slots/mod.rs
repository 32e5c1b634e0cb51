pub mod collection;
pub mod slot;

pub use collection::{SlotChoice, SlotCollection, MAX_SLOTS, SLOT_CHOICES, SUBMITTABLE_COUNTS};
pub use slot::{Slot, SlotId, SlotKind, SlotMode, SubcarrierSelection};
