use crate::prelude::{subcarrier_universe, SUBCARRIER_COUNT};
use crate::selector::format_ranges;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier minted once per configured slot, never reused within a
/// collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(u64);

impl SlotId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot-{}", self.0)
    }
}

/// Visualization family of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Camera,
    Heatmap,
    #[serde(rename = "timeseries")]
    TimeSeries,
}

/// CSI component rendered by a heatmap or time-series slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotMode {
    Magnitude,
    Phase,
}

/// Subcarrier choice attached to a time-series slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubcarrierSelection {
    All,
    Indices(BTreeSet<u8>),
}

impl SubcarrierSelection {
    /// Collect indices into a selection, collapsing the full universe back
    /// to `All`.
    pub fn from_indices<I: IntoIterator<Item = u8>>(indices: I) -> Self {
        let set: BTreeSet<u8> = indices.into_iter().collect();
        if set.len() == SUBCARRIER_COUNT {
            SubcarrierSelection::All
        } else {
            SubcarrierSelection::Indices(set)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SubcarrierSelection::All => false,
            SubcarrierSelection::Indices(set) => set.is_empty(),
        }
    }

    /// The concrete indices covered by this selection, ascending.
    pub fn indices(&self) -> BTreeSet<u8> {
        match self {
            SubcarrierSelection::All => subcarrier_universe().collect(),
            SubcarrierSelection::Indices(set) => set.clone(),
        }
    }
}

/// One configured visualization unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    id: SlotId,
    kind: SlotKind,
    mode: Option<SlotMode>,
    subcarriers: Option<SubcarrierSelection>,
}

impl Slot {
    pub(crate) fn new(id: SlotId, kind: SlotKind, mode: Option<SlotMode>) -> Self {
        // New time-series slots stream every subcarrier until edited.
        let subcarriers = match kind {
            SlotKind::TimeSeries => Some(SubcarrierSelection::All),
            _ => None,
        };
        Self {
            id,
            kind,
            mode,
            subcarriers,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    pub fn mode(&self) -> Option<SlotMode> {
        self.mode
    }

    pub fn subcarriers(&self) -> Option<&SubcarrierSelection> {
        self.subcarriers.as_ref()
    }

    pub(crate) fn set_subcarriers(&mut self, selection: SubcarrierSelection) {
        self.subcarriers = Some(selection);
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SlotKind::Camera => write!(f, "camera"),
            SlotKind::Heatmap => write!(f, "heatmap/{}", mode_label(self.mode)),
            SlotKind::TimeSeries => {
                let selection = match &self.subcarriers {
                    Some(SubcarrierSelection::All) => "all".to_string(),
                    Some(SubcarrierSelection::Indices(set)) => {
                        format_ranges(set.iter().copied())
                    }
                    None => String::new(),
                };
                write!(f, "timeseries/{} [{}]", mode_label(self.mode), selection)
            }
        }
    }
}

fn mode_label(mode: Option<SlotMode>) -> &'static str {
    match mode {
        Some(SlotMode::Magnitude) => "magnitude",
        Some(SlotMode::Phase) => "phase",
        None => "-",
    }
}
