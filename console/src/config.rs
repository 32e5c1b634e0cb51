use anyhow::{bail, Context};
use csicore::prelude::{SUBCARRIER_BASE, SUBCARRIER_COUNT};
use csicore::selector::SubcarrierPicker;
use csicore::slots::{SlotChoice, SlotCollection, SlotKind, SlotMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Declarative session description loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFile {
    pub slots: Vec<SlotEntry>,
}

/// One declared slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotEntry {
    pub kind: SlotKind,
    #[serde(default)]
    pub mode: Option<SlotMode>,
    #[serde(default)]
    pub subcarriers: Option<SubcarrierEntry>,
}

/// `all` or an explicit index list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubcarrierEntry {
    Keyword(String),
    List(Vec<u8>),
}

impl SessionFile {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading session description {}", path_ref.display()))?;
        let file: SessionFile = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing session description {}", path_ref.display()))?;
        Ok(file)
    }

    /// Materialize the declared slots into a collection, walking each
    /// time-series entry through the picker flow so explicit full lists
    /// normalize back to `all`.
    pub fn to_collection(&self) -> anyhow::Result<SlotCollection> {
        let mut collection = SlotCollection::new();

        for (position, entry) in self.slots.iter().enumerate() {
            let label = position + 1;
            match entry.kind {
                SlotKind::Camera => {
                    if entry.mode.is_some() {
                        bail!("slot {}: camera slots take no mode", label);
                    }
                }
                _ => {
                    if entry.mode.is_none() {
                        bail!("slot {}: {:?} slots require a mode", label, entry.kind);
                    }
                }
            }
            if entry.kind != SlotKind::TimeSeries && entry.subcarriers.is_some() {
                bail!("slot {}: subcarriers only apply to time-series slots", label);
            }

            let choice = SlotChoice::new(entry.kind, entry.mode);
            let id = match collection.add_slot(choice) {
                Some(id) => id,
                None => bail!(
                    "slot {}: duplicate configuration or collection already full",
                    label
                ),
            };

            if let Some(subcarriers) = &entry.subcarriers {
                let selection = match subcarriers {
                    SubcarrierEntry::Keyword(keyword) if keyword == "all" => continue,
                    SubcarrierEntry::Keyword(keyword) => {
                        bail!("slot {}: unknown subcarrier keyword '{}'", label, keyword)
                    }
                    SubcarrierEntry::List(indices) => {
                        let mut picker = SubcarrierPicker::new();
                        picker.deselect_all();
                        for &index in indices {
                            if index >= SUBCARRIER_BASE + SUBCARRIER_COUNT as u8 {
                                bail!(
                                    "slot {}: subcarrier {} is out of range 0-63",
                                    label,
                                    index
                                );
                            }
                            picker.toggle(index);
                        }
                        picker.confirm()
                    }
                };
                collection.set_subcarriers(id, selection);
            }
        }

        Ok(collection)
    }
}
