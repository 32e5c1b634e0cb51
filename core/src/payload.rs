use crate::slots::{SlotCollection, SlotKind, SlotMode, SubcarrierSelection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Wire encoding of a slot's subcarrier choice: the keyword `"all"` or an
/// explicit index list. Non-time-series slots carry `null` via `Option`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubcarrierWire {
    Keyword(String),
    List(Vec<u8>),
}

impl SubcarrierWire {
    pub const ALL: &'static str = "all";

    pub fn all() -> Self {
        SubcarrierWire::Keyword(Self::ALL.to_string())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SubcarrierWire::Keyword(keyword) if keyword == Self::ALL)
    }

    fn from_selection(selection: &SubcarrierSelection) -> Self {
        match selection {
            SubcarrierSelection::All => Self::all(),
            SubcarrierSelection::Indices(set) => {
                SubcarrierWire::List(set.iter().copied().collect())
            }
        }
    }
}

/// Wire form of one configured slot inside the start-session request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    #[serde(rename = "type")]
    pub kind: SlotKind,
    pub mode: Option<SlotMode>,
    pub subcarrier: Option<SubcarrierWire>,
}

/// Canonical request body for `POST /api/start-session`.
///
/// Every `show*` flag is a projection of `graph_configs`; nothing here is
/// derived from separate state. `subcarriers` is the legacy flat list of
/// explicitly chosen indices kept for wire compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub total_graphs: usize,
    pub graph_configs: Vec<SlotConfig>,
    pub show_camera: bool,
    pub show_heatmap: bool,
    pub show_mag_heatmap: bool,
    pub show_phase_heatmap: bool,
    pub show_time_series: bool,
    pub show_mag_time_series: bool,
    pub show_phase_time_series: bool,
    pub subcarriers: Vec<u8>,
}

impl SessionPayload {
    /// Project the request body from the slot list alone.
    pub fn project(collection: &SlotCollection) -> Self {
        let slots = collection.slots();

        let graph_configs: Vec<SlotConfig> = slots
            .iter()
            .map(|slot| SlotConfig {
                kind: slot.kind(),
                mode: slot.mode(),
                subcarrier: slot.subcarriers().map(SubcarrierWire::from_selection),
            })
            .collect();

        let has = |kind: SlotKind, mode: Option<SlotMode>| {
            slots
                .iter()
                .any(|slot| slot.kind() == kind && (mode.is_none() || slot.mode() == mode))
        };

        let explicit: BTreeSet<u8> = slots
            .iter()
            .filter(|slot| slot.kind() == SlotKind::TimeSeries)
            .filter_map(|slot| match slot.subcarriers() {
                Some(SubcarrierSelection::Indices(set)) => Some(set.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect();

        SessionPayload {
            total_graphs: slots.len(),
            graph_configs,
            show_camera: has(SlotKind::Camera, None),
            show_heatmap: has(SlotKind::Heatmap, None),
            show_mag_heatmap: has(SlotKind::Heatmap, Some(SlotMode::Magnitude)),
            show_phase_heatmap: has(SlotKind::Heatmap, Some(SlotMode::Phase)),
            show_time_series: slots.iter().any(|slot| {
                slot.kind() == SlotKind::TimeSeries
                    && slot.subcarriers().is_some_and(|s| !s.is_empty())
            }),
            show_mag_time_series: has(SlotKind::TimeSeries, Some(SlotMode::Magnitude)),
            show_phase_time_series: has(SlotKind::TimeSeries, Some(SlotMode::Phase)),
            subcarriers: explicit.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::SlotChoice;
    use serde_json::json;

    fn sample_collection() -> SlotCollection {
        let mut collection = SlotCollection::new();
        collection.add_slot(SlotChoice::new(SlotKind::Heatmap, Some(SlotMode::Magnitude)));
        let ts = collection
            .add_slot(SlotChoice::new(SlotKind::TimeSeries, Some(SlotMode::Phase)))
            .unwrap();
        collection.set_subcarriers(ts, SubcarrierSelection::from_indices([5, 1, 3]));
        collection
    }

    #[test]
    fn projection_flags_follow_the_slot_list() {
        let payload = SessionPayload::project(&sample_collection());
        assert_eq!(payload.total_graphs, 2);
        assert!(payload.show_heatmap);
        assert!(payload.show_mag_heatmap);
        assert!(!payload.show_phase_heatmap);
        assert!(!payload.show_camera);
        assert!(payload.show_time_series);
        assert!(payload.show_phase_time_series);
        assert!(!payload.show_mag_time_series);
        assert_eq!(payload.subcarriers, vec![1, 3, 5]);
    }

    #[test]
    fn all_selections_stay_out_of_the_legacy_list() {
        let mut collection = SlotCollection::new();
        collection.add_slot(SlotChoice::new(
            SlotKind::TimeSeries,
            Some(SlotMode::Magnitude),
        ));
        let payload = SessionPayload::project(&collection);
        assert!(payload.show_time_series);
        assert!(payload.subcarriers.is_empty());
        assert!(payload.graph_configs[0]
            .subcarrier
            .as_ref()
            .unwrap()
            .is_all());
    }

    #[test]
    fn wire_shape_matches_the_backend_contract() {
        let payload = SessionPayload::project(&sample_collection());
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "totalGraphs": 2,
                "graphConfigs": [
                    {"type": "heatmap", "mode": "magnitude", "subcarrier": null},
                    {"type": "timeseries", "mode": "phase", "subcarrier": [1, 3, 5]},
                ],
                "showCamera": false,
                "showHeatmap": true,
                "showMagHeatmap": true,
                "showPhaseHeatmap": false,
                "showTimeSeries": true,
                "showMagTimeSeries": false,
                "showPhaseTimeSeries": true,
                "subcarriers": [1, 3, 5],
            })
        );
    }

    #[test]
    fn projection_is_deterministic() {
        let collection = sample_collection();
        assert_eq!(
            SessionPayload::project(&collection),
            SessionPayload::project(&collection)
        );
    }
}
