use csicore::payload::{SessionPayload, SubcarrierWire};
use csicore::prelude::subcarrier_universe;
use csicore::slots::{SlotKind, SlotMode};
use serde::Serialize;

/// One view inside a layout column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutView {
    pub name: String,
    pub origin: String,
}

/// Vertical stack of views sharing one column of the viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutColumn {
    pub label: String,
    pub views: Vec<LayoutView>,
}

/// Horizontal arrangement handed to the embedded viewer as its blueprint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutPlan {
    pub columns: Vec<LayoutColumn>,
}

impl LayoutPlan {
    pub fn view_count(&self) -> usize {
        self.columns.iter().map(|column| column.views.len()).sum()
    }
}

/// Build the viewer layout for the requested configuration. The payload's
/// projection flags short-circuit unused stream branches; the per-slot
/// configs (not the legacy flat index list) drive the time-series views.
pub fn build_layout(payload: &SessionPayload) -> LayoutPlan {
    let mut columns = Vec::new();

    if payload.show_camera {
        columns.push(LayoutColumn {
            label: "camera".into(),
            views: vec![LayoutView {
                name: "Camera Feed".into(),
                origin: "camera/live_feed".into(),
            }],
        });
    }

    if payload.show_heatmap {
        let mut views = Vec::new();
        if payload.show_mag_heatmap {
            views.push(LayoutView {
                name: "Magnitude Heatmap".into(),
                origin: "csi/magnitude_heatmap".into(),
            });
        }
        if payload.show_phase_heatmap {
            views.push(LayoutView {
                name: "Phase Heatmap".into(),
                origin: "csi/phase_heatmap".into(),
            });
        }
        columns.push(LayoutColumn {
            label: "heatmap".into(),
            views,
        });
    }

    if payload.show_time_series {
        let mut views = Vec::new();
        for config in &payload.graph_configs {
            if config.kind != SlotKind::TimeSeries {
                continue;
            }
            let indices: Vec<u8> = match &config.subcarrier {
                Some(wire) if wire.is_all() => subcarrier_universe().collect(),
                Some(SubcarrierWire::List(list)) => list.clone(),
                _ => continue,
            };
            for subcarrier in indices {
                match config.mode {
                    Some(SlotMode::Magnitude) => views.push(LayoutView {
                        name: format!("Magnitude SC {}", subcarrier),
                        origin: format!("magnitude_vs_time/subcarrier_{:03}", subcarrier),
                    }),
                    Some(SlotMode::Phase) => views.push(LayoutView {
                        name: format!("Phase SC {}", subcarrier),
                        origin: format!("phase_vs_time/subcarrier_{:03}", subcarrier),
                    }),
                    None => {}
                }
            }
        }
        columns.push(LayoutColumn {
            label: "timeseries".into(),
            views,
        });
    }

    LayoutPlan { columns }
}
