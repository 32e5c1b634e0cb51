use crate::layout::{build_layout, LayoutPlan};
use csicore::payload::{SessionPayload, SubcarrierWire};
use csicore::slots::{SlotKind, SUBMITTABLE_COUNTS};
use log::{info, warn};
use rand::Rng;
use serde_json::json;
use std::sync::{Arc, RwLock};
use warp::{http::StatusCode, Filter};

/// Viewer shell address handed back to clients for the embedded display.
pub const VIEWER_SHELL_URL: &str =
    "https://app.rerun.io/version/0.24.0/index.html?url=rerun+http://127.0.0.1:9876/proxy";

/// The single live session hosted by the simulator.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub recording_id: String,
    pub layout: LayoutPlan,
}

/// Shared simulator state: at most one active session.
#[derive(Clone, Default)]
pub struct SimulatorState {
    inner: Arc<RwLock<Option<ActiveSession>>>,
}

impl SimulatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_active(&self) -> bool {
        self.inner.read().map(|guard| guard.is_some()).unwrap_or(false)
    }

    pub fn snapshot(&self) -> Option<ActiveSession> {
        self.inner.read().ok().and_then(|guard| guard.clone())
    }

    fn begin(&self, session: ActiveSession) {
        if let Ok(mut guard) = self.inner.write() {
            if guard.is_some() {
                // The production backend spawned a fresh viewer process on
                // every start; here the new session simply replaces the old.
                warn!("start-session replacing an active session");
            }
            *guard = Some(session);
        }
    }

    fn clear(&self) -> bool {
        match self.inner.write() {
            Ok(mut guard) => guard.take().is_some(),
            Err(_) => false,
        }
    }
}

/// Shape checks applied before a session is accepted.
fn check_payload(payload: &SessionPayload) -> Result<(), String> {
    if !SUBMITTABLE_COUNTS.contains(&payload.total_graphs) {
        return Err(format!(
            "totalGraphs {} is not supported; expected 1, 2, 4, or 6",
            payload.total_graphs
        ));
    }
    if payload.graph_configs.len() != payload.total_graphs {
        return Err(format!(
            "graphConfigs length {} does not match totalGraphs {}",
            payload.graph_configs.len(),
            payload.total_graphs
        ));
    }
    for (position, config) in payload.graph_configs.iter().enumerate() {
        match config.kind {
            SlotKind::TimeSeries => match &config.subcarrier {
                Some(wire) if wire.is_all() => {}
                Some(SubcarrierWire::List(list)) if !list.is_empty() => {}
                _ => {
                    return Err(format!(
                        "graph {}: timeseries requires a subcarrier selection",
                        position + 1
                    ));
                }
            },
            _ => {
                if config.subcarrier.is_some() {
                    return Err(format!(
                        "graph {}: subcarrier only applies to timeseries graphs",
                        position + 1
                    ));
                }
            }
        }
    }
    Ok(())
}

fn fresh_recording_id() -> String {
    format!("{:08x}", rand::thread_rng().gen::<u32>())
}

/// The control-plane routes: start, stop, health.
pub fn routes(
    state: SimulatorState,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let state_filter = warp::any().map(move || state.clone());

    let start_route = warp::path!("api" / "start-session")
        .and(warp::post())
        .and(warp::body::json())
        .and(state_filter.clone())
        .map(|payload: SessionPayload, state: SimulatorState| {
            match check_payload(&payload) {
                Ok(()) => {
                    let layout = build_layout(&payload);
                    let recording_id = fresh_recording_id();
                    info!(
                        "[start-session] {} view(s) across {} column(s), recording {}",
                        layout.view_count(),
                        layout.columns.len(),
                        recording_id
                    );
                    let reply = json!({
                        "status": "started",
                        "recordingUrl": format!("/api/recordings/recording_{}.rrd", recording_id),
                        "iframeUrl": VIEWER_SHELL_URL,
                    });
                    state.begin(ActiveSession {
                        recording_id,
                        layout,
                    });
                    warp::reply::with_status(warp::reply::json(&reply), StatusCode::OK)
                }
                Err(message) => {
                    warn!("[start-session] rejected: {}", message);
                    warp::reply::with_status(
                        warp::reply::json(&json!({"status": "error", "message": message})),
                        StatusCode::BAD_REQUEST,
                    )
                }
            }
        });

    let stop_route = warp::path!("api" / "stop-session")
        .and(warp::post())
        .and(state_filter.clone())
        .map(|state: SimulatorState| {
            let was_active = state.clear();
            info!("[stop-session] session active: {}", was_active);
            let message = if was_active {
                "Session stopped"
            } else {
                "No active session"
            };
            warp::reply::with_status(
                warp::reply::json(&json!({"status": "stopped", "message": message})),
                StatusCode::OK,
            )
        });

    let health_route = warp::path!("health")
        .and(warp::get())
        .and(state_filter)
        .map(|state: SimulatorState| {
            warp::reply::json(&json!({
                "status": "healthy",
                "sessionActive": state.session_active(),
            }))
        });

    start_route.or(stop_route).or(health_route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csicore::slots::{SlotChoice, SlotCollection, SlotMode, SubcarrierSelection};

    fn valid_payload() -> SessionPayload {
        let mut collection = SlotCollection::new();
        collection.add_slot(SlotChoice::new(SlotKind::Heatmap, Some(SlotMode::Magnitude)));
        let ts = collection
            .add_slot(SlotChoice::new(
                SlotKind::TimeSeries,
                Some(SlotMode::Magnitude),
            ))
            .unwrap();
        collection.set_subcarriers(ts, SubcarrierSelection::from_indices([0, 1, 2]));
        SessionPayload::project(&collection)
    }

    #[test]
    fn check_accepts_a_projected_payload() {
        assert!(check_payload(&valid_payload()).is_ok());
    }

    #[test]
    fn check_rejects_unsupported_counts() {
        let mut payload = valid_payload();
        payload.total_graphs = 3;
        payload.graph_configs.pop();
        let err = check_payload(&payload).unwrap_err();
        assert!(err.contains("totalGraphs 3"));
    }

    #[test]
    fn check_rejects_mismatched_config_list() {
        let mut payload = valid_payload();
        payload.graph_configs.pop();
        assert!(check_payload(&payload).is_err());
    }

    #[test]
    fn check_rejects_empty_timeseries_selection() {
        let mut payload = valid_payload();
        payload.graph_configs[1].subcarrier = Some(SubcarrierWire::List(Vec::new()));
        let err = check_payload(&payload).unwrap_err();
        assert!(err.contains("graph 2"));
    }

    #[tokio::test]
    async fn start_route_stores_a_session() {
        let state = SimulatorState::new();
        let api = routes(state.clone());

        let response = warp::test::request()
            .method("POST")
            .path("/api/start-session")
            .json(&valid_payload())
            .reply(&api)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.session_active());
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["status"], "started");
        assert_eq!(body["iframeUrl"], VIEWER_SHELL_URL);
        assert_eq!(state.snapshot().unwrap().layout.view_count(), 4);
    }

    #[tokio::test]
    async fn invalid_start_is_rejected_with_a_message() {
        let state = SimulatorState::new();
        let api = routes(state.clone());

        let mut payload = valid_payload();
        payload.total_graphs = 5;
        let response = warp::test::request()
            .method("POST")
            .path("/api/start-session")
            .json(&payload)
            .reply(&api)
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(!state.session_active());
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().contains("totalGraphs"));
    }

    #[tokio::test]
    async fn stop_route_clears_the_session_and_always_succeeds() {
        let state = SimulatorState::new();
        let api = routes(state.clone());

        let response = warp::test::request()
            .method("POST")
            .path("/api/stop-session")
            .reply(&api)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["message"], "No active session");

        warp::test::request()
            .method("POST")
            .path("/api/start-session")
            .json(&valid_payload())
            .reply(&api)
            .await;
        assert!(state.session_active());

        let response = warp::test::request()
            .method("POST")
            .path("/api/stop-session")
            .reply(&api)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!state.session_active());
    }

    #[tokio::test]
    async fn health_reports_session_activity() {
        let state = SimulatorState::new();
        let api = routes(state.clone());

        let response = warp::test::request().path("/health").reply(&api).await;
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["sessionActive"], false);
    }
}
