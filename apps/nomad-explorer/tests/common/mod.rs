//! Local stand-in for the NOMAD API, served on an ephemeral port.
//!
//! Search behaviour is keyed on the `elements` parameter:
//!
//! | elements  | response                                   |
//! |-----------|--------------------------------------------|
//! | `Li`      | one entry `E1`, archive band gap `0.0`     |
//! | `CrTe2`   | one entry `E3`, archive band gap `1.2345`  |
//! | `NoGap`   | one entry `E2`, archive answers 404        |
//! | `Down`    | 503                                        |
//! | `Garbled` | 200 with a body that is not JSON           |
//! | `NullRow` | `{"data": [null]}`                         |
//! | `EmptyRow`| `{"data": [{}]}`                           |
//! | anything  | `{"data": []}`                             |

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use nomad_explorer::client::NomadClient;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Requests the fake upstream has seen, in order.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn push(&self, call: String) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

async fn search(
    State(log): State<CallLog>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let elements = params.get("elements").cloned().unwrap_or_default();
    let per_page = params.get("per_page").cloned().unwrap_or_default();
    log.push(format!("search:{elements}:{per_page}"));

    let entry = |id: &str, formula: &str| {
        json!({
            "data": [{
                "entry_id": id,
                "formula": formula,
                "dft": {"code_name": "VASP", "xc_functional": "GGA"},
                "atoms": {"n_atoms": 1, "elements": [formula], "structure_type": "bulk"},
                "upload_time": "2021-03-04T10:00:00+00:00"
            }]
        })
    };

    match elements.as_str() {
        "Li" => Json(entry("E1", "Li")).into_response(),
        "CrTe2" => Json(entry("E3", "CrTe2")).into_response(),
        "NoGap" => Json(entry("E2", "NoGap")).into_response(),
        "Down" => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        "Garbled" => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        "NullRow" => Json(json!({"data": [null]})).into_response(),
        "EmptyRow" => Json(json!({"data": [{}]})).into_response(),
        _ => Json(json!({"data": []})).into_response(),
    }
}

async fn archive(State(log): State<CallLog>, Path(entry_id): Path<String>) -> Response {
    log.push(format!("archive:{entry_id}"));

    let with_gap = |gap: f64| {
        Json(json!({
            "results": {"properties": {"electronic": {
                "band_structure_electronic": {"band_gap": gap}
            }}}
        }))
        .into_response()
    };

    match entry_id.as_str() {
        "E1" => with_gap(0.0),
        "E3" => with_gap(1.2345),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Start the fake upstream and return its API root and call log.
pub async fn spawn_upstream() -> (String, CallLog) {
    let log = CallLog::default();
    let router = Router::new()
        .route("/api/v1/entries", get(search))
        .route("/api/v1/entries/{entry_id}/archive", get(archive))
        .with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}/api/v1"), log)
}

/// Client pointed at `base_url`.
pub fn client_for(base_url: &str) -> NomadClient {
    NomadClient::new(base_url, None, "nomad-explorer-test").unwrap()
}
