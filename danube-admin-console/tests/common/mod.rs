#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use danube_admin_console::core::{GatewayClient, GatewayClientConfig};
use danube_admin_console::read_model::{QueryCache, ReadModels};

/// In-process admin gateway answering the `/ui/v1` routes with canned data.
#[derive(Default)]
pub struct StubState {
    pub topics_gets: AtomicUsize,
    pub cluster_gets: AtomicUsize,
    pub series_gets: AtomicUsize,
    pub topic_actions: Mutex<Vec<Value>>,
    pub cluster_actions: Mutex<Vec<Value>>,
    /// Topic names created through the stub, listed under broker "b1".
    pub created: Mutex<Vec<String>>,
    /// Broker ids whose detail pages answer 502.
    pub failing_brokers: Mutex<Vec<String>>,
    /// When set, actions answer with this status and body instead of success.
    pub action_reply: Mutex<Option<(StatusCode, Value)>>,
    /// Series requests with this `from` are held back before answering.
    pub slow_series_from: Mutex<Option<(i64, Duration)>>,
}

pub struct StubGateway {
    pub url: String,
    pub state: Arc<StubState>,
}

impl StubGateway {
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = Router::new()
            .route("/ui/v1/health", get(health))
            .route("/ui/v1/cluster", get(cluster))
            .route("/ui/v1/cluster/actions", post(cluster_actions))
            .route("/ui/v1/topics", get(topics))
            .route("/ui/v1/namespaces", get(namespaces))
            .route("/ui/v1/brokers/{broker_id}", get(broker))
            .route("/ui/v1/topics/{topic}", get(topic))
            .route("/ui/v1/topics/{topic}/series", get(series))
            .route("/ui/v1/topics/actions", post(topic_actions))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub gateway");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve stub gateway");
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    pub fn client(&self) -> GatewayClient {
        GatewayClient::new(GatewayClientConfig::new(self.url.clone())).expect("client")
    }

    pub fn read_models(&self) -> ReadModels {
        ReadModels::new(self.client(), QueryCache::new())
    }

    pub fn topics_gets(&self) -> usize {
        self.state.topics_gets.load(Ordering::SeqCst)
    }

    pub fn topic_actions(&self) -> Vec<Value> {
        self.state.topic_actions.lock().unwrap().clone()
    }

    pub fn cluster_actions(&self) -> Vec<Value> {
        self.state.cluster_actions.lock().unwrap().clone()
    }
}

fn identity(id: &str, role: &str) -> Value {
    json!({
        "broker_id": id,
        "broker_addr": format!("http://{}:6650", id),
        "broker_role": role,
        "broker_status": "active",
    })
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "leader_reachable": true }))
}

async fn cluster(State(state): State<Arc<StubState>>) -> impl IntoResponse {
    state.cluster_gets.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "timestamp": "2025-01-01T00:00:00Z",
        "brokers": [
            {
                "broker_id": "b1",
                "broker_addr": "http://b1:6650",
                "broker_role": "Cluster_Leader",
                "broker_status": "active",
                "stats": { "topics_owned": 2, "rpc_total": 10, "rpc_rate_1m": 0.5, "active_connections": 3, "errors_5xx_total": 0 }
            },
            {
                "broker_id": "b2",
                "broker_addr": "http://b2:6650",
                "broker_role": "Cluster_Follower",
                "broker_status": "drained",
                "stats": { "topics_owned": 1 }
            }
        ],
        "totals": { "broker_count": 3, "topics_total": 3, "rpc_total": 10, "active_connections": 3 },
        "errors": ["metrics unavailable for broker b3"]
    }))
}

async fn topics(State(state): State<Arc<StubState>>) -> impl IntoResponse {
    state.topics_gets.fetch_add(1, Ordering::SeqCst);
    let mut b1: Vec<Value> = vec![json!({
        "name": "/default/orders",
        "delivery": "Reliable",
        "producers_connected": 1,
        "consumers_connected": 2,
        "subscriptions": 1
    })];
    for name in state.created.lock().unwrap().iter() {
        b1.push(json!({ "name": name }));
    }
    Json(json!({
        "timestamp": "2025-01-01T00:00:00Z",
        "brokers": [
            { "broker": identity("b1", "Cluster_Leader"), "topics": b1 },
            { "broker": identity("b2", "Cluster_Follower"), "topics": [ { "name": "/default/orders" } ] }
        ],
        "errors": []
    }))
}

async fn namespaces() -> impl IntoResponse {
    Json(json!({
        "timestamp": "2025-01-01T00:00:00Z",
        "namespaces": [
            {
                "name": "default",
                "topics": ["/default/orders", "/default/events-part-0", "/default/events-part-1"],
                "policies": "{\"max_producers_per_topic\":0}"
            }
        ],
        "errors": []
    }))
}

async fn broker(
    Path(broker_id): Path<String>,
    State(state): State<Arc<StubState>>,
) -> axum::response::Response {
    if state.failing_brokers.lock().unwrap().contains(&broker_id) {
        return (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": format!("broker {} unreachable", broker_id), "code": 502 })),
        )
            .into_response();
    }
    Json(json!({
        "timestamp": "2025-01-01T00:00:00Z",
        "broker": identity(&broker_id, "Cluster_Follower"),
        "metrics": { "rpc_total": 4, "topics_owned": 1 },
        "topics": [ { "name": "/default/orders", "delivery": "NonReliable" } ],
        "errors": []
    }))
    .into_response()
}

async fn topic(Path(topic): Path<String>) -> impl IntoResponse {
    Json(json!({
        "timestamp": "2025-01-01T00:00:00Z",
        "topic": {
            "name": topic,
            "type_schema": 1,
            "schema_data": "eyJ0eXBlIjoic3RyaW5nIn0=",
            "subscriptions": ["sub-a"]
        },
        "metrics": {},
        "errors": []
    }))
}

#[derive(Deserialize)]
struct SeriesParams {
    from: i64,
    to: i64,
    step: String,
}

async fn series(
    Path(topic): Path<String>,
    Query(p): Query<SeriesParams>,
    State(state): State<Arc<StubState>>,
) -> impl IntoResponse {
    state.series_gets.fetch_add(1, Ordering::SeqCst);
    let slow = *state.slow_series_from.lock().unwrap();
    if let Some((from, delay)) = slow {
        if from == p.from {
            tokio::time::sleep(delay).await;
        }
    }
    Json(json!({
        "series": [
            { "name": "publish_rate_1m", "labels": { "topic": topic, "step": p.step }, "points": [[p.from, 1.0], [p.to, 2.0]] },
            { "name": "dispatch_rate_1m", "labels": null, "points": [[p.to, 3.0]] }
        ],
        "errors": []
    }))
}

async fn topic_actions(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> axum::response::Response {
    state.topic_actions.lock().unwrap().push(body.clone());
    if let Some((status, reply)) = state.action_reply.lock().unwrap().clone() {
        return (status, Json(reply)).into_response();
    }
    let message = match body["action"].as_str() {
        Some("create") => {
            let name = body["topic"].as_str().unwrap_or_default().to_string();
            state.created.lock().unwrap().push(name);
            String::new()
        }
        Some(other) => format!("{} done", other),
        None => String::new(),
    };
    Json(json!({ "success": true, "message": message })).into_response()
}

async fn cluster_actions(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> axum::response::Response {
    state.cluster_actions.lock().unwrap().push(body);
    if let Some((status, reply)) = state.action_reply.lock().unwrap().clone() {
        return (status, Json(reply)).into_response();
    }
    Json(json!({ "success": true, "message": "" })).into_response()
}
