//! A throwaway axum server on an ephemeral port that records what it saw.

#![allow(clippy::expect_used)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::http::{HeaderMap, Method, Uri};
use tokio::net::TcpListener;

/// One request as received by the fake server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("json body")
    }
}

pub type Log = Arc<Mutex<Vec<Recorded>>>;

pub fn record(log: &Log, method: Method, uri: &Uri, headers: HeaderMap, body: Bytes) {
    log.lock().expect("lock").push(Recorded {
        method,
        path: uri.path().to_string(),
        headers,
        body,
    });
}

/// Serve `app` on 127.0.0.1 and return its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake server");
    });
    format!("http://{addr}")
}

/// Environment for `load_from_iter` pointing both upstreams at `base`.
pub fn env(base: &str, extra: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut vars: Vec<(String, String)> = [
        ("TERRAFORM_TOKEN", "tf-secret"),
        ("TERRAFORM_ORG_NAME", "acme"),
        ("TERRAFORM_WORKSPACE", "ai-deployer"),
        ("HF_TOKEN", "hf-secret"),
        ("TFDEPLOY_API_TIMEOUT_SECS", "2"),
        ("TFDEPLOY_UPLOAD_TIMEOUT_SECS", "2"),
        ("TFDEPLOY_GENERATION_TIMEOUT_SECS", "2"),
    ]
    .iter()
    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
    .collect();
    vars.push(("TFDEPLOY_TERRAFORM_API_URL".to_string(), format!("{base}/api/v2")));
    vars.push((
        "TFDEPLOY_HF_API_URL".to_string(),
        format!("{base}/v1/chat/completions"),
    ));
    for (k, v) in extra {
        vars.retain(|(name, _)| name != k);
        vars.push(((*k).to_string(), (*v).to_string()));
    }
    vars
}
