//! HTTP client for the solve endpoint.

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use futures::channel::oneshot;

use super::wire::{parse_response, SolveRequest, SolveResponse};
use crate::config::AppConfig;
use crate::error::SolveError;

pub type SolveOutcome = Result<SolveResponse, SolveError>;

#[derive(Debug, Clone)]
pub struct SolveClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SolveClient {
    pub fn new(config: &AppConfig) -> Result<Self, SolveError> {
        let http = build_http(config).map_err(|e| SolveError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: config.solve_endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn solve(&self, request: &SolveRequest) -> SolveOutcome {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| SolveError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| SolveError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(SolveError::Status { status, body: text });
        }

        parse_response(&text)
    }

    /// Run the request off the UI loop and hand back a receiver for its outcome.
    pub fn dispatch(&self, request: SolveRequest) -> oneshot::Receiver<SolveOutcome> {
        let (sender, receiver) = oneshot::channel();
        let client = self.clone();
        log::info!("posting canvas to {}", client.endpoint);

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime.block_on(client.solve(&request)),
                Err(e) => Err(SolveError::Request(e.to_string())),
            };
            let _ = sender.send(outcome);
        });

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move {
            let _ = sender.send(client.solve(&request).await);
        });

        receiver
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http(config: &AppConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
}

/// The browser's `fetch` owns timeouts on the web.
#[cfg(target_arch = "wasm32")]
fn build_http(_config: &AppConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().build()
}
