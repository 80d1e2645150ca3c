// crates/ignite-dokploy/tests/common/mod.rs
// ============================================================================
// Module: Dokploy Test Server
// Description: Scripted tiny_http server capturing Dokploy API requests.
// ============================================================================
//! ## Overview
//! Serves a fixed list of responses in order and records each request.

#![allow(dead_code, reason = "Each test binary uses a subset of the helpers.")]

use std::thread;
use std::thread::JoinHandle;

use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

/// Request observed by the test server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub url: String,
    pub api_key: Option<String>,
    pub body: String,
}

impl CapturedRequest {
    /// Parses the body as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("json request body")
    }
}

/// Running scripted server.
pub struct ScriptedServer {
    pub base_url: String,
    handle: JoinHandle<Vec<CapturedRequest>>,
}

impl ScriptedServer {
    /// Waits for every scripted response to be served and returns the requests.
    pub fn finish(self) -> Vec<CapturedRequest> {
        self.handle.join().expect("server thread")
    }
}

/// Starts a server that answers with `responses` in order.
pub fn serve(responses: Vec<(u16, &'static str)>) -> ScriptedServer {
    let server = Server::http("127.0.0.1:0").expect("http server");
    let base_url = format!("http://{}", server.server_addr());
    let handle = thread::spawn(move || {
        let mut captured = Vec::new();
        for (status, body) in responses {
            let Ok(mut request) = server.recv() else {
                break;
            };
            let api_key = request
                .headers()
                .iter()
                .find(|header| header.field.equiv("x-api-key"))
                .map(|header| header.value.as_str().to_string());
            let mut text = String::new();
            let _ = request.as_reader().read_to_string(&mut text);
            captured.push(CapturedRequest {
                method: request.method().as_str().to_string(),
                url: request.url().to_string(),
                api_key,
                body: text,
            });
            let response = Response::from_string(body)
                .with_status_code(status)
                .with_header(Header::from_bytes("Content-Type", "application/json").unwrap());
            let _ = request.respond(response);
        }
        captured
    });
    ScriptedServer {
        base_url,
        handle,
    }
}
