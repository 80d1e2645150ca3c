// crates/ignite-content/tests/common/mod.rs
// ============================================================================
// Module: Content Source Test Helpers
// Description: Scripted Payload server and SQLite fixtures.
// ============================================================================
//! ## Overview
//! Helpers shared by the document source tests.

#![allow(dead_code, reason = "Each test binary uses a subset of the helpers.")]

use std::path::Path;
use std::thread;
use std::thread::JoinHandle;

use ignite_core::CollectionName;
use rusqlite::Connection;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Payload Server
// ============================================================================

/// Request observed by the test server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub url: String,
    pub authorization: Option<String>,
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
pub fn serve(responses: Vec<(u16, String)>) -> ScriptedServer {
    let server = Server::http("127.0.0.1:0").expect("http server");
    let base_url = format!("http://{}", server.server_addr());
    let handle = thread::spawn(move || {
        let mut captured = Vec::new();
        for (status, body) in responses {
            let Ok(mut request) = server.recv() else {
                break;
            };
            let authorization = request
                .headers()
                .iter()
                .find(|header| header.field.equiv("Authorization"))
                .map(|header| header.value.as_str().to_string());
            let mut ignored = String::new();
            let _ = request.as_reader().read_to_string(&mut ignored);
            captured.push(CapturedRequest {
                url: request.url().to_string(),
                authorization,
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

/// Builds a Payload collection envelope around `docs`.
pub fn envelope(docs: &serde_json::Value, total_docs: u64, has_next_page: bool) -> String {
    serde_json::json!({
        "docs": docs,
        "totalDocs": total_docs,
        "limit": 0,
        "page": 1,
        "totalPages": 1,
        "hasNextPage": has_next_page,
        "hasPrevPage": false,
    })
    .to_string()
}

// ============================================================================
// SECTION: SQLite Fixtures
// ============================================================================

/// Creates a content database with `pages` and `media` tables.
pub fn seed_database(path: &Path) {
    let connection = Connection::open(path).expect("open sqlite");
    connection
        .execute_batch(
            "CREATE TABLE pages (id INTEGER PRIMARY KEY, title TEXT, slug TEXT, \
             published INTEGER, rating REAL);
             INSERT INTO pages VALUES (1, 'Home', 'home', 1, 4.5);
             INSERT INTO pages VALUES (2, 'About', '', 0, NULL);
             CREATE TABLE media (id TEXT PRIMARY KEY, alt TEXT, url TEXT);
             INSERT INTO media VALUES ('m1', 'Logo', 'https://cdn.example.org/logo.png');",
        )
        .expect("seed sqlite");
}

/// Parses a collection name.
pub fn collection(name: &str) -> CollectionName {
    CollectionName::parse(name).expect("collection name")
}
