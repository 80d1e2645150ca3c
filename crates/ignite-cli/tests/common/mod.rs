// crates/ignite-cli/tests/common/mod.rs
// ============================================================================
// Module: CLI Test Harness
// Description: Binary runner, scripted Dokploy server, and content fixtures.
// ============================================================================
//! ## Overview
//! Runs the `ignite` binary with a cleared environment so host variables
//! never leak into assertions.

#![allow(dead_code, reason = "Each test binary uses a subset of the helpers.")]

use std::path::Path;
use std::process::Command;
use std::process::Output;
use std::thread;
use std::thread::JoinHandle;

use rusqlite::Connection;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Binary
// ============================================================================

/// Secret value used for every required secret.
pub const SECRET_VALUE: &str = "s3cret-value";

/// Result of one binary invocation.
pub struct Run {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for Run {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Runs `ignite` in `dir` with only `env` set.
pub fn ignite(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> Run {
    Command::new(env!("CARGO_BIN_EXE_ignite"))
        .args(args)
        .env_clear()
        .envs(env.iter().copied())
        .current_dir(dir)
        .output()
        .expect("run ignite")
        .into()
}

/// Returns every required provisioning secret.
pub fn secrets() -> Vec<(&'static str, &'static str)> {
    ignite_config::REQUIRED_SECRETS.iter().map(|key| (*key, SECRET_VALUE)).collect()
}

/// Config with every provisioning field set and no settle waits.
pub const PROVISION_CONFIG: &str = r#"
[project]
name = "WLF Staging"
description = "Payload CMS v3 - Staging Environment"

[repository]
repository = "dokploy-payload-zen"

[database]
service_name = "wlf-mongo"
user = "root"
database = "wlf-cms"

[application]
name = "wlf-cms"
domain = "staging.wlf.com.mx"

[storage]
bucket = "wolf-media"
account_id = "acct-1"
public_endpoint = "https://media.wlf.com.mx"

[settle]
initial_delay_secs = 0
poll_interval_secs = 0
max_polls = 1
"#;

/// Writes `ignite.toml` into `dir`.
pub fn write_config(dir: &Path, content: &str) {
    std::fs::write(dir.join("ignite.toml"), content).expect("write config");
}

// ============================================================================
// SECTION: Dokploy Server
// ============================================================================

/// Running scripted server.
pub struct ScriptedServer {
    pub base_url: String,
    handle: JoinHandle<Vec<String>>,
}

impl ScriptedServer {
    /// Waits for every scripted response to be served and returns request paths.
    pub fn finish(self) -> Vec<String> {
        self.handle.join().expect("server thread")
    }
}

/// Starts a server that answers with `responses` in order.
pub fn serve(responses: Vec<(u16, &'static str)>) -> ScriptedServer {
    let server = Server::http("127.0.0.1:0").expect("http server");
    let base_url = format!("http://{}", server.server_addr());
    let handle = thread::spawn(move || {
        let mut paths = Vec::new();
        for (status, body) in responses {
            let Ok(mut request) = server.recv() else {
                break;
            };
            let mut ignored = String::new();
            let _ = request.as_reader().read_to_string(&mut ignored);
            paths.push(request.url().to_string());
            let response = Response::from_string(body)
                .with_status_code(status)
                .with_header(Header::from_bytes("Content-Type", "application/json").unwrap());
            let _ = request.respond(response);
        }
        paths
    });
    ScriptedServer {
        base_url,
        handle,
    }
}

// ============================================================================
// SECTION: Content Store
// ============================================================================

/// Seeds the built-in collections; `page_slug` is the slug of page `p2`.
pub fn seed_content(path: &Path, page_slug: &str) {
    let connection = Connection::open(path).expect("open database");
    connection
        .execute_batch(
            "CREATE TABLE media (id TEXT, alt TEXT, url TEXT);
             INSERT INTO media VALUES ('m1', 'Logo', 'https://media.wlf.com.mx/logo.png');
             CREATE TABLE pages (id TEXT, title TEXT, slug TEXT);
             INSERT INTO pages VALUES ('p1', 'Home', 'home');
             CREATE TABLE posts (id TEXT, title TEXT, slug TEXT);
             INSERT INTO posts VALUES ('b1', 'Hello', 'hello');",
        )
        .expect("seed tables");
    connection
        .execute("INSERT INTO pages VALUES ('p2', 'About', ?1)", [page_slug])
        .expect("seed page");
}
