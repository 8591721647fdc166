//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed table of `path -> (status, body)` and counts GET requests
//! per path so tests can assert that images are fetched only once.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Clone, Default)]
pub struct Routes {
    routes: HashMap<String, (u16, Vec<u8>)>,
}

impl Routes {
    pub fn with(mut self, path: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(path.to_string(), (status, body.into()));
        self
    }
}

pub struct StaticServer {
    base_url: String,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl StaticServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }
}

/// Starts the server in a background thread. It runs until the process exits.
pub fn start(routes: Routes) -> StaticServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let hits = Arc::new(Mutex::new(HashMap::new()));
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let hits = Arc::clone(&hits_srv);
            thread::spawn(move || handle(stream, &routes, &hits));
        }
    });
    StaticServer {
        base_url: format!("http://127.0.0.1:{}", port),
        hits,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &Routes,
    hits: &Mutex<HashMap<String, usize>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/");
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(
            b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    }
    *hits.lock().unwrap().entry(path.to_string()).or_insert(0) += 1;

    let (status, body) = routes
        .routes
        .get(path)
        .map(|(s, b)| (*s, b.as_slice()))
        .unwrap_or((404, b"not found".as_slice()));
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}
