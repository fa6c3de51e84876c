//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed set of paths. HEAD answers 200 with Content-Length for known
//! paths; GET returns the body; unknown paths get 404. GET hits are counted so
//! tests can assert when the network was (not) used.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Clone)]
pub struct FileServer {
    base: String,
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    gets: Arc<AtomicUsize>,
    heads: Arc<AtomicUsize>,
}

impl FileServer {
    /// Starts a server in a background thread. It runs until the process exits.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let server = FileServer {
            base: format!("http://127.0.0.1:{}", port),
            files: Arc::new(Mutex::new(HashMap::new())),
            gets: Arc::new(AtomicUsize::new(0)),
            heads: Arc::new(AtomicUsize::new(0)),
        };
        let shared = server.clone();
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let s = shared.clone();
                thread::spawn(move || s.handle(stream));
            }
        });
        server
    }

    /// Serve `body` at `path` (must start with `/`). Returns the full URL.
    pub fn serve(&self, path: &str, body: Vec<u8>) -> String {
        self.files.lock().unwrap().insert(path.to_string(), body);
        self.url(path)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn head_count(&self) -> usize {
        self.heads.load(Ordering::SeqCst)
    }

    fn handle(&self, mut stream: std::net::TcpStream) {
        let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
        let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
        let mut buf = [0u8; 8192];
        let n = match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        let request = match std::str::from_utf8(&buf[..n]) {
            Ok(s) => s,
            Err(_) => return,
        };
        let mut parts = request.lines().next().unwrap_or("").split_whitespace();
        let method = parts.next().unwrap_or("");
        let path = parts.next().unwrap_or("/");
        let path = path.split('?').next().unwrap_or(path);

        let body = self.files.lock().unwrap().get(path).cloned();
        let is_head = method.eq_ignore_ascii_case("HEAD");
        if is_head {
            self.heads.fetch_add(1, Ordering::SeqCst);
        } else if method.eq_ignore_ascii_case("GET") {
            self.gets.fetch_add(1, Ordering::SeqCst);
        } else {
            let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
            return;
        }

        match body {
            Some(body) => {
                let header = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = stream.write_all(header.as_bytes());
                if !is_head {
                    let _ = stream.write_all(&body);
                }
            }
            None => {
                let msg = b"not found";
                let header = format!(
                    "HTTP/1.1 404 Not Found\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    msg.len()
                );
                let _ = stream.write_all(header.as_bytes());
                if !is_head {
                    let _ = stream.write_all(msg);
                }
            }
        }
    }
}
