#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use urlshort_lib::clipboard::{ClipboardError, ClipboardSink};
use urlshort_lib::config::Config;
use urlshort_lib::shorten::{ShortenError, Shortener};

/// Shortener returning a canned result and counting calls.
pub struct FakeShortener {
    pub response: Result<String, String>,
    pub calls: Cell<usize>,
    pub seen: RefCell<Vec<String>>,
}

impl FakeShortener {
    pub fn ok(short: &str) -> Self {
        Self {
            response: Ok(short.to_string()),
            calls: Cell::new(0),
            seen: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(text: &str) -> Self {
        Self {
            response: Err(text.to_string()),
            calls: Cell::new(0),
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl Shortener for FakeShortener {
    fn shorten(&self, long_url: &str) -> Result<String, ShortenError> {
        self.calls.set(self.calls.get() + 1);
        self.seen.borrow_mut().push(long_url.to_string());
        match &self.response {
            Ok(s) => Ok(s.clone()),
            Err(text) => Err(ShortenError::ShortenFailed(text.clone())),
        }
    }
}

/// Clipboard that records copies, or fails every time.
#[derive(Default)]
pub struct FakeClipboard {
    pub fail: bool,
    pub copied: Vec<String>,
}

impl FakeClipboard {
    pub fn broken() -> Self {
        Self {
            fail: true,
            copied: Vec::new(),
        }
    }
}

impl ClipboardSink for FakeClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Init("no display available".into()));
        }
        self.copied.push(text.to_string());
        Ok(())
    }
}

pub fn config(url: Option<&str>, history_file: &Path) -> Config {
    Config {
        url: url.map(str::to_string),
        show_history: false,
        qr: false,
        copy: true,
        history_file: history_file.to_path_buf(),
        endpoint: "http://127.0.0.1:9/unused".into(),
        timeout: Duration::from_secs(5),
    }
}

/// Serve exactly one HTTP response on a local port.
///
/// Returns the endpoint URL and a handle yielding the request line received.
pub fn one_shot_server(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).unwrap();
            if header == "\r\n" || header.is_empty() {
                break;
            }
        }
        let mut stream = stream;
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request_line.trim_end().to_string()
    });
    (format!("http://{}/create", addr), handle)
}

/// An endpoint on a port nobody is listening on.
pub fn refused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/create", addr)
}

pub fn test_client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
