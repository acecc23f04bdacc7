//! Shared test support
//!
//! A scripted in-memory transport for dispatch tests and a minimal
//! in-process RESP server for end-to-end scenarios.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::io::{BufRead, BufReader, BufWriter, Cursor, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use rediswire::{Result, Transport};

// =============================================================================
// Scripted Mock Transport
// =============================================================================

/// An in-memory transport fed with pre-scripted reply bytes.
///
/// Records everything written and every read-timeout change, and can be
/// switched to fail all reads with a timeout error.
pub struct MockTransport {
    replies: Cursor<Vec<u8>>,
    pub written: Vec<u8>,
    pub read_timeout: Option<Duration>,
    /// Every value passed to `set_read_timeout`, in order
    pub timeout_log: Vec<Option<Duration>>,
    /// When true, every read fails with `WouldBlock` (socket timeout)
    pub fail_reads: bool,
}

impl MockTransport {
    pub fn new(replies: &[u8], initial_timeout: Option<Duration>) -> Self {
        Self {
            replies: Cursor::new(replies.to_vec()),
            written: Vec::new(),
            read_timeout: initial_timeout,
            timeout_log: Vec::new(),
            fail_reads: false,
        }
    }

    fn timeout_error() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::WouldBlock, "read timed out")
    }
}

impl Read for MockTransport {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.fail_reads {
            return Err(Self::timeout_error());
        }
        self.replies.read(buf)
    }
}

impl BufRead for MockTransport {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        if self.fail_reads {
            return Err(Self::timeout_error());
        }
        self.replies.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.replies.consume(amt)
    }
}

impl Write for MockTransport {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Transport for MockTransport {
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.timeout_log.push(timeout);
        self.read_timeout = timeout;
        Ok(())
    }

    fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }
}

// =============================================================================
// Minimal RESP Server
// =============================================================================

#[derive(Default)]
struct Store {
    strings: HashMap<Vec<u8>, Vec<u8>>,
    lists: HashMap<Vec<u8>, VecDeque<Vec<u8>>>,
}

/// A loopback RESP server supporting just enough commands for the
/// end-to-end scenarios: PING, SET, GET, DEL, INCR, RPUSH, BLPOP.
pub struct TestServer {
    pub addr: SocketAddr,
}

impl TestServer {
    /// Bind an ephemeral port and serve connections on a background thread
    pub fn spawn() -> TestServer {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
        let addr = listener.local_addr().expect("local addr");
        let store = Arc::new(Mutex::new(Store::default()));

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let store = Arc::clone(&store);
                thread::spawn(move || serve_connection(stream, store));
            }
        });

        TestServer { addr }
    }
}

fn serve_connection(stream: TcpStream, store: Arc<Mutex<Store>>) {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
    let mut writer = BufWriter::new(stream);

    while let Some(request) = read_request(&mut reader) {
        let reply = execute(&request, &store);
        if writer.write_all(&reply).is_err() || writer.flush().is_err() {
            break;
        }
    }
}

/// Read one multi-bulk request; None on clean disconnect or bad framing
fn read_request(reader: &mut impl BufRead) -> Option<Vec<Vec<u8>>> {
    let count: usize = read_prefixed_line(reader, b'*')?;

    let mut parts = Vec::with_capacity(count);
    for _ in 0..count {
        let len: usize = read_prefixed_line(reader, b'$')?;
        let mut payload = vec![0u8; len];
        reader.read_exact(&mut payload).ok()?;
        let mut crlf = [0u8; 2];
        reader.read_exact(&mut crlf).ok()?;
        parts.push(payload);
    }
    Some(parts)
}

fn read_prefixed_line(reader: &mut impl BufRead, marker: u8) -> Option<usize> {
    let mut line = String::new();
    if reader.read_line(&mut line).ok()? == 0 {
        return None;
    }
    let line = line.trim_end();
    let rest = line.strip_prefix(marker as char)?;
    rest.parse().ok()
}

fn execute(request: &[Vec<u8>], store: &Arc<Mutex<Store>>) -> Vec<u8> {
    let name = String::from_utf8_lossy(&request[0]).to_ascii_uppercase();
    let args = &request[1..];

    match name.as_str() {
        "PING" => b"+PONG\r\n".to_vec(),
        "SET" => {
            let mut store = store.lock().unwrap();
            store.strings.insert(args[0].clone(), args[1].clone());
            b"+OK\r\n".to_vec()
        }
        "GET" => {
            let store = store.lock().unwrap();
            match store.strings.get(&args[0]) {
                Some(value) => bulk(value),
                None => b"$-1\r\n".to_vec(),
            }
        }
        "DEL" => {
            let mut store = store.lock().unwrap();
            let removed = store.strings.remove(&args[0]).is_some()
                || store.lists.remove(&args[0]).is_some();
            format!(":{}\r\n", removed as i64).into_bytes()
        }
        "INCR" => {
            let mut store = store.lock().unwrap();
            let current = store.strings.entry(args[0].clone()).or_insert_with(|| b"0".to_vec());
            match std::str::from_utf8(current).ok().and_then(|s| s.parse::<i64>().ok()) {
                Some(n) => {
                    *current = (n + 1).to_string().into_bytes();
                    format!(":{}\r\n", n + 1).into_bytes()
                }
                None => b"-ERR value is not an integer or out of range\r\n".to_vec(),
            }
        }
        "RPUSH" => {
            let mut store = store.lock().unwrap();
            let list = store.lists.entry(args[0].clone()).or_default();
            for value in &args[1..] {
                list.push_back(value.clone());
            }
            format!(":{}\r\n", list.len()).into_bytes()
        }
        "BLPOP" => {
            let timeout_secs: u64 = String::from_utf8_lossy(args.last().unwrap())
                .parse()
                .unwrap_or(0);
            let key = &args[0];
            let deadline = Instant::now() + Duration::from_secs(timeout_secs);

            loop {
                {
                    let mut store = store.lock().unwrap();
                    if let Some(value) = store.lists.get_mut(key).and_then(|l| l.pop_front()) {
                        let mut reply = b"*2\r\n".to_vec();
                        reply.extend_from_slice(&bulk(key));
                        reply.extend_from_slice(&bulk(&value));
                        return reply;
                    }
                }
                if timeout_secs > 0 && Instant::now() >= deadline {
                    return b"*-1\r\n".to_vec();
                }
                thread::sleep(Duration::from_millis(10));
            }
        }
        _ => format!("-ERR unknown command '{}'\r\n", name.to_ascii_lowercase()).into_bytes(),
    }
}

fn bulk(payload: &[u8]) -> Vec<u8> {
    let mut frame = format!("${}\r\n", payload.len()).into_bytes();
    frame.extend_from_slice(payload);
    frame.extend_from_slice(b"\r\n");
    frame
}
