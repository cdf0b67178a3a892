//! Shared utilities for relay integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

/// Read the request line and drain the header block, returning the request
/// target (path plus query) the client asked for.
async fn read_request_target(reader: &mut BufReader<TcpStream>) -> Option<String> {
    let mut request_line = String::new();
    match reader.read_line(&mut request_line).await {
        Ok(0) | Err(_) => return None,
        Ok(_) => {}
    }
    let target = request_line.split_whitespace().nth(1)?.to_string();

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line).await {
            Ok(0) => break,
            Ok(_) if line == "\r\n" => break,
            Ok(_) => {}
            Err(_) => return None,
        }
    }
    Some(target)
}

fn status_line(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        404 => "404 Not Found",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

async fn write_response(mut socket: TcpStream, status: u16, body: &str) {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line(status),
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// Start a programmable mock upstream on an ephemeral port. The closure
/// receives the request target (path + query) and decides status and body.
pub async fn start_programmable_upstream<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut reader = BufReader::new(socket);
                        let Some(target) = read_request_target(&mut reader).await else {
                            return;
                        };
                        let (status, body) = f(target).await;
                        write_response(reader.into_inner(), status, &body).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock upstream that counts requests and always answers with the
/// given status and body. Returns the address and the request counter.
pub async fn start_counting_upstream(
    status: u16,
    body: &'static str,
) -> (SocketAddr, Arc<AtomicU32>) {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let addr = start_programmable_upstream(move |_target| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (status, body.to_string())
        }
    })
    .await;
    (addr, calls)
}

/// Start a mock upstream that aborts the first `failures` connections after
/// reading the request (the relay sees a transport failure) and serves
/// 200 with `body` afterwards. Returns the address and a connection counter.
pub async fn start_flaky_upstream(
    failures: u32,
    body: &'static str,
) -> (SocketAddr, Arc<AtomicU32>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicU32::new(0));
    let counter = accepted.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    let body = body.to_string();
                    tokio::spawn(async move {
                        let mut reader = BufReader::new(socket);
                        if read_request_target(&mut reader).await.is_none() {
                            return;
                        }
                        let mut socket = reader.into_inner();
                        if n < failures {
                            // Close without a response.
                            let _ = socket.shutdown().await;
                        } else {
                            write_response(socket, 200, &body).await;
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, accepted)
}

/// An address nothing listens on, for connection-refused scenarios.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
