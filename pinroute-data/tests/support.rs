//! Loopback HTTP server answering one request with a canned response.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// How the fake routing service behaves.
#[derive(Debug, Clone)]
pub enum ServerPlan {
    /// Answer with `status` and `body` after `delay`.
    Respond {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
        /// Pause before answering.
        delay: Duration,
    },
    /// Nothing listens on the port.
    Closed,
}

/// Start the fake service and return its base URL.
///
/// Must be called from within a Tokio runtime with IO and time enabled; the
/// server task ends with the runtime.
pub async fn start(plan: ServerPlan) -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    match plan {
        ServerPlan::Closed => drop(listener),
        ServerPlan::Respond {
            status,
            body,
            delay,
        } => {
            tokio::spawn(async move {
                if let Ok((mut stream, _)) = listener.accept().await {
                    read_request_head(&mut stream).await;
                    tokio::time::sleep(delay).await;
                    let response = format!(
                        "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                }
            });
        }
    }
    Ok(base_url)
}

async fn read_request_head(stream: &mut tokio::net::TcpStream) {
    let mut head: Vec<u8> = Vec::new();
    let mut chunk = [0_u8; 512];
    while !head.windows(4).any(|window| window == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(read) => head.extend(chunk.iter().take(read)),
        }
    }
}
