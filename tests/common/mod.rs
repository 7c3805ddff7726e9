//! Shared utilities for integration testing against a mock Steem node.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use steem_capacity::config::NodeConfig;

/// A running mock node.
pub struct MockNode {
    pub url: String,
    /// Every JSON-RPC request body received, in arrival order.
    pub requests: Arc<Mutex<Vec<Value>>>,
}

impl MockNode {
    /// Requests received for `method`.
    pub fn calls_to(&self, method: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r["method"] == method)
            .count()
    }

    /// Client configuration pointing at this node with short retry pauses.
    pub fn config(&self, max_retries: u32) -> NodeConfig {
        let mut config = NodeConfig::default();
        config.rpc.url = self.url.clone();
        config.rpc.timeout_secs = 5;
        config.retries.max_retries = max_retries;
        config.retries.delay_ms = 5;
        config.retries.max_delay_ms = 5;
        config.blocks.batch_pause_ms = 1;
        config
    }
}

/// Start a programmable JSON-RPC node.
///
/// `handler` receives the parsed request and returns an HTTP status and body.
pub async fn start_mock_node<F>(handler: F) -> MockNode
where
    F: Fn(&Value) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let handler = Arc::new(handler);

    let log = requests.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let handler = handler.clone();
                    let log = log.clone();
                    tokio::spawn(async move {
                        serve_one(socket, handler, log).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockNode {
        url: format!("http://{}", addr),
        requests,
    }
}

async fn serve_one<F>(mut socket: TcpStream, handler: Arc<F>, log: Arc<Mutex<Vec<Value>>>)
where
    F: Fn(&Value) -> (u16, String) + Send + Sync + 'static,
{
    let Some(body) = read_body(&mut socket).await else {
        return;
    };
    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    log.lock().unwrap().push(request.clone());

    let (status, body) = handler(&request);
    let status_text = match status {
        200 => "200 OK",
        404 => "404 Not Found",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    };

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
    tokio::time::sleep(Duration::from_millis(10)).await;
}

async fn read_body(socket: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(buf[header_end..].to_vec())
}

/// JSON-RPC success body echoing the request id.
pub fn ok(request: &Value, result: Value) -> (u16, String) {
    let body = serde_json::json!({ "jsonrpc": "2.0", "result": result, "id": request["id"] });
    (200, body.to_string())
}

/// Account fixture with long-recharged voting power.
pub fn account_json(name: &str, rewards: [&str; 3]) -> Value {
    serde_json::json!({
        "name": name,
        "voting_power": 5000,
        "last_vote_time": "2000-01-01T00:00:00",
        "vesting_shares": "2000.000000 VESTS",
        "received_vesting_shares": "4000.000000 VESTS",
        "delegated_vesting_shares": "1200.000000 VESTS",
        "reward_steem_balance": rewards[0],
        "reward_sbd_balance": rewards[1],
        "reward_vesting_balance": rewards[2],
        "balance": "10.000 STEEM",
        "sbd_balance": "2.500 SBD"
    })
}

/// Resource credit lookup fixture, fully recharged.
pub fn rc_json(name: &str) -> Value {
    serde_json::json!({
        "rc_accounts": [{
            "account": name,
            "rc_manabar": { "current_mana": "5", "last_update_time": 0 },
            "max_rc": "1000000"
        }]
    })
}

/// Global properties fixture: 1 STEEM per 2000 VESTS.
pub fn globals_json() -> Value {
    serde_json::json!({
        "head_block_number": 102,
        "last_irreversible_block_num": 90,
        "total_vesting_shares": "1000000.000000 VESTS",
        "total_vesting_fund_steem": "500.000 STEEM",
        "time": "2022-03-05T00:00:00"
    })
}

/// Block fixture with one transaction per `(transaction_num, op_type)`.
pub fn block_json(num: u64, txs: &[(u32, &str)]) -> Value {
    let transactions: Vec<Value> = txs
        .iter()
        .map(|(tx_num, op)| {
            serde_json::json!({
                "ref_block_num": 1,
                "operations": [[op, { "block": num }]],
                "transaction_id": format!("{:040x}", num * 100 + *tx_num as u64),
                "block_num": num,
                "transaction_num": tx_num
            })
        })
        .collect();

    serde_json::json!({
        "previous": "00",
        "timestamp": "2022-03-05T00:00:00",
        "witness": "w",
        "block_id": format!("{:08x}", num),
        "transactions": transactions
    })
}
