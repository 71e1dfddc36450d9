//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{TxHash, U256};
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use omni_transfer::blockchain::{BlockchainError, BlockchainResult};
use omni_transfer::bridge::{FeeError, FeeOracle, FeeQuote, OmniAddress, PreparedTransfer};
use omni_transfer::bridge::{TransferResult, TransferSubmitter};
use omni_transfer::config::{load_from_lookup, ConfigError};
use omni_transfer::{RunMode, TransferConfig, TransferError, TransferOutcome, TransferWorkflow};
use omni_transfer::{ConsoleReporter, Reporter};

/// Sender address reported by [`MockSubmitter`].
pub const SENDER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// The five required keys with the values used throughout the tests.
pub fn base_env() -> HashMap<&'static str, String> {
    HashMap::from([
        ("BASE_RPC_URL", "https://rpc.example".to_string()),
        ("PRIVATE_KEY", "0xabc".to_string()),
        ("TOKEN_ADDRESS", "0xTOKEN".to_string()),
        ("NEAR_ACCOUNT_ID", "alice.near".to_string()),
        ("AMOUNT", "1000000".to_string()),
    ])
}

pub fn load(env: &HashMap<&'static str, String>) -> Result<TransferConfig, ConfigError> {
    load_from_lookup(|key| env.get(key).cloned())
}

/// Load from `env` and run the workflow, the same way the binary does.
pub async fn run_with<O, S>(
    env: &HashMap<&'static str, String>,
    workflow: &TransferWorkflow<O, S>,
    mode: RunMode,
) -> (Result<TransferOutcome, TransferError>, String)
where
    O: FeeOracle,
    S: TransferSubmitter,
{
    let mut reporter = ConsoleReporter::new(Vec::new());
    let result = match load(env) {
        Ok(config) => workflow.execute(&config, &mut reporter, mode).await,
        Err(e) => Err(TransferError::from(e)),
    };
    let output = String::from_utf8(reporter.into_inner()).unwrap();
    (result, output)
}

/// Fee oracle double with a call counter.
pub struct MockOracle {
    quote: Option<FeeQuote>,
    failures_before_success: usize,
    calls: AtomicUsize,
    last_request: Mutex<Option<(OmniAddress, OmniAddress, OmniAddress)>>,
}

impl MockOracle {
    pub fn fixed(token_fee: u64, native_fee: u64) -> Self {
        Self {
            quote: Some(FeeQuote {
                token_fee: U256::from(token_fee),
                native_fee: U256::from(native_fee),
            }),
            failures_before_success: 0,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Fails every call with a 503.
    pub fn failing() -> Self {
        Self {
            quote: None,
            ..Self::fixed(0, 0)
        }
    }

    /// Fails `failures` times with a 503, then returns the quote.
    pub fn flaky(failures: usize, token_fee: u64, native_fee: u64) -> Self {
        Self {
            failures_before_success: failures,
            ..Self::fixed(token_fee, native_fee)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<(OmniAddress, OmniAddress, OmniAddress)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeeOracle for MockOracle {
    async fn quote(
        &self,
        sender: &OmniAddress,
        recipient: &OmniAddress,
        token: &OmniAddress,
    ) -> Result<FeeQuote, FeeError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() =
            Some((sender.clone(), recipient.clone(), token.clone()));

        match self.quote {
            Some(quote) if n >= self.failures_before_success => Ok(quote),
            _ => Err(FeeError::Status {
                status: 503,
                body: "unavailable".to_string(),
            }),
        }
    }
}

/// Transfer submitter double that records every payload.
pub struct MockSubmitter {
    fail: bool,
    next_nonce: AtomicU64,
    submitted: Arc<Mutex<Vec<PreparedTransfer>>>,
}

impl MockSubmitter {
    pub fn new() -> Self {
        Self {
            fail: false,
            next_nonce: AtomicU64::new(1),
            submitted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn submitted(&self) -> Vec<PreparedTransfer> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransferSubmitter for MockSubmitter {
    fn sender(&self) -> String {
        SENDER.to_string()
    }

    async fn submit(&self, transfer: &PreparedTransfer) -> BlockchainResult<TransferResult> {
        self.submitted.lock().unwrap().push(transfer.clone());
        if self.fail {
            return Err(BlockchainError::Reverted("execution reverted".to_string()));
        }
        Ok(TransferResult {
            transaction_hash: TxHash::repeat_byte(0xab),
            relayer_nonce: self.next_nonce.fetch_add(1, Ordering::SeqCst),
        })
    }
}

/// Reporter that only records which milestones were reached.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Vec<&'static str>,
}

impl Reporter for RecordingReporter {
    fn fee_quote(&mut self, _quote: &FeeQuote) -> std::io::Result<()> {
        self.events.push("fee_quote");
        Ok(())
    }

    fn submitting(&mut self, _transfer: &PreparedTransfer) -> std::io::Result<()> {
        self.events.push("submitting");
        Ok(())
    }

    fn submitted(&mut self, _result: &TransferResult) -> std::io::Result<()> {
        self.events.push("submitted");
        Ok(())
    }
}

/// Start a programmable HTTP backend on an ephemeral port.
///
/// `f` receives the request line (`GET /path?query HTTP/1.1`) and returns the
/// status code and JSON body to answer with.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
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
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let (head, _) = read_request(&mut socket).await;
                        let request_line = head.lines().next().unwrap_or_default().to_string();
                        let (status, body) = f(request_line).await;
                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a backend that always answers with the same status and body.
pub async fn start_mock_backend(status: u16, body: &'static str) -> SocketAddr {
    start_programmable_backend(move |_| async move { (status, body.to_string()) }).await
}

/// Read one HTTP request: the head, then a body of `Content-Length` bytes.
async fn read_request(socket: &mut tokio::net::TcpStream) -> (String, Vec<u8>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let mut head_end = None;
    loop {
        if let Some(end) = head_end {
            let head = String::from_utf8_lossy(&buf[..end]).into_owned();
            let body_len = content_length(&head);
            if buf.len() >= end + 4 + body_len {
                let body = buf[end + 4..end + 4 + body_len].to_vec();
                return (head, body);
            }
        }
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => {
                let end = head_end.unwrap_or(buf.len());
                return (String::from_utf8_lossy(&buf[..end]).into_owned(), Vec::new());
            }
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if head_end.is_none() {
                    head_end = buf.windows(4).position(|w| w == b"\r\n\r\n");
                }
            }
        }
    }
}

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

/// JSON-RPC node stand-in that records every method it is asked for.
pub struct RpcBackend {
    pub addr: SocketAddr,
    methods: Arc<Mutex<Vec<String>>>,
}

impl RpcBackend {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn methods(&self) -> Vec<String> {
        self.methods.lock().unwrap().clone()
    }
}

/// Start a JSON-RPC backend on an ephemeral port.
///
/// `handler` maps a method and its params to a result, or to an error
/// message. Single and batched requests are both answered with the
/// request's `id`.
pub async fn start_rpc_backend<F>(handler: F) -> RpcBackend
where
    F: Fn(&str, &Value) -> Result<Value, String> + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);
    let methods = Arc::new(Mutex::new(Vec::new()));
    let recorded = methods.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let handler = handler.clone();
            let recorded = recorded.clone();
            tokio::spawn(async move {
                let (_, body) = read_request(&mut socket).await;
                let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

                let mut answer = |call: &Value| {
                    let method = call["method"].as_str().unwrap_or_default().to_string();
                    recorded.lock().unwrap().push(method.clone());
                    match handler(&method, &call["params"]) {
                        Ok(result) => json!({"jsonrpc": "2.0", "id": call["id"], "result": result}),
                        Err(message) => json!({
                            "jsonrpc": "2.0",
                            "id": call["id"],
                            "error": {"code": -32601, "message": message},
                        }),
                    }
                };
                let response = match &request {
                    Value::Array(calls) => Value::Array(calls.iter().map(&mut answer).collect()),
                    call => answer(call),
                };

                let body = response.to_string();
                let response_str = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response_str.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    RpcBackend { addr, methods }
}

/// Query parameters of a request line, percent-decoded.
pub fn query_params(request_line: &str) -> HashMap<String, String> {
    let target = request_line.split_whitespace().nth(1).unwrap_or("/");
    let url = url::Url::parse(&format!("http://localhost{}", target)).unwrap();
    url.query_pairs().into_owned().collect()
}

/// `reqwest` client that ignores proxy settings from the environment.
pub fn local_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
