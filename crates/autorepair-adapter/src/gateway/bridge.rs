//! BridgeHost - Live binding over the host's scripting bridge
//!
//! The bridge is an external process started from configuration. It reads
//! one JSON request per line on stdin and answers with one JSON line on
//! stdout (see `wire`). Calls are serialized: a request is never sent
//! before the previous response has been read.
//!
//! Every exchange is bounded by `BridgeSpec::timeout`. A bridge that misses
//! it is killed, since its reply stream can no longer be matched to
//! requests, and the next call starts a fresh one.

use std::collections::HashMap;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use autorepair_domain::{InventorySlot, InventorySnapshot, PlayerState, Position};
use autorepair_usecase::{GameCommand, GameHost, HostError};

use super::wire::{PlayerDto, Request, Response, SlotDto};

/// How to launch the bridge process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeSpec {
    pub command: String,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
    /// Limit for one request/response exchange
    pub timeout: Duration,
}

impl Default for BridgeSpec {
    fn default() -> Self {
        Self {
            command: String::new(),
            args: Vec::new(),
            env: HashMap::new(),
            timeout: Duration::from_secs(5),
        }
    }
}

struct BridgeIo {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
}

impl BridgeIo {
    fn spawn(spec: &BridgeSpec) -> Result<Self, HostError> {
        let mut cmd = Command::new(&spec.command);
        cmd.args(&spec.args)
            .envs(&spec.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| {
            HostError::Unavailable(format!("Failed to start bridge '{}': {}", spec.command, e))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| HostError::Protocol("bridge stdin not captured".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| HostError::Protocol("bridge stdout not captured".to_string()))?;

        info!(command = %spec.command, pid = child.id(), "Scripting bridge started");

        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
        })
    }
}

pub struct BridgeHost {
    spec: BridgeSpec,
    /// `None` after a failed exchange until the next call respawns it
    io: Mutex<Option<BridgeIo>>,
}

impl BridgeHost {
    /// Start the bridge process. It is killed when the host is dropped.
    pub fn spawn(spec: &BridgeSpec) -> Result<Self, HostError> {
        let io = BridgeIo::spawn(spec)?;
        Ok(Self {
            spec: spec.clone(),
            io: Mutex::new(Some(io)),
        })
    }

    /// Kill the bridge process now instead of on drop
    pub async fn close(&self) -> Result<(), HostError> {
        if let Some(mut io) = self.io.lock().await.take() {
            io.child.kill().await?;
            info!("Scripting bridge stopped");
        }
        Ok(())
    }

    /// Whether a bridge process is currently attached
    pub async fn is_connected(&self) -> bool {
        self.io.lock().await.is_some()
    }

    async fn call(&self, request: &Request) -> Result<Option<serde_json::Value>, HostError> {
        let mut line = serde_json::to_string(request)
            .map_err(|e| HostError::Protocol(format!("encode {}: {}", request.label(), e)))?;
        line.push('\n');

        let mut slot = self.io.lock().await;
        if slot.is_none() {
            warn!(command = %self.spec.command, "Restarting scripting bridge");
            *slot = Some(BridgeIo::spawn(&self.spec)?);
        }
        let io = slot
            .as_mut()
            .ok_or_else(|| HostError::Unavailable("bridge not running".to_string()))?;

        let exchange = async {
            io.stdin.write_all(line.as_bytes()).await?;
            io.stdin.flush().await?;
            io.stdout.next_line().await
        };

        let outcome = tokio::time::timeout(self.spec.timeout, exchange).await;
        let reply = match outcome {
            Ok(Ok(Some(reply))) => reply,
            Ok(Ok(None)) => {
                slot.take();
                return Err(HostError::Unavailable("bridge closed its output".to_string()));
            }
            Ok(Err(e)) => {
                slot.take();
                return Err(e.into());
            }
            Err(_) => {
                warn!(
                    request = %request.label(),
                    timeout_ms = self.spec.timeout.as_millis() as u64,
                    "Bridge did not answer, killing it"
                );
                slot.take();
                return Err(HostError::Unavailable(format!(
                    "bridge did not answer {} within {} ms",
                    request.label(),
                    self.spec.timeout.as_millis()
                )));
            }
        };
        drop(slot);

        debug!(request = %request.label(), reply = %reply, "Bridge exchange");

        let response: Response = serde_json::from_str(&reply)
            .map_err(|e| HostError::Protocol(format!("decode reply to {}: {}", request.label(), e)))?;

        if !response.ok {
            return Err(HostError::Rejected {
                command: request.label(),
                reason: response.error.unwrap_or_else(|| "no reason given".to_string()),
            });
        }

        Ok(response.data)
    }

    async fn query<T: DeserializeOwned>(&self, request: Request) -> Result<T, HostError> {
        let data = self.call(&request).await?.ok_or_else(|| {
            HostError::Protocol(format!("reply to {} carried no data", request.label()))
        })?;

        serde_json::from_value(data)
            .map_err(|e| HostError::Protocol(format!("decode {} data: {}", request.label(), e)))
    }
}

#[async_trait]
impl GameHost for BridgeHost {
    async fn inventory(&self) -> Result<InventorySnapshot, HostError> {
        let slots: Vec<SlotDto> = self.query(Request::Inventory).await?;
        Ok(slots.into_iter().map(InventorySlot::from).collect())
    }

    async fn player_state(&self) -> Result<PlayerState, HostError> {
        let player: PlayerDto = self.query(Request::PlayerState).await?;
        Ok(player.into())
    }

    async fn is_path_running(&self) -> Result<bool, HostError> {
        self.query(Request::PathRunning).await
    }

    async fn path_to(&self, destination: Position) -> Result<(), HostError> {
        self.call(&Request::PathTo {
            x: destination.x,
            y: destination.y,
            z: destination.z,
        })
        .await?;
        Ok(())
    }

    async fn execute(&self, command: &GameCommand) -> Result<(), HostError> {
        self.call(&Request::Command {
            text: command.to_chat(),
        })
        .await?;
        Ok(())
    }
}
