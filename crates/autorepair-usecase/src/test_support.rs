//! Scripted host for unit tests
//!
//! Serves canned state and records every command and path request in the
//! order they were issued. `LogBuffer` captures formatted log output.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use autorepair_domain::{InventorySnapshot, PlayerState, Position};

use crate::port::host::{GameCommand, GameHost, HostError};

/// In-memory log sink for a thread-local `tracing` subscriber
#[derive(Debug, Clone, Default)]
pub(crate) struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Install a subscriber writing into this buffer for the current thread
    pub(crate) fn capture(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HostCall {
    Command(GameCommand),
    PathTo(Position),
}

#[derive(Debug)]
struct Script {
    player: PlayerState,
    inventory: InventorySnapshot,
    /// Units walked per `player_state` poll while a path is active
    walk_speed: f32,
    path: Option<Position>,
    fail_inventory: bool,
    inventory_calls: usize,
    calls: Vec<HostCall>,
}

#[derive(Debug)]
pub(crate) struct ScriptedHost {
    script: Mutex<Script>,
}

impl ScriptedHost {
    pub(crate) fn new(player: PlayerState, inventory: InventorySnapshot) -> Self {
        Self {
            script: Mutex::new(Script {
                player,
                inventory,
                walk_speed: 0.0,
                path: None,
                fail_inventory: false,
                inventory_calls: 0,
                calls: Vec::new(),
            }),
        }
    }

    pub(crate) fn with_walk_speed(self, speed: f32) -> Self {
        self.script.lock().unwrap().walk_speed = speed;
        self
    }

    pub(crate) fn set_inventory(&self, inventory: InventorySnapshot) {
        self.script.lock().unwrap().inventory = inventory;
    }

    pub(crate) fn set_fail_inventory(&self, fail: bool) {
        self.script.lock().unwrap().fail_inventory = fail;
    }

    pub(crate) fn inventory_calls(&self) -> usize {
        self.script.lock().unwrap().inventory_calls
    }

    pub(crate) fn calls(&self) -> Vec<HostCall> {
        self.script.lock().unwrap().calls.clone()
    }

    pub(crate) fn commands(&self) -> Vec<GameCommand> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Command(command) => Some(command),
                HostCall::PathTo(_) => None,
            })
            .collect()
    }

    pub(crate) fn path_requests(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, HostCall::PathTo(_)))
            .count()
    }
}

#[async_trait]
impl GameHost for ScriptedHost {
    async fn inventory(&self) -> Result<InventorySnapshot, HostError> {
        let mut script = self.script.lock().unwrap();
        script.inventory_calls += 1;
        if script.fail_inventory {
            return Err(HostError::Unavailable("inventory not loaded".to_string()));
        }
        Ok(script.inventory.clone())
    }

    async fn player_state(&self) -> Result<PlayerState, HostError> {
        let mut script = self.script.lock().unwrap();
        if let Some(target) = script.path {
            let speed = script.walk_speed;
            script.player.position = script.player.position.step_toward(&target, speed);
            if script.player.position == target {
                script.path = None;
            }
        }
        Ok(script.player.clone())
    }

    async fn is_path_running(&self) -> Result<bool, HostError> {
        Ok(self.script.lock().unwrap().path.is_some())
    }

    async fn path_to(&self, destination: Position) -> Result<(), HostError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(HostCall::PathTo(destination));
        if script.walk_speed > 0.0 {
            script.path = Some(destination);
        }
        Ok(())
    }

    async fn execute(&self, command: &GameCommand) -> Result<(), HostError> {
        self.script
            .lock()
            .unwrap()
            .calls
            .push(HostCall::Command(command.clone()));
        Ok(())
    }
}
