//! Dependency wiring: configuration file to use-case settings and host

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context as _};
use tracing::{debug, info};

use autorepair_adapter::{BridgeHost, BridgeSpec, SimulatedHost, SimulatedWorld};
use autorepair_domain::{ItemId, Position, RepairSite, RepairThreshold, ZoneId};
use autorepair_usecase::{ConsumableSpec, GameHost, MovementSettings, RepairSettings};
use shared::config::AgentConfig;

/// Looked up in the working directory when `--config` is not given
const DEFAULT_CONFIG_FILES: [&str; 3] = ["autorepair.json", "autorepair.yaml", "autorepair.yml"];

/// Durability the simulated gear loses per inventory read
const SIMULATED_WEAR: u32 = 150;

pub struct Context {
    pub config: AgentConfig,
    pub settings: RepairSettings,
    pub simulate: bool,
}

impl Context {
    pub fn load(path: Option<&Path>, simulate: bool) -> anyhow::Result<Self> {
        let config = match path.map(Path::to_path_buf).or_else(find_default_config) {
            Some(path) => {
                info!(path = %path.display(), "Loading configuration");
                AgentConfig::from_file(&path)
                    .with_context(|| format!("Failed to load {}", path.display()))?
            }
            None => {
                debug!("No configuration file, using defaults");
                AgentConfig::default()
            }
        };

        Self::from_config(config, simulate)
    }

    pub fn from_config(config: AgentConfig, simulate: bool) -> anyhow::Result<Self> {
        let settings = settings_from(&config)?;
        Ok(Self {
            config,
            settings,
            simulate,
        })
    }

    /// Build the game host: the simulated world, or the configured bridge
    pub fn connect(&self) -> anyhow::Result<Arc<dyn GameHost>> {
        if self.simulate {
            info!("Using the simulated game world");
            let world = SimulatedWorld::for_site(&self.settings.site).with_wear(SIMULATED_WEAR);
            return Ok(Arc::new(SimulatedHost::new(world)));
        }

        let Some(bridge) = &self.config.bridge else {
            bail!("No bridge configured; add a \"bridge\" section or pass --simulate");
        };

        let spec = BridgeSpec {
            command: bridge.command.clone(),
            args: bridge.args.clone(),
            env: bridge.env.clone(),
            timeout: Duration::from_millis(bridge.timeout_ms),
        };
        Ok(Arc::new(BridgeHost::spawn(&spec)?))
    }
}

fn find_default_config() -> Option<PathBuf> {
    DEFAULT_CONFIG_FILES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
}

pub fn settings_from(config: &AgentConfig) -> anyhow::Result<RepairSettings> {
    let npc = &config.repair_npc;

    Ok(RepairSettings {
        threshold: RepairThreshold::new(config.repair_threshold)?,
        site: RepairSite::new(
            ZoneId::new(config.repair_zone.id),
            config.repair_zone.name.clone(),
            npc.name.clone(),
            Position::new(npc.x, npc.y, npc.z),
        ),
        consumable: ConsumableSpec {
            item_id: ItemId::new(config.consumable.item_id),
            name: config.consumable.name.clone(),
            settle: Duration::from_millis(config.consumable.settle_ms),
        },
        arrival_radius: config.arrival_radius,
        poll_interval: Duration::from_millis(config.poll_interval_ms),
        movement: MovementSettings {
            retry_interval: Duration::from_millis(config.movement.retry_interval_ms),
            max_attempts: config.movement.max_attempts,
        },
    })
}
