//! autorepair repair command

use clap::Args;

use autorepair_usecase::{LoopSupervisor, RepairOutcome};

use crate::wiring::Context;

#[derive(Debug, Args)]
pub struct RepairCommand {}

impl RepairCommand {
    pub async fn run(&self, context: &Context) -> anyhow::Result<()> {
        let supervisor = LoopSupervisor::new(context.connect()?, &context.settings);
        let report = supervisor.run_once().await?;

        match (report.worn, report.outcome) {
            (Some(worn), Some(outcome)) => {
                println!("{} at {:.0}%", worn.name, worn.percent);
                println!("→ {}", describe(&outcome));
            }
            _ => println!("✓ Nothing to repair"),
        }
        Ok(())
    }
}

fn describe(outcome: &RepairOutcome) -> String {
    match outcome {
        RepairOutcome::Teleported { destination } => {
            format!("Teleporting to {}; run again once there", destination)
        }
        RepairOutcome::ConsumableUsed { available } => {
            format!("Used the repair consumable ({} on hand)", available)
        }
        RepairOutcome::ApproachedNpc { attempts } => {
            format!("Walked to the mender in {} steps; run again to interact", attempts)
        }
        RepairOutcome::NpcUnreachable { remaining } => {
            format!("Gave up walking, {:.1} units short of the mender", remaining)
        }
        RepairOutcome::Interacted { retargeted } => {
            format!("Talking to the mender (retargeted: {})", retargeted)
        }
        RepairOutcome::AwaitingInteraction { retargeted } => {
            format!("Mender in range but busy (retargeted: {})", retargeted)
        }
    }
}
