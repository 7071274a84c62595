//! autorepair check command

use clap::Args;

use autorepair_usecase::DurabilityCheck;

use crate::wiring::Context;

#[derive(Debug, Args)]
pub struct CheckCommand {}

impl CheckCommand {
    pub async fn run(&self, context: &Context) -> anyhow::Result<()> {
        let check = DurabilityCheck::new(context.connect()?, context.settings.threshold);

        match check.check().await? {
            Some(worn) => println!(
                "{} ({}) is at {:.0}%, below {}",
                worn.name,
                worn.item_id.value(),
                worn.percent,
                check.threshold()
            ),
            None => println!("✓ All gear at or above {}", check.threshold()),
        }
        Ok(())
    }
}
