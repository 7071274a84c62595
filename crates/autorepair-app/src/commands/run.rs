//! autorepair run command

use clap::Args;
use tracing::info;

use autorepair_usecase::LoopSupervisor;

use crate::wiring::Context;

#[derive(Debug, Args)]
pub struct RunCommand {}

impl RunCommand {
    pub async fn run(&self, context: &Context) -> anyhow::Result<()> {
        let host = context.connect()?;
        let supervisor = LoopSupervisor::new(host, &context.settings);
        info!(
            threshold = %context.settings.threshold,
            poll_interval_ms = context.settings.poll_interval.as_millis() as u64,
            "Initialized."
        );

        supervisor.start();

        tokio::signal::ctrl_c().await?;
        info!("Interrupted, stopping");

        supervisor.shutdown().await?;

        let status = supervisor.status();
        info!(
            cycles = status.cycles,
            repairs = status.repairs,
            "Disposed."
        );
        Ok(())
    }
}
