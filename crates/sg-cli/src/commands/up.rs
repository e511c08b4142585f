//! Up command: wait for the store, apply migrations, exec the service.

use anyhow::Result;

use crate::cli::{GlobalArgs, UpArgs};
use crate::context::RuntimeContext;
use crate::handoff::ExecLauncher;
use crate::sequencer::Sequencer;
use crate::waiter::WaitPolicy;

pub async fn execute(args: &UpArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let units = ctx.load_units()?;

    let policy = WaitPolicy::from_settings(&ctx.settings);
    let mut sequencer = Sequencer::new(ctx.store.as_ref(), &units, policy);
    sequencer.run(&ExecLauncher, &args.command).await?;

    // Reached only with a launcher that does not replace the process.
    Ok(())
}
