//! Migrate command: wait for the store and apply pending units, no handoff.

use anyhow::Result;

use crate::cli::GlobalArgs;
use crate::context::RuntimeContext;
use crate::sequencer::Sequencer;
use crate::waiter::WaitPolicy;

pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let units = ctx.load_units()?;

    let policy = WaitPolicy::from_settings(&ctx.settings);
    let mut sequencer = Sequencer::new(ctx.store.as_ref(), &units, policy);
    sequencer.wait().await?;
    let applied = sequencer.migrate().await?;

    println!("applied {applied} migration unit(s)");
    Ok(())
}
