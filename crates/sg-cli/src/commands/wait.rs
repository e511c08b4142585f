//! Wait command: run only the dependency gate.
//!
//! Useful as a compose healthcheck helper or init container where
//! migrations are someone else's job.

use anyhow::Result;

use crate::cli::GlobalArgs;
use crate::context::RuntimeContext;
use crate::sequencer::Sequencer;
use crate::waiter::WaitPolicy;

pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;

    let policy = WaitPolicy::from_settings(&ctx.settings);
    let mut sequencer = Sequencer::new(ctx.store.as_ref(), &[], policy);
    let attempts = sequencer.wait().await?;

    println!("store reachable after {attempts} attempt(s)");
    Ok(())
}
