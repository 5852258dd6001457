//! Train the configured agent

use agentry_core::engine;
use agentry_core::strategy::RunContext;
use anyhow::Result;

pub fn run(ctx: &RunContext, iters: u64) -> Result<()> {
    let mut agent = super::configured_agent(ctx)?;
    engine::train(agent.as_mut(), iters)?;
    println!("Trained agent for {iters} iterations");
    Ok(())
}
