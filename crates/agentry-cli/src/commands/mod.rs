//! CLI command implementations

pub mod components;
pub mod init;
pub mod run;
pub mod train;

use std::path::PathBuf;

use agentry_core::config::{AgentConfig, AGENT_CONFIG_FILE};
use agentry_core::strategy::RunContext;
use agentry_core::{factory, Agent, Registry};
use anyhow::Result;

/// Build the resolution context once, at the process edge
pub fn context(workdir: Option<PathBuf>) -> Result<RunContext> {
    Ok(match workdir {
        Some(dir) => RunContext::new(dir),
        None => RunContext::current()?,
    })
}

/// Bind the working directory's `agent.toml` into a runnable agent
pub fn configured_agent(ctx: &RunContext) -> Result<Box<dyn Agent>> {
    let registry = Registry::with_builtins();
    let config = AgentConfig::load(&ctx.workdir.join(AGENT_CONFIG_FILE))?;
    let components = config.bind(&registry)?;
    factory::assemble(&components)
}
