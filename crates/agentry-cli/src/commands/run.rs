//! Run an agent with an environment
//!
//! Selects a strategy from the argument shape, resolves the references,
//! and either drives the timed loop or delegates the whole run.

use agentry_core::project::{CargoRunner, ProjectRunner};
use agentry_core::resolver;
use agentry_core::roles::Role;
use agentry_core::strategy::{self, RunContext, RunStrategy};
use agentry_core::{engine, factory, LoopBudget, Registry};
use anyhow::{anyhow, Result};

pub async fn run(ctx: &RunContext, run_args: &[String], budget: &LoopBudget) -> Result<()> {
    let registry = Registry::with_builtins();
    let selected = strategy::select(ctx, run_args)?;

    match selected {
        RunStrategy::Delegate { dir, entry_point } => {
            println!("Running project in {} via the project runner.", dir.display());
            CargoRunner.run(&dir, entry_point.as_deref()).await
        }
        RunStrategy::SingleFile { path } => {
            let agent_id = resolver::resolve_from_file(&registry, &path, Role::Agent)?;
            let env_id = resolver::resolve_from_file(&registry, &path, Role::Environment)?;
            launch(&registry, &agent_id, &env_id, budget).await
        }
        RunStrategy::Pair { agent, environment } => {
            let agent_id = agent.resolve(&registry, Role::Agent)?;
            let env_id = environment.resolve(&registry, Role::Environment)?;
            launch(&registry, &agent_id, &env_id, budget).await
        }
    }
}

async fn launch(
    registry: &Registry,
    agent_id: &str,
    env_id: &str,
    budget: &LoopBudget,
) -> Result<()> {
    let agent_factory = registry
        .agent(agent_id)
        .ok_or_else(|| anyhow!("agent `{agent_id}` is not registered"))?;
    let env_factory = registry
        .environment(env_id)
        .ok_or_else(|| anyhow!("environment `{env_id}` is not registered"))?;

    let mut agent = factory::assemble_pair(agent_factory, env_factory)?;
    let report = engine::run(agent.as_mut(), budget).await?;
    println!(
        "Run {} finished in {} steps ({})",
        report.run_id, report.steps, report.stop
    );
    Ok(())
}
