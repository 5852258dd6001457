//! Component factory - instantiating resolved factories into an agent
//!
//! Construction failures from role implementations propagate unmodified;
//! there is no retry or recovery here.

use anyhow::Result;
use tracing::debug;

use crate::registry::{AgentFactory, EnvironmentFactory};
use crate::resolver::ResolvedComponents;
use crate::roles::Agent;

/// Instantiate all four roles and wire them into an agent.
///
/// Environment, Policy and Trainer are built with no arguments, then
/// injected into the agent in that fixed order.
pub fn assemble(components: &ResolvedComponents<'_>) -> Result<Box<dyn Agent>> {
    let environment = components.environment.build()?;
    let policy = components.policy.build()?;
    let trainer = components.trainer.build()?;
    debug!("assembling agent from configured components");
    components.agent.build(environment, policy, trainer)
}

/// Instantiate only the environment and hand it to the agent factory's
/// default path; the agent supplies its own policy and trainer.
pub fn assemble_pair(
    agent: &dyn AgentFactory,
    environment: &dyn EnvironmentFactory,
) -> Result<Box<dyn Agent>> {
    let environment = environment.build()?;
    debug!("assembling agent from agent/environment pair");
    agent.build_with_defaults(environment)
}
