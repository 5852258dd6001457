//! Builtin demo components
//!
//! The smallest complete component set: a 1-D corridor environment, a
//! uniform-random policy, a no-op trainer, and an agent that wires the
//! three together. These are what `agentry init` scaffolds against.

use anyhow::{anyhow, bail, Result};
use rand::seq::SliceRandom;
use serde_json::json;

use crate::registry::{AgentFactory, Registry};
use crate::roles::{Action, Agent, Environment, Observation, Policy, Trainer, Transition};

/// Simulates a 1-D corridor; the agent starts at position 0 and is done
/// when it reaches the far end
pub struct Corridor {
    length: i64,
    position: i64,
}

impl Corridor {
    pub fn new() -> Self {
        Self {
            length: 5,
            position: 0,
        }
    }
}

impl Default for Corridor {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for Corridor {
    fn reset(&mut self) -> Observation {
        self.position = 0;
        json!(self.position)
    }

    fn step(&mut self, action: &Action) -> Result<Transition> {
        let step = action
            .as_i64()
            .ok_or_else(|| anyhow!("corridor actions are integers, got {action}"))?;
        match step {
            0 => self.position = (self.position - 1).max(0),
            1 => self.position = (self.position + 1).min(self.length),
            other => bail!("corridor action must be 0 or 1, got {other}"),
        }
        Ok(Transition {
            observation: json!(self.position),
            reward: -1.0,
            done: self.done(),
            info: json!({}),
        })
    }

    fn valid_actions(&self) -> Vec<Action> {
        vec![json!(0), json!(1)]
    }

    fn done(&self) -> bool {
        self.position >= self.length
    }
}

/// Chooses uniformly among the valid actions
pub struct RandomPolicy;

impl Policy for RandomPolicy {
    fn decide(&mut self, _observation: &Observation, valid_actions: &[Action]) -> Result<Action> {
        valid_actions
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| anyhow!("no valid actions to choose from"))
    }
}

/// Leaves the policy unchanged
pub struct NoOpTrainer;

impl Trainer for NoOpTrainer {
    fn train(&mut self, _policy: &mut dyn Policy) -> Result<()> {
        Ok(())
    }
}

/// A basic agent: asks its policy for a decision and steps its environment
pub struct BasicAgent {
    environment: Box<dyn Environment>,
    policy: Box<dyn Policy>,
    trainer: Box<dyn Trainer>,
    observation: Observation,
}

impl BasicAgent {
    pub fn new(
        mut environment: Box<dyn Environment>,
        policy: Box<dyn Policy>,
        trainer: Box<dyn Trainer>,
    ) -> Self {
        let observation = environment.reset();
        Self {
            environment,
            policy,
            trainer,
            observation,
        }
    }
}

impl Agent for BasicAgent {
    fn train(&mut self) -> Result<()> {
        self.trainer.train(self.policy.as_mut())
    }

    fn advance(&mut self) -> Result<bool> {
        let valid_actions = self.environment.valid_actions();
        let action = self.policy.decide(&self.observation, &valid_actions)?;
        let transition = self.environment.step(&action)?;
        self.observation = transition.observation;
        Ok(transition.done)
    }
}

/// Factory for [`BasicAgent`]; the default path wires a random policy and
/// a no-op trainer
pub struct BasicAgentFactory;

impl AgentFactory for BasicAgentFactory {
    fn build(
        &self,
        environment: Box<dyn Environment>,
        policy: Box<dyn Policy>,
        trainer: Box<dyn Trainer>,
    ) -> Result<Box<dyn Agent>> {
        Ok(Box::new(BasicAgent::new(environment, policy, trainer)))
    }

    fn build_with_defaults(&self, environment: Box<dyn Environment>) -> Result<Box<dyn Agent>> {
        Ok(Box::new(BasicAgent::new(
            environment,
            Box::new(RandomPolicy),
            Box::new(NoOpTrainer),
        )))
    }
}

/// Register the builtin component set
pub fn register(registry: &mut Registry) {
    registry.register_agent("agent.BasicAgent", BasicAgentFactory);
    registry.register_environment("environment.Corridor", || {
        Ok(Box::new(Corridor::new()) as Box<dyn Environment>)
    });
    registry.register_policy("policy.RandomPolicy", || {
        Ok(Box::new(RandomPolicy) as Box<dyn Policy>)
    });
    registry.register_trainer("trainer.NoOpTrainer", || {
        Ok(Box::new(NoOpTrainer) as Box<dyn Trainer>)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corridor_walks_forward_to_completion() {
        let mut corridor = Corridor::new();
        assert_eq!(corridor.reset(), json!(0));
        for expected in 1..=5 {
            let transition = corridor.step(&json!(1)).unwrap();
            assert_eq!(transition.observation, json!(expected));
            assert_eq!(transition.reward, -1.0);
        }
        assert!(corridor.done());
    }

    #[test]
    fn test_corridor_clamps_at_origin() {
        let mut corridor = Corridor::new();
        corridor.reset();
        let transition = corridor.step(&json!(0)).unwrap();
        assert_eq!(transition.observation, json!(0));
        assert!(!transition.done);
    }

    #[test]
    fn test_corridor_rejects_unknown_action() {
        let mut corridor = Corridor::new();
        corridor.reset();
        assert!(corridor.step(&json!(7)).is_err());
        assert!(corridor.step(&json!("forward")).is_err());
    }

    #[test]
    fn test_corridor_reset_clears_position() {
        let mut corridor = Corridor::new();
        corridor.reset();
        for _ in 0..5 {
            corridor.step(&json!(1)).unwrap();
        }
        assert!(corridor.done());
        assert_eq!(corridor.reset(), json!(0));
        assert!(!corridor.done());
    }

    #[test]
    fn test_random_policy_picks_valid_action() {
        let mut policy = RandomPolicy;
        let valid_actions = vec![json!(0), json!(1)];
        for _ in 0..20 {
            let action = policy.decide(&json!(0), &valid_actions).unwrap();
            assert!(valid_actions.contains(&action));
        }
    }

    #[test]
    fn test_random_policy_fails_without_actions() {
        let mut policy = RandomPolicy;
        assert!(policy.decide(&json!(0), &[]).is_err());
    }

    #[test]
    fn test_noop_trainer() {
        let mut trainer = NoOpTrainer;
        let mut policy = RandomPolicy;
        assert!(trainer.train(&mut policy).is_ok());
    }

    #[test]
    fn test_basic_agent_train_and_advance() {
        let mut agent = BasicAgent::new(
            Box::new(Corridor::new()),
            Box::new(RandomPolicy),
            Box::new(NoOpTrainer),
        );
        assert!(agent.train().is_ok());
        // A random walk on a finite corridor terminates; bound it anyway
        let mut done = false;
        for _ in 0..100_000 {
            done = agent.advance().unwrap();
            if done {
                break;
            }
        }
        assert!(done);
    }

    #[test]
    fn test_factory_default_path() {
        let mut agent = BasicAgentFactory
            .build_with_defaults(Box::new(Corridor::new()))
            .unwrap();
        assert!(agent.train().is_ok());
        assert!(agent.advance().is_ok());
    }
}
