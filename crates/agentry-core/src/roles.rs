//! Role contracts and the value types flowing between them

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// An observation handed from an environment to a policy
pub type Observation = serde_json::Value;

/// An action chosen by a policy
pub type Action = serde_json::Value;

/// Scalar reward signal
pub type Reward = f64;

/// The four capability contracts an assembled agent is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Agent,
    Environment,
    Policy,
    Trainer,
}

impl Role {
    /// All roles, in the order they are injected into an agent's constructor
    pub const ALL: [Role; 4] = [Role::Agent, Role::Environment, Role::Policy, Role::Trainer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Agent => "agent",
            Role::Environment => "environment",
            Role::Policy => "policy",
            Role::Trainer => "trainer",
        }
    }

    /// Map a trait name, as it appears in a manifest impl header, to a role
    pub fn from_trait_name(name: &str) -> Option<Self> {
        match name {
            "Agent" => Some(Role::Agent),
            "Environment" => Some(Role::Environment),
            "Policy" => Some(Role::Policy),
            "Trainer" => Some(Role::Trainer),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a single environment step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    pub observation: Observation,
    pub reward: Reward,
    pub done: bool,
    pub info: serde_json::Value,
}

/// A world the agent acts in
pub trait Environment: Send {
    /// Reset to the initial state and return the first observation
    fn reset(&mut self) -> Observation;

    /// Apply an action and return the resulting transition
    fn step(&mut self, action: &Action) -> Result<Transition>;

    /// Actions currently available to the agent
    fn valid_actions(&self) -> Vec<Action>;

    /// Whether the environment has reached a terminal state
    fn done(&self) -> bool;
}

/// Chooses an action given an observation
pub trait Policy: Send {
    fn decide(&mut self, observation: &Observation, valid_actions: &[Action]) -> Result<Action>;
}

/// Improves a policy in place
pub trait Trainer: Send {
    fn train(&mut self, policy: &mut dyn Policy) -> Result<()>;
}

/// A fully wired agent, ready to be driven by the execution engine
pub trait Agent: Send {
    /// One training pass
    fn train(&mut self) -> Result<()>;

    /// One decision/step cycle; returns true when the agent is done
    fn advance(&mut self) -> Result<bool>;
}
