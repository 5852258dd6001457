//! Component registry - stable identifiers mapped to linked implementations
//!
//! Role implementations are compiled into the binary and registered here
//! under a dotted identifier such as `environment.Corridor`. Resolution
//! never executes foreign code; it only looks identifiers up in these
//! tables.

use std::collections::HashMap;

use anyhow::Result;

use crate::roles::{Agent, Environment, Policy, Role, Trainer};

/// Builds an environment instance with no arguments
pub trait EnvironmentFactory: Send + Sync {
    fn build(&self) -> Result<Box<dyn Environment>>;
}

impl<F> EnvironmentFactory for F
where
    F: Fn() -> Result<Box<dyn Environment>> + Send + Sync,
{
    fn build(&self) -> Result<Box<dyn Environment>> {
        self()
    }
}

/// Builds a policy instance with no arguments
pub trait PolicyFactory: Send + Sync {
    fn build(&self) -> Result<Box<dyn Policy>>;
}

impl<F> PolicyFactory for F
where
    F: Fn() -> Result<Box<dyn Policy>> + Send + Sync,
{
    fn build(&self) -> Result<Box<dyn Policy>> {
        self()
    }
}

/// Builds a trainer instance with no arguments
pub trait TrainerFactory: Send + Sync {
    fn build(&self) -> Result<Box<dyn Trainer>>;
}

impl<F> TrainerFactory for F
where
    F: Fn() -> Result<Box<dyn Trainer>> + Send + Sync,
{
    fn build(&self) -> Result<Box<dyn Trainer>> {
        self()
    }
}

/// Builds an agent around its three dependencies
pub trait AgentFactory: Send + Sync {
    /// Construct with explicitly resolved dependencies, in fixed order
    fn build(
        &self,
        environment: Box<dyn Environment>,
        policy: Box<dyn Policy>,
        trainer: Box<dyn Trainer>,
    ) -> Result<Box<dyn Agent>>;

    /// Construct with only an environment; the agent supplies its own
    /// policy and trainer
    fn build_with_defaults(&self, environment: Box<dyn Environment>) -> Result<Box<dyn Agent>>;
}

/// Registry of all linked role implementations
pub struct Registry {
    agents: HashMap<String, Box<dyn AgentFactory>>,
    environments: HashMap<String, Box<dyn EnvironmentFactory>>,
    policies: HashMap<String, Box<dyn PolicyFactory>>,
    trainers: HashMap<String, Box<dyn TrainerFactory>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            agents: HashMap::new(),
            environments: HashMap::new(),
            policies: HashMap::new(),
            trainers: HashMap::new(),
        }
    }

    /// Create a registry pre-populated with the builtin demo components
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::builtin::register(&mut registry);
        registry
    }

    pub fn register_agent(&mut self, id: impl Into<String>, factory: impl AgentFactory + 'static) {
        self.agents.insert(id.into(), Box::new(factory));
    }

    pub fn register_environment(
        &mut self,
        id: impl Into<String>,
        factory: impl EnvironmentFactory + 'static,
    ) {
        self.environments.insert(id.into(), Box::new(factory));
    }

    pub fn register_policy(&mut self, id: impl Into<String>, factory: impl PolicyFactory + 'static) {
        self.policies.insert(id.into(), Box::new(factory));
    }

    pub fn register_trainer(
        &mut self,
        id: impl Into<String>,
        factory: impl TrainerFactory + 'static,
    ) {
        self.trainers.insert(id.into(), Box::new(factory));
    }

    pub fn agent(&self, id: &str) -> Option<&dyn AgentFactory> {
        self.agents.get(id).map(|factory| factory.as_ref())
    }

    pub fn environment(&self, id: &str) -> Option<&dyn EnvironmentFactory> {
        self.environments.get(id).map(|factory| factory.as_ref())
    }

    pub fn policy(&self, id: &str) -> Option<&dyn PolicyFactory> {
        self.policies.get(id).map(|factory| factory.as_ref())
    }

    pub fn trainer(&self, id: &str) -> Option<&dyn TrainerFactory> {
        self.trainers.get(id).map(|factory| factory.as_ref())
    }

    /// Whether `id` is registered under `role`
    pub fn contains(&self, role: Role, id: &str) -> bool {
        match role {
            Role::Agent => self.agents.contains_key(id),
            Role::Environment => self.environments.contains_key(id),
            Role::Policy => self.policies.contains_key(id),
            Role::Trainer => self.trainers.contains_key(id),
        }
    }

    /// Registered identifiers for a role, sorted for stable output
    pub fn ids(&self, role: Role) -> Vec<&str> {
        let mut ids: Vec<&str> = match role {
            Role::Agent => self.agents.keys().map(String::as_str).collect(),
            Role::Environment => self.environments.keys().map(String::as_str).collect(),
            Role::Policy => self.policies.keys().map(String::as_str).collect(),
            Role::Trainer => self.trainers.keys().map(String::as_str).collect(),
        };
        ids.sort_unstable();
        ids
    }

    /// Find the identifier whose final dotted segment equals `type_name`.
    ///
    /// Manifest files declare bare type names; registry identifiers carry a
    /// module-style prefix. When several identifiers share a final segment
    /// the lexicographically smallest wins, keeping lookups deterministic.
    pub fn find_by_type_name(&self, role: Role, type_name: &str) -> Option<&str> {
        self.ids(role)
            .into_iter()
            .find(|id| id.rsplit('.').next() == Some(type_name))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{Corridor, NoOpTrainer, RandomPolicy};

    #[test]
    fn test_empty_registry() {
        let registry = Registry::new();
        for role in Role::ALL {
            assert!(registry.ids(role).is_empty());
        }
        assert!(registry.environment("environment.Corridor").is_none());
    }

    #[test]
    fn test_with_builtins_registers_all_roles() {
        let registry = Registry::with_builtins();
        assert!(registry.contains(Role::Agent, "agent.BasicAgent"));
        assert!(registry.contains(Role::Environment, "environment.Corridor"));
        assert!(registry.contains(Role::Policy, "policy.RandomPolicy"));
        assert!(registry.contains(Role::Trainer, "trainer.NoOpTrainer"));
    }

    #[test]
    fn test_closure_registration() {
        let mut registry = Registry::new();
        registry.register_environment("environment.Corridor", || {
            Ok(Box::new(Corridor::new()) as Box<dyn crate::roles::Environment>)
        });
        registry.register_policy("policy.RandomPolicy", || {
            Ok(Box::new(RandomPolicy) as Box<dyn crate::roles::Policy>)
        });
        registry.register_trainer("trainer.NoOpTrainer", || {
            Ok(Box::new(NoOpTrainer) as Box<dyn crate::roles::Trainer>)
        });

        assert!(registry.environment("environment.Corridor").is_some());
        assert!(registry.policy("policy.RandomPolicy").is_some());
        assert!(registry.trainer("trainer.NoOpTrainer").is_some());
        let environment = registry
            .environment("environment.Corridor")
            .unwrap()
            .build()
            .unwrap();
        assert!(!environment.done());
    }

    #[test]
    fn test_find_by_type_name() {
        let registry = Registry::with_builtins();
        assert_eq!(
            registry.find_by_type_name(Role::Environment, "Corridor"),
            Some("environment.Corridor")
        );
        assert_eq!(
            registry.find_by_type_name(Role::Agent, "BasicAgent"),
            Some("agent.BasicAgent")
        );
        assert_eq!(registry.find_by_type_name(Role::Agent, "Corridor"), None);
        assert_eq!(registry.find_by_type_name(Role::Policy, "Missing"), None);
    }

    #[test]
    fn test_find_by_type_name_deterministic_on_collision() {
        let mut registry = Registry::new();
        registry.register_environment("zoo.Corridor", || {
            Ok(Box::new(Corridor::new()) as Box<dyn crate::roles::Environment>)
        });
        registry.register_environment("demo.Corridor", || {
            Ok(Box::new(Corridor::new()) as Box<dyn crate::roles::Environment>)
        });
        // Sorted order breaks the tie
        assert_eq!(
            registry.find_by_type_name(Role::Environment, "Corridor"),
            Some("demo.Corridor")
        );
    }

    #[test]
    fn test_ids_sorted() {
        let registry = Registry::with_builtins();
        let ids = registry.ids(Role::Environment);
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }
}
