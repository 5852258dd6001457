//! Agent configuration loading and binding
//!
//! `agent.toml` declares one section per role, each naming a registered
//! component. Binding resolves all four before anything is instantiated;
//! a partial configuration is a hard error. Per-component constructor
//! configuration is not supported in this version.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{AgentryError, Result};
use crate::registry::Registry;
use crate::resolver::{resolve_from_module, ResolvedComponents};
use crate::roles::Role;

/// Default configuration file name inside an agent directory
pub const AGENT_CONFIG_FILE: &str = "agent.toml";

#[derive(Debug, Deserialize)]
struct RawConfig {
    agent: Option<RawSection>,
    environment: Option<RawSection>,
    policy: Option<RawSection>,
    trainer: Option<RawSection>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    class: String,
}

/// A fully parsed agent configuration: one dotted identifier per role
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub agent: String,
    pub environment: String,
    pub policy: String,
    pub trainer: String,
    path: PathBuf,
}

impl AgentConfig {
    /// Load and validate `agent.toml`
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AgentryError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let raw: RawConfig = toml::from_str(&contents).map_err(|e| {
            AgentryError::Config(format!("cannot parse {}: {e}", path.display()))
        })?;

        let section = |section: Option<RawSection>, role: Role| {
            section
                .map(|s| s.class)
                .ok_or_else(|| AgentryError::MissingSection {
                    path: path.to_path_buf(),
                    section: role,
                })
        };

        let config = Self {
            agent: section(raw.agent, Role::Agent)?,
            environment: section(raw.environment, Role::Environment)?,
            policy: section(raw.policy, Role::Policy)?,
            trainer: section(raw.trainer, Role::Trainer)?,
            path: path.to_path_buf(),
        };
        debug!(path = %path.display(), "loaded agent configuration");
        Ok(config)
    }

    /// Path this configuration was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve all four identifiers against the registry
    pub fn bind<'r>(&self, registry: &'r Registry) -> Result<ResolvedComponents<'r>> {
        let agent = resolve_from_module(registry, &self.agent, Role::Agent)?;
        let environment = resolve_from_module(registry, &self.environment, Role::Environment)?;
        let policy = resolve_from_module(registry, &self.policy, Role::Policy)?;
        let trainer = resolve_from_module(registry, &self.trainer, Role::Trainer)?;
        ResolvedComponents::from_ids(registry, &agent, &environment, &policy, &trainer)
    }
}
