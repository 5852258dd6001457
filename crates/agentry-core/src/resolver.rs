//! Component resolution - turning references into registered factories
//!
//! A reference is either a manifest file (scanned for the first declaration
//! satisfying the requested role) or a dotted identifier looked up directly
//! in the registry. Resolution is eager: every error here surfaces before
//! anything is instantiated.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AgentryError, Result};
use crate::manifest;
use crate::registry::{
    AgentFactory, EnvironmentFactory, PolicyFactory, Registry, TrainerFactory,
};
use crate::roles::Role;
use crate::strategy::RunContext;

/// Recognized manifest extension
pub const SOURCE_EXT: &str = "rs";

/// A resolvable pointer to a role implementation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentRef {
    /// A manifest file; resolves to its first declaration for the role
    File(PathBuf),
    /// A dotted identifier such as `environment.Corridor`
    Module(String),
}

impl ComponentRef {
    /// Classify a free-form token: an existing file (relative tokens are
    /// resolved against the context's workdir) or a dotted identifier
    pub fn parse(ctx: &RunContext, token: &str) -> Self {
        let path = ctx.resolve_path(token);
        if path.is_file() {
            ComponentRef::File(path)
        } else {
            ComponentRef::Module(token.to_string())
        }
    }

    /// Resolve this reference for `role`, returning the registry identifier
    pub fn resolve(&self, registry: &Registry, role: Role) -> Result<String> {
        match self {
            ComponentRef::File(path) => resolve_from_file(registry, path, role),
            ComponentRef::Module(dotted) => resolve_from_module(registry, dotted, role),
        }
    }
}

impl std::fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentRef::File(path) => write!(f, "{}", path.display()),
            ComponentRef::Module(dotted) => write!(f, "{dotted}"),
        }
    }
}

/// Resolve the first declaration in a manifest file that satisfies `role`.
///
/// Definition order in the file decides between several candidates for the
/// same role; extras are not an error.
pub fn resolve_from_file(registry: &Registry, path: &Path, role: Role) -> Result<String> {
    if !path.is_file() {
        return Err(AgentryError::InvalidReference {
            reference: path.display().to_string(),
            reason: "no such file".to_string(),
        });
    }
    if path.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXT) {
        return Err(AgentryError::InvalidReference {
            reference: path.display().to_string(),
            reason: format!("manifest files must have the .{SOURCE_EXT} extension"),
        });
    }

    let decls = manifest::scan_file(path)?;
    let decl = decls
        .into_iter()
        .find(|d| d.role == role)
        .ok_or_else(|| AgentryError::RoleNotFound {
            role,
            path: path.to_path_buf(),
        })?;

    debug!(%role, type_name = %decl.type_name, line = decl.line, "selected first matching declaration");

    let id = registry
        .find_by_type_name(role, &decl.type_name)
        .ok_or_else(|| AgentryError::Unresolved {
            id: decl.type_name.clone(),
            role,
            reason: format!(
                "declared in {} but no such {role} is registered",
                path.display()
            ),
        })?;
    Ok(id.to_string())
}

/// Resolve a dotted identifier directly against the registry
pub fn resolve_from_module(registry: &Registry, dotted: &str, role: Role) -> Result<String> {
    if dotted.is_empty() {
        return Err(AgentryError::InvalidReference {
            reference: dotted.to_string(),
            reason: "empty component reference".to_string(),
        });
    }
    if registry.contains(role, dotted) {
        Ok(dotted.to_string())
    } else {
        Err(AgentryError::Unresolved {
            id: dotted.to_string(),
            role,
            reason: format!("no registered {role} under this identifier"),
        })
    }
}

/// The four factories an assembled agent is built from
pub struct ResolvedComponents<'r> {
    pub agent: &'r dyn AgentFactory,
    pub environment: &'r dyn EnvironmentFactory,
    pub policy: &'r dyn PolicyFactory,
    pub trainer: &'r dyn TrainerFactory,
}

impl<'r> ResolvedComponents<'r> {
    /// Look up all four identifiers in the registry.
    ///
    /// The identifiers must already be resolved; missing entries mean the
    /// registry changed underneath us and are reported as unresolved.
    pub fn from_ids(
        registry: &'r Registry,
        agent: &str,
        environment: &str,
        policy: &str,
        trainer: &str,
    ) -> Result<Self> {
        let missing = |id: &str, role: Role| AgentryError::Unresolved {
            id: id.to_string(),
            role,
            reason: format!("no registered {role} under this identifier"),
        };
        Ok(Self {
            agent: registry
                .agent(agent)
                .ok_or_else(|| missing(agent, Role::Agent))?,
            environment: registry
                .environment(environment)
                .ok_or_else(|| missing(environment, Role::Environment))?,
            policy: registry
                .policy(policy)
                .ok_or_else(|| missing(policy, Role::Policy))?,
            trainer: registry
                .trainer(trainer)
                .ok_or_else(|| missing(trainer, Role::Trainer))?,
        })
    }
}
