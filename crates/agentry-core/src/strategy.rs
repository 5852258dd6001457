//! Run strategy selection - what to do with 0, 1, or 2 run arguments
//!
//! The shape of the arguments, together with well-known files in the
//! working directory, decides between delegating to an external project
//! runner, extracting both roles from a single manifest, and resolving an
//! agent/environment pair.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AgentryError, Result};
use crate::resolver::ComponentRef;

/// Project descriptor; its presence delegates the whole run
pub const PROJECT_FILE: &str = "Cargo.toml";

/// Main-entry script used for delegation when no descriptor exists
pub const MAIN_ENTRY_FILE: &str = "main.rs";

/// Default agent definition used when nothing else is present
pub const AGENT_DEF_FILE: &str = "agent.rs";

/// Explicit resolution context; the working directory is always carried
/// here, never read implicitly inside the core
#[derive(Debug, Clone)]
pub struct RunContext {
    pub workdir: PathBuf,
}

impl RunContext {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Context for the process's current directory, read once at the edge
    pub fn current() -> Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// Resolve a possibly-relative token against the workdir
    pub fn resolve_path(&self, token: &str) -> PathBuf {
        let path = Path::new(token);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workdir.join(path)
        }
    }
}

/// The selected way of running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStrategy {
    /// Hand the whole run to the external project runner
    Delegate {
        dir: PathBuf,
        entry_point: Option<String>,
    },
    /// Extract one Agent and one Environment from a single manifest
    SingleFile { path: PathBuf },
    /// Independently resolved agent and environment references
    Pair {
        agent: ComponentRef,
        environment: ComponentRef,
    },
}

/// Select a strategy from the run arguments.
///
/// Fails with a usage error when the argument shape matches nothing.
pub fn select(ctx: &RunContext, args: &[String]) -> Result<RunStrategy> {
    match args {
        [] => select_in_dir(&ctx.workdir),
        [single] => {
            let path = ctx.resolve_path(single);
            if path.is_dir() {
                // Behave as a no-argument run inside that directory
                select_in_dir(&path)
            } else if path.is_file() {
                Ok(RunStrategy::SingleFile { path })
            } else {
                Err(AgentryError::Usage(format!(
                    "`{single}` is neither a directory nor a file; a single run \
                     argument must name one (the file should define your agent)"
                )))
            }
        }
        [agent, environment] => Ok(RunStrategy::Pair {
            agent: ComponentRef::parse(ctx, agent),
            environment: ComponentRef::parse(ctx, environment),
        }),
        _ => Err(AgentryError::Usage(
            "run takes 0, 1, or 2 arguments".to_string(),
        )),
    }
}

/// The no-argument rules, applied inside `dir`
fn select_in_dir(dir: &Path) -> Result<RunStrategy> {
    if dir.join(PROJECT_FILE).is_file() {
        debug!(dir = %dir.display(), "found project descriptor, delegating");
        return Ok(RunStrategy::Delegate {
            dir: dir.to_path_buf(),
            entry_point: None,
        });
    }
    if dir.join(MAIN_ENTRY_FILE).is_file() {
        debug!(dir = %dir.display(), "found main entry, delegating with entry point");
        return Ok(RunStrategy::Delegate {
            dir: dir.to_path_buf(),
            entry_point: Some(MAIN_ENTRY_FILE.to_string()),
        });
    }
    let agent_def = dir.join(AGENT_DEF_FILE);
    if agent_def.is_file() {
        return Ok(RunStrategy::SingleFile { path: agent_def });
    }
    Err(AgentryError::Usage(format!(
        "no runnable artifact in {}: expected one of {PROJECT_FILE}, \
         {MAIN_ENTRY_FILE}, or {AGENT_DEF_FILE}",
        dir.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn test_no_args_prefers_project_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), PROJECT_FILE);
        touch(dir.path(), MAIN_ENTRY_FILE);
        touch(dir.path(), AGENT_DEF_FILE);
        let ctx = RunContext::new(dir.path());

        let strategy = select(&ctx, &[]).unwrap();
        assert_eq!(
            strategy,
            RunStrategy::Delegate {
                dir: dir.path().to_path_buf(),
                entry_point: None,
            }
        );
    }

    #[test]
    fn test_no_args_falls_back_to_main_entry() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), MAIN_ENTRY_FILE);
        touch(dir.path(), AGENT_DEF_FILE);
        let ctx = RunContext::new(dir.path());

        let strategy = select(&ctx, &[]).unwrap();
        assert_eq!(
            strategy,
            RunStrategy::Delegate {
                dir: dir.path().to_path_buf(),
                entry_point: Some(MAIN_ENTRY_FILE.to_string()),
            }
        );
    }

    #[test]
    fn test_no_args_falls_through_to_agent_definition() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), AGENT_DEF_FILE);
        let ctx = RunContext::new(dir.path());

        let strategy = select(&ctx, &[]).unwrap();
        assert_eq!(
            strategy,
            RunStrategy::SingleFile {
                path: dir.path().join(AGENT_DEF_FILE),
            }
        );
    }

    #[test]
    fn test_no_args_empty_directory_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = RunContext::new(dir.path());

        let err = select(&ctx, &[]).unwrap_err();
        assert!(matches!(err, AgentryError::Usage(_)));
        assert!(err.to_string().contains("no runnable artifact"));
    }

    #[test]
    fn test_one_arg_directory_recurses() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("walker");
        std::fs::create_dir(&nested).unwrap();
        touch(&nested, AGENT_DEF_FILE);
        let ctx = RunContext::new(dir.path());

        let strategy = select(&ctx, &["walker".to_string()]).unwrap();
        assert_eq!(
            strategy,
            RunStrategy::SingleFile {
                path: nested.join(AGENT_DEF_FILE),
            }
        );
    }

    #[test]
    fn test_one_arg_file_is_single_file() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "custom.rs");
        let ctx = RunContext::new(dir.path());

        let strategy = select(&ctx, &["custom.rs".to_string()]).unwrap();
        assert_eq!(
            strategy,
            RunStrategy::SingleFile {
                path: dir.path().join("custom.rs"),
            }
        );
    }

    #[test]
    fn test_one_arg_missing_path_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = RunContext::new(dir.path());

        let err = select(&ctx, &["ghost.rs".to_string()]).unwrap_err();
        assert!(matches!(err, AgentryError::Usage(_)));
    }

    #[test]
    fn test_two_args_mixed_forms() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "agent.rs");
        let ctx = RunContext::new(dir.path());

        let strategy = select(
            &ctx,
            &["agent.rs".to_string(), "environment.Corridor".to_string()],
        )
        .unwrap();
        assert_eq!(
            strategy,
            RunStrategy::Pair {
                agent: ComponentRef::File(dir.path().join("agent.rs")),
                environment: ComponentRef::Module("environment.Corridor".to_string()),
            }
        );
    }

    #[test]
    fn test_three_args_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = RunContext::new(dir.path());
        let args: Vec<String> = ["a", "b", "c"].iter().map(ToString::to_string).collect();

        let err = select(&ctx, &args).unwrap_err();
        assert!(matches!(err, AgentryError::Usage(_)));
    }

    #[test]
    fn test_resolve_path_keeps_absolute_tokens() {
        let ctx = RunContext::new("/work");
        assert_eq!(ctx.resolve_path("/tmp/x.rs"), PathBuf::from("/tmp/x.rs"));
        assert_eq!(ctx.resolve_path("x.rs"), PathBuf::from("/work/x.rs"));
    }
}
