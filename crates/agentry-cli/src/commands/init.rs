//! Scaffold agent directories
//!
//! Writes an `agent.toml` bound to the builtin component set and a demo
//! manifest as a starting point for custom components.

use std::path::{Path, PathBuf};

use agentry_core::config::AGENT_CONFIG_FILE;
use agentry_core::strategy::{RunContext, AGENT_DEF_FILE};
use anyhow::{bail, Context, Result};
use chrono::Utc;

pub fn run(ctx: &RunContext, dir_names: &[PathBuf], agent_name: &str) -> Result<()> {
    validate_agent_name(agent_name)?;

    let dirs: Vec<PathBuf> = if dir_names.is_empty() {
        vec![ctx.workdir.clone()]
    } else {
        dir_names.iter().map(|d| ctx.resolve_path(&d.to_string_lossy())).collect()
    };

    let header = format!(
        "Generated by `agentry init` on {}.",
        Utc::now().format("%b %d, %Y %H:%M:%S")
    );

    for dir in &dirs {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("cannot create {}", dir.display()))?;
        write_scaffold(dir, agent_name, &header)?;

        let shown = if *dir == ctx.workdir {
            "current working directory".to_string()
        } else {
            dir.display().to_string()
        };
        println!("Finished initializing agent '{agent_name}' in {shown}.");
    }

    Ok(())
}

/// Agent names become component identifier segments
fn validate_agent_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains([' ', ':', '/']) {
        bail!("agent name may not be empty or contain ' ', ':', or '/'");
    }
    Ok(())
}

fn write_scaffold(dir: &Path, agent_name: &str, header: &str) -> Result<()> {
    let config = format!(
        r#"# {header}

[agent]
class = "agent.{agent_name}"

[environment]
class = "environment.Corridor"

[policy]
class = "policy.RandomPolicy"

[trainer]
class = "trainer.NoOpTrainer"
"#
    );
    std::fs::write(dir.join(AGENT_CONFIG_FILE), config)
        .with_context(|| format!("cannot write {AGENT_CONFIG_FILE} in {}", dir.display()))?;

    let manifest = format!(
        r"// {header}
//
// Role declarations for this directory. `agentry run` scans the impl
// headers below; the named types must be compiled into the component
// registry to be runnable.

pub struct {agent_name};

impl Agent for {agent_name} {{}}

pub struct Corridor;

impl Environment for Corridor {{}}
"
    );
    std::fs::write(dir.join(AGENT_DEF_FILE), manifest)
        .with_context(|| format!("cannot write {AGENT_DEF_FILE} in {}", dir.display()))?;

    Ok(())
}
