//! List registered components by role

use agentry_core::{Registry, Role};
use anyhow::Result;

pub fn run() -> Result<()> {
    let registry = Registry::with_builtins();

    for role in Role::ALL {
        println!("{role}:");
        let ids = registry.ids(role);
        if ids.is_empty() {
            println!("  (none)");
        } else {
            for id in ids {
                println!("  {id}");
            }
        }
        println!();
    }

    Ok(())
}
