use std::path::Path;

use crate::cli::output;
use crate::config::app_config::DEFAULT_CONFIG;
use crate::core::errors::{OrderTrailError, Result};

/// Execute the `ordertrail init` command.
///
/// Creates the data directory with a default `config.toml` and an
/// empty `snapshots/` directory.
pub fn execute(dir: &Path, verbose: bool) -> Result<()> {
    if dir.join("config.toml").exists() {
        return Err(OrderTrailError::InvalidConfig {
            detail: format!(
                "ordertrail is already initialized ({} exists)",
                dir.join("config.toml").display()
            ),
        });
    }

    output::header("ordertrail: initializing");

    std::fs::create_dir_all(dir.join("snapshots"))?;
    output::success(&format!("Created {}/", dir.display()));

    std::fs::write(dir.join("config.toml"), DEFAULT_CONFIG)?;
    output::success("Generated config.toml with defaults");

    output::success("Ready.\n");
    print_next_steps(verbose);

    Ok(())
}

fn print_next_steps(verbose: bool) {
    println!("  Next steps:");
    println!("     1. Run 'ordertrail snapshot <order> --file <order.json>' before an update");
    println!("     2. Run 'ordertrail commit <order> --file <order.json>' after it");
    println!("     3. Run 'ordertrail log' to review the changes");

    if verbose {
        println!();
        println!("  Files created:");
        println!("     config.toml   tracking, retention and log settings");
        println!("     snapshots/    pending before-update snapshots");
    }
}
