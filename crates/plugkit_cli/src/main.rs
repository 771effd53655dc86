//! Contribution manifest checker.
//!
//! # Responsibility
//! - Load one contributions JSON document and report whether it is valid.
//! - Keep output deterministic so it can be diffed in CI.

use log::error;
use plugkit_core::ContributionPoints;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = plugkit_core::init_logging_from_env() {
        eprintln!("plugkit: logging disabled: {err}");
    }

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: plugkit_cli <contributions.json>");
        println!("plugkit_core version={}", plugkit_core::core_version());
        return ExitCode::from(2);
    };

    match ContributionPoints::from_path(&path) {
        Ok(points) => {
            println!("status=ok path={}", path.display());
            println!("commands={}", points.commands().len());
            println!("readers={}", points.readers().len());
            println!("writers={}", points.writers().len());
            println!("widgets={}", points.widgets().len());
            println!("sample_data={}", points.sample_data().len());
            println!("themes={}", points.themes().len());
            println!("menus={}", points.menus.len());
            println!("submenus={}", points.submenus().len());
            println!("keybindings={}", points.keybindings().len());
            println!("configuration={}", points.configuration.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(
                "event=cli_check module=cli status=error path={}",
                path.display()
            );
            eprintln!("status=error path={} error={err}", path.display());
            ExitCode::FAILURE
        }
    }
}
