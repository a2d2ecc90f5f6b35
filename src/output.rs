use colored::Colorize;

use crate::{
    commands::{InitOutcome, ListOutcome, RemoveOutcome},
    error::AppError,
    storage::{GlobalIndex, IndexUpdate},
};

/// Prints the status lines of an init run
pub fn print_init(outcome: &InitOutcome, index: &GlobalIndex) {
    match outcome {
        InitOutcome::AlreadyExists { config_path } => {
            println!("{} {}", "git profile already exists:".green(), config_path.display());
        }
        InitOutcome::Created {
            config_path,
            index_update,
        } => {
            println!("{} {}", "created".green(), config_path.display());
            match index_update {
                IndexUpdate::Created | IndexUpdate::Appended => println!(
                    "{} {} {}",
                    "updated".green(),
                    index.path().display(),
                    "to include this profile".green()
                ),
                IndexUpdate::AlreadyPresent => println!(
                    "{} {}",
                    "profile already included in".green(),
                    index.path().display()
                ),
            }
        }
    }
}

/// Prints configured profiles, one `- <dir>: <name> <<email>>` line each
pub fn print_list(outcome: &ListOutcome) {
    match outcome {
        ListOutcome::NoIndex => println!("{}", "no git profiles configured".yellow()),
        ListOutcome::Empty => println!("{}", "no folder-specific git profiles found".yellow()),
        ListOutcome::Profiles(entries) => {
            println!("{}", "configured git profiles:".blue());
            for entry in entries {
                println!("- {entry}");
            }
        }
    }
}

/// Renders configured profiles as pretty JSON, `[]` when there are none
pub fn list_json(outcome: &ListOutcome) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(outcome.entries())?)
}

/// Prints configured profiles as pretty JSON
pub fn print_list_json(outcome: &ListOutcome) -> Result<(), AppError> {
    println!("{}", list_json(outcome)?);
    Ok(())
}

/// Prints what a remove run deleted; silent when nothing was found
pub fn print_remove(outcome: &RemoveOutcome, index: &GlobalIndex) {
    if outcome.local_removed {
        println!("{} {}", "removed".green(), outcome.config_path.display());
    }
    if outcome.index_updated {
        println!("{} {}", "removed profile from".green(), index.path().display());
    }
}
