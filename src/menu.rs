use std::{env, path::Path};

use colored::Colorize;
use inquire::Select;

use crate::{
    commands::{init_profile, list_profiles, remove_profile, ProfileEntry},
    error::AppError,
    output::{print_init, print_list, print_remove},
    prompt::InquirePrompter,
    storage::GlobalIndex,
    BACK_OPTION,
};

/// Runs interactive menu interface
pub fn run_menu(index: &GlobalIndex) -> Result<(), AppError> {
    loop {
        let actions: Vec<&'static str> = vec![
            "set up profile here",
            "list profiles",
            "remove profile",
            "quit",
        ];

        let action_selected: &'static str = Select::new(&format!("{}", "select action".blue()), actions)
            .prompt()?;

        match action_selected {
            "set up profile here" => menu_init_profile(index)?,
            "list profiles" => print_list(&list_profiles(index)?),
            "remove profile" => menu_remove_profile(index)?,
            "quit" => {
                println!("{}", "quitting".yellow());
                break Ok(());
            },
            _ => unreachable!("unexpected input"),
        }
    }
}

/// Menu for setting up a profile in the current folder
fn menu_init_profile(index: &GlobalIndex) -> Result<(), AppError> {
    let directory = env::current_dir()?;
    let outcome = init_profile(&directory, index, &mut InquirePrompter)?;
    print_init(&outcome, index);
    Ok(())
}

/// Menu for removing a configured profile
fn menu_remove_profile(index: &GlobalIndex) -> Result<(), AppError> {
    let outcome = list_profiles(index)?;
    if outcome.entries().is_empty() {
        println!("{}", "no profiles to remove".red());
        return Ok(());
    }

    let directories: Vec<String> = build_directory_list(outcome.entries());
    let directory_to_remove: String = Select::new(&format!("{}", "select profile to remove:".blue()), directories)
        .prompt()?;

    if directory_to_remove != BACK_OPTION {
        let outcome = remove_profile(Path::new(&directory_to_remove), index)?;
        print_remove(&outcome, index);
    }

    Ok(())
}

/// Builds list of profile directories for menu to display
pub fn build_directory_list(entries: &[ProfileEntry]) -> Vec<String> {
    let mut directories: Vec<String> = entries.iter()
        .map(|entry| entry.directory.clone())
        .collect();
    directories.push(BACK_OPTION.to_string());
    directories
}
