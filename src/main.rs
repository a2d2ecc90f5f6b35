use std::{env, process};

use clap::Parser;
use colored::Colorize;

use gitfolder::{
    cli::{Cli, Commands},
    init_profile, list_profiles,
    menu::run_menu,
    output::{print_init, print_list, print_list_json, print_remove},
    remove_profile, AppError, GlobalIndex, InquirePrompter, Settings,
};

// Main
fn main() {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{}", err.to_string().red());
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let settings = Settings::resolve(cli.global_config)?;
    let index = GlobalIndex::new(settings.global_config);

    match cli.command {
        Some(Commands::Init) => {
            let directory = env::current_dir()?;
            let outcome = init_profile(&directory, &index, &mut InquirePrompter)?;
            print_init(&outcome, &index);
        }
        Some(Commands::List { json }) => {
            let outcome = list_profiles(&index)?;
            if json {
                print_list_json(&outcome)?;
            } else {
                print_list(&outcome);
            }
        }
        Some(Commands::Remove { dir }) => {
            let outcome = remove_profile(&dir, &index)?;
            print_remove(&outcome, &index);
        }
        None => run_menu(&index)?,
    }

    Ok(())
}
