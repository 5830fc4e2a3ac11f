mod builtin_windows;
mod chrome;
mod firefox;
mod importer;
mod safari;
mod util;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{WrapErr, eyre};
use importer::{DetectOptions, ImporterList, roots::SearchRoots, source_profile::SourceProfile};
use owo_colors::OwoColorize;
use std::{
    path::PathBuf, sync::{OnceLock, mpsc}
};
use sysinfo::System;
use tracing::{debug, info, warn};
use util::{UnwrapOrExit, logging::success};

#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Args {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Application locale passed on to Firefox profiles
    #[clap(long, default_value = "en-US")]
    pub locale: String,

    /// Also list sources that need user interaction (a bookmarks HTML file)
    #[clap(short, long, default_value_t = false)]
    pub interactive: bool,

    /// Treat Firefox as the default browser, listing it first
    #[clap(long, default_value_t = false)]
    pub firefox_default: bool,

    /// Scan this directory as if it were the user's home
    #[clap(long)]
    pub home: Option<PathBuf>,

    /// Print the detected profiles as JSON
    #[clap(long, default_value_t = false)]
    pub json: bool,

    /// Pick one profile to import from
    #[clap(short, long, default_value_t = false)]
    pub select: bool,

    /// Assume yes to all prompts
    #[clap(short = 'Y', long, default_value_t = false)]
    pub auto_confirm: bool
}

pub static ARGS: OnceLock<Args> = OnceLock::new();

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = ARGS.get_or_init(Args::parse);
    util::logging::setup_logging(args)?;
    debug!(?args, "Parsed arguments");

    let roots = args.home.as_deref().map_or_else(SearchRoots::from_system, SearchRoots::from_home);
    let options = DetectOptions {
        locale: args.locale.clone(),
        include_interactive_profiles: args.interactive,
        firefox_is_default: args.firefox_default
    };

    let list = ImporterList::new();
    let (tx, rx) = mpsc::channel();
    let handle = list.detect_source_profiles(roots, options, move || {
        let _ = tx.send(());
    })?;

    rx.recv().wrap_err("Detection finished without reporting back")?;
    handle.join().map_err(|_| eyre!("Detection thread panicked"))?;

    if list.count() == 0 {
        warn!("No browser profiles to import from");
        return Ok(());
    }

    if args.json {
        let json = list.source_profiles().iter().map(SourceProfile::to_json).collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        print_profiles(&list);
    }

    if args.select {
        select_source(args, list.source_profiles());
    }

    Ok(())
}

fn print_profiles(list: &ImporterList) {
    for (i, profile) in (0..list.count()).filter_map(|i| Some((i, list.source_profile_at(i)?))) {
        println!(
            "{} {} {}",
            format!("{i:>2}.").dimmed(),
            profile.importer_name.bold(),
            format!("[{}]", profile.services_supported.names().join(", ")).cyan()
        );

        if let Some(path) = &profile.source_path {
            println!("      {}", path.display().dimmed());
        }
    }
}

fn select_source(args: &Args, mut profiles: Vec<SourceProfile>) {
    // The first profile is the user's default source
    let profile = if args.auto_confirm || profiles.len() == 1 {
        profiles.remove(0)
    } else {
        inquire::Select::new("Which browser do you want to import from?", profiles)
            .prompt()
            .unwrap_or_exit()
    };

    let mut system = System::new();
    let running = util::running_instances(&mut system, profile.importer_type);
    if !running.is_empty() {
        warn!("Close {profile} before importing, it is still running ({running})");

        let should_continue = args.auto_confirm
            || inquire::prompt_confirmation("Continue anyway? (y/n)").unwrap_or_exit();
        if !should_continue {
            info!("Import cancelled");
            return;
        }
    }

    success(&format!("Importing from {profile}"));
}
