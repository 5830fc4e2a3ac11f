use crate::importer::source_profile::ImporterType;
use inquire::error::InquireResult;
use std::{collections::HashSet, process};
use sysinfo::{ProcessRefreshKind, RefreshKind, System};
use tracing::{debug, instrument, warn};

pub mod logging;
pub mod registry;

fn matches_any(process_name: &str, needles: &[&str]) -> bool {
    let lower = process_name.to_lowercase();
    needles.iter().any(|n| lower.contains(n))
}

/// Names of running processes that look like `importer_type`, comma separated.
#[instrument(skip(system), level = "debug")]
pub fn running_instances(system: &mut System, importer_type: ImporterType) -> String {
    let needles = importer_type.process_names();
    if needles.is_empty() {
        return String::new();
    }

    system.refresh_specifics(RefreshKind::nothing().with_processes(ProcessRefreshKind::default()));
    let processes = system.processes();

    debug!("Found {} processes total", processes.len());

    let running = processes
        .values()
        .filter_map(|p| p.name().to_str())
        .filter(|name| matches_any(name, needles))
        .collect::<HashSet<_>>();

    let mut running = running.into_iter().collect::<Vec<_>>();
    running.sort_unstable();
    running.join(", ")
}

pub trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for InquireResult<T> {
    fn unwrap_or_exit(self) -> T {
        self.unwrap_or_else(|_| {
            warn!("User killed program");
            process::exit(1);
        })
    }
}
