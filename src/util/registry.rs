use std::path::PathBuf;

#[cfg(target_os = "windows")]
const FIREFOX_KEY: &str = "Software\\Mozilla\\Mozilla Firefox";

/// Highest Firefox major version registered for the current user or the machine, 0 if none.
#[cfg(target_os = "windows")]
pub fn current_major_version() -> u32 {
    use windows_registry::{CURRENT_USER, LOCAL_MACHINE};

    [CURRENT_USER, LOCAL_MACHINE]
        .into_iter()
        .filter_map(|hive| hive.open(FIREFOX_KEY).ok()?.get_string("CurrentVersion").ok())
        .filter_map(|v| crate::firefox::version::parse_major_version(&v))
        .max()
        .unwrap_or_default()
}

#[cfg(not(target_os = "windows"))]
pub const fn current_major_version() -> u32 {
    0
}

#[cfg(target_os = "windows")]
pub fn install_path() -> Option<PathBuf> {
    use windows_registry::{CURRENT_USER, LOCAL_MACHINE};

    [CURRENT_USER, LOCAL_MACHINE].into_iter().find_map(|hive| {
        let version = hive.open(FIREFOX_KEY).ok()?.get_string("CurrentVersion").ok()?;
        let main = hive.open(format!("{FIREFOX_KEY}\\{version}\\Main")).ok()?;
        main.get_string("Install Directory").ok().map(PathBuf::from)
    })
}

#[cfg(not(target_os = "windows"))]
pub const fn install_path() -> Option<PathBuf> {
    None
}

/// Major version of the running Windows, 0 when unknown.
#[cfg(target_os = "windows")]
pub fn windows_major_version() -> u32 {
    windows_registry::LOCAL_MACHINE
        .open("SOFTWARE\\Microsoft\\Windows NT\\CurrentVersion")
        .and_then(|key| key.get_u32("CurrentMajorVersionNumber"))
        .unwrap_or_default()
}

#[cfg(not(target_os = "windows"))]
pub const fn windows_major_version() -> u32 {
    0
}
