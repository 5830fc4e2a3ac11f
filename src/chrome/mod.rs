mod local_state;

use crate::importer::{
    roots::SearchRoots, source_profile::{ImportItems, ImporterType, InstalledVia, SourceProfile}
};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, debug_span, instrument, warn};

pub struct UserDataFolder {
    pub brand: &'static str,
    pub installed_via: InstalledVia,
    pub path: PathBuf
}

impl UserDataFolder {
    const fn new(brand: &'static str, installed_via: InstalledVia, path: PathBuf) -> Self {
        Self { brand, installed_via, path }
    }
}

/// Chromium user data folders to scan, in the order their profiles are reported.
pub fn user_data_folders(roots: &SearchRoots) -> Vec<UserDataFolder> {
    let mut ret = Vec::with_capacity(4);

    if let Some(local) = &roots.local {
        if cfg!(target_os = "windows") {
            let google = local.join("Google");
            ret.push(UserDataFolder::new(
                "Chrome ",
                InstalledVia::Local,
                google.join("Chrome").join("User Data")
            ));
            ret.push(UserDataFolder::new(
                "Chrome Canary ",
                InstalledVia::Local,
                google.join("Chrome SxS").join("User Data")
            ));
            ret.push(UserDataFolder::new(
                "Chromium ",
                InstalledVia::Local,
                local.join("Chromium").join("User Data")
            ));
        } else if cfg!(target_os = "macos") {
            let google = local.join("Google");
            ret.push(UserDataFolder::new("Chrome ", InstalledVia::Local, google.join("Chrome")));
            ret.push(UserDataFolder::new(
                "Chrome Canary ",
                InstalledVia::Local,
                google.join("Chrome Canary")
            ));
            ret.push(UserDataFolder::new("Chromium ", InstalledVia::Local, local.join("Chromium")));
        } else {
            // No Canary channel on Linux
            ret.push(UserDataFolder::new("Chrome ", InstalledVia::Local, local.join("google-chrome")));
            ret.push(UserDataFolder::new("Chromium ", InstalledVia::Local, local.join("chromium")));
        }
    }

    if let Some(snap) = roots.snap() {
        ret.push(UserDataFolder::new(
            "Chromium (Snap) ",
            InstalledVia::Snap,
            snap.join("chromium").join("common").join("chromium")
        ));
    }

    if let Some(flatpak) = roots.flatpak() {
        ret.push(UserDataFolder::new(
            "Chromium (Flatpak) ",
            InstalledVia::Flatpak,
            flatpak.join("org.chromium.Chromium").join("config").join("chromium")
        ));
    }

    ret
}

/// What a single Chromium profile directory holds that could be imported.
pub fn can_import(profile: &Path) -> ImportItems {
    let mut items = ImportItems::empty();

    if profile.join("Bookmarks").is_file() {
        items |= ImportItems::FAVORITES;
    }
    if profile.join("History").is_file() {
        items |= ImportItems::HISTORY;
    }
    if profile.join("Login Data").is_file() {
        items |= ImportItems::PASSWORDS;
    }
    // Newer builds moved cookies under Network/
    if profile.join("Cookies").is_file() || profile.join("Network").join("Cookies").is_file() {
        items |= ImportItems::COOKIES;
    }

    items
}

/// Profile ids come from `Local State` and must name a directory directly inside the
/// user data folder.
fn is_plain_dir_name(id: &str) -> bool {
    let mut components = Path::new(id).components();
    matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}

fn add_chrome_profiles(profiles: &mut Vec<SourceProfile>, folder: &UserDataFolder) {
    if !folder.path.is_dir() {
        return;
    }

    let span = debug_span!("chrome user data", brand = folder.brand.trim_end());
    let _enter = span.enter();

    for entry in local_state::source_profiles(&folder.path) {
        if !is_plain_dir_name(&entry.id) {
            warn!(profile = %entry.id, "Skipping malformed profile id in Local State");
            continue;
        }

        let profile_path = folder.path.join(&entry.id);
        let items = can_import(&profile_path);
        if items.is_empty() {
            debug!(profile = %entry.id, "Nothing to import from profile");
            continue;
        }

        debug!(profile = %entry.id, name = %entry.name, ?items, "Found Chrome profile");
        profiles.push(
            SourceProfile::new(format!("{}{}", folder.brand, entry.name), ImporterType::Chrome)
                .services(items)
                .source_path(profile_path)
                .installed_via(folder.installed_via)
        );
    }
}

#[instrument(skip(roots), level = "debug")]
pub fn detect_chrome_profiles(roots: &SearchRoots) -> Vec<SourceProfile> {
    let mut profiles = Vec::new();
    for folder in user_data_folders(roots) {
        add_chrome_profiles(&mut profiles, &folder);
    }
    profiles
}
