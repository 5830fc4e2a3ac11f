mod profiles;
pub mod version;

use crate::{
    importer::{
        roots::SearchRoots, source_profile::{ImportItems, ImporterType, InstalledVia, SourceProfile}
    }, util::registry
};
use std::path::{Path, PathBuf};
use tracing::{debug, debug_span, instrument};

const SERVICES: ImportItems = ImportItems::HISTORY
    .union(ImportItems::FAVORITES)
    .union(ImportItems::PASSWORDS)
    .union(ImportItems::SEARCH_ENGINES)
    .union(ImportItems::AUTOFILL_FORM_DATA)
    .union(ImportItems::COOKIES);

fn local(roots: &SearchRoots) -> Option<PathBuf> {
    let base = roots.roaming.as_ref()?;
    if cfg!(target_os = "macos") {
        Some(base.join("Firefox"))
    } else if cfg!(target_os = "windows") {
        Some(base.join("Mozilla").join("Firefox"))
    } else {
        Some(base.join(".mozilla").join("firefox"))
    }
}

fn snap(roots: &SearchRoots) -> Option<PathBuf> {
    Some(roots.snap()?.join("firefox").join("common").join(".mozilla").join("firefox"))
}

fn flatpak(roots: &SearchRoots) -> Option<PathBuf> {
    Some(roots.flatpak()?.join("org.mozilla.firefox").join(".mozilla").join("firefox"))
}

pub fn profile_roots(roots: &SearchRoots) -> Vec<(InstalledVia, PathBuf)> {
    [
        (InstalledVia::Local, local(roots)),
        (InstalledVia::Snap, snap(roots)),
        (InstalledVia::Flatpak, flatpak(roots))
    ]
    .into_iter()
    .filter_map(|(via, path)| Some((via, path?)))
    .collect()
}

#[instrument(skip(roots), level = "debug")]
pub fn detect_firefox_profiles(roots: &SearchRoots, locale: &str) -> Vec<SourceProfile> {
    profile_roots(roots)
        .into_iter()
        .filter_map(|(installed_via, root)| {
            let span = debug_span!("firefox root", %installed_via, root = %root.display());
            let _enter = span.enter();
            detect_in_root(&root, installed_via, locale)
        })
        .collect()
}

fn detect_in_root(root: &Path, installed_via: InstalledVia, locale: &str) -> Option<SourceProfile> {
    let profiles_doc = match profiles::read_profiles_ini(root) {
        Ok(doc) => doc,
        Err(why) => {
            debug!(err = %why, "No usable profiles.ini");
            return None;
        }
    };

    let Some(profile_path) = profiles::default_profile_path(root, &profiles_doc) else {
        debug!("profiles.ini lists no profiles");
        return None;
    };

    // The registry only describes the regular installer
    let from_registry = installed_via == InstalledVia::Local;

    let mut version = if from_registry { registry::current_major_version() } else { 0 };
    let mut app_path = None;
    if version < 2 {
        match version::version_and_path_from_profile(&profile_path) {
            Ok((v, p)) => {
                version = v;
                app_path = p;
            }
            Err(why) => debug!(err = %why, "Failed to read Firefox version from profile")
        }
    }

    if version < 3 {
        debug!(version, "Ignoring old or unknown Firefox version");
        return None;
    }

    let mut name = String::from(version::importer_name(app_path.as_deref()));
    if installed_via != InstalledVia::Local {
        name = format!("{name} ({installed_via})");
    }

    let registry_app_path = if from_registry { registry::install_path() } else { None };

    debug!(%name, version, profile = %profile_path.display(), "Found Firefox profile");

    Some(
        SourceProfile::new(name, ImporterType::Firefox)
            .source_path(profile_path)
            .app_path(registry_app_path.or(app_path))
            .services(SERVICES)
            .installed_via(installed_via)
            .locale(locale)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_profile(root: &Path, version: &str) -> PathBuf {
        let profile = root.join("Profiles").join("abc.default-release");
        fs::create_dir_all(&profile).unwrap();
        fs::write(
            root.join("profiles.ini"),
            "[Profile0]\nName=default-release\nIsRelative=1\nPath=Profiles/abc.default-release\nDefault=1\n"
        )
        .unwrap();
        fs::write(
            profile.join("compatibility.ini"),
            format!("[Compatibility]\nLastVersion={version}\nLastPlatformDir=/usr/lib/firefox\n")
        )
        .unwrap();
        profile
    }

    #[test]
    fn detects_local_profile() {
        let home = tempfile::tempdir().unwrap();
        let roots = SearchRoots::from_home(home.path());
        let root = local(&roots).unwrap();
        let profile_path = write_profile(&root, "115.0_20230629134642/20230629134642");

        let found = detect_firefox_profiles(&roots, "de-DE");
        assert_eq!(found.len(), 1);

        let firefox = &found[0];
        assert_eq!(firefox.importer_type, ImporterType::Firefox);
        assert_eq!(firefox.importer_name, "Mozilla Firefox");
        assert_eq!(firefox.source_path.as_deref(), Some(profile_path.as_path()));
        assert_eq!(firefox.services_supported, SERVICES);
        assert_eq!(firefox.locale.as_deref(), Some("de-DE"));
        assert_eq!(firefox.installed_via, InstalledVia::Local);
        assert!(firefox.app_path.is_some());
    }

    #[test]
    fn old_firefox_is_ignored() {
        let home = tempfile::tempdir().unwrap();
        let roots = SearchRoots::from_home(home.path());
        write_profile(&local(&roots).unwrap(), "2.0.0.20");

        if !cfg!(target_os = "windows") {
            assert!(detect_firefox_profiles(&roots, "en-US").is_empty());
        }
    }

    #[test]
    fn nothing_installed_means_nothing_found() {
        let home = tempfile::tempdir().unwrap();
        let roots = SearchRoots::from_home(home.path());

        if !cfg!(target_os = "windows") {
            assert!(detect_firefox_profiles(&roots, "en-US").is_empty());
        }
    }

    #[test]
    fn missing_profile_dir_is_skipped() {
        let home = tempfile::tempdir().unwrap();
        let roots = SearchRoots::from_home(home.path());
        let root = local(&roots).unwrap();
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("profiles.ini"), "[Profile0]\nName=gone\nIsRelative=1\nPath=Profiles/gone\n")
            .unwrap();

        if !cfg!(target_os = "windows") {
            assert!(detect_firefox_profiles(&roots, "en-US").is_empty());
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn packaged_installs_are_labelled() {
        let home = tempfile::tempdir().unwrap();
        let roots = SearchRoots::from_home(home.path());
        write_profile(&flatpak(&roots).unwrap(), "128.0");
        write_profile(&snap(&roots).unwrap(), "127.0");

        let names = detect_firefox_profiles(&roots, "en-US")
            .into_iter()
            .map(|p| (p.importer_name, p.installed_via))
            .collect::<Vec<_>>();

        assert_eq!(
            names,
            vec![
                (String::from("Mozilla Firefox (Snap)"), InstalledVia::Snap),
                (String::from("Mozilla Firefox (Flatpak)"), InstalledVia::Flatpak)
            ]
        );
    }
}
