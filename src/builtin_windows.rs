use crate::{
    importer::{
        roots::SearchRoots, source_profile::{ImportItems, ImporterType, SourceProfile}
    }, util::registry
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Data folder of the legacy (pre-Chromium) Edge app package.
pub fn edge_data_path(roots: &SearchRoots) -> Option<PathBuf> {
    Some(
        roots
            .local
            .as_ref()?
            .join("Packages")
            .join("Microsoft.MicrosoftEdge_8wekyb3d8bbwe")
            .join("AC")
            .join("MicrosoftEdge")
            .join("User")
            .join("Default")
    )
}

pub fn edge_can_import(windows_major_version: u32, data_path: Option<&Path>) -> bool {
    windows_major_version >= 10 && data_path.is_some_and(|p| p.is_dir())
}

pub fn ie_profile() -> SourceProfile {
    SourceProfile::new("Microsoft Internet Explorer", ImporterType::Ie).services(
        ImportItems::HISTORY
            | ImportItems::FAVORITES
            | ImportItems::PASSWORDS
            | ImportItems::SEARCH_ENGINES
    )
}

pub fn edge_profile(data_path: PathBuf) -> SourceProfile {
    SourceProfile::new("Microsoft Edge", ImporterType::Edge)
        .services(ImportItems::FAVORITES)
        .source_path(data_path)
}

/// IE is always there and has a single profile; Edge only shows up on Windows 10+.
pub fn detect_builtin_windows_profiles(roots: &SearchRoots) -> Vec<SourceProfile> {
    let mut profiles = Vec::with_capacity(2);

    let data_path = edge_data_path(roots);
    if edge_can_import(registry::windows_major_version(), data_path.as_deref())
        && let Some(data_path) = data_path
    {
        profiles.push(edge_profile(data_path));
    } else {
        debug!("Edge not importable");
    }

    profiles.push(ie_profile());
    profiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn edge_needs_windows_10_and_data() {
        let home = tempfile::tempdir().unwrap();
        let roots = SearchRoots::from_home(home.path());
        let path = edge_data_path(&roots).unwrap();

        assert!(!edge_can_import(10, Some(path.as_path())));

        fs::create_dir_all(&path).unwrap();
        assert!(edge_can_import(10, Some(path.as_path())));
        assert!(edge_can_import(11, Some(path.as_path())));
        assert!(!edge_can_import(6, Some(path.as_path())));
        assert!(!edge_can_import(10, None));
    }

    #[test]
    fn ie_is_always_last() {
        let home = tempfile::tempdir().unwrap();
        let profiles = detect_builtin_windows_profiles(&SearchRoots::from_home(home.path()));

        let ie = profiles.last().unwrap();
        assert_eq!(ie.importer_type, ImporterType::Ie);
        assert_eq!(ie.importer_name, "Microsoft Internet Explorer");
        assert!(ie.services_supported.contains(ImportItems::SEARCH_ENGINES));
        assert!(!ie.services_supported.contains(ImportItems::COOKIES));
    }

    #[test]
    fn edge_profile_points_at_data() {
        let edge = edge_profile(PathBuf::from("C:\\edge"));
        assert_eq!(edge.importer_type, ImporterType::Edge);
        assert_eq!(edge.services_supported, ImportItems::FAVORITES);
        assert_eq!(edge.source_path, Some(PathBuf::from("C:\\edge")));
    }
}
