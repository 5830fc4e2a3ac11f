use color_eyre::eyre::WrapErr;
use ini::{Ini, Properties};
use std::{
    fs, path::{Path, PathBuf}
};
use tracing::debug;

pub fn read_profiles_ini(root: &Path) -> color_eyre::Result<Ini> {
    let profiles_str =
        fs::read_to_string(root.join("profiles.ini")).wrap_err("Failed to read profiles.ini")?;
    Ini::load_from_str(&profiles_str).wrap_err("Failed to parse profiles.ini")
}

fn resolve(root: &Path, path: &str, is_relative: Option<&str>) -> PathBuf {
    let path = Path::new(path);
    match is_relative {
        Some("1") => root.join(path),
        Some(_) => path.to_path_buf(),
        None if path.is_absolute() => path.to_path_buf(),
        None => root.join(path)
    }
}

fn is_section(name: Option<&str>, prefix: &str) -> bool {
    name.is_some_and(|n| n.starts_with(prefix))
}

/// The profile Firefox would open by default, or `None` when `profiles.ini` lists none.
///
/// Firefox 67+ keeps a per-install default in `[Install<hash>]` sections, which wins over
/// the legacy `Default=1` flag. Without either, the first listed profile is used.
pub fn default_profile_path(root: &Path, profiles_doc: &Ini) -> Option<PathBuf> {
    let install_default = profiles_doc
        .iter()
        .filter(|(name, _)| is_section(*name, "Install"))
        .find_map(|(_, prop)| prop.get("Default"));

    if let Some(path) = install_default {
        debug!(path, "Using install default profile");
        return Some(resolve(root, path, None));
    }

    let profiles = profiles_doc
        .iter()
        .filter(|(name, _)| is_section(*name, "Profile"))
        .filter_map(|(_, prop)| Some((prop.get("Path")?, prop)))
        .collect::<Vec<(&str, &Properties)>>();

    debug!(len = %profiles.len(), "Profiles ini read");

    let (path, prop) = profiles
        .iter()
        .find(|(_, prop)| prop.get("Default").and_then(|d| d.parse::<u8>().ok()) == Some(1))
        .or_else(|| profiles.first())?;

    Some(resolve(root, path, prop.get("IsRelative")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Ini {
        Ini::load_from_str(s).unwrap()
    }

    #[test]
    fn install_section_wins() {
        let doc = parse(
            "[Install4F96D1932A9F858E]\nDefault=Profiles/abc.default-release\nLocked=1\n\n\
             [Profile0]\nName=default\nIsRelative=1\nPath=Profiles/xyz.default\nDefault=1\n"
        );

        let path = default_profile_path(Path::new("/ff"), &doc).unwrap();
        assert_eq!(path, PathBuf::from("/ff/Profiles/abc.default-release"));
    }

    #[test]
    fn default_flag_wins_over_order() {
        let doc = parse(
            "[General]\nStartWithLastProfile=1\n\n\
             [Profile0]\nName=one\nIsRelative=1\nPath=Profiles/one\n\n\
             [Profile1]\nName=two\nIsRelative=1\nPath=Profiles/two\nDefault=1\n"
        );

        let path = default_profile_path(Path::new("/ff"), &doc).unwrap();
        assert_eq!(path, PathBuf::from("/ff/Profiles/two"));
    }

    #[test]
    fn first_profile_is_the_fallback() {
        let doc = parse(
            "[Profile0]\nName=one\nIsRelative=1\nPath=Profiles/one\n\n\
             [Profile1]\nName=two\nIsRelative=1\nPath=Profiles/two\n"
        );

        let path = default_profile_path(Path::new("/ff"), &doc).unwrap();
        assert_eq!(path, PathBuf::from("/ff/Profiles/one"));
    }

    #[test]
    fn absolute_profiles_are_not_joined() {
        let doc = parse("[Profile0]\nName=abs\nIsRelative=0\nPath=/elsewhere/abs\n");

        let path = default_profile_path(Path::new("/ff"), &doc).unwrap();
        assert_eq!(path, PathBuf::from("/elsewhere/abs"));
    }

    #[test]
    fn no_profiles_means_none() {
        let doc = parse("[General]\nStartWithLastProfile=1\n");
        assert!(default_profile_path(Path::new("/ff"), &doc).is_none());
    }

    #[test]
    fn missing_ini_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_profiles_ini(dir.path()).is_err());
    }
}
