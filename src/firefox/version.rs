use color_eyre::eyre::{ContextCompat, WrapErr};
use ini::Ini;
use std::{
    fs, path::{Path, PathBuf}
};
use tracing::{debug, instrument};

/// Leading integer of a Firefox version string, `52.0_20170303022339/...` => 52.
pub fn parse_major_version(version: &str) -> Option<u32> {
    let digits = version.trim().split(|c: char| !c.is_ascii_digit()).next()?;
    digits.parse().ok()
}

/// Reads the version and application directory Firefox last ran this profile with.
#[instrument(level = "debug")]
pub fn version_and_path_from_profile(
    profile_path: &Path
) -> color_eyre::Result<(u32, Option<PathBuf>)> {
    let compat_str = fs::read_to_string(profile_path.join("compatibility.ini"))
        .wrap_err("Failed to read compatibility.ini")?;
    let compat = Ini::load_from_str(&compat_str).wrap_err("Failed to parse compatibility.ini")?;

    let section = compat
        .section(Some("Compatibility"))
        .context("No Compatibility section in compatibility.ini")?;

    let version = section.get("LastVersion").and_then(parse_major_version).unwrap_or_default();
    let app_path = section.get("LastPlatformDir").filter(|p| !p.is_empty()).map(PathBuf::from);

    debug!(version, app_path = ?app_path, "Read compatibility.ini");
    Ok((version, app_path))
}

/// Debian ships a rebranded Firefox; tell the two apart by the app's own metadata.
pub fn importer_name(app_path: Option<&Path>) -> &'static str {
    let name = app_path
        .and_then(|p| Ini::load_from_file(p.join("application.ini")).ok())
        .and_then(|doc| doc.get_from(Some("App"), "Name").map(str::to_owned));

    match name {
        Some(name) if name.eq_ignore_ascii_case("iceweasel") => "Iceweasel",
        _ => "Mozilla Firefox"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_versions() {
        assert_eq!(parse_major_version("52.0_20170303022339/20170303022339"), Some(52));
        assert_eq!(parse_major_version("128.3.1esr"), Some(128));
        assert_eq!(parse_major_version("2"), Some(2));
        assert_eq!(parse_major_version("beta"), None);
        assert_eq!(parse_major_version(""), None);
    }

    #[test]
    fn reads_compatibility_ini() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("compatibility.ini"),
            "[Compatibility]\nLastVersion=115.0_20230629134642/20230629134642\n\
             LastOSABI=Linux_x86_64-gcc3\nLastPlatformDir=/usr/lib/firefox\n"
        )
        .unwrap();

        let (version, app_path) = version_and_path_from_profile(dir.path()).unwrap();
        assert_eq!(version, 115);
        assert_eq!(app_path, Some(PathBuf::from("/usr/lib/firefox")));
    }

    #[test]
    fn unparsable_version_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("compatibility.ini"), "[Compatibility]\nLastVersion=abc\n")
            .unwrap();

        let (version, app_path) = version_and_path_from_profile(dir.path()).unwrap();
        assert_eq!(version, 0);
        assert!(app_path.is_none());
    }

    #[test]
    fn missing_compatibility_ini_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(version_and_path_from_profile(dir.path()).is_err());
    }

    #[test]
    fn iceweasel_is_recognized() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("application.ini"), "[App]\nVendor=Mozilla\nName=Iceweasel\n")
            .unwrap();

        assert_eq!(importer_name(Some(dir.path())), "Iceweasel");
        assert_eq!(importer_name(None), "Mozilla Firefox");
    }

    #[test]
    fn plain_firefox_keeps_default_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("application.ini"), "[App]\nVendor=Mozilla\nName=Firefox\n")
            .unwrap();

        assert_eq!(importer_name(Some(dir.path())), "Mozilla Firefox");
    }
}
