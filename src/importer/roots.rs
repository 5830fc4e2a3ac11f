use std::path::{Path, PathBuf};

/// Base directories every detector resolves its browser folders against.
#[derive(Clone, Debug, Default)]
pub struct SearchRoots {
    pub home: Option<PathBuf>,
    // %APPDATA% / ~/Library/Application Support / ~
    pub roaming: Option<PathBuf>,
    // %LOCALAPPDATA% / ~/Library/Application Support / ~/.config
    pub local: Option<PathBuf>,
    // ~/Library, macOS only
    pub library: Option<PathBuf>
}

impl SearchRoots {
    pub fn from_system() -> Self {
        let home = dirs::home_dir();

        let roaming = if cfg!(any(target_os = "macos", target_os = "windows")) {
            dirs::data_dir()
        } else {
            home.clone()
        };

        let local = if cfg!(any(target_os = "macos", target_os = "windows")) {
            dirs::data_local_dir()
        } else {
            dirs::config_local_dir()
        };

        let library = if cfg!(target_os = "macos") {
            home.as_ref().map(|h| h.join("Library"))
        } else {
            None
        };

        Self { home, roaming, local, library }
    }

    /// Same layout as [`SearchRoots::from_system`], but rooted at `home` instead of the
    /// current user's home directory.
    pub fn from_home(home: &Path) -> Self {
        let (roaming, local, library) = if cfg!(target_os = "windows") {
            let app_data = home.join("AppData");
            (app_data.join("Roaming"), app_data.join("Local"), None)
        } else if cfg!(target_os = "macos") {
            let library = home.join("Library");
            let support = library.join("Application Support");
            (support.clone(), support, Some(library))
        } else {
            (home.to_path_buf(), home.join(".config"), None)
        };

        Self {
            home: Some(home.to_path_buf()),
            roaming: Some(roaming),
            local: Some(local),
            library
        }
    }

    #[rustfmt::skip]
    pub fn snap(&self) -> Option<PathBuf> {
        if cfg!(target_os = "linux") {
            self.home.as_ref().map(|p| p.join("snap"))
        } else {
            None
        }
    }

    #[rustfmt::skip]
    pub fn flatpak(&self) -> Option<PathBuf> {
        if cfg!(target_os = "linux") {
            self.home.as_ref().map(|p| p.join(".var").join("app"))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_home_keeps_everything_under_home() {
        let home = PathBuf::from("/home/someone");
        let roots = SearchRoots::from_home(&home);

        assert_eq!(roots.home.as_deref(), Some(home.as_path()));
        assert!(roots.roaming.unwrap().starts_with(&home));
        assert!(roots.local.unwrap().starts_with(&home));
        if let Some(library) = roots.library {
            assert!(library.starts_with(&home));
        }
    }

    #[test]
    fn packaged_roots_only_exist_on_linux() {
        let roots = SearchRoots::from_home(Path::new("/home/someone"));
        if cfg!(target_os = "linux") {
            assert_eq!(roots.snap(), Some(PathBuf::from("/home/someone/snap")));
            assert_eq!(roots.flatpak(), Some(PathBuf::from("/home/someone/.var/app")));
        } else {
            assert!(roots.snap().is_none());
            assert!(roots.flatpak().is_none());
        }
    }

    #[test]
    fn empty_roots_resolve_nothing() {
        let roots = SearchRoots::default();
        assert!(roots.snap().is_none());
        assert!(roots.flatpak().is_none());
    }
}
