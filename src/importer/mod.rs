pub mod roots;
pub mod source_profile;

use crate::{builtin_windows, chrome, firefox, safari};
use color_eyre::eyre::WrapErr;
use roots::SearchRoots;
use source_profile::{ImportItems, ImporterType, SourceProfile};
use std::{
    sync::{Arc, PoisonError, RwLock, Weak}, thread, thread::JoinHandle
};
use tracing::{debug, info, instrument};

#[derive(Clone, Debug)]
pub struct DetectOptions {
    /// Application locale, handed to Firefox for its locale-specific search engines.
    pub locale: String,
    /// Also offer sources that need user interaction, i.e. picking a bookmarks file.
    pub include_interactive_profiles: bool,
    /// Put Firefox first, since the first detected profile is treated as the user's default.
    pub firefox_is_default: bool
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            locale: String::from("en-US"),
            include_interactive_profiles: false,
            firefox_is_default: false
        }
    }
}

fn bookmarks_file_profile() -> SourceProfile {
    SourceProfile::new("Bookmarks HTML File", ImporterType::BookmarksFile)
        .services(ImportItems::FAVORITES)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Other
}

impl Platform {
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Other
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Detector {
    BuiltinWindows,
    Safari,
    Firefox,
    Chrome
}

impl Detector {
    fn detect(self, roots: &SearchRoots, options: &DetectOptions) -> Vec<SourceProfile> {
        match self {
            Self::BuiltinWindows => builtin_windows::detect_builtin_windows_profiles(roots),
            Self::Safari => safari::detect_safari_profiles(roots).into_iter().collect(),
            Self::Firefox => firefox::detect_firefox_profiles(roots, &options.locale),
            Self::Chrome => chrome::detect_chrome_profiles(roots)
        }
    }
}

/// Detectors to run, in order. The first profile found is taken as the user's current
/// default, so the default browser's detector goes first. Chrome is only scanned on
/// Windows and macOS when Firefox is not the default.
pub fn detectors(platform: Platform, firefox_is_default: bool) -> Vec<Detector> {
    let builtin = match platform {
        Platform::Windows => Some(Detector::BuiltinWindows),
        Platform::MacOs => Some(Detector::Safari),
        Platform::Other => None
    };

    match builtin {
        Some(builtin) if firefox_is_default => vec![Detector::Firefox, builtin],
        Some(builtin) => vec![builtin, Detector::Firefox, Detector::Chrome],
        None => vec![Detector::Firefox, Detector::Chrome]
    }
}

/// Finds every source profile on this machine. Blocks on filesystem (and registry) access.
pub fn detect_source_profiles_worker(
    roots: &SearchRoots,
    options: &DetectOptions
) -> Vec<SourceProfile> {
    detect_source_profiles_on(Platform::current(), roots, options)
}

#[instrument(skip(roots), level = "debug")]
fn detect_source_profiles_on(
    platform: Platform,
    roots: &SearchRoots,
    options: &DetectOptions
) -> Vec<SourceProfile> {
    let mut profiles = Vec::new();
    for detector in detectors(platform, options.firefox_is_default) {
        profiles.extend(detector.detect(roots, options));
    }

    if options.include_interactive_profiles {
        profiles.push(bookmarks_file_profile());
    }

    debug!(len = %profiles.len(), "Detected source profiles");
    profiles
}

/// Source profiles a one-time import could be started from.
///
/// Detection runs on a background thread; results land here once it finishes.
#[derive(Debug, Default)]
pub struct ImporterList {
    source_profiles: Arc<RwLock<Vec<SourceProfile>>>
}

impl ImporterList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts detection on a background thread. `profiles_loaded` runs once the results
    /// have been stored, unless this list was dropped first, in which case the results are
    /// thrown away and `profiles_loaded` never runs.
    pub fn detect_source_profiles<F>(
        &self,
        roots: SearchRoots,
        options: DetectOptions,
        profiles_loaded: F
    ) -> color_eyre::Result<JoinHandle<()>>
    where
        F: FnOnce() + Send + 'static
    {
        let list = Arc::downgrade(&self.source_profiles);

        thread::Builder::new()
            .name(String::from("importer-detect"))
            .spawn(move || {
                let profiles = detect_source_profiles_worker(&roots, &options);
                Self::source_profiles_loaded(&list, profiles, profiles_loaded);
            })
            .wrap_err("Failed to spawn detection thread")
    }

    fn source_profiles_loaded<F: FnOnce()>(
        list: &Weak<RwLock<Vec<SourceProfile>>>,
        profiles: Vec<SourceProfile>,
        profiles_loaded: F
    ) {
        let Some(list) = list.upgrade() else {
            debug!("Importer list went away before detection finished");
            return;
        };

        info!(len = %profiles.len(), "Source profiles loaded");
        *list.write().unwrap_or_else(PoisonError::into_inner) = profiles;
        drop(list);

        profiles_loaded();
    }

    pub fn count(&self) -> usize {
        self.source_profiles.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn source_profile_at(&self, index: usize) -> Option<SourceProfile> {
        self.source_profiles.read().unwrap_or_else(PoisonError::into_inner).get(index).cloned()
    }

    pub fn source_profiles(&self) -> Vec<SourceProfile> {
        self.source_profiles.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
