use bitflags::bitflags;
use serde_json::{Value, json};
use std::{fmt::Display, path::PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImporterType {
    Ie,
    Edge,
    Firefox,
    Safari,
    Chrome,
    BookmarksFile
}

impl ImporterType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ie => "ie",
            Self::Edge => "edge",
            Self::Firefox => "firefox",
            Self::Safari => "safari",
            Self::Chrome => "chrome",
            Self::BookmarksFile => "bookmarks_file"
        }
    }

    /// Substrings of process names belonging to a running instance of this browser.
    /// Empty when there is nothing to lock (e.g. a bookmarks file).
    pub const fn process_names(self) -> &'static [&'static str] {
        match self {
            Self::Ie => &["iexplore"],
            Self::Edge => &["microsoftedge"],
            Self::Firefox => &["firefox", "iceweasel"],
            Self::Safari => &["safari"],
            Self::Chrome => &["chrome", "chromium"],
            Self::BookmarksFile => &[]
        }
    }
}

bitflags! {
    /// Kinds of data a source profile can hand over.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[repr(transparent)]
    pub struct ImportItems: u16 {
        const HISTORY            = 1 << 0;
        const FAVORITES          = 1 << 1;
        const COOKIES            = 1 << 2;
        const PASSWORDS          = 1 << 3;
        const SEARCH_ENGINES     = 1 << 4;
        const HOME_PAGE          = 1 << 5;
        const AUTOFILL_FORM_DATA = 1 << 6;
    }
}

impl ImportItems {
    pub fn names(self) -> Vec<String> {
        self.iter_names().map(|(name, _)| name.to_lowercase()).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InstalledVia {
    #[default]
    Local,
    Snap,
    Flatpak
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceProfile {
    pub importer_name: String,
    pub importer_type: ImporterType,
    pub source_path: Option<PathBuf>,
    pub app_path: Option<PathBuf>,
    pub services_supported: ImportItems,
    // Only Firefox cares, for its locale-specific search engines
    pub locale: Option<String>,
    pub installed_via: InstalledVia
}

impl SourceProfile {
    pub fn new(importer_name: impl Into<String>, importer_type: ImporterType) -> Self {
        Self {
            importer_name: importer_name.into(),
            importer_type,
            source_path: None,
            app_path: None,
            services_supported: ImportItems::empty(),
            locale: None,
            installed_via: InstalledVia::Local
        }
    }

    #[must_use]
    pub const fn services(mut self, services: ImportItems) -> Self {
        self.services_supported = services;
        self
    }

    #[must_use]
    pub fn source_path(mut self, path: PathBuf) -> Self {
        self.source_path = Some(path);
        self
    }

    #[must_use]
    pub fn app_path(mut self, path: Option<PathBuf>) -> Self {
        self.app_path = path;
        self
    }

    #[must_use]
    pub const fn installed_via(mut self, installed_via: InstalledVia) -> Self {
        self.installed_via = installed_via;
        self
    }

    #[must_use]
    pub fn locale(mut self, locale: &str) -> Self {
        self.locale = Some(locale.to_owned());
        self
    }

    pub fn to_json(&self) -> Value {
        json!({
            "name": self.importer_name,
            "type": self.importer_type.as_str(),
            "source_path": self.source_path.as_ref().map(|p| p.display().to_string()),
            "app_path": self.app_path.as_ref().map(|p| p.display().to_string()),
            "services": self.services_supported.names(),
            "locale": self.locale,
            "installed_via": self.installed_via.to_string()
        })
    }
}

impl Display for InstalledVia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "Local"),
            Self::Snap => write!(f, "Snap"),
            Self::Flatpak => write!(f, "Flatpak")
        }
    }
}

impl Display for SourceProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.importer_name)
    }
}
