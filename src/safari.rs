use crate::importer::{
    roots::SearchRoots, source_profile::{ImportItems, ImporterType, SourceProfile}
};
use std::path::Path;
use tracing::{debug, instrument};
#[cfg(target_os = "macos")]
use tracing::warn;

// Reading ~/Library/Safari needs Full Disk Access, so an unreadable plist still counts
#[cfg(target_os = "macos")]
fn bookmarks_present(bookmarks: &Path) -> bool {
    if !bookmarks.is_file() {
        return false;
    }

    if let Err(why) = plist::Value::from_file(bookmarks) {
        warn!(
            err = %why,
            "Failed to read Safari's Bookmarks.plist, Full Disk Access may be required to import"
        );
    }

    true
}

#[cfg(not(target_os = "macos"))]
fn bookmarks_present(bookmarks: &Path) -> bool {
    bookmarks.is_file()
}

/// What Safari data under `library` (usually `~/Library`) could be imported.
pub fn can_import(library: &Path) -> ImportItems {
    let safari = library.join("Safari");
    let mut items = ImportItems::empty();

    if bookmarks_present(&safari.join("Bookmarks.plist")) {
        items |= ImportItems::FAVORITES;
    }
    // History.plist predates Safari 8
    if safari.join("History.db").is_file() || safari.join("History.plist").is_file() {
        items |= ImportItems::HISTORY;
    }

    items
}

#[instrument(skip(roots), level = "debug")]
pub fn detect_safari_profiles(roots: &SearchRoots) -> Option<SourceProfile> {
    let library = roots.library.as_ref()?;
    let items = can_import(library);
    if items.is_empty() {
        debug!("Nothing to import from Safari");
        return None;
    }

    Some(SourceProfile::new("Safari", ImporterType::Safari).services(items))
}
