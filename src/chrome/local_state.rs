use color_eyre::eyre::{ContextCompat, WrapErr, bail};
use serde_json::{Map, Value};
use std::{fs, path::Path};
use tracing::{debug, instrument};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChromeProfileEntry {
    pub id: String,
    pub name: String
}

impl ChromeProfileEntry {
    fn default_profile() -> Self {
        Self { id: String::from("Default"), name: String::from("Default") }
    }

    // Default, Profile 1, Profile 2, ..., Profile 10, then anything else
    fn order_key(&self) -> (u8, u32, &str) {
        if self.id == "Default" {
            return (0, 0, &self.id);
        }

        match self.id.strip_prefix("Profile ").and_then(|n| n.parse().ok()) {
            Some(n) => (1, n, &self.id),
            None => (2, 0, &self.id)
        }
    }
}

#[instrument(level = "debug")]
pub fn get_local_state(user_data: &Path) -> color_eyre::Result<Map<String, Value>> {
    let local_state_str = fs::read_to_string(user_data.join("Local State"))
        .wrap_err("Failed to read Local State")?;

    let Value::Object(local_state) =
        serde_json::from_str::<Value>(&local_state_str).wrap_err("Failed to parse Local State")?
    else {
        bail!("Failed to cast Local State to object");
    };

    Ok(local_state)
}

fn info_cache_entries(local_state: &Map<String, Value>) -> color_eyre::Result<Vec<ChromeProfileEntry>> {
    let info_cache = local_state
        .get("profile")
        .and_then(Value::as_object)
        .context("Failed to get profile object")?
        .get("info_cache")
        .and_then(Value::as_object)
        .context("Failed to get info_cache object")?;

    debug!(len = %info_cache.len(), "Initial info_cache object");

    let mut entries = info_cache
        .iter()
        .filter_map(|(id, o)| {
            let name = o.as_object()?.get("name").and_then(Value::as_str)?;
            Some(ChromeProfileEntry { id: id.clone(), name: name.to_owned() })
        })
        .collect::<Vec<_>>();

    entries.sort_by(|a, b| a.order_key().cmp(&b.order_key()));
    Ok(entries)
}

/// Every profile a Chromium user data folder knows about. Without a readable
/// `Local State`, assume the single profile Chromium creates on first run.
pub fn source_profiles(user_data: &Path) -> Vec<ChromeProfileEntry> {
    match get_local_state(user_data).and_then(|ls| info_cache_entries(&ls)) {
        Ok(entries) => entries,
        Err(why) => {
            debug!(err = %why, "Falling back to the default profile");
            vec![ChromeProfileEntry::default_profile()]
        }
    }
}
