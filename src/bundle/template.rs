//! Default `config.json` content.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const DEFAULT_REMOTE: &str = "/storage/emulated/0/APIMock";
const DEFAULT_BASE: &str = "http://api.yourhost.com";
const DEFAULT_DELAY_MS: u64 = 500;

/// Shape of a freshly generated bundle descriptor.
///
/// Fields are declared in alphabetical order so the serialised document has
/// sorted keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleTemplate {
    /// Base URL of the mocked API.
    pub base: String,
    /// Artificial response delay in milliseconds.
    pub delay: u64,
    /// Deployment directory on the device.
    pub remote: String,
    /// Regex pattern to mock file, relative to the bundle directory.
    pub route: BTreeMap<String, String>,
}

impl Default for BundleTemplate {
    fn default() -> Self {
        Self {
            base: String::from(DEFAULT_BASE),
            delay: DEFAULT_DELAY_MS,
            remote: String::from(DEFAULT_REMOTE),
            route: BTreeMap::new(),
        }
    }
}

impl BundleTemplate {
    /// Render as pretty-printed JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns the serialiser error, which cannot occur for this type in
    /// practice.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut rendered = serde_json::to_string_pretty(self)?;
        rendered.push('\n');
        Ok(rendered)
    }
}
