use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::CliError;

/// The server dictionary ferry reads from `~/.inventory.toml`.
///
/// The filename doubles as the transfer skip marker
/// ([`filters::INVENTORY_MARKER`]): the file carries credentials and must
/// never be mirrored, even when it sits inside a transferred tree.
#[derive(Debug, Deserialize)]
pub struct Inventory {
    /// Template for the local content root; may contain `@` path variables.
    pub content: String,
    /// Known servers, keyed by the name given on the command line.
    #[serde(default)]
    pub servers: BTreeMap<String, ServerConfig>,
}

/// Connection and layout settings for one remote server.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    /// Host to connect to (port 22).
    pub uri: String,
    /// Login user.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Free-form note shown in the usage listing.
    #[serde(default)]
    pub description: String,
    /// Subdirectory of the content root this server's sources live under.
    #[serde(default)]
    pub path_prefix: String,
    /// Remote directory uploads land in; empty means the login directory.
    #[serde(default)]
    pub dest_prefix: String,
}

/// Loads and parses the inventory at `path`.
pub fn load(path: &Path) -> Result<Inventory, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::InventoryRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| CliError::InventoryParse {
        path: path.to_path_buf(),
        source,
    })
}
