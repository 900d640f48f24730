use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced to the user by the ferry frontend.
#[derive(Debug, Error)]
pub enum CliError {
    /// The user home directory could not be determined.
    #[error("could not determine the user home directory")]
    NoHome,

    /// The inventory file could not be read.
    #[error("failed to read inventory '{path}': {source}")]
    InventoryRead {
        /// Inventory path that failed.
        path: PathBuf,
        /// Underlying operating-system error.
        source: io::Error,
    },

    /// The inventory file is not valid TOML.
    #[error("failed to parse inventory '{path}': {source}")]
    InventoryParse {
        /// Inventory path that failed.
        path: PathBuf,
        /// Parser diagnostics.
        source: toml::de::Error,
    },

    /// The requested server is not in the inventory.
    #[error("server '{name}' is not in the inventory")]
    UnknownServer {
        /// Name given on the command line.
        name: String,
    },

    /// TCP connection to the server failed.
    #[error("failed to connect to '{address}': {source}")]
    Connect {
        /// host:port that was dialled.
        address: String,
        /// Underlying socket error.
        source: io::Error,
    },

    /// SSH handshake, authentication, or SFTP subsystem setup failed.
    #[error("ssh session with '{address}' failed: {source}")]
    Ssh {
        /// host:port the session was negotiated with.
        address: String,
        /// libssh2 diagnostics.
        source: ssh2::Error,
    },

    /// The transfer itself failed.
    #[error(transparent)]
    Transfer(#[from] transfer::TransferError),
}
