#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! Skip rules for the ferry upload engine. A matched path is never
//! transferred in any mode, neither as an individual remote entry nor as an
//! archive member. Matched directories are still descended into, so a skip
//! decision only suppresses the transfer of the matched entry itself.
//!
//! Two rules exist, both fixed substring tests over the local path string:
//!
//! - version-control metadata: any path containing [`GIT_MARKER`], unless it
//!   also contains [`GIT_MARKER_EXCEPTION`]. The exception is a literal
//!   carve-out for one known directory name that merely ends in the marker
//!   text; it is deliberately not a general rule.
//! - the tool's own inventory file: any path containing
//!   [`INVENTORY_MARKER`].

/// Substring identifying version-control metadata.
pub const GIT_MARKER: &str = ".git";

/// Literal exception: a name ending in the marker text that is not
/// version-control metadata and must still transfer.
pub const GIT_MARKER_EXCEPTION: &str = "com.git";

/// The inventory file ferry reads its server dictionary from; it carries
/// credentials and is never transferred.
pub const INVENTORY_MARKER: &str = ".inventory.toml";

/// Reports whether `path` must be excluded from every transfer mode.
#[must_use]
pub fn is_skipped(path: &str) -> bool {
    (path.contains(GIT_MARKER) && !path.contains(GIT_MARKER_EXCEPTION))
        || path.contains(INVENTORY_MARKER)
}
