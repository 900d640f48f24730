/// Maps relative path segments onto the remote destination prefix.
///
/// The mapping is a pure function: segments are joined with forward slashes
/// regardless of the local separator convention and appended to the prefix.
/// The prefix is either empty, the `./` marker, or a path ending in a single
/// `/`.
#[derive(Clone, Debug)]
pub struct DestMap {
    prefix: String,
}

impl DestMap {
    /// Builds a mapping onto `destination`.
    ///
    /// An empty or `./` destination is kept verbatim (the remote working
    /// directory); anything else is normalised to carry exactly one
    /// trailing slash.
    #[must_use]
    pub fn new<S: Into<String>>(destination: S) -> Self {
        let mut prefix = destination.into();
        if !prefix.is_empty() && prefix != "./" {
            while prefix.ends_with('/') {
                prefix.pop();
            }
            prefix.push('/');
        }
        Self { prefix }
    }

    /// Returns the destination prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Computes the remote path for an entry's relative segments.
    #[must_use]
    pub fn remote_path(&self, segments: &[String]) -> String {
        let mut path = self.prefix.clone();
        path.push_str(&segments.join("/"));
        path
    }
}
