use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

/// A named path prefix usable in the inventory's `content` template.
#[derive(Clone, Debug)]
pub struct Variable {
    /// Human-readable label shown in the usage listing.
    pub description: String,
    /// The path the variable expands to.
    pub path: String,
}

/// Builds the built-in variable dictionary for a given home directory.
#[must_use]
pub fn builtin(home: &Path) -> BTreeMap<String, Variable> {
    let home_str = home.to_string_lossy();
    BTreeMap::from([
        (
            "@HOME".to_owned(),
            Variable {
                description: "User Home".to_owned(),
                path: home_str.clone().into_owned(),
            },
        ),
        (
            "@DESK".to_owned(),
            Variable {
                description: "Desktop".to_owned(),
                path: format!("{home_str}/Desktop"),
            },
        ),
        (
            "@DOCS".to_owned(),
            Variable {
                description: "Documents".to_owned(),
                path: format!("{home_str}/Documents"),
            },
        ),
    ])
}

/// Expands every `@Word` token in `template`.
///
/// Known tokens substitute their dictionary path; unknown tokens degrade to
/// the token text without the leading `@`.
#[must_use]
pub fn expand(template: &str, variables: &BTreeMap<String, Variable>) -> String {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    let token = TOKEN.get_or_init(|| Regex::new("@[A-Za-z]+").expect("static pattern compiles"));

    token
        .replace_all(template, |captures: &regex::Captures<'_>| {
            let matched = &captures[0];
            variables
                .get(matched)
                .map_or_else(|| matched[1..].to_owned(), |variable| variable.path.clone())
        })
        .into_owned()
}
