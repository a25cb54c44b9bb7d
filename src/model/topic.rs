//! Topics: the content themes a project plans around.

use serde::{Deserialize, Serialize};

/// A content theme with a priority rank and a target share of output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub slug: String,

    /// Rank, 1 = highest.
    pub priority: i32,

    /// Target share of all planned output, 0–100.
    ///
    /// Targets across a project are expected to sum to about 100,
    /// but nothing enforces it.
    pub target_percentage: f64,
}

/// Derive a URL slug from a topic name: lowercase ASCII alphanumerics
/// separated by single dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("SEO  Tips & Tricks"), "seo-tips-tricks");
    }

    #[test]
    fn slugify_trims_edges() {
        assert_eq!(slugify("  --Local Marketing!  "), "local-marketing");
    }

    #[test]
    fn slugify_empty_for_symbols_only() {
        assert_eq!(slugify("&&&"), "");
    }
}
