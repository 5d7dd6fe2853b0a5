//! Tag key policy.
//!
//! A wire key denotes a new tag purely by starting with the configured
//! prefix. A persisted key that happens to start with the prefix is
//! indistinguishable from a tag; `collides` only reports it.

/// Prefix/decoration rules for unsaved tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPolicy {
    prefix: String,
    decoration: String,
}

impl TagPolicy {
    pub fn new(prefix: impl Into<String>, decoration: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            decoration: decoration.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Wire key for an unsaved object labelled `label`.
    pub fn tag_key(&self, label: &str) -> String {
        format!("{}{label}", self.prefix)
    }

    /// Display label for an unsaved object.
    pub fn decorate(&self, label: &str) -> String {
        format!("{label}{}", self.decoration)
    }

    pub fn is_tag_key(&self, key: &str) -> bool {
        key.starts_with(self.prefix.as_str())
    }

    /// Returns the tag label when `key` carries the prefix.
    pub fn strip_tag<'k>(&self, key: &'k str) -> Option<&'k str> {
        key.strip_prefix(self.prefix.as_str())
    }

    /// Whether a persisted key would be read back as a tag.
    pub fn collides(&self, resolved_key: &str) -> bool {
        self.is_tag_key(resolved_key)
    }
}

#[cfg(test)]
mod tests {
    use super::TagPolicy;

    #[test]
    fn builds_and_strips_tag_keys() {
        let policy = TagPolicy::new("__", " (NEW)");
        assert_eq!(policy.tag_key("foo"), "__foo");
        assert_eq!(policy.decorate("foo"), "foo (NEW)");
        assert_eq!(policy.strip_tag("__foo"), Some("foo"));
        assert_eq!(policy.strip_tag("__"), Some(""));
        assert_eq!(policy.strip_tag("_foo"), None);
        assert_eq!(policy.strip_tag("42"), None);
    }

    #[test]
    fn prefix_match_is_byte_exact() {
        let policy = TagPolicy::new("new:", "*");
        assert!(policy.is_tag_key("new:rust"));
        assert!(!policy.is_tag_key("NEW:rust"));
        assert!(!policy.is_tag_key(" new:rust"));
    }

    #[test]
    fn persisted_key_starting_with_prefix_is_reported() {
        let policy = TagPolicy::new("__", " (NEW)");
        assert!(policy.collides("__legacy"));
        assert!(!policy.collides("17"));
    }
}
