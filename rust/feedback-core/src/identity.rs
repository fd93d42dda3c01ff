//! Identity Gate: the self-asserted display name
//!
//! A name is captured once per device and never re-prompted.

use std::fmt;

/// Local storage key holding the display name
pub const NAME_STORAGE_KEY: &str = "feedback_telegram_name";

/// A non-empty, trimmed display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Device-local persistence for the display name
pub trait NameStore {
    fn load(&self) -> Option<String>;
    fn save(&self, name: &DisplayName) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    /// No stored name: submission is blocked and the modal is shown
    #[default]
    Anonymous,
    Known(DisplayName),
}

impl Identity {
    /// Read the stored name once at startup.
    pub fn resolve(store: &impl NameStore) -> Self {
        match store.load().as_deref().and_then(DisplayName::parse) {
            Some(name) => Identity::Known(name),
            None => Identity::Anonymous,
        }
    }

    pub fn name(&self) -> Option<&DisplayName> {
        match self {
            Identity::Known(name) => Some(name),
            Identity::Anonymous => None,
        }
    }

    pub fn needs_prompt(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryNames {
        value: RefCell<Option<String>>,
    }

    impl NameStore for MemoryNames {
        fn load(&self) -> Option<String> {
            self.value.borrow().clone()
        }

        fn save(&self, name: &DisplayName) -> Result<(), String> {
            *self.value.borrow_mut() = Some(name.as_str().to_string());
            Ok(())
        }
    }

    #[test]
    fn test_parse_trims_and_rejects_blank() {
        assert_eq!(DisplayName::parse("  @alice ").unwrap().as_str(), "@alice");
        assert!(DisplayName::parse("").is_none());
        assert!(DisplayName::parse(" \t\n").is_none());
    }

    #[test]
    fn test_resolve_without_stored_name_prompts() {
        let store = MemoryNames::default();
        let identity = Identity::resolve(&store);
        assert!(identity.needs_prompt());
        assert!(identity.name().is_none());
    }

    #[test]
    fn test_resolve_with_stored_name() {
        let store = MemoryNames::default();
        store.save(&DisplayName::parse("@bob").unwrap()).unwrap();
        let identity = Identity::resolve(&store);
        assert!(!identity.needs_prompt());
        assert_eq!(identity.name().unwrap().to_string(), "@bob");
    }

    #[test]
    fn test_blank_stored_name_counts_as_missing() {
        let store = MemoryNames::default();
        *store.value.borrow_mut() = Some("   ".to_string());
        assert_eq!(Identity::resolve(&store), Identity::Anonymous);
    }
}
