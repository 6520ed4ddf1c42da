//! Ordered, case-insensitive header collection.
//!
//! Headers keep their insertion order so that serialized messages are
//! deterministic. Field names compare ASCII case-insensitively; the stored
//! spelling is the one used when the field was first inserted.
//!
//! # Tombstones
//!
//! Setting an existing field to `None` clears its value but keeps the entry
//! in place. The entry then reads as absent, is skipped when a message is
//! built, and is revived at its original position by a later `set`. Setting
//! a field that does not exist yet to `None` does nothing.
//!
//! ```rust
//! use libiot_http::Headers;
//!
//! let mut headers = Headers::new();
//! headers.insert("Content-Type", "application/json");
//! headers.insert("X-Device", "pms5003st");
//!
//! assert_eq!(headers.get("content-type"), Some("application/json"));
//!
//! headers.set("CONTENT-TYPE", None);
//! assert_eq!(headers.get("Content-Type"), None);
//! assert_eq!(headers.len(), 2);
//! assert_eq!(headers.iter().count(), 1);
//! ```

use alloc::string::String;
use alloc::vec::Vec;

/// A single header entry. `value` is `None` for a tombstoned entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// The field name, as first inserted.
    pub field: String,
    /// The field value, or `None` when the entry has been cleared.
    pub value: Option<String>,
}

/// An ordered collection of HTTP header fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<Header>,
}

impl Headers {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets `field` to `value`, replacing the value of an existing field in
    /// place. See the [module docs](self) for how `None` behaves.
    pub fn set(&mut self, field: &str, value: Option<&str>) {
        if let Some(entry) = self.entry_mut(field) {
            entry.value = value.map(String::from);
            return;
        }
        if let Some(value) = value {
            self.entries.push(Header {
                field: String::from(field),
                value: Some(String::from(value)),
            });
        }
    }

    /// Shorthand for `set(field, Some(value))`.
    pub fn insert(&mut self, field: &str, value: &str) {
        self.set(field, Some(value));
    }

    /// Returns the value of `field`, if present and not cleared.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.field.eq_ignore_ascii_case(field))
            .and_then(|entry| entry.value.as_deref())
    }

    /// Whether `field` is present with a value.
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Iterates `(field, value)` pairs in insertion order, skipping cleared
    /// entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|entry| {
            entry
                .value
                .as_deref()
                .map(|value| (entry.field.as_str(), value))
        })
    }

    /// All entries, including cleared ones.
    pub fn entries(&self) -> &[Header] {
        &self.entries
    }

    /// Number of entries, including cleared ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn entry_mut(&mut self, field: &str) -> Option<&mut Header> {
        self.entries
            .iter_mut()
            .find(|entry| entry.field.eq_ignore_ascii_case(field))
    }
}
