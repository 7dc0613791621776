use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// A loosely typed result row: property key to raw value.
///
/// Values are JSON strings or typed scalars (numbers, booleans, null).
pub type PropertyBag = HashMap<String, Value>;

/// Writes a raw bag value into one field of a record.
pub type FieldSetter<T> = fn(&mut T, Value) -> serde_json::Result<()>;

/// Which of the two bag formats is being mapped
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// A row returned by a people keyword search
    Search,
    /// The property set of a single user profile
    Profile,
}

impl Shape {
    /// Delimiter used by this source for multi-valued properties
    pub fn delimiter(&self) -> char {
        match self {
            Shape::Search => ';',
            Shape::Profile => '|',
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Search => write!(f, "search"),
            Shape::Profile => write!(f, "profile"),
        }
    }
}

/// Source key and split behaviour of one field for one shape
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MappingDescriptor {
    source_key: String,
    try_split: bool,
}

impl MappingDescriptor {
    pub fn new(source_key: impl Into<String>, try_split: bool) -> Self {
        Self {
            source_key: source_key.into(),
            try_split,
        }
    }

    /// Key to look up in the incoming bag
    pub fn source_key(&self) -> &str {
        &self.source_key
    }

    /// Whether the raw value is a delimited string to split into a list
    pub fn try_split(&self) -> bool {
        self.try_split
    }
}

/// Mapping metadata for one field of a record type.
///
/// A field may carry independent descriptors for the search and profile
/// shapes, since the same attribute often lives under different keys.
pub struct FieldMapping<T> {
    name: &'static str,
    search: Option<MappingDescriptor>,
    profile: Option<MappingDescriptor>,
    setter: FieldSetter<T>,
}

impl<T> FieldMapping<T> {
    /// Create a mapping for the field published as `name`, with no descriptors yet
    pub fn new(name: &'static str, setter: FieldSetter<T>) -> Self {
        Self {
            name,
            search: None,
            profile: None,
            setter,
        }
    }

    pub fn search(mut self, source_key: &str) -> Self {
        self.search = Some(MappingDescriptor::new(source_key, false));
        self
    }

    pub fn search_split(mut self, source_key: &str) -> Self {
        self.search = Some(MappingDescriptor::new(source_key, true));
        self
    }

    pub fn profile(mut self, source_key: &str) -> Self {
        self.profile = Some(MappingDescriptor::new(source_key, false));
        self
    }

    pub fn profile_split(mut self, source_key: &str) -> Self {
        self.profile = Some(MappingDescriptor::new(source_key, true));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Descriptor declared for `shape`, if any
    pub fn descriptor(&self, shape: Shape) -> Option<&MappingDescriptor> {
        match shape {
            Shape::Search => self.search.as_ref(),
            Shape::Profile => self.profile.as_ref(),
        }
    }

    /// Write `value` into the field of `record`
    pub fn apply(&self, record: &mut T, value: Value) -> serde_json::Result<()> {
        (self.setter)(record, value)
    }
}

impl<T> fmt::Debug for FieldMapping<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMapping")
            .field("name", &self.name)
            .field("search", &self.search)
            .field("profile", &self.profile)
            .finish()
    }
}

/// A record type that can be populated from a property bag.
pub trait MappedRecord: Sized + 'static {
    /// Fresh instance with every field at its default
    fn create() -> Self;

    /// Field mappings of this type, in declaration order
    fn field_mappings() -> &'static [FieldMapping<Self>];
}

/// Deserialize `value` into `slot`, replacing what was there.
///
/// Used as the body of field setters; a value of the wrong type is an error,
/// never coerced.
pub fn assign<F: DeserializeOwned>(slot: &mut F, value: Value) -> serde_json::Result<()> {
    *slot = serde_json::from_value(value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct Sample {
        name: Option<String>,
    }

    #[test]
    fn test_shape_delimiters() {
        assert_eq!(Shape::Search.delimiter(), ';');
        assert_eq!(Shape::Profile.delimiter(), '|');
        assert_eq!(Shape::Profile.to_string(), "profile");
    }

    #[test]
    fn test_field_mapping_descriptors() {
        let mapping =
            FieldMapping::<Sample>::new("Name", |p, v| assign(&mut p.name, v))
                .search("PreferredName")
                .profile_split("SPS-Name");

        let search = mapping.descriptor(Shape::Search).unwrap();
        assert_eq!(search.source_key(), "PreferredName");
        assert!(!search.try_split());

        let profile = mapping.descriptor(Shape::Profile).unwrap();
        assert_eq!(profile.source_key(), "SPS-Name");
        assert!(profile.try_split());
    }

    #[test]
    fn test_apply_assigns_and_rejects_mismatch() {
        let mapping =
            FieldMapping::<Sample>::new("Name", |p, v| assign(&mut p.name, v)).search("Name");
        let mut sample = Sample::default();

        mapping.apply(&mut sample, json!("Ada")).unwrap();
        assert_eq!(sample.name.as_deref(), Some("Ada"));

        assert!(mapping.apply(&mut sample, json!(42)).is_err());
    }
}
