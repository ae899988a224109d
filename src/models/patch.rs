//! Sparse update field.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single field of a sparse update.
///
/// A field missing from the JSON body deserializes to `Unchanged`; any present
/// value, including `null` for optional fields, becomes `Set`. Fields must be
/// annotated with `#[serde(default, skip_serializing_if = "Patch::is_unchanged")]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Unchanged,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unchanged
    }
}

impl<T> Patch<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Patch::Unchanged)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Unchanged => Patch::Unchanged,
            Patch::Set(value) => Patch::Set(f(value)),
        }
    }

    /// Overwrite `target` when the field is set.
    pub fn apply_to(self, target: &mut T) {
        if let Patch::Set(value) = self {
            *target = value;
        }
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Patch::Set(value)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Patch::Set)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Set(value) => value.serialize(serializer),
            Patch::Unchanged => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    struct Example {
        #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
        name: Patch<String>,
        #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
        note: Patch<Option<String>>,
    }

    #[test]
    fn test_missing_field_is_unchanged() {
        let example: Example = serde_json::from_str("{}").unwrap();
        assert_eq!(example.name, Patch::Unchanged);
        assert_eq!(example.note, Patch::Unchanged);
    }

    #[test]
    fn test_null_clears_optional_field() {
        let example: Example = serde_json::from_str(r#"{"note": null}"#).unwrap();
        assert_eq!(example.name, Patch::Unchanged);
        assert_eq!(example.note, Patch::Set(None));
    }

    #[test]
    fn test_value_sets_field() {
        let example: Example = serde_json::from_str(r#"{"name": "a", "note": "b"}"#).unwrap();
        assert_eq!(example.name, Patch::Set("a".to_string()));
        assert_eq!(example.note, Patch::Set(Some("b".to_string())));
    }

    #[test]
    fn test_unchanged_fields_are_skipped() {
        let example = Example {
            name: Patch::Unchanged,
            note: Patch::Set(None),
        };
        let json = serde_json::to_value(&example).unwrap();
        assert_eq!(json, serde_json::json!({ "note": null }));
    }

    #[test]
    fn test_apply_to() {
        let mut value = 1;
        Patch::Unchanged.apply_to(&mut value);
        assert_eq!(value, 1);
        Patch::Set(2).apply_to(&mut value);
        assert_eq!(value, 2);
    }
}
