use serde_json::Value;

use super::split::split_non_empty;
use super::types::{FieldMapping, MappedRecord, MappingDescriptor, PropertyBag, Shape};
use crate::error::{PeopleError, PeopleResult};

/// Populates records of any `MappedRecord` type from property bags of one shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordMapper {
    shape: Shape,
    name_fallback: bool,
}

impl RecordMapper {
    /// Create a mapper for bags of the given shape
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            name_fallback: false,
        }
    }

    /// Also fill fields that have no descriptor for this shape from a bag key
    /// equal to the field's published name. Off by default. A value that does
    /// not fit the field is skipped rather than reported.
    pub fn with_name_fallback(mut self, enabled: bool) -> Self {
        self.name_fallback = enabled;
        self
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Build a fresh `T` from `bag`.
    ///
    /// # Errors
    ///
    /// Returns `PeopleError::Configuration` if `T` declares no descriptor for
    /// this shape or a descriptor has a blank source key, and
    /// `PeopleError::TypeMismatch` if a present value cannot be assigned.
    pub fn map<T: MappedRecord>(&self, bag: &PropertyBag) -> PeopleResult<T> {
        let mappings = T::field_mappings();
        let declared = self.declared_fields(mappings)?;

        let mut record = T::create();
        for (mapping, descriptor) in declared {
            let Some(raw) = bag.get(descriptor.source_key()) else {
                continue;
            };

            if descriptor.try_split() {
                if let Some(values) = self.split_value(mapping, descriptor, raw)? {
                    let values = values.into_iter().map(Value::String).collect();
                    assign_field(&mut record, mapping, descriptor.source_key(), Value::Array(values))?;
                }
            } else {
                assign_field(&mut record, mapping, descriptor.source_key(), raw.clone())?;
            }
        }

        if self.name_fallback {
            for mapping in mappings.iter().filter(|m| m.descriptor(self.shape).is_none()) {
                let Some(raw) = bag.get(mapping.name()) else {
                    continue;
                };
                // A key that only matches by name is not worth failing the record over
                if let Err(e) = mapping.apply(&mut record, raw.clone()) {
                    crate::log_mapper_debug!(
                        "Skipping '{}' on {} by name: {}",
                        mapping.name(),
                        std::any::type_name::<T>(),
                        e
                    );
                } else {
                    crate::log_mapper_debug!(
                        "Filled '{}' by name on {}",
                        mapping.name(),
                        std::any::type_name::<T>()
                    );
                }
            }
        }

        Ok(record)
    }

    /// Fields of `T` that declare a descriptor for this shape, in order
    fn declared_fields<'a, T>(
        &self,
        mappings: &'a [FieldMapping<T>],
    ) -> PeopleResult<Vec<(&'a FieldMapping<T>, &'a MappingDescriptor)>> {
        let declared: Vec<_> = mappings
            .iter()
            .filter_map(|m| m.descriptor(self.shape).map(|d| (m, d)))
            .collect();

        if declared.is_empty() {
            return Err(PeopleError::Configuration(format!(
                "No {} mapping descriptors defined on {}",
                self.shape,
                std::any::type_name::<T>()
            )));
        }

        if let Some((mapping, _)) = declared
            .iter()
            .find(|(_, d)| d.source_key().trim().is_empty())
        {
            return Err(PeopleError::Configuration(format!(
                "Field '{}' on {} has an empty {} source key",
                mapping.name(),
                std::any::type_name::<T>(),
                self.shape
            )));
        }

        Ok(declared)
    }

    fn split_value<T>(
        &self,
        mapping: &FieldMapping<T>,
        descriptor: &MappingDescriptor,
        raw: &Value,
    ) -> PeopleResult<Option<Vec<String>>> {
        match raw {
            Value::String(s) => Ok(split_non_empty(Some(s.as_str()), self.shape.delimiter())),
            Value::Null => Ok(None),
            other => Err(PeopleError::TypeMismatch {
                field: mapping.name().to_string(),
                key: descriptor.source_key().to_string(),
                message: format!("expected a delimited string, found {}", value_kind(other)),
            }),
        }
    }
}

fn assign_field<T>(
    record: &mut T,
    mapping: &FieldMapping<T>,
    key: &str,
    value: Value,
) -> PeopleResult<()> {
    mapping
        .apply(record, value)
        .map_err(|e| PeopleError::TypeMismatch {
            field: mapping.name().to_string(),
            key: key.to_string(),
            message: e.to_string(),
        })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Build a fresh `T` from `bag` using the descriptors declared for `shape`
pub fn map_from_bag<T: MappedRecord>(bag: &PropertyBag, shape: Shape) -> PeopleResult<T> {
    RecordMapper::new(shape).map(bag)
}

/// Source keys `T` declares for `shape`, in declaration order
pub fn select_properties<T: MappedRecord>(shape: Shape) -> Vec<String> {
    T::field_mappings()
        .iter()
        .filter_map(|m| m.descriptor(shape))
        .map(|d| d.source_key().to_string())
        .collect()
}
