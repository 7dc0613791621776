mod record_mapper;
mod split;
pub mod types;

#[cfg(test)]
mod tests;

pub use record_mapper::{map_from_bag, select_properties, RecordMapper};
pub use split::split_non_empty;
pub use types::{assign, FieldMapping, FieldSetter, MappedRecord, MappingDescriptor, PropertyBag, Shape};
