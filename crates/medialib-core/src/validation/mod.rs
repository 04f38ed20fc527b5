//! Validation modules

pub mod fields;

pub use fields::{
    is_reserved_field_name, validate_field_name, validate_locale_code, validate_table_name,
    MAX_FIELD_NAME_LENGTH, MAX_TABLE_NAME_LENGTH,
};
