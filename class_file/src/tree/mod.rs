//! The decoded representation of a class file.

pub mod class;
pub mod field;
pub mod method;
pub mod attribute;
pub mod version;
pub mod pool;
pub mod annotation;
pub mod type_annotation;
pub mod frame;
