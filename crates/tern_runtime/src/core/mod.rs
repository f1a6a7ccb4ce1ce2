//! Core runtime types: values, the tracked object heap and lexical scopes.

pub mod heap;
pub mod scope;
pub mod value;

pub use value::Value;
