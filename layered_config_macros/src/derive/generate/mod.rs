//! Code generation for the derives.
//!
//! Generated items live in an anonymous `const _: () = { ... };` block and
//! name every path absolutely, so expansion works whatever the caller has
//! in scope.

mod enumeration;
mod message;

pub(crate) use enumeration::enumeration;
pub(crate) use message::message;
