//! Compat module - Type compatibility checking across schema versions.
//!
//! Every schema in a sequence is walked into one shared [`TypeRegistry`].
//! The first schema to declare a `type` at a field path owns that path; any
//! later declaration of a different type at the same path is an
//! [`Incompatibility`].

mod checker;
mod incompatibility;
mod registry;
mod walker;

#[cfg(test)]
mod checker_test;

pub use checker::*;
pub use incompatibility::*;
pub use registry::*;
pub use walker::{is_combinator, COMBINATORS, ITEMS_KEY, TYPE_KEY};
