//! Compatibility checking over an ordered sequence of schemas.

use super::walker::Walker;
use super::TypeRegistry;
use crate::error::Result;
use crate::value::SchemaNode;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// CheckOptions controls how schemas are walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckOptions {
    /// Collapse every position of a tuple-style `items` list onto one path.
    ///
    /// When false, each position is tracked separately under
    /// `items[<position>]`.
    pub ignore_index: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        CheckOptions { ignore_index: true }
    }
}

/// CheckerBuilder is a builder for creating a Checker.
#[derive(Debug, Default)]
pub struct CheckerBuilder {
    options: CheckOptions,
}

impl CheckerBuilder {
    /// Creates a new CheckerBuilder with default options.
    pub fn new() -> Self {
        CheckerBuilder::default()
    }

    /// Sets whether tuple positions share one path.
    pub fn ignore_index(mut self, value: bool) -> Self {
        self.options.ignore_index = value;
        self
    }

    /// Builds the Checker.
    pub fn build(self) -> Checker {
        Checker {
            options: self.options,
        }
    }
}

/// Checker verifies that no field path changes its declared type across an
/// ordered sequence of schemas.
#[derive(Debug, Clone, Default)]
pub struct Checker {
    options: CheckOptions,
}

impl Checker {
    /// Creates a checker with default options.
    pub fn new() -> Self {
        Checker::default()
    }

    /// Creates a new CheckerBuilder.
    pub fn builder() -> CheckerBuilder {
        CheckerBuilder::new()
    }

    /// Creates a checker from explicit options.
    pub fn with_options(options: CheckOptions) -> Self {
        Checker { options }
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Checks `schemas` in order and returns every declared type.
    ///
    /// Schema `i` of the slice is reported as schema `i`. The first conflict
    /// aborts the check.
    pub fn check(&self, schemas: &[SchemaNode]) -> Result<TypeRegistry> {
        let mut registry = TypeRegistry::new();
        self.check_into(schemas, &mut registry)?;
        Ok(registry)
    }

    /// Checks `schemas` against an existing, caller-owned registry.
    ///
    /// Schemas are numbered after the ones already walked into `registry`, so
    /// successive calls behave like one call over the concatenated sequence.
    /// On error the failing schema leaves nothing behind: the registry holds
    /// exactly the schemas that passed.
    pub fn check_into(&self, schemas: &[SchemaNode], registry: &mut TypeRegistry) -> Result<()> {
        for schema in schemas {
            let schema_index = registry.schema_count();
            debug!(schema = schema_index, "walking schema");

            let walked = Walker::new(schema_index, self.options.ignore_index, registry)
                .walk_schema(schema);
            if let Err(err) = walked {
                let discarded = registry.discard_unfinished();
                debug!(schema = schema_index, discarded, error = %err, "compatibility check aborted");
                return Err(err);
            }
            registry.finish_schema();
        }

        debug!(
            schemas = registry.schema_count(),
            paths = registry.len(),
            "schemas are compatible"
        );
        Ok(())
    }
}

/// Checks `schemas` in order with a fresh registry.
///
/// `ignore_index` collapses tuple-style `items` positions onto one path.
pub fn check(schemas: &[SchemaNode], ignore_index: bool) -> Result<TypeRegistry> {
    Checker::builder().ignore_index(ignore_index).build().check(schemas)
}
