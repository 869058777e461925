//! Scenario tests for compatibility checks over schema sequences.

#[cfg(test)]
mod tests {
    use crate::compat::{check, Checker, Incompatibility, TypeAssertion, TypeRegistry};
    use crate::error::Error;
    use crate::path;
    use crate::value::SchemaNode;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn schemas(values: Vec<serde_json::Value>) -> Vec<SchemaNode> {
        values.into_iter().map(SchemaNode::from).collect()
    }

    fn incompatibility(result: crate::error::Result<TypeRegistry>) -> Incompatibility {
        match result {
            Err(Error::Incompatible(incompatibility)) => *incompatibility,
            Err(other) => panic!("expected an incompatibility, got: {}", other),
            Ok(registry) => panic!("expected an incompatibility, got {} paths", registry.len()),
        }
    }

    fn person_v1() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "field_A": {"type": "string"}
            },
            "required": ["field_A"]
        })
    }

    fn person_v2() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "field_B": {"type": "string"}
            },
            "required": ["field_B"]
        })
    }

    fn experiment_with_tuple() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "experiment_info": {
                    "type": "array",
                    "items": [
                        {
                            "type": "object",
                            "properties": {"field_A": {"type": "string"}}
                        },
                        {
                            "type": "object",
                            "properties": {"field_A": {"type": "number"}}
                        }
                    ]
                }
            }
        })
    }

    #[test]
    fn test_single_schema_coverage() {
        let registry = check(&schemas(vec![person_v1()]), true).unwrap();

        let assertions: Vec<TypeAssertion> = registry.iter().cloned().collect();
        assert_eq!(
            assertions,
            vec![
                TypeAssertion::new(0, path![], "object"),
                TypeAssertion::new(0, path!["properties", "field_A"], "string"),
            ]
        );
        assert_eq!(registry.schema_count(), 1);
    }

    #[test]
    fn test_disjoint_schemas_are_compatible() {
        let registry = check(&schemas(vec![person_v1(), person_v2()]), true).unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(&path![]).unwrap().origin_schema_index, 0);
        assert_eq!(
            registry.get(&path!["properties", "field_B"]),
            Some(&TypeAssertion::new(1, path!["properties", "field_B"], "string"))
        );
    }

    #[test]
    fn test_redeclaration_keeps_first_origin() {
        let registry = check(&schemas(vec![person_v1(), person_v1(), person_v1()]), true).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.iter().all(|a| a.origin_schema_index == 0));
        assert_eq!(registry.schema_count(), 3);
    }

    #[test]
    fn test_cross_schema_conflict() {
        let result = check(
            &schemas(vec![
                json!({"properties": {"field_A": {"type": "string"}}}),
                json!({"properties": {"field_A": {"type": "number"}}}),
            ]),
            true,
        );

        assert_eq!(
            incompatibility(result),
            Incompatibility::new(path!["properties", "field_A"], "string", 0, "number", 1)
        );
    }

    #[test]
    fn test_conflict_reports_first_declaring_schema() {
        let v3 = json!({
            "type": "object",
            "properties": {
                "field_B": {"type": "string"},
                "field_A": {"type": "number"}
            },
            "required": ["field_B"]
        });
        let result = check(&schemas(vec![person_v1(), person_v2(), v3]), true);

        let found = incompatibility(result);
        assert_eq!(found.old_schema, 0);
        assert_eq!(found.new_schema, 2);
        assert_eq!(found.old_type, "string");
        assert_eq!(found.new_type, "number");
    }

    #[test]
    fn test_conflict_with_intermediate_redeclaration() {
        let result = check(
            &schemas(vec![
                json!({"properties": {"field_A": {"type": "string"}}}),
                json!({"properties": {"field_A": {"type": "string"}}}),
                json!({"properties": {"field_A": {"type": "integer"}}}),
            ]),
            true,
        );

        let found = incompatibility(result);
        assert_eq!(found.old_schema, 0);
        assert_eq!(found.new_schema, 2);
    }

    #[test]
    fn test_one_of_alternatives_conflict() {
        let v1 = json!({
            "type": "object",
            "oneOf": [
                {"type": "object", "properties": {"field_A": {"type": "string"}}},
                {"type": "object", "properties": {"field_A": {"type": "integer"}}}
            ]
        });

        let found = incompatibility(check(&schemas(vec![v1]), true));
        assert_eq!(found.field_path, path!["properties", "field_A"]);
        assert!(found.is_within_schema());
        assert_eq!(found.old_type, "string");
        assert_eq!(found.new_type, "integer");
    }

    #[test]
    fn test_one_of_disjoint_alternatives_pass() {
        let v1 = json!({
            "type": "object",
            "oneOf": [
                {"type": "object", "properties": {"field_A": {"type": "string"}}},
                {"type": "object", "properties": {"field_B": {"type": "integer"}}}
            ]
        });

        let registry = check(&schemas(vec![v1]), true).unwrap();
        assert_eq!(registry.declared_type(&path![]), Some("object"));
        assert_eq!(registry.declared_type(&path!["properties", "field_A"]), Some("string"));
        assert_eq!(registry.declared_type(&path!["properties", "field_B"]), Some("integer"));
    }

    #[test]
    fn test_one_of_alternative_conflicts_with_parent_type() {
        let v1 = json!({
            "type": "object",
            "anyOf": [{"type": "array"}]
        });

        let found = incompatibility(check(&schemas(vec![v1]), true));
        assert_eq!(found.field_path, path![]);
        assert_eq!(found.old_type, "object");
        assert_eq!(found.new_type, "array");
    }

    #[test]
    fn test_all_of_conflicts_across_schemas() {
        let result = check(
            &schemas(vec![
                json!({"properties": {"id": {"type": "integer"}}}),
                json!({"allOf": [{"properties": {"id": {"type": "string"}}}]}),
            ]),
            true,
        );

        assert_eq!(
            incompatibility(result),
            Incompatibility::new(path!["properties", "id"], "integer", 0, "string", 1)
        );
    }

    #[test]
    fn test_tuple_items_collapse_by_default() {
        let found = incompatibility(check(&schemas(vec![experiment_with_tuple()]), true));
        assert_eq!(
            found.field_path,
            path!["properties", "experiment_info", "items", "properties", "field_A"]
        );
    }

    #[test]
    fn test_tuple_items_tracked_by_index() {
        let checker = Checker::builder().ignore_index(false).build();
        let registry = checker.check(&schemas(vec![experiment_with_tuple()])).unwrap();

        assert_eq!(
            registry.declared_type(&path![
                "properties", "experiment_info", "items", 0usize, "properties", "field_A"
            ]),
            Some("string")
        );
        assert_eq!(
            registry.declared_type(&path![
                "properties", "experiment_info", "items", 1usize, "properties", "field_A"
            ]),
            Some("number")
        );
    }

    #[test]
    fn test_tuple_index_conflict_across_schemas() {
        let v1 = json!({"items": [{"type": "string"}, {"type": "number"}]});
        let v2 = json!({"items": [{"type": "string"}, {"type": "boolean"}]});
        let checker = Checker::builder().ignore_index(false).build();

        let found = incompatibility(checker.check(&schemas(vec![v1, v2])));
        assert_eq!(found.field_path, path!["items", 1usize]);
        assert_eq!(found.old_schema, 0);
        assert_eq!(found.new_schema, 1);
    }

    #[test]
    fn test_each_check_starts_from_an_empty_registry() {
        let checker = Checker::new();
        let first = checker
            .check(&schemas(vec![json!({"properties": {"a": {"type": "string"}}})]))
            .unwrap();
        let second = checker
            .check(&schemas(vec![json!({"properties": {"a": {"type": "number"}}})]))
            .unwrap();

        assert_eq!(first.declared_type(&path!["properties", "a"]), Some("string"));
        assert_eq!(second.declared_type(&path!["properties", "a"]), Some("number"));
        assert_eq!(second.get(&path!["properties", "a"]).unwrap().origin_schema_index, 0);
    }

    #[test]
    fn test_check_into_accumulates_across_calls() {
        let checker = Checker::new();
        let mut registry = TypeRegistry::new();

        checker
            .check_into(&schemas(vec![person_v1(), person_v2()]), &mut registry)
            .unwrap();
        assert_eq!(registry.schema_count(), 2);

        let err = checker
            .check_into(
                &schemas(vec![json!({"properties": {"field_B": {"type": "array"}}})]),
                &mut registry,
            )
            .unwrap_err();
        let found = err.as_incompatibility().unwrap();
        assert_eq!(found.old_schema, 1);
        assert_eq!(found.new_schema, 2);
        assert_eq!(registry.schema_count(), 2);
    }

    #[test]
    fn test_rejected_schema_leaves_no_entries_behind() {
        let checker = Checker::new();
        let mut registry = TypeRegistry::new();

        checker
            .check_into(&schemas(vec![json!({"properties": {"a": {"type": "string"}}})]), &mut registry)
            .unwrap();

        let rejected = json!({"properties": {"b": {"type": "integer"}, "a": {"type": "number"}}});
        assert!(checker.check_into(&schemas(vec![rejected]), &mut registry).is_err());
        assert!(!registry.contains(&path!["properties", "b"]));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.schema_count(), 1);

        // Schema 1 is the next accepted one, and `b` is free for it.
        checker
            .check_into(
                &schemas(vec![json!({"properties": {"b": {"type": "boolean"}, "c": {"type": "string"}}})]),
                &mut registry,
            )
            .unwrap();
        assert_eq!(
            registry.get(&path!["properties", "b"]),
            Some(&TypeAssertion::new(1, path!["properties", "b"], "boolean"))
        );
        assert_eq!(registry.get(&path!["properties", "c"]).unwrap().origin_schema_index, 1);
        assert_eq!(registry.schema_count(), 2);
    }

    #[test]
    fn test_invalid_schema_aborts_check() {
        let result = check(
            &schemas(vec![person_v1(), json!("not a schema"), person_v2()]),
            true,
        );
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
    }
}
