use super::helpers::*;
use filter_engine::{CompiledCondition, FilterError, compile_condition, resolve};
use model::{
    core::{data_type::DataType, value::Value},
    execution::{binding::Binding, expr::BinaryOp, expr::ConditionExpr},
};
use serde_json::json;

#[test]
fn test_resolve_and_of_constant_and_variable() {
    let expr = ConditionExpr::and(
        cmp(attr("price"), BinaryOp::GreaterThan, num(10.0)),
        cmp(attr("volume"), BinaryOp::Equal, var("v")),
    );
    let compiled = compile(&expr).unwrap();

    let doc = resolve(&compiled, &Binding::new().with("v", Value::Int(100))).unwrap();

    assert_eq!(
        doc.as_json(),
        json!({"$and": [{"price": {"$gt": 10.0}}, {"volume": {"$eq": 100}}]})
    );
}

#[test]
fn test_resolve_text_variable_with_quotes() {
    let expr = ConditionExpr::not(cmp(text_attr("symbol"), BinaryOp::Equal, text_var("s")));
    let compiled = compile(&expr).unwrap();

    let doc = resolve(&compiled, &Binding::new().with("s", "say \"hi\"")).unwrap();

    assert_eq!(
        doc.as_json(),
        json!({"symbol": {"$not": {"$eq": "say \"hi\""}}})
    );
}

#[test]
fn test_same_variable_used_twice() {
    let expr = ConditionExpr::or(
        cmp(attr("low"), BinaryOp::LessOrEqual, var("v")),
        cmp(attr("high"), BinaryOp::GreaterOrEqual, var("v")),
    );
    let compiled = compile(&expr).unwrap();
    assert_eq!(compiled.placeholders().len(), 2);
    assert_eq!(compiled.required_variables(), vec!["v"]);

    let doc = resolve(&compiled, &Binding::new().with("v", Value::Int(5))).unwrap();

    assert_eq!(
        doc.as_json(),
        json!({"$or": [{"low": {"$lte": 5}}, {"high": {"$gte": 5}}]})
    );
}

#[test]
fn test_null_variable_resolves_to_null() {
    let compiled = compile(&cmp(attr("price"), BinaryOp::Equal, var("p"))).unwrap();
    let doc = resolve(&compiled, &Binding::new().with("p", Value::Null)).unwrap();
    assert_eq!(doc.as_json(), json!({"price": {"$eq": null}}));
}

#[test]
fn test_missing_variable_fails() {
    let compiled = compile(&cmp(attr("price"), BinaryOp::Equal, var("p"))).unwrap();
    let err = resolve(&compiled, &Binding::new()).unwrap_err();
    assert!(
        matches!(&err, FilterError::UnresolvedBinding { variable, .. } if variable == "p"),
        "{err}"
    );
}

#[test]
fn test_empty_condition_matches_everything() {
    let compiled = compile_condition(None).unwrap();
    assert!(compiled.is_match_all());

    let binding = Binding::new().with("anything", Value::Int(1));
    let doc = resolve(&compiled, &binding).unwrap();
    assert!(doc.is_match_all());
    assert_eq!(doc.as_json(), json!({}));
}

#[test]
fn test_sentinel_is_case_insensitive() {
    let compiled: CompiledCondition =
        serde_json::from_value(json!({"template": "TRUE", "placeholders": {}})).unwrap();
    let doc = resolve(&compiled, &Binding::new()).unwrap();
    assert!(doc.is_match_all());
}

#[test]
fn test_compiled_condition_survives_serialization() {
    let expr = ConditionExpr::and(
        cmp(text_attr("symbol"), BinaryOp::Equal, text_var("s")),
        cmp(attr("price"), BinaryOp::LessThan, var("p")),
    );
    let compiled = compile(&expr).unwrap();

    let json = serde_json::to_string(&compiled).unwrap();
    let restored: CompiledCondition = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, compiled);

    let binding = Binding::new()
        .with("s", "IBM")
        .with("p", Value::Float(75.5));
    assert_eq!(
        resolve(&restored, &binding).unwrap(),
        resolve(&compiled, &binding).unwrap()
    );
}

#[test]
fn test_demo_condition_file() {
    let expr: ConditionExpr =
        serde_json::from_str(include_str!("../../../../demos/price_volume.json")).unwrap();
    let binding_json: serde_json::Value =
        serde_json::from_str(include_str!("../../../../demos/price_volume.binding.json")).unwrap();
    let binding = Binding::from_json(binding_json).unwrap();

    let doc = resolve(&compile(&expr).unwrap(), &binding).unwrap();

    assert_eq!(
        doc.as_json(),
        json!({"$and": [{"price": {"$gt": 10.0}}, {"volume": {"$eq": 100}}]})
    );
}

#[test]
fn test_marker_text_in_constant_survives_resolution() {
    let expr = ConditionExpr::and(
        cmp(text_attr("name"), BinaryOp::Equal, text("{{strVar0}}")),
        cmp(attr("volume"), BinaryOp::Equal, var("v")),
    );
    let compiled = compile(&expr).unwrap();
    assert_eq!(compiled.template().matches("{{strVar0}}").count(), 1);

    let doc = resolve(&compiled, &Binding::new().with("v", Value::Int(100))).unwrap();

    assert_eq!(
        doc.as_json(),
        json!({"$and": [{"name": {"$eq": "{{strVar0}}"}}, {"volume": {"$eq": 100}}]})
    );
}

#[test]
fn test_marker_text_in_field_name_survives_resolution() {
    let compiled = compile(&cmp(attr("{{strVar0}}"), BinaryOp::Equal, var("v"))).unwrap();
    assert_eq!(compiled.template().matches("{{strVar0}}").count(), 1);

    let doc = resolve(&compiled, &Binding::new().with("v", Value::Int(7))).unwrap();

    assert_eq!(doc.as_json(), json!({"{{strVar0}}": {"$eq": 7}}));
}

#[test]
fn test_binding_text_cannot_add_operators() {
    let compiled = compile(&cmp(attr("volume"), BinaryOp::Equal, var("v"))).unwrap();
    let err = resolve(&compiled, &Binding::new().with("v", r#"0,"$ne":null"#)).unwrap_err();
    assert!(
        matches!(&err, FilterError::InvalidLiteral { token, .. } if token == "strVar0"),
        "{err}"
    );
}

#[test]
fn test_non_finite_binding_is_not_a_null_check() {
    let compiled = compile(&cmp(attr("price"), BinaryOp::Equal, var("p"))).unwrap();
    for p in [f64::NAN, f64::INFINITY] {
        let err = resolve(&compiled, &Binding::new().with("p", p)).unwrap_err();
        assert!(matches!(err, FilterError::InvalidLiteral { .. }), "{err}");
    }
}

#[test]
fn test_non_scalar_constant_fails_compilation() {
    let expr = cmp(
        attr("volume"),
        BinaryOp::Equal,
        ConditionExpr::constant(r#"0,"$ne":null"#, DataType::Long),
    );
    let err = compile(&expr).unwrap_err();
    assert!(
        matches!(&err, FilterError::InvalidLiteral { token, .. } if token == "const0"),
        "{err}"
    );
    assert!(matches!(
        compile(&cmp(attr("price"), BinaryOp::Equal, num(f64::NAN))),
        Err(FilterError::InvalidLiteral { .. })
    ));
}
