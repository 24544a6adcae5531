use super::helpers::*;
use filter_engine::{ExpressionCompiler, placeholder::marker, resolve, walk};
use model::{
    core::value::Value,
    execution::{binding::Binding, expr::BinaryOp, expr::ConditionExpr},
};
use serde_json::{Value as JsonValue, json};

/// `a0 > 0.0 AND (a1 > v1 AND (a2 > 2.0 AND ...))`: even positions compare
/// against constants, odd positions against stream variables.
fn chain(len: usize) -> ConditionExpr {
    let leaf = |i: usize| {
        let value = if i % 2 == 0 {
            num(i as f64)
        } else {
            var(&format!("v{i}"))
        };
        cmp(attr(&format!("a{i}")), BinaryOp::GreaterThan, value)
    };

    (0..len - 1)
        .rev()
        .fold(leaf(len - 1), |acc, i| ConditionExpr::and(leaf(i), acc))
}

/// The document `chain(len)` resolves to when every variable `vN` is bound to N.
fn expected_chain(len: usize) -> JsonValue {
    let leaf = |i: usize| {
        let value = if i % 2 == 0 {
            json!(i as f64)
        } else {
            json!(i)
        };
        json!({ format!("a{i}"): { "$gt": value } })
    };

    (0..len - 1)
        .rev()
        .fold(leaf(len - 1), |acc, i| json!({ "$and": [leaf(i), acc] }))
}

fn chain_binding(len: usize) -> Binding {
    (1..len)
        .step_by(2)
        .map(|i| (format!("v{i}"), Value::Int(i as i64)))
        .collect()
}

#[test]
fn test_single_fragment_left_after_walk() {
    let mut compiler = ExpressionCompiler::new();
    walk(&chain(6), &mut compiler).unwrap();
    assert_eq!(compiler.depth(), 1);

    let compiled = compiler.finish().unwrap();
    let doc = resolve(&compiled, &chain_binding(6)).unwrap();

    assert_eq!(doc.as_json(), expected_chain(6));
}

#[test]
fn test_only_variable_tokens_remain() {
    let compiled = compile(&chain(10)).unwrap();

    let tokens = compiled.placeholders().keys().collect::<Vec<_>>();
    assert_eq!(tokens.len(), 5);
    assert!(tokens.iter().all(|token| token.starts_with("strVar")));
    assert!(!compiled.template().contains("{{const"));
    for token in tokens {
        assert!(compiled.template().contains(&marker(token)), "{token}");
    }
}

#[test]
fn test_compare_accepts_either_source_order() {
    let attribute_first = compile(&cmp(attr("price"), BinaryOp::Equal, var("p"))).unwrap();
    let attribute_last = compile(&cmp(var("p"), BinaryOp::Equal, attr("price"))).unwrap();
    assert_eq!(attribute_first, attribute_last);

    let greater = compile(&cmp(attr("price"), BinaryOp::GreaterThan, num(1.0))).unwrap();
    let less = compile(&cmp(num(1.0), BinaryOp::LessThan, attr("price"))).unwrap();
    assert_eq!(greater.template(), less.template());
}

#[test]
fn test_compiles_are_independent() {
    let first = compile(&chain(4)).unwrap();
    let second = compile(&chain(4)).unwrap();
    assert_eq!(first, second);
    assert!(second.placeholders().contains_key("strVar0"));
}

#[test]
fn test_concurrent_resolution_of_one_condition() {
    let compiled = compile(&chain(8)).unwrap();

    std::thread::scope(|scope| {
        let handles = (0..4)
            .map(|offset| {
                let compiled = &compiled;
                scope.spawn(move || {
                    let binding = (1..8)
                        .step_by(2)
                        .map(|i| (format!("v{i}"), Value::Int(i as i64 + offset)))
                        .collect::<Binding>();
                    (offset, resolve(compiled, &binding).unwrap())
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            let (offset, doc) = handle.join().unwrap();
            let text = doc.to_string();
            assert!(text.contains(&format!(r#""a1":{{"$gt":{}}}"#, 1 + offset)), "{text}");
        }
    });
}
