use letop_core::{apply, AssignError, FuncRef, Operator, Special, Value};

/// One fresh representative of every kind, including null containers and a
/// partial application.
fn samples() -> Vec<Value> {
    vec![
        Value::Number(7),
        Value::Number(-3),
        Value::Float(1.5),
        Value::str("12"),
        Value::str("ab"),
        Value::list(vec![Value::Number(1), Value::str("x")]),
        Value::null_list(),
        Value::dict([("a", Value::Number(1))]),
        Value::null_dict(),
        Value::func("len"),
        Value::Func(FuncRef::partial("add", vec![Value::Number(1)], None)),
        Value::Special(Special::True),
        Value::Special(Special::False),
        Value::Special(Special::Null),
        Value::Unknown,
    ]
}

/// Result kind of `target op= operand`, or `None` when it must be rejected.
fn expected_kind(target: &Value, operand: &Value, op: Operator) -> Option<&'static str> {
    if matches!(operand, Value::Func(_) | Value::Dict(_)) {
        return None;
    }
    match target {
        Value::Dict(_) | Value::Func(_) | Value::Special(_) | Value::Unknown => None,
        Value::List(_) => match (op, operand) {
            (Operator::Add, Value::List(_)) => Some("list"),
            _ => None,
        },
        Value::Float(_) => match (op, operand) {
            (Operator::Concat, _) => None,
            (_, Value::Number(_) | Value::Float(_) | Value::String(_)) => Some("float"),
            _ => None,
        },
        Value::Number(_) | Value::String(_) => match (op, operand) {
            (_, Value::List(_) | Value::Unknown) => None,
            (Operator::Concat, Value::Float(_)) => None,
            (Operator::Concat, _) => Some("string"),
            (_, Value::Float(_)) => Some("float"),
            _ => Some("number"),
        },
    }
}

#[test]
fn matrix_matches_reference_table() {
    let count = samples().len();
    for op in Operator::ALL {
        for ti in 0..count {
            for oi in 0..count {
                let mut target = samples().swap_remove(ti);
                let operand = samples().swap_remove(oi);
                let before = format!("{:?}", target);
                let operand_before = format!("{:?}", operand);

                let result = apply(&mut target, &operand, op);
                let context = format!("{} {} {}", before, op, operand_before);

                match expected_kind(&samples()[ti], &operand, op) {
                    Some(kind) => {
                        assert!(result.is_ok(), "expected success: {}", context);
                        assert_eq!(target.type_name(), kind, "{}", context);
                    }
                    None => {
                        assert_eq!(
                            result,
                            Err(AssignError::IncompatibleTypes { operator: op }),
                            "{}",
                            context
                        );
                        assert_eq!(format!("{:?}", target), before, "mutated on failure: {}", context);
                    }
                }
                assert_eq!(format!("{:?}", operand), operand_before, "operand mutated: {}", context);
            }
        }
    }
}

#[test]
fn float_arm_never_fails_after_gating() {
    for op in [Operator::Add, Operator::Subtract] {
        for operand in [Value::Number(2), Value::Float(0.5), Value::str("4"), Value::str("")] {
            let mut target = Value::Float(10.0);
            apply(&mut target, &operand, op).unwrap();
            assert_eq!(target.type_name(), "float");
        }
    }
}

#[test]
fn error_names_operator() {
    let mut target = Value::dict([("k", Value::Number(1))]);
    let err = apply(&mut target, &Value::Number(1), Operator::Subtract).unwrap_err();
    assert_eq!(err.operator(), Operator::Subtract);
    assert_eq!(err.to_string(), "E734: Wrong variable type for -=");
}

#[test]
fn repeated_assignment_accumulates() {
    let mut acc = Value::str("");
    for word in ["a", "b", "c"] {
        apply(&mut acc, &Value::str(word), Operator::Concat).unwrap();
    }
    apply(&mut acc, &Value::Number(1), Operator::Concat).unwrap();
    assert_eq!(acc, Value::str("abc1"));

    let mut n = Value::Number(0);
    for i in 1..=4 {
        apply(&mut n, &Value::Number(i), Operator::Add).unwrap();
    }
    apply(&mut n, &Value::Float(0.5), Operator::Subtract).unwrap();
    assert_eq!(n, Value::Float(9.5));
}
