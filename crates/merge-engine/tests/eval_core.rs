use std::rc::Rc;
use std::sync::Arc;

use merge_engine::{
    Engine, EvalContext, FormulaError, FunctionRegistry, HostContext, NullFieldProvider,
    NullTraceSink, Thunk, Value,
};
use pretty_assertions::assert_eq;

fn produce(formula: &str) -> Result<String, FormulaError> {
    produce_with(&Engine::new(), formula)
}

fn produce_with(engine: &Engine, formula: &str) -> Result<String, FormulaError> {
    let host = HostContext::new(&NullFieldProvider, &NullTraceSink);
    engine.produce(formula, &host)
}

#[test]
fn literal_formulas_render_canonically() {
    assert_eq!(produce("true").unwrap(), "true");
    assert_eq!(produce("false").unwrap(), "false");
    assert_eq!(produce("null").unwrap(), "");
    assert_eq!(produce("5").unwrap(), "5");
    assert_eq!(produce("42").unwrap(), "42");
    assert_eq!(produce("\"hello\"").unwrap(), "hello");
}

#[test]
fn blank_input_yields_empty_text() {
    assert_eq!(produce("").unwrap(), "");
    assert_eq!(produce("   \n\t ").unwrap(), "");
}

#[test]
fn if_selects_the_matching_branch() {
    assert_eq!(produce("If(true, \"A\", \"B\")").unwrap(), "A");
    assert_eq!(produce("If(false, \"A\", \"B\")").unwrap(), "B");
}

#[test]
fn untaken_branch_is_never_resolved() {
    // `UnknownFn` is not registered; it must not fail because the branch is
    // never forced.
    assert_eq!(produce("If(true, \"A\", UnknownFn())").unwrap(), "A");
    assert_eq!(produce("If(false, UnknownFn(), \"B\")").unwrap(), "B");
}

#[test]
fn nested_if_stays_lazy() {
    assert_eq!(
        produce("If(true, If(false, Boom(), \"inner\"), Boom())").unwrap(),
        "inner"
    );
}

#[test]
fn logical_operators() {
    assert_eq!(produce("And(true, false)").unwrap(), "false");
    assert_eq!(produce("And(true, true)").unwrap(), "true");
    assert_eq!(produce("Or(true, false)").unwrap(), "true");
    assert_eq!(produce("Or(false, false)").unwrap(), "false");
    assert_eq!(produce("Not(true)").unwrap(), "false");
    assert_eq!(produce("Not(IsNull(null))").unwrap(), "false");
}

#[test]
fn logical_operators_reject_non_booleans() {
    assert_eq!(
        produce("And(true, 1)").unwrap_err(),
        FormulaError::Type {
            function: "And".to_string(),
            expected: "a boolean".to_string(),
            actual: "integer".to_string(),
        }
    );
    assert!(matches!(
        produce("Not(\"x\")").unwrap_err(),
        FormulaError::Type { .. }
    ));
    assert!(matches!(
        produce("If(\"x\", \"A\", \"B\")").unwrap_err(),
        FormulaError::Type { .. }
    ));
}

#[test]
fn isnull_checks_the_forced_value() {
    assert_eq!(produce("IsNull(null)").unwrap(), "true");
    assert_eq!(produce("IsNull(\"x\")").unwrap(), "false");
    assert_eq!(produce("IsNull(0)").unwrap(), "false");
}

#[test]
fn isequal_matrix() {
    assert_eq!(produce("IsEqual(1, 1)").unwrap(), "true");
    assert_eq!(produce("IsEqual(1, 2)").unwrap(), "false");
    assert_eq!(produce("IsEqual(null, null)").unwrap(), "true");
    assert_eq!(produce("IsEqual(null, 1)").unwrap(), "false");
    assert_eq!(produce("IsEqual(1, null)").unwrap(), "false");
    assert_eq!(produce("IsEqual(\"a\", \"a\")").unwrap(), "true");
    assert_eq!(produce("IsEqual(\"a\", \"b\")").unwrap(), "false");
    assert_eq!(produce("IsEqual(true, false)").unwrap(), "false");
}

#[test]
fn isequal_rejects_mixed_types() {
    assert_eq!(
        produce("IsEqual(1, \"1\")").unwrap_err(),
        FormulaError::IncompatibleComparison {
            left: "integer".to_string(),
            right: "string".to_string(),
        }
    );
    assert!(matches!(
        produce("IsEqual(true, 1)").unwrap_err(),
        FormulaError::IncompatibleComparison { .. }
    ));
}

#[test]
fn concat_joins_text_renderings() {
    assert_eq!(produce("Concat(\"a\", 1, true, null)").unwrap(), "a1true");
    assert_eq!(produce("Concat()").unwrap(), "");
    assert_eq!(produce("Concat(\"x\", Concat(\"y\", \"z\"))").unwrap(), "xyz");
}

#[test]
fn unknown_function_fails_with_its_name() {
    assert_eq!(
        produce("Foo()").unwrap_err(),
        FormulaError::UnknownFunction("Foo".to_string())
    );
}

#[test]
fn arity_violations_name_the_function() {
    assert_eq!(
        produce("If(true, \"A\")").unwrap_err(),
        FormulaError::Arity {
            function: "If".to_string(),
            expected: "exactly 3".to_string(),
            actual: 2,
        }
    );
    assert!(matches!(
        produce("Not()").unwrap_err(),
        FormulaError::Arity { .. }
    ));
    assert!(matches!(
        produce("Value()").unwrap_err(),
        FormulaError::Arity { .. }
    ));
}

fn list_engine() -> Engine {
    let mut engine = Engine::new();
    engine.register(
        "Recipients",
        Arc::new(|_ctx: &EvalContext<'_>, _args: &[Rc<Thunk>]| {
            Ok(Thunk::constant(Value::List(vec![
                Value::Text("alice".to_string()),
                Value::Text("bob".to_string()),
            ])))
        }),
    );
    engine.register(
        "Nobody",
        Arc::new(|_ctx: &EvalContext<'_>, _args: &[Rc<Thunk>]| {
            Ok(Thunk::constant(Value::List(Vec::new())))
        }),
    );
    engine
}

#[test]
fn first_and_last_pick_list_ends() {
    let engine = list_engine();
    assert_eq!(produce_with(&engine, "First(Recipients())").unwrap(), "alice");
    assert_eq!(produce_with(&engine, "Last(Recipients())").unwrap(), "bob");
}

#[test]
fn first_and_last_on_empty_list_yield_null() {
    let engine = list_engine();
    assert_eq!(produce_with(&engine, "First(Nobody())").unwrap(), "");
    assert_eq!(produce_with(&engine, "IsNull(First(Nobody()))").unwrap(), "true");
    assert_eq!(produce_with(&engine, "Last(Nobody())").unwrap(), "");
}

#[test]
fn first_rejects_non_lists() {
    assert_eq!(
        produce("First(\"x\")").unwrap_err(),
        FormulaError::Type {
            function: "First".to_string(),
            expected: "a list".to_string(),
            actual: "string".to_string(),
        }
    );
}

#[test]
fn list_renders_as_joined_elements() {
    let engine = list_engine();
    assert_eq!(
        produce_with(&engine, "Concat(Recipients())").unwrap(),
        "alice, bob"
    );
}

#[test]
fn dispatch_goes_through_the_supplied_registry() {
    // An engine over an empty registry knows no functions at all, builtins
    // included: resolution happens at force time, per evaluation.
    let engine = Engine::with_registry(FunctionRegistry::empty());
    assert_eq!(
        produce_with(&engine, "If(true, \"A\", \"B\")").unwrap_err(),
        FormulaError::UnknownFunction("If".to_string())
    );
    // Literals never touch the registry.
    assert_eq!(produce_with(&engine, "true").unwrap(), "true");
}

#[test]
fn fallback_formula_without_a_primary_record() {
    // With no primary record, `Value(...)` yields null without touching the
    // field provider, so the fallback branch wins.
    assert_eq!(
        produce("If(IsNull(Value(\"subject\")), \"Fallback\", Value(\"subject\"))").unwrap(),
        "Fallback"
    );
}
