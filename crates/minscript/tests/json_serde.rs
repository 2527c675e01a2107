use minscript::{Executor, Limits, NoPrint, ScriptObject};

fn round_trip(object: &ScriptObject) -> ScriptObject {
    let json = serde_json::to_string(object).expect("serialize");
    serde_json::from_str(&json).expect("deserialize")
}

#[test]
fn objects_round_trip_through_json() {
    let objects = [
        ScriptObject::Number(42.0),
        ScriptObject::Number(-0.5),
        ScriptObject::String("hello world".to_owned()),
        ScriptObject::String(String::new()),
        ScriptObject::Function,
        ScriptObject::Undefined,
    ];
    for object in &objects {
        assert_eq!(&round_trip(object), object, "{object:?}");
    }
}

#[test]
fn run_results_serialize() {
    let value = Executor::new("var s = \"abc\"; s + 1;".to_owned())
        .run_with_writer(&mut NoPrint)
        .expect("run");
    let json = serde_json::to_string(&value).expect("serialize");
    assert_eq!(json, r#"{"String":"abc1.00"}"#);
}

#[test]
fn limits_round_trip_through_json() {
    let limits = Limits::new().max_variables(5).max_call_depth(3);
    let json = serde_json::to_string(&limits).expect("serialize");
    let back: Limits = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, limits);
}

#[test]
fn display_matches_the_interpreter_rendering() {
    assert_eq!(ScriptObject::Number(1.0).to_string(), "1.00");
    assert_eq!(ScriptObject::Number(1.0 / 3.0).to_string(), "0.33");
    assert_eq!(ScriptObject::String("raw".to_owned()).to_string(), "raw");
    assert_eq!(ScriptObject::Function.to_string(), "[Function]");
    assert_eq!(ScriptObject::Undefined.to_string(), "undefined");
}
