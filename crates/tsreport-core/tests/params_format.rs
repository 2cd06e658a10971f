use tsreport_core::{format_float, ParamValue, Parameters};

#[test]
fn floats_use_shortest_round_trip_text() {
    assert_eq!(format_float(1.0), "1.0");
    assert_eq!(format_float(0.35), "0.35");
    assert_eq!(format_float(1.5), "1.5");
    assert_eq!(format_float(f64::NAN), "nan");
    assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
}

#[test]
fn exponents_are_signed_and_padded() {
    assert_eq!(format_float(1e-8), "1e-08");
    assert_eq!(format_float(5e-5), "5e-05");
    assert_eq!(format_float(1.5e-8), "1.5e-08");
    assert_eq!(format_float(-2.5e-7), "-2.5e-07");
    assert_eq!(format_float(1e16), "1e+16");
    assert_eq!(format_float(1.25e100), "1.25e+100");
    assert_eq!(format_float(1e-300), "1e-300");
}

#[test]
fn positional_range_keeps_decimal_point() {
    assert_eq!(format_float(0.0001), "0.0001");
    assert_eq!(format_float(1e15), "1000000000000000.0");
    assert_eq!(format_float(0.0), "0.0");
    assert_eq!(format_float(-0.0), "-0.0");
    assert_eq!(format_float(-3.0), "-3.0");
}

#[test]
fn scalar_values_render_like_the_record() {
    assert_eq!(ParamValue::Int(1000).to_string(), "1000");
    assert_eq!(ParamValue::Bool(false).to_string(), "False");
    assert_eq!(ParamValue::None.to_string(), "None");
    assert_eq!(ParamValue::Str("wf".into()).to_string(), "wf");
}

#[test]
fn strings_inside_lists_are_quoted() {
    let list = ParamValue::List(vec![
        ParamValue::Str("wf".into()),
        ParamValue::Int(2),
        ParamValue::Float(1e-8),
        ParamValue::Str("it's".into()),
        ParamValue::List(vec![ParamValue::Str("a\\b".into()), ParamValue::None]),
    ]);
    assert_eq!(list.to_string(), r#"['wf', 2, 1e-08, "it's", ['a\\b', None]]"#);
}

#[test]
fn require_reports_available_keys() {
    let params: Parameters = [
        ("N".to_string(), ParamValue::Int(10)),
        ("seed".to_string(), ParamValue::Int(3)),
    ]
    .into_iter()
    .collect();
    assert_eq!(params.require("N").unwrap(), &ParamValue::Int(10));
    let err = params.require("recrate").unwrap_err();
    assert_eq!(err.info().code, "META004");
    assert_eq!(err.info().context.get("available").map(String::as_str), Some("N,seed"));
}

#[test]
fn parameters_serialise_as_plain_mapping() {
    let mut params = Parameters::new();
    params.insert("N", ParamValue::Int(10));
    params.insert("p", ParamValue::Float(0.5));
    let json = serde_json::to_string(&params).unwrap();
    assert_eq!(json, r#"{"N":10,"p":0.5}"#);
}
