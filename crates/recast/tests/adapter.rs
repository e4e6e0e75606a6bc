//! Integration tests for the call adapter
//!
//! Covers the adapter's externally observable contract:
//! - declared types drive conversion of positional arguments and results
//! - bound receivers bypass the port entirely
//! - named arguments are never converted
//! - wrap-time misuse fails before any invocation
//! - call-time failure leaves the wrapper reusable

mod support;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use recast::{
    AdaptError, Adapter, CallArgs, CallableBody, CallableDecl, ConversionPort, Instance,
    PortError, TypeRef, UnsupportedCallableError, Value,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use support::RecordingPort;

#[test]
fn test_receiver_is_never_sent_through_the_port() {
    let port = RecordingPort::new();
    let adapted = Adapter::loaded(port.clone())
        .adapt_fn(
            CallableDecl::method("area")
                .untyped_parameter("self")
                .returns(TypeRef::Decimal),
            |args| {
                let shape = args.positional[0].as_instance().expect("typed receiver");
                let radius = shape.get("radius").and_then(Value::as_integer).unwrap();
                // The body answers in wire shape; the wrapper converts it
                Ok(Value::string(format!("{}.0", 3 * radius * radius)))
            },
        )
        .unwrap();

    let receiver = Value::Instance(
        Instance::new("Circle").field("radius", 2i64).method("area"),
    );
    let result = adapted
        .call(CallArgs::positional(vec![receiver.clone()]))
        .unwrap();

    assert_eq!(result, Value::Decimal(Decimal::from_str("12.0").unwrap()));
    // Only the return value was converted; the receiver stayed out of the port
    assert!(!port.saw_value(&receiver));
    assert_eq!(port.targets(), vec!["Decimal"]);
}

#[test]
fn test_receiver_without_matching_member_is_converted() {
    // The documented false negative of the name-and-shape heuristic: a
    // receiver that does not expose the callable's name goes to the port
    // like any argument.
    let port = RecordingPort::new();
    let adapted = Adapter::loaded(port.clone())
        .return_value(false)
        .adapt_fn(
            CallableDecl::method("area").untyped_parameter("self"),
            |args| Ok(args.positional[0].clone()),
        )
        .unwrap();

    let receiver = Value::Instance(Instance::new("Circle").field("radius", 2i64));
    adapted
        .call(CallArgs::positional(vec![receiver.clone()]))
        .unwrap();
    assert!(port.saw_value(&receiver));
}

#[test]
fn test_arguments_convert_and_named_arguments_pass_through() {
    let port = RecordingPort::new();
    let adapted = Adapter::loaded(port.clone())
        .return_value(false)
        .adapt_fn(
            CallableDecl::function("schedule")
                .parameter("when", TypeRef::Date)
                .parameter("slots", TypeRef::Integer),
            |args| {
                Ok(Value::record(vec![
                    ("when".to_string(), args.positional[0].clone()),
                    ("slots".to_string(), args.positional[1].clone()),
                    (
                        "mode".to_string(),
                        args.named.get("mode").cloned().unwrap_or(Value::Null),
                    ),
                ]))
            },
        )
        .unwrap();

    let result = adapted
        .call(
            CallArgs::new()
                .arg("2018-10-04")
                .arg("3")
                .named_arg("mode", "fast"),
        )
        .unwrap();

    let record = result.as_record().unwrap();
    assert_eq!(
        record["when"],
        Value::Date(NaiveDate::from_ymd_opt(2018, 10, 4).unwrap())
    );
    assert_eq!(record["slots"], Value::Integer(3));
    // The named argument arrived verbatim and never hit the port
    assert_eq!(record["mode"], Value::string("fast"));
    assert_eq!(port.request_count(), 2);
}

#[test]
fn test_dump_adapted_return_round_trips() {
    let port = RecordingPort::new();
    let adapted = Adapter::dumped(port.clone())
        .parameters(false)
        .adapt_fn(
            CallableDecl::function("scheduled_on").returns(TypeRef::Date),
            |_| Ok(Value::Date(NaiveDate::from_ymd_opt(2020, 1, 2).unwrap())),
        )
        .unwrap();

    let wire = adapted.call(CallArgs::new()).unwrap();
    assert_eq!(wire, Value::string("2020-01-02"));

    // Loading the wire shape back yields the original typed value
    let reloaded = port
        .load(&recast::ConversionRequest::new(
            wire,
            Some(TypeRef::Date),
            recast::Namespace::root(),
            recast::ConvertOptions::new(),
        ))
        .unwrap();
    assert_eq!(
        reloaded,
        Value::Date(NaiveDate::from_ymd_opt(2020, 1, 2).unwrap())
    );
}

#[test]
fn test_wrap_time_rejection_happens_before_any_conversion() {
    let port = RecordingPort::new();
    let adapter = Adapter::loaded(port.clone());

    let err = adapter
        .adapt(
            CallableDecl::static_method("of_total"),
            CallableBody::sync(|_| Ok(Value::Null)),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        UnsupportedCallableError::BoundDescriptor { .. }
    ));

    let err = adapter
        .adapt(
            CallableDecl::type_definition("Measurement"),
            CallableBody::sync(|_| Ok(Value::Null)),
        )
        .unwrap_err();
    assert!(matches!(err, UnsupportedCallableError::TypeTarget { .. }));

    assert_eq!(port.request_count(), 0);
}

#[test]
fn test_failed_call_leaves_wrapper_reusable() {
    let port = RecordingPort::new();
    let adapted = Adapter::loaded(port)
        .return_value(false)
        .adapt_fn(
            CallableDecl::function("count").parameter("n", TypeRef::Integer),
            |args| Ok(args.positional[0].clone()),
        )
        .unwrap();

    let err = adapted.call(CallArgs::new().arg("many")).unwrap_err();
    assert!(matches!(err, AdaptError::Port(PortError::Conversion(_))));

    let ok = adapted.call(CallArgs::new().arg("12")).unwrap();
    assert_eq!(ok, Value::Integer(12));
}

#[test]
fn test_list_parameters_convert_elementwise() {
    let port = RecordingPort::new();
    let adapted = Adapter::loaded(port)
        .return_value(false)
        .adapt_fn(
            CallableDecl::function("total").parameter("ns", TypeRef::list(TypeRef::Integer)),
            |args| {
                let items = args.positional[0].as_list().unwrap();
                let sum: i64 = items.iter().filter_map(Value::as_integer).sum();
                Ok(Value::Integer(sum))
            },
        )
        .unwrap();

    let result = adapted
        .call(CallArgs::new().arg(Value::list(vec![
            Value::string("1"),
            Value::string("2"),
            Value::Integer(3),
        ])))
        .unwrap();
    assert_eq!(result, Value::Integer(6));
}
