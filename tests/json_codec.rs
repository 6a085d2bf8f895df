use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sqlnull::{
    DataType, Document, NullBool, NullBytes, NullError, NullFloat64, NullInt16, NullInt64,
    NullInt64Slice, NullJsonb, NullString, NullTime, Nullable,
};

fn round_trip<T: DataType>(value: T) {
    let original = Nullable::some(value);
    let json = original.marshal_json().expect("encode");
    let mut decoded = Nullable::<T>::none();
    decoded.unmarshal_json(&json).expect("decode");
    assert_eq!(decoded, original, "{}", String::from_utf8_lossy(&json));
}

#[test]
fn present_values_round_trip() {
    round_trip(true);
    round_trip(false);
    round_trip(1.25f64);
    round_trip(0.0f64);
    round_trip(-12i16);
    round_trip(0i16);
    round_trip(i64::MAX);
    round_trip(0i64);
    round_trip("hello".to_string());
    round_trip(String::new());
    round_trip(vec![0u8, 1, 255]);
    round_trip(Vec::<u8>::new());
    round_trip(vec![1i64, -2, 3]);
    round_trip(Vec::<i64>::new());
    round_trip(Document::from(r#"{"a":[1,2]}"#));
    round_trip(Document::default());
    round_trip(Document::from("null"));
    round_trip(Utc.with_ymd_and_hms(2019, 5, 6, 7, 8, 9).unwrap());
}

#[test]
fn absent_encodes_as_null() {
    assert_eq!(NullInt64::none().marshal_json().unwrap(), b"null");
    assert_eq!(NullJsonb::none().marshal_json().unwrap(), b"null");
    assert_eq!(NullTime::none().marshal_json().unwrap(), b"null");
}

#[test]
fn null_token_decodes_absent_for_every_type() {
    fn check<T: DataType>(seed: T) {
        let mut n = Nullable::some(seed);
        n.unmarshal_json(b"null").expect("null is not an error");
        assert!(n.is_none());
        assert_eq!(n.unwrap().0, T::default());
        let mut n = Nullable::<T>::none();
        n.unmarshal_json(b"").expect("empty input is not an error");
        assert!(n.is_none());
    }
    check(true);
    check(1.0f64);
    check(1i16);
    check(1i64);
    check("s".to_string());
    check(vec![1u8]);
    check(vec![1i64]);
    check(Document::from("{}"));
    check(Utc.with_ymd_and_hms(2019, 5, 6, 7, 8, 9).unwrap());
}

#[test]
fn payload_encodings() {
    assert_eq!(NullBool::some(true).marshal_json().unwrap(), b"true");
    assert_eq!(NullInt16::some(7).marshal_json().unwrap(), b"7");
    assert_eq!(NullFloat64::some(1.5).marshal_json().unwrap(), b"1.5");
    assert_eq!(NullString::some("a\"b".into()).marshal_json().unwrap(), br#""a\"b""#);
    assert_eq!(NullBytes::some(b"hi".to_vec()).marshal_json().unwrap(), br#""aGk=""#);
    assert_eq!(NullInt64Slice::some(vec![1, 2]).marshal_json().unwrap(), b"[1,2]");
    assert_eq!(
        NullJsonb::some(Document::from(r#"{"k":1}"#)).marshal_json().unwrap(),
        br#""eyJrIjoxfQ==""#
    );
    assert_eq!(NullJsonb::some(Document::default()).marshal_json().unwrap(), br#""""#);
    let t = Utc.with_ymd_and_hms(2019, 5, 6, 7, 8, 9).unwrap();
    assert_eq!(NullTime::some(t).marshal_json().unwrap(), br#""2019-05-06T07:08:09Z""#);
}

#[test]
fn decode_failure_resets_and_reports() {
    let mut n = NullInt64::some(5);
    let err = n.unmarshal_json(br#""five""#).unwrap_err();
    assert!(matches!(err, NullError::Decode { data_type: "Int64", .. }));
    assert_eq!(n, NullInt64::none());

    let mut n = NullInt16::some(1);
    assert!(n.unmarshal_json(b"70000").is_err());
    assert!(n.is_none());

    let mut n = NullBytes::some(vec![1]);
    assert!(n.unmarshal_json(br#""not base64!""#).is_err());
    assert!(n.is_none());

    let mut n = NullJsonb::some(Document::from("{}"));
    assert!(n.unmarshal_json(b"{broken").is_err());
    assert!(n.is_none());
}

#[test]
fn non_finite_floats_cannot_be_encoded() {
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = NullFloat64::some(value).marshal_json().unwrap_err();
        assert!(matches!(err, NullError::Encode { data_type: "Float64", .. }), "{value}");
    }
    assert_eq!(NullFloat64::some(-0.5).marshal_json().unwrap(), b"-0.5");
}

#[test]
fn documents_keep_their_bytes() {
    let mut n = NullJsonb::none();
    n.unmarshal_json(br#""bnVsbA==""#).expect("decode");
    assert_eq!(n, NullJsonb::some(Document::from("null")));
    n.unmarshal_json(br#""""#).expect("decode");
    assert_eq!(n, NullJsonb::some(Document::default()));
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Profile {
    name: NullString,
    #[serde(default)]
    age: NullInt64,
    tags: NullInt64Slice,
    extra: NullJsonb,
}

#[test]
fn struct_fields() {
    let profile: Profile =
        serde_json::from_str(r#"{"name":"Ann","tags":null,"extra":"eyJ4IjpbMSwgMl19"}"#).unwrap();
    assert_eq!(profile.name, NullString::some("Ann".into()));
    assert!(profile.age.is_none());
    assert!(profile.tags.is_none());
    assert_eq!(profile.extra.unwrap_or_default(), Document::from(r#"{"x":[1, 2]}"#));

    let out = serde_json::to_string(&Profile {
        name: NullString::none(),
        age: NullInt64::some(0),
        tags: NullInt64Slice::some(vec![]),
        extra: NullJsonb::none(),
    })
    .unwrap();
    assert_eq!(out, r#"{"name":null,"age":0,"tags":[],"extra":null}"#);
}
