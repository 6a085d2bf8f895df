use chrono::{TimeZone, Utc};
use sqlnull::{
    DataType, Document, DriverValue, NullBool, NullBytes, NullError, NullFloat64, NullInt16,
    NullInt64, NullInt64Slice, NullJsonb, NullString, NullTime, Nullable,
};

#[test]
fn absent_binds_nothing() {
    fn check<T: DataType>() {
        assert_eq!(Nullable::<T>::none().to_driver_value().unwrap(), None);
    }
    check::<bool>();
    check::<f64>();
    check::<i16>();
    check::<i64>();
    check::<String>();
    check::<Vec<u8>>();
    check::<Vec<i64>>();
    check::<Document>();
    check::<chrono::DateTime<Utc>>();
}

#[test]
fn present_driver_values() {
    let t = Utc.with_ymd_and_hms(2022, 12, 31, 23, 59, 59).unwrap();
    assert_eq!(NullBool::some(true).to_driver_value().unwrap(), Some(DriverValue::Bool(true)));
    assert_eq!(NullFloat64::some(0.5).to_driver_value().unwrap(), Some(DriverValue::Float(0.5)));
    assert_eq!(NullInt16::some(-7).to_driver_value().unwrap(), Some(DriverValue::Int(-7)));
    assert_eq!(NullInt64::some(7).to_driver_value().unwrap(), Some(DriverValue::Int(7)));
    assert_eq!(
        NullString::some("s".into()).to_driver_value().unwrap(),
        Some(DriverValue::Text("s".into()))
    );
    assert_eq!(
        NullBytes::some(vec![1]).to_driver_value().unwrap(),
        Some(DriverValue::Bytes(vec![1]))
    );
    assert_eq!(NullTime::some(t).to_driver_value().unwrap(), Some(DriverValue::Time(t)));
    assert_eq!(
        NullInt64Slice::some(vec![1, 2, 3]).to_driver_value().unwrap(),
        Some(DriverValue::Text("{1,2,3}".into()))
    );
    assert_eq!(
        NullInt64Slice::some(vec![]).to_driver_value().unwrap(),
        Some(DriverValue::Text("{}".into()))
    );
}

#[test]
fn document_driver_special_cases() {
    assert_eq!(NullJsonb::some(Document::from("null")).to_driver_value().unwrap(), None);
    assert_eq!(
        NullJsonb::some(Document::default()).to_driver_value().unwrap(),
        Some(DriverValue::Bytes(b"{}".to_vec()))
    );
    assert_eq!(
        NullJsonb::some(Document::from(r#"{"a":"\u0000b\u0000"}"#)).to_driver_value().unwrap(),
        Some(DriverValue::Bytes(br#"{"a":"b"}"#.to_vec()))
    );
}

#[test]
fn scanning_null_makes_absent() {
    let mut n = NullInt64::some(3);
    n.scan(None).unwrap();
    assert_eq!(n, NullInt64::none());
    let mut n = NullJsonb::some(Document::from("{}"));
    n.scan(None).unwrap();
    assert!(n.is_none());
}

#[test]
fn scanning_converts_generically() {
    let mut n = NullInt64::none();
    n.scan(Some(DriverValue::Bytes(b"12".to_vec()))).unwrap();
    assert_eq!(n, NullInt64::some(12));

    let mut n = NullFloat64::none();
    n.scan(Some(DriverValue::Int(2))).unwrap();
    assert_eq!(n, NullFloat64::some(2.0));

    let mut n = NullBool::none();
    n.scan(Some(DriverValue::Int(0))).unwrap();
    assert_eq!(n, NullBool::some(false));

    let mut n = NullString::none();
    n.scan(Some(DriverValue::Int(-4))).unwrap();
    assert_eq!(n, NullString::some("-4".into()));

    let mut n = NullBytes::none();
    n.scan(Some(DriverValue::Text("ab".into()))).unwrap();
    assert_eq!(n, NullBytes::some(b"ab".to_vec()));

    let mut n = NullInt64Slice::none();
    n.scan(Some(DriverValue::Bytes(b"{4,-5}".to_vec()))).unwrap();
    assert_eq!(n, NullInt64Slice::some(vec![4, -5]));

    let mut n = NullTime::none();
    n.scan(Some(DriverValue::Text("2022-12-31 23:59:59+00:00".into()))).unwrap();
    assert_eq!(n, NullTime::some(Utc.with_ymd_and_hms(2022, 12, 31, 23, 59, 59).unwrap()));
}

#[test]
fn failed_scalar_scan_keeps_previous_state() {
    let mut n = NullInt64::some(9);
    let err = n.scan(Some(DriverValue::Text("nine".into()))).unwrap_err();
    assert!(matches!(err, NullError::Conversion { to: "int64", .. }));
    assert_eq!(n, NullInt64::some(9));

    let mut n = NullInt16::some(1);
    assert!(n.scan(Some(DriverValue::Int(1 << 20))).is_err());
    assert_eq!(n, NullInt16::some(1));

    let mut n = NullString::some("kept".into());
    assert!(n.scan(Some(DriverValue::Bytes(vec![0xff]))).is_err());
    assert_eq!(n, NullString::some("kept".into()));

    let mut n = NullTime::none();
    assert!(n.scan(Some(DriverValue::Bool(true))).is_err());
    assert!(n.is_none());
}

#[test]
fn failed_sequence_scan_resets() {
    let mut n = NullInt64Slice::some(vec![1]);
    let err = n.scan(Some(DriverValue::Text("{1,x,3}".into()))).unwrap_err();
    assert!(matches!(err, NullError::ArrayLiteral { .. }));
    assert_eq!(n, NullInt64Slice::none());

    let mut n = NullInt64Slice::some(vec![1]);
    assert!(n.scan(Some(DriverValue::Bytes(vec![0xff]))).is_err());
    assert!(n.is_none());
}

#[test]
fn byte_and_document_scans_accept_any_value() {
    let t = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
    for src in [
        DriverValue::Bool(true),
        DriverValue::Int(-1),
        DriverValue::Float(0.5),
        DriverValue::Bytes(vec![0xff]),
        DriverValue::Time(t),
    ] {
        let mut bytes = NullBytes::none();
        bytes.scan(Some(src.clone())).expect("bytes scan");
        assert!(bytes.is_some());
        let mut doc = NullJsonb::none();
        doc.scan(Some(src)).expect("document scan");
        assert!(doc.is_some());
    }
}
