// crates/flow-core/tests/formatting.rs
use chrono::NaiveDate;
use flow_core::{
    days_to_expiration, format_contract, format_dte, format_premium, format_price, format_strike,
    is_large_premium, parse_formatted_number, CallPut, OptionsFlow, TradeKind,
};

#[test]
fn parses_unit_suffixes_and_separators() {
    assert_eq!(parse_formatted_number("25k"), Ok(25_000.0));
    assert_eq!(parse_formatted_number("10B"), Ok(1e10));
    assert_eq!(parse_formatted_number("1,234"), Ok(1_234.0));
    assert_eq!(parse_formatted_number("2.5 m"), Ok(2_500_000.0));
    assert_eq!(parse_formatted_number("0.01"), Ok(0.01));
}

#[test]
fn empty_input_is_not_zero() {
    assert!(parse_formatted_number("").is_err());
    assert!(parse_formatted_number("   ").is_err());
    assert!(parse_formatted_number("abc").is_err());
}

#[test]
fn premium_units_and_star() {
    let millions = format_premium(1_500_000.0);
    assert!(millions.contains('M') && millions.contains('★'), "{millions}");
    assert_eq!(millions, "1.50M ★");

    let large = format_premium(600_000.0);
    assert!(large.contains('k') && large.contains('★'), "{large}");

    let small = format_premium(900.0);
    assert!(!small.contains('★') && !small.contains('k'), "{small}");
    assert_eq!(small, "900.00");

    assert_eq!(format_premium(2_500.0), "2.50k");
    assert!(is_large_premium(500_000.0));
    assert!(!is_large_premium(499_999.0));
}

#[test]
fn strike_decimals() {
    assert_eq!(format_strike(180.0), "180");
    assert_eq!(format_strike(182.5), "182.50");
    assert_eq!(format_strike(f64::NAN), "N/A");
}

#[test]
fn days_to_expiration_counts_calendar_days() {
    let today = NaiveDate::from_ymd_opt(2024, 5, 10).expect("valid date");
    assert_eq!(days_to_expiration("2024-05-17", today), Some(7));
    assert_eq!(days_to_expiration("2024-05-10", today), Some(0));
    assert_eq!(format_dte("2024-05-09", today), "-1d");
    assert_eq!(format_dte("garbage", today), "N/A");
}

#[test]
fn compact_contract_label() {
    let record = OptionsFlow {
        time: "10:00:00".to_string(),
        ticker: "TSLA".to_string(),
        callput: CallPut::Put,
        strike: 172.5,
        expiration: "2024-05-17".to_string(),
        price: 2.0,
        size: 10,
        totalpremium: 2_000.0,
        is_sweep: "SWEEP".to_string(),
        dte: None,
    };
    assert_eq!(format_contract(&record), "2024-05-17 TSLA 172.50 P");
    assert_eq!(record.kind(), TradeKind::Sweep);
}

#[test]
fn trade_kind_classification_order() {
    assert_eq!(TradeKind::classify(""), TradeKind::None);
    assert_eq!(TradeKind::classify("SPLIT"), TradeKind::Split);
    assert_eq!(TradeKind::classify("UNUSUAL SWEEP"), TradeKind::Sweep);
    assert_eq!(TradeKind::classify("UNUSUAL"), TradeKind::Unusual);
    assert_eq!(TradeKind::classify("BLOCK"), TradeKind::Other);
}

#[test]
fn record_accepts_numeric_strings() {
    let json = r#"{
        "time": "09:45:12",
        "ticker": "NVDA",
        "callput": "CALL",
        "strike": "950",
        "expiration": "2024-06-21",
        "price": 12.4,
        "size": "300",
        "totalpremium": 372000,
        "is_sweep": null
    }"#;

    let record: OptionsFlow = serde_json::from_str(json).expect("record should decode");

    assert_eq!(record.strike, 950.0);
    assert_eq!(record.size, 300);
    assert_eq!(record.callput, CallPut::Call);
    assert_eq!(record.is_sweep, "");
}

#[test]
fn record_rejects_fractional_size() {
    let json = r#"{"ticker":"SPY","callput":"PUT","strike":500,"price":1,"size":1.5,"totalpremium":150}"#;
    assert!(serde_json::from_str::<OptionsFlow>(json).is_err());
}

#[test]
fn record_with_null_or_missing_amounts_decodes_as_not_available() {
    let json = r#"{"ticker":"AMD","callput":"PUT","strike":null,"size":40,"totalpremium":""}"#;

    let record: OptionsFlow = serde_json::from_str(json).expect("record should decode");

    assert!(record.strike.is_nan());
    assert!(record.price.is_nan());
    assert!(record.totalpremium.is_nan());
    assert_eq!(format_strike(record.strike), "N/A");
    assert_eq!(format_price(record.price), "N/A");
    assert_eq!(format_premium(record.totalpremium), "N/A");
    assert!(!is_large_premium(record.totalpremium));
    assert_eq!(format_price(2.35), "2.35");
}

#[test]
fn record_rejects_garbage_amounts() {
    let json = r#"{"ticker":"AMD","callput":"PUT","strike":"soon","size":40,"totalpremium":100}"#;
    assert!(serde_json::from_str::<OptionsFlow>(json).is_err());
}
