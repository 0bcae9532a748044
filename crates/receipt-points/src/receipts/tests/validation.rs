use super::common::*;
use crate::receipts::domain::{Amount, Item};
use crate::receipts::validation::{parse_amount, ReceiptField, ReceiptValidator, ValidationError};
use chrono::{NaiveDate, NaiveTime};

#[test]
fn validate_parses_typed_fields() {
    let validated = ReceiptValidator::new()
        .validate(&target_receipt())
        .expect("example receipt is valid");

    assert_eq!(
        validated.purchase_date,
        NaiveDate::from_ymd_opt(2022, 1, 1).expect("valid date")
    );
    assert_eq!(
        validated.purchase_time,
        NaiveTime::from_hms_opt(13, 1, 0).expect("valid time")
    );
    assert_eq!(validated.total, Amount::from_cents(3535));
    assert_eq!(validated.items.len(), 5);
    assert_eq!(validated.items[4].description, "Klarbrunn 12-PK 12 FL OZ");
    assert_eq!(validated.items[4].price, Amount::from_cents(1200));
}

#[test]
fn retailer_accepts_ampersand_dash_and_whitespace_only() {
    let validator = ReceiptValidator::new();
    assert!(validator.retailer("M&M Corner-Market").is_ok());
    assert!(validator.retailer("     ").is_ok());
}

#[test]
fn retailer_rejects_symbols_and_empty_names() {
    let validator = ReceiptValidator::new();
    for name in ["Invalid@Retailer!", "", "Joe's", "Shop_1"] {
        match validator.retailer(name) {
            Err(ValidationError::InvalidRetailer { value }) => assert_eq!(value, name),
            other => panic!("expected retailer error for {name:?}, got {other:?}"),
        }
    }
}

#[test]
fn purchase_date_requires_iso_calendar_dates() {
    let validator = ReceiptValidator::new();
    assert!(validator.purchase_date("2024-02-29").is_ok());

    for raw in ["2022-1-01", "01/01/2022", "2023-02-29", "2022-13-01", "", "2022-01-01T00:00"] {
        assert!(
            matches!(
                validator.purchase_date(raw),
                Err(ValidationError::InvalidPurchaseDate { .. })
            ),
            "{raw:?} should be rejected"
        );
    }
}

#[test]
fn purchase_time_requires_twenty_four_hour_minutes() {
    let validator = ReceiptValidator::new();
    assert!(validator.purchase_time("00:00").is_ok());
    assert!(validator.purchase_time("23:59").is_ok());

    for raw in ["14:33:00", "2:33", "02:33 PM", "24:00", "12:60", ""] {
        assert!(
            matches!(
                validator.purchase_time(raw),
                Err(ValidationError::InvalidPurchaseTime { .. })
            ),
            "{raw:?} should be rejected"
        );
    }
}

#[test]
fn items_must_be_present_with_descriptions_and_prices() {
    let validator = ReceiptValidator::new();

    assert_eq!(validator.items(&[]), Err(ValidationError::MissingItems));
    assert_eq!(
        validator.items(&[Item::new("Bread", "1.00"), Item::new("   ", "2.00")]),
        Err(ValidationError::EmptyItemDescription { index: 1 })
    );
    assert_eq!(
        validator.items(&[Item::new("Bread", "-1.00")]),
        Err(ValidationError::InvalidItemPrice {
            index: 0,
            value: "-1.00".to_string(),
        })
    );
}

#[test]
fn amounts_need_exactly_two_decimals() {
    assert_eq!(parse_amount("0.00"), Some(Amount::from_cents(0)));
    assert_eq!(parse_amount("12.25"), Some(Amount::from_cents(1225)));

    for raw in ["12", "12.5", "12.255", "-1.00", "+1.00", "1e2", " 1.00", "1.00 ", ""] {
        assert_eq!(parse_amount(raw), None, "{raw:?} should be rejected");
    }
}

#[test]
fn amounts_too_large_for_cents_are_rejected() {
    assert_eq!(
        parse_amount("99999999999999999999.00"),
        Some(Amount::from_cents(9_999_999_999_999_999_999_900))
    );
    assert_eq!(
        parse_amount("3402823669209384634633746074317682114.55"),
        Some(Amount::from_cents(u128::MAX))
    );
    assert_eq!(parse_amount("3402823669209384634633746074317682114.56"), None);
}

#[test]
fn oversized_total_is_reported_on_total() {
    let mut receipt = target_receipt();
    receipt.total = "99999999999999999999999999999999999999999.00".to_string();

    let err = ReceiptValidator::new()
        .validate(&receipt)
        .expect_err("total exceeds cent range");
    assert_eq!(
        err,
        ValidationError::InvalidTotal {
            value: receipt.total.clone(),
        }
    );
}

#[test]
fn validate_stops_at_first_failing_field() {
    let validator = ReceiptValidator::new();

    let mut receipt = target_receipt();
    receipt.purchase_time = "1:01pm".to_string();
    receipt.total = "abc".to_string();
    let err = validator.validate(&receipt).expect_err("time is invalid");
    assert_eq!(err.field(), ReceiptField::PurchaseTime);

    let mut receipt = target_receipt();
    receipt.total = "35.3".to_string();
    let err = validator.validate(&receipt).expect_err("total is invalid");
    assert_eq!(err.field(), ReceiptField::Total);
    assert_eq!(err.field().label(), "total");
}

#[test]
fn blank_receipt_fails_on_retailer() {
    let err = ReceiptValidator::new()
        .validate(&Default::default())
        .expect_err("blank receipt is invalid");
    assert_eq!(err.field(), ReceiptField::Retailer);
}
