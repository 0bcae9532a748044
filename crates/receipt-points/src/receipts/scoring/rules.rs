use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use super::super::domain::{Amount, Receipt};
use super::super::validation::{ReceiptValidator, ValidatedItem, ValidationError};
use super::{CalculationError, PointsRule, ScoreComponent};

const ROUND_DOLLAR_POINTS: i64 = 50;
const QUARTER_MULTIPLE_POINTS: i64 = 25;
const POINTS_PER_ITEM_PAIR: i64 = 5;
const ODD_DAY_POINTS: i64 = 6;
const AFTERNOON_POINTS: i64 = 10;
const AFTERNOON_START_HOUR: u32 = 14;
const AFTERNOON_END_HOUR: u32 = 16;

fn blocked(rule: PointsRule) -> impl FnOnce(ValidationError) -> CalculationError {
    move |source| CalculationError { rule, source }
}

pub(crate) fn score_receipt(
    validator: &ReceiptValidator,
    receipt: &Receipt,
) -> Result<Vec<ScoreComponent>, CalculationError> {
    let mut components = Vec::with_capacity(7);

    let retailer = validator
        .retailer(&receipt.retailer)
        .map_err(blocked(PointsRule::RetailerName))?;
    components.push(retailer_name(retailer));

    let purchase_date = validator
        .purchase_date(&receipt.purchase_date)
        .map_err(blocked(PointsRule::OddPurchaseDay))?;
    components.push(odd_purchase_day(purchase_date));

    let purchase_time = validator
        .purchase_time(&receipt.purchase_time)
        .map_err(blocked(PointsRule::AfternoonPurchase))?;
    components.push(afternoon_purchase(purchase_time));

    if receipt.items.is_empty() {
        return Err(blocked(PointsRule::ItemPairs)(ValidationError::MissingItems));
    }
    components.push(item_pairs(receipt.items.len()));

    let items = validator
        .items(&receipt.items)
        .map_err(blocked(PointsRule::ItemDescription))?;
    components.push(item_descriptions(&items)?);

    let total = validator
        .total(&receipt.total)
        .map_err(blocked(PointsRule::RoundDollarTotal))?;
    components.push(round_dollar_total(total));
    components.push(quarter_multiple_total(total));

    Ok(components)
}

/// One point per Unicode letter or digit.
pub(crate) fn retailer_name(retailer: &str) -> ScoreComponent {
    let count = retailer.chars().filter(|c| c.is_alphanumeric()).count() as i64;
    ScoreComponent {
        rule: PointsRule::RetailerName,
        points: count,
        notes: format!("{count} alphanumeric character(s) in '{}'", retailer.trim()),
    }
}

pub(crate) fn round_dollar_total(total: Amount) -> ScoreComponent {
    if total.is_whole_dollars() {
        ScoreComponent {
            rule: PointsRule::RoundDollarTotal,
            points: ROUND_DOLLAR_POINTS,
            notes: format!("total {total} has no cents"),
        }
    } else {
        ScoreComponent {
            rule: PointsRule::RoundDollarTotal,
            points: 0,
            notes: format!("total {total} is not a round dollar amount"),
        }
    }
}

pub(crate) fn quarter_multiple_total(total: Amount) -> ScoreComponent {
    if total.is_multiple_of(25) {
        ScoreComponent {
            rule: PointsRule::QuarterMultipleTotal,
            points: QUARTER_MULTIPLE_POINTS,
            notes: format!("total {total} is a multiple of 0.25"),
        }
    } else {
        ScoreComponent {
            rule: PointsRule::QuarterMultipleTotal,
            points: 0,
            notes: format!("total {total} is not a multiple of 0.25"),
        }
    }
}

/// Five points per complete pair; an odd item out earns nothing.
pub(crate) fn item_pairs(item_count: usize) -> ScoreComponent {
    let pairs = (item_count / 2) as i64;
    ScoreComponent {
        rule: PointsRule::ItemPairs,
        points: pairs * POINTS_PER_ITEM_PAIR,
        notes: format!("{item_count} item(s) make {pairs} pair(s)"),
    }
}

/// `ceil(price * 0.2)` for each item whose trimmed description length is a
/// multiple of three. On cents that is `ceil(cents / 500)`.
pub(crate) fn item_descriptions(
    items: &[ValidatedItem],
) -> Result<ScoreComponent, CalculationError> {
    let overflow = || blocked(PointsRule::ItemDescription)(ValidationError::ItemPointsOverflow);

    let mut points: i64 = 0;
    let mut qualifying = 0;
    for item in items {
        if item.description.len() % 3 == 0 {
            let bonus = i64::try_from(item.price.cents().div_ceil(500)).map_err(|_| overflow())?;
            points = points.checked_add(bonus).ok_or_else(overflow)?;
            qualifying += 1;
        }
    }

    Ok(ScoreComponent {
        rule: PointsRule::ItemDescription,
        points,
        notes: format!(
            "{qualifying} of {} description(s) have a length divisible by 3",
            items.len()
        ),
    })
}

pub(crate) fn odd_purchase_day(date: NaiveDate) -> ScoreComponent {
    let day = date.day();
    let points = if day % 2 == 1 { ODD_DAY_POINTS } else { 0 };
    ScoreComponent {
        rule: PointsRule::OddPurchaseDay,
        points,
        notes: format!("purchased on day {day} of the month"),
    }
}

/// 14:00 through 15:59 qualify; minutes are ignored.
pub(crate) fn afternoon_purchase(time: NaiveTime) -> ScoreComponent {
    let hour = time.hour();
    let points = if (AFTERNOON_START_HOUR..AFTERNOON_END_HOUR).contains(&hour) {
        AFTERNOON_POINTS
    } else {
        0
    };
    ScoreComponent {
        rule: PointsRule::AfternoonPurchase,
        points,
        notes: format!("purchased at {}", time.format("%H:%M")),
    }
}
