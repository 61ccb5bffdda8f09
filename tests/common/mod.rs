use chrono::NaiveDate;
use feedback_flow::model::Purchase;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn purchase(
    tester: &str,
    on: NaiveDate,
    order: &str,
    description: &str,
    amount_cents: i64,
) -> Purchase {
    Purchase::new(
        tester.to_string(),
        on,
        order.to_string(),
        description.to_string(),
        amount_cents,
        format!("receipts/{order}.webp"),
    )
}
