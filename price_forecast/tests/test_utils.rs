use chrono::NaiveDate;
use price_forecast::utils::{add_days, date_parser, date_range};
use price_forecast::ForecastError;
use rstest::rstest;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[rstest]
#[case("2024-01-05", d(2024, 1, 5))]
#[case("01/05/2024", d(2024, 1, 5))]
#[case("2024/01/05", d(2024, 1, 5))]
#[case("2024-01-05 16:00:00", d(2024, 1, 5))]
#[case("2024-01-05T09:30:00.250", d(2024, 1, 5))]
#[case("2024-01-05T00:00:00Z", d(2024, 1, 5))]
#[case("2024-01-05T00:00:00+05:30", d(2024, 1, 5))]
#[case("2024-01-05T23:00:00-05:00", d(2024, 1, 5))]
#[case("2024-01-05 00:00:00+05:30", d(2024, 1, 5))]
#[case("  2024-01-05  ", d(2024, 1, 5))]
fn test_parse_date(#[case] raw: &str, #[case] expected: NaiveDate) {
    assert_eq!(date_parser::parse_date(raw).unwrap(), expected);
}

#[rstest]
#[case("")]
#[case("yesterday")]
#[case("2024-13-01")]
#[case("2023-02-29")]
fn test_parse_date_rejects_garbage(#[case] raw: &str) {
    assert!(matches!(
        date_parser::parse_date(raw),
        Err(ForecastError::DataError(_))
    ));
}

#[test]
fn test_calendar_helpers() {
    assert_eq!(add_days(d(2024, 2, 28), 2).unwrap(), d(2024, 3, 1));
    assert!(add_days(NaiveDate::MAX, 1).is_err());

    let range = date_range(d(2023, 12, 30), d(2024, 1, 2));
    assert_eq!(range.len(), 4);
    assert_eq!(range.first(), Some(&d(2023, 12, 30)));
    assert_eq!(range.last(), Some(&d(2024, 1, 2)));
}
