use chrono::NaiveDate;
use loan_report_pdf::format::{
    PLACEHOLDER, completion_or_na, generation_timestamp, grouped, map_or_na, or_na, percent_or_na,
    plain_number, rupees, rupees_or_na, title_case, years_or_na,
};

#[test]
fn grouping_inserts_thousands_separators() {
    assert_eq!(grouped(0.0, 0), "0");
    assert_eq!(grouped(999.0, 0), "999");
    assert_eq!(grouped(1000.0, 0), "1,000");
    assert_eq!(grouped(1234567.891, 2), "1,234,567.89");
    assert_eq!(grouped(100250.0, 0), "100,250");
    assert_eq!(grouped(-4200.0, 2), "-4,200.00");
}

#[test]
fn negative_zero_has_no_sign() {
    assert_eq!(grouped(-0.0, 0), "0");
    assert_eq!(grouped(-0.001, 2), "0.00");
}

#[test]
fn rupee_amounts() {
    assert_eq!(rupees(500000.0, 0), "Rs500,000");
    assert_eq!(rupees(4000.0, 2), "Rs4,000.00");
    assert_eq!(rupees_or_na(Some(21695.333), 2), "Rs21,695.33");
    assert_eq!(rupees_or_na(None, 2), PLACEHOLDER);
}

#[test]
fn placeholder_for_absent_or_blank_text() {
    assert_eq!(PLACEHOLDER, "N/A");
    assert_eq!(or_na(None), "N/A");
    assert_eq!(or_na(Some("")), "N/A");
    assert_eq!(or_na(Some("  \t")), "N/A");
    assert_eq!(or_na(Some(" Finance ")), "Finance");
    assert_eq!(map_or_na(Some(3), |n| format!("{n} items")), "3 items");
    assert_eq!(map_or_na(None::<u32>, |n| n.to_string()), "N/A");
}

#[test]
fn numbers_drop_trailing_zero_fractions() {
    assert_eq!(plain_number(20.0), "20");
    assert_eq!(plain_number(8.5), "8.5");
    assert_eq!(plain_number(-3.0), "-3");
    assert_eq!(years_or_na(Some(25.0)), "25 years");
    assert_eq!(years_or_na(Some(2.5)), "2.5 years");
    assert_eq!(years_or_na(None), "N/A");
}

#[test]
fn percentages() {
    assert_eq!(percent_or_na(Some(42.1234), 2), "42.12%");
    assert_eq!(percent_or_na(Some(60.0), 2), "60.00%");
    assert_eq!(percent_or_na(None, 2), "N/A");
    assert_eq!(completion_or_na(Some(80.0)), "80%");
    assert_eq!(completion_or_na(Some(66.7)), "66.7%");
    assert_eq!(completion_or_na(None), "N/A");
}

#[test]
fn title_case_capitalizes_each_alphabetic_run() {
    assert_eq!(title_case("home loan"), "Home Loan");
    assert_eq!(title_case("home_loan"), "Home_Loan");
    assert_eq!(title_case("CREDIT card"), "Credit Card");
    assert_eq!(title_case("2-wheeler loan"), "2-Wheeler Loan");
    assert_eq!(title_case(""), "");
}

#[test]
fn generation_timestamp_format() {
    let at = NaiveDate::from_ymd_opt(2026, 10, 18)
        .and_then(|d| d.and_hms_opt(15, 45, 0))
        .unwrap();
    assert_eq!(generation_timestamp(&at), "18 October 2026, 03:45 PM");

    let morning = NaiveDate::from_ymd_opt(2026, 1, 5)
        .and_then(|d| d.and_hms_opt(9, 5, 0))
        .unwrap();
    assert_eq!(generation_timestamp(&morning), "05 January 2026, 09:05 AM");
}
