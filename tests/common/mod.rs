#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use loan_report_pdf::{
    ObligationRecord, RenderOptions, RenderedReport, ReportBundle, ReportRenderer, SalarySlip,
};

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

pub fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 18)
        .and_then(|d| d.and_hms_opt(15, 45, 0))
        .unwrap()
}

pub fn fixed_options() -> RenderOptions {
    RenderOptions {
        generated_at: Some(fixed_time()),
        ..RenderOptions::default()
    }
}

pub fn renderer() -> ReportRenderer {
    let _ = env_logger::builder().is_test(true).try_init();
    ReportRenderer::new(fixed_options())
}

pub fn render(bundle: &ReportBundle) -> RenderedReport {
    renderer().render(bundle)
}

pub fn salary_slip(month: &str, basic: f64) -> SalarySlip {
    let earnings = BTreeMap::from([
        ("basic".to_string(), basic),
        ("hra".to_string(), basic * 0.4),
        ("medical_allowance".to_string(), 1250.0),
    ]);
    let deductions = BTreeMap::from([
        ("tds".to_string(), 5000.0),
        ("professional_tax".to_string(), 200.0),
    ]);
    let gross = basic * 1.4 + 1250.0;
    SalarySlip {
        month: Some(month.to_string()),
        earnings,
        deductions,
        gross_salary: Some(gross),
        net_salary: Some(gross - 5200.0),
    }
}

pub fn obligation(lender: &str, loan_type: &str, amount: f64, excluded: bool) -> ObligationRecord {
    ObligationRecord {
        lender: Some(lender.to_string()),
        loan_type: Some(loan_type.to_string()),
        amount: Some(amount),
        excluded,
        has_loan_document: false,
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Every visual line of every page, in order.
pub fn all_lines(report: &RenderedReport) -> Vec<String> {
    report.pages.iter().flat_map(|p| p.lines()).collect()
}

/// The first line that starts with `prefix`.
pub fn line_starting(report: &RenderedReport, prefix: &str) -> Option<String> {
    all_lines(report).into_iter().find(|l| l.starts_with(prefix))
}

/// Value part of every `Label: value` line with the given label.
pub fn field_values(report: &RenderedReport, label: &str) -> Vec<String> {
    let prefix = format!("{label}: ");
    all_lines(report)
        .into_iter()
        .filter_map(|l| l.strip_prefix(&prefix).map(str::to_string))
        .collect()
}
