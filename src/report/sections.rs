//! The ordered content blocks of the report body.

use chrono::NaiveDateTime;

use crate::fonts::FontStyle;
use crate::format::{
    completion_or_na, generation_timestamp, grouped, map_or_na, or_na, percent_or_na,
    plain_number, rupees, rupees_or_na, title_case, years_or_na,
};
use crate::model::{
    ApplicantProfile, DocumentStatus, EligibilityResult, FormStatus, ObligationRecord,
    ReportBundle, SalaryAnalysis, active_obligations_total,
};
use crate::pdf::Rgb;
use crate::pdf::layout::{Align, Cell, PageFlow, mm};
use crate::pdf::table::{Column, TableStyle, render_table};

use super::RenderOptions;
use super::chrome::{add_field, section_title};

/// Slips beyond this many (most recent first) are not shown.
const SALARY_MONTHS: usize = 3;

const DISCLAIMER: &str = "Note: This is an automated analysis. Please verify all information \
    against the actual documents. Aadhar numbers are masked showing only the last 4 digits. \
    PAN numbers are masked showing only the last 4 characters.";

pub(super) fn render_body(
    flow: &mut PageFlow<'_>,
    bundle: &ReportBundle,
    options: &RenderOptions,
    generated_at: &NaiveDateTime,
) {
    generation_line(flow, generated_at);
    documents_uploaded(flow, &bundle.documents);
    applicant_summary(flow, &bundle.applicant, options);
    salary_breakup(flow, &bundle.salary_analysis);
    eligibility_summary(flow, &bundle.applicant, &bundle.eligibility, options);
    existing_obligations(flow, &bundle.obligations, &bundle.eligibility);
    pending_documents(flow, &bundle.documents);
    pending_forms(flow, &bundle.forms);
    probable_queries(flow, &bundle.queries);
    disclaimer(flow);
}

fn generation_line(flow: &mut PageFlow<'_>, generated_at: &NaiveDateTime) {
    flow.set_font(FontStyle::Italic, 9.0);
    let line = format!("Generated on: {}", generation_timestamp(generated_at));
    flow.cell(0.0, mm(5.0), &line, Cell::line().align(Align::Right));
    flow.ln(mm(5.0));
}

fn documents_uploaded(flow: &mut PageFlow<'_>, documents: &DocumentStatus) {
    section_title(flow, "DOCUMENTS UPLOADED");

    if documents.uploaded_documents_details.is_empty() {
        flow.set_font(FontStyle::Italic, 9.0);
        flow.cell(0.0, mm(6.0), "No documents uploaded", Cell::line());
    }

    for doc in &documents.uploaded_documents_details {
        flow.set_font(FontStyle::Bold, 10.0);
        flow.multi_cell(0.0, mm(6.0), &format!("- {}", or_na(doc.document_type.as_deref())));
        flow.set_font(FontStyle::Regular, 9.0);

        if let Some(period) = doc.period.as_deref() {
            let line = format!(
                "Period: {} to {} ({})",
                or_na(doc.period_start.as_deref()),
                or_na(doc.period_end.as_deref()),
                or_na(Some(period)),
            );
            flow.skip(mm(10.0));
            flow.multi_cell(0.0, mm(5.0), &line);
        }
        if let Some(warning) = doc.warning.as_deref() {
            let mut alert = flow.text_color(Rgb::RED);
            alert.skip(mm(10.0));
            alert.multi_cell(0.0, mm(5.0), &format!("Warning: {warning}"));
        }
    }

    flow.ln(mm(5.0));
}

fn applicant_summary(flow: &mut PageFlow<'_>, applicant: &ApplicantProfile, options: &RenderOptions) {
    section_title(flow, "1. APPLICANT SUMMARY");

    let a = applicant;
    add_field(flow, "Applicant Name", &or_na(a.applicant_name.as_deref()));
    add_field(flow, "PAN", &or_na(a.pan_masked.as_deref()));
    add_field(flow, "Aadhar", &or_na(a.aadhar_masked.as_deref()));
    add_field(flow, "Date of Birth", &or_na(a.date_of_birth.as_deref()));
    add_field(flow, "Current Age", &years_or_na(a.current_age));
    add_field(flow, "Mobile Number", &or_na(a.mobile_no.as_deref()));
    add_field(flow, "Email ID", &or_na(a.email_id.as_deref()));
    add_field(flow, "Current Address", &or_na(a.current_address.as_deref()));
    flow.ln(mm(3.0));

    add_field(flow, "Employment Type", &or_na(Some(options.employment_type.as_str())));
    add_field(flow, "Employer/Company", &or_na(a.employer.as_deref()));
    add_field(flow, "Designation", &or_na(a.designation.as_deref()));
    add_field(flow, "Department", &or_na(a.department.as_deref()));
    add_field(flow, "Job Since", &or_na(a.job_since.as_deref()));
    add_field(flow, "Total Experience", &or_na(a.total_experience.as_deref()));
    add_field(flow, "Office Address", &or_na(a.office_address.as_deref()));
    flow.ln(mm(5.0));
}

const SALARY_COLUMNS: [Column; 9] = [
    Column::new("Month", 22.0, Align::Left),
    Column::new("Basic", 20.0, Align::Right),
    Column::new("HRA", 20.0, Align::Right),
    Column::new("Medical", 20.0, Align::Right),
    Column::new("Bonus", 20.0, Align::Right),
    Column::new("Gross", 25.0, Align::Right),
    Column::new("TDS", 18.0, Align::Right),
    Column::new("Prof. Tax", 18.0, Align::Right),
    Column::new("Net", 25.0, Align::Right),
];

fn salary_breakup(flow: &mut PageFlow<'_>, salary: &SalaryAnalysis) {
    section_title(flow, "2. COMPLETE SALARY BREAKUP (Last 3 Months)");

    let slips = &salary.salary_slips[..salary.salary_slips.len().min(SALARY_MONTHS)];
    if slips.is_empty() {
        flow.set_font(FontStyle::Italic, 9.0);
        flow.cell(0.0, mm(8.0), "Salary details unavailable", Cell::line());
    } else {
        let rows: Vec<Vec<String>> = slips
            .iter()
            .map(|slip| {
                vec![
                    or_na(slip.month.as_deref()),
                    grouped(slip.earning("basic"), 0),
                    grouped(slip.earning("hra"), 0),
                    grouped(slip.earning("medical_allowance"), 0),
                    grouped(slip.earning("bonus"), 0),
                    map_or_na(slip.gross_salary, |v| grouped(v, 0)),
                    grouped(slip.deduction("tds"), 0),
                    grouped(slip.deduction("professional_tax"), 0),
                    map_or_na(slip.net_salary, |v| grouped(v, 0)),
                ]
            })
            .collect();
        let style = TableStyle {
            header_fill: Rgb::LIGHT_GRAY,
            header_font_size: 9.0,
            header_height: mm(8.0),
            body_font_size: 8.0,
            row_height: mm(8.0),
        };
        render_table(flow, &SALARY_COLUMNS, &rows, &style);
    }

    flow.ln(mm(5.0));
}

fn eligibility_summary(
    flow: &mut PageFlow<'_>,
    applicant: &ApplicantProfile,
    eligibility: &EligibilityResult,
    options: &RenderOptions,
) {
    section_title(flow, "3. LOAN ELIGIBILITY SUMMARY");
    let calc = &eligibility.calculations;

    add_field(flow, "Requested Loan Amount", &rupees_or_na(applicant.loan_amount, 0));
    add_field(flow, "Tenure (Auto-calculated based on age)", &years_or_na(calc.approved_tenure_years));
    add_field(
        flow,
        "Interest Rate",
        &map_or_na(applicant.interest_rate, |r| format!("{}% p.a.", plain_number(r))),
    );
    flow.ln(mm(2.0));

    add_field(flow, "Current Age", &years_or_na(calc.current_age));
    add_field(flow, "Maximum Age Limit", &format!("{} years", options.max_age_limit));
    add_field(flow, "Remaining Service Years", &years_or_na(calc.remaining_service_years));
    add_field(flow, "Maximum Tenure Allowed", &years_or_na(calc.max_tenure_allowed));
    flow.ln(mm(2.0));

    add_field(flow, "Current FOIR (before new loan)", &percent_or_na(calc.current_foir_percent, 2));
    add_field(flow, "FOIR with Requested Loan", &percent_or_na(calc.foir_with_requested_loan, 2));
    add_field(flow, "Maximum FOIR Allowed", &format!("{:.2}%", options.max_foir_percent));
    flow.ln(mm(2.0));

    add_field(flow, "EMI for Requested Loan", &rupees_or_na(calc.emi_for_requested_loan, 2));
    add_field(flow, "Maximum EMI Capacity", &rupees_or_na(calc.max_emi_allowed, 2));
    add_field(flow, "Maximum Loan by Income", &rupees_or_na(calc.max_loan_by_income, 2));
    flow.ln(mm(3.0));

    flow.ensure_room(mm(10.0 + 7.0));
    if eligibility.eligible {
        let mut verdict = flow.text_color(Rgb::GREEN);
        verdict.set_font(FontStyle::Bold, 12.0);
        verdict.cell(0.0, mm(10.0), "ELIGIBLE FOR LOAN", Cell::line());
        verdict.set_font(FontStyle::Bold, 11.0);
        let approved = rupees_or_na(calc.approved_loan_amount, 0);
        verdict.cell(0.0, mm(7.0), &format!("Approved Amount: {approved}"), Cell::line());
    } else {
        let mut verdict = flow.text_color(Rgb::RED);
        verdict.set_font(FontStyle::Bold, 12.0);
        verdict.cell(0.0, mm(10.0), "NOT ELIGIBLE AS PER CURRENT NORMS", Cell::line());
        if let Some(recommended) = calc.recommended_loan_amount.filter(|&v| v > 0.0) {
            verdict.set_font(FontStyle::Bold, 11.0);
            let line = format!("Recommended Amount: {}", rupees(recommended, 0));
            verdict.cell(0.0, mm(7.0), &line, Cell::line());
        }
    }
    flow.ln(mm(3.0));

    bulleted(flow, "Issues:", Rgb::RED, &eligibility.issues);
    bulleted(flow, "Warnings:", Rgb::ORANGE, &eligibility.warnings);
    flow.ln(mm(5.0));
}

/// A colored bold heading followed by default-colored bullet items. Nothing when empty.
fn bulleted(flow: &mut PageFlow<'_>, heading: &str, color: Rgb, items: &[String]) {
    if items.is_empty() {
        return;
    }
    flow.set_font(FontStyle::Bold, 10.0);
    flow.text_color(color).cell(0.0, mm(7.0), heading, Cell::line());

    flow.set_font(FontStyle::Regular, 9.0);
    for item in items {
        flow.skip(mm(4.0));
        flow.multi_cell(0.0, mm(5.0), &format!("- {item}"));
    }
}

const OBLIGATION_COLUMNS: [Column; 4] = [
    Column::new("Lender/Bank", 60.0, Align::Left),
    Column::new("Loan Type", 45.0, Align::Left),
    Column::new("Monthly EMI", 40.0, Align::Right),
    Column::new("Status", 45.0, Align::Left),
];

fn existing_obligations(
    flow: &mut PageFlow<'_>,
    obligations: &[ObligationRecord],
    eligibility: &EligibilityResult,
) {
    section_title(flow, "4. EXISTING OBLIGATIONS / EMI DETAILS");

    let total = active_obligations_total(obligations);
    if obligations.is_empty() {
        flow.set_font(FontStyle::Regular, 10.0);
        flow.cell(0.0, mm(7.0), "No existing loan obligations identified", Cell::line());
    } else {
        let mut rows: Vec<Vec<String>> = obligations
            .iter()
            .map(|o| {
                vec![
                    or_na(o.lender.as_deref()),
                    title_case(&or_na(o.loan_type.as_deref())),
                    rupees_or_na(o.amount, 2),
                    if o.excluded { "Excluded" } else { "Active" }.to_string(),
                ]
            })
            .collect();
        rows.push(vec![
            String::new(),
            String::new(),
            rupees(total, 2),
            "TOTAL".to_string(),
        ]);
        let style = TableStyle {
            header_fill: Rgb::LIGHT_BLUE,
            header_font_size: 9.0,
            header_height: mm(8.0),
            body_font_size: 8.0,
            row_height: mm(7.0),
        };
        render_table(flow, &OBLIGATION_COLUMNS, &rows, &style);
    }
    flow.ln(mm(3.0));

    let considered = eligibility.calculations.total_existing_obligations;
    if let Some(considered) = considered
        && (considered - total).abs() >= 0.005
    {
        log::debug!(
            "Obligations total differs: listed active={total:.2}, considered={considered:.2}"
        );
    }
    add_field(
        flow,
        "Total Existing Obligations (considered)",
        &map_or_na(considered, |v| format!("{} per month", rupees(v, 2))),
    );
    flow.ln(mm(5.0));
}

fn pending_documents(flow: &mut PageFlow<'_>, documents: &DocumentStatus) {
    section_title(flow, "5. PENDING DOCUMENTS");
    pending_list(
        flow,
        &documents.pending_documents,
        "All mandatory documents uploaded",
    );
    add_field(flow, "Document Completion", &completion_or_na(documents.completion_percentage));
    flow.ln(mm(5.0));
}

fn pending_forms(flow: &mut PageFlow<'_>, forms: &FormStatus) {
    section_title(flow, "6. PENDING FORM DETAILS");
    pending_list(flow, &forms.pending_form_fields, "All form details complete");
    add_field(flow, "Form Completion", &completion_or_na(forms.completion_percentage));
    flow.ln(mm(5.0));
}

/// Numbered items, or a green confirmation when there are none.
fn pending_list(flow: &mut PageFlow<'_>, items: &[String], all_done: &str) {
    if items.is_empty() {
        flow.set_font(FontStyle::Bold, 10.0);
        flow.text_color(Rgb::GREEN).cell(0.0, mm(7.0), all_done, Cell::line());
    } else {
        flow.set_font(FontStyle::Regular, 10.0);
        for (i, item) in items.iter().enumerate() {
            flow.multi_cell(0.0, mm(6.0), &format!("{}. {}", i + 1, item));
        }
    }
    flow.ln(mm(3.0));
}

fn probable_queries(flow: &mut PageFlow<'_>, queries: &[String]) {
    section_title(flow, "7. PROBABLE QUERIES");

    if queries.is_empty() {
        flow.set_font(FontStyle::Bold, 10.0);
        flow.text_color(Rgb::GREEN).cell(
            0.0,
            mm(7.0),
            "No queries identified. File appears complete.",
            Cell::line(),
        );
    } else {
        flow.set_font(FontStyle::Regular, 9.0);
        for query in queries {
            flow.multi_cell(0.0, mm(5.0), query);
            flow.ln(mm(1.0));
        }
    }
    flow.ln(mm(10.0));
}

fn disclaimer(flow: &mut PageFlow<'_>) {
    flow.set_font(FontStyle::Italic, 8.0);
    flow.text_color(Rgb::GRAY).multi_cell(0.0, mm(5.0), DISCLAIMER);
}
