//! Input records consumed by the renderer.
//!
//! Every record is produced elsewhere (eligibility engine, completeness
//! checker, query generator) and is only read here. All fields are optional
//! and loading is lenient: numbers may arrive as JSON numbers or numeric
//! strings, and values of the wrong shape (including `null` lists and
//! sections) are treated as absent.

use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;

use crate::error::Result;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApplicantProfile {
    #[serde(deserialize_with = "lenient::text")]
    pub applicant_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub pan_masked: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub aadhar_masked: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub date_of_birth: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub current_age: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub mobile_no: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub email_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub current_address: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub employer: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub designation: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub department: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub job_since: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub total_experience: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub office_address: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub loan_amount: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub interest_rate: Option<f64>,
}

/// One month's payslip. `earnings` and `deductions` are keyed by component
/// name (`basic`, `hra`, `medical_allowance`, `bonus`, `tds`,
/// `professional_tax`, ...).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SalarySlip {
    #[serde(deserialize_with = "lenient::text")]
    pub month: Option<String>,
    #[serde(deserialize_with = "lenient::amounts")]
    pub earnings: BTreeMap<String, f64>,
    #[serde(deserialize_with = "lenient::amounts")]
    pub deductions: BTreeMap<String, f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub gross_salary: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub net_salary: Option<f64>,
}

impl SalarySlip {
    pub fn earning(&self, component: &str) -> f64 {
        self.earnings.get(component).copied().unwrap_or(0.0)
    }

    pub fn deduction(&self, component: &str) -> f64 {
        self.deductions.get(component).copied().unwrap_or(0.0)
    }
}

/// Slips are ordered most recent first.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SalaryAnalysis {
    #[serde(deserialize_with = "lenient::records")]
    pub salary_slips: Vec<SalarySlip>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EligibilityCalculations {
    #[serde(deserialize_with = "lenient::number")]
    pub approved_tenure_years: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub current_age: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub remaining_service_years: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub max_tenure_allowed: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub current_foir_percent: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub foir_with_requested_loan: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub emi_for_requested_loan: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub max_emi_allowed: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub max_loan_by_income: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub approved_loan_amount: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub recommended_loan_amount: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub total_existing_obligations: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EligibilityResult {
    #[serde(deserialize_with = "lenient::flag")]
    pub eligible: bool,
    #[serde(deserialize_with = "lenient::section")]
    pub calculations: EligibilityCalculations,
    #[serde(deserialize_with = "lenient::strings")]
    pub issues: Vec<String>,
    #[serde(deserialize_with = "lenient::strings")]
    pub warnings: Vec<String>,
}

/// An existing liability of the applicant.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ObligationRecord {
    #[serde(deserialize_with = "lenient::text")]
    pub lender: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::text")]
    pub loan_type: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub amount: Option<f64>,
    #[serde(deserialize_with = "lenient::flag")]
    pub excluded: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub has_loan_document: bool,
}

impl ObligationRecord {
    /// Monthly amount, with an absent amount counting as zero.
    pub fn monthly_amount(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }
}

/// Sum of the monthly amounts of every obligation that is not excluded.
pub fn active_obligations_total(obligations: &[ObligationRecord]) -> f64 {
    obligations
        .iter()
        .filter(|o| !o.excluded)
        .map(ObligationRecord::monthly_amount)
        .sum()
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct UploadedDocument {
    #[serde(deserialize_with = "lenient::text")]
    pub document_type: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub period: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub period_start: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub period_end: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub warning: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DocumentStatus {
    #[serde(deserialize_with = "lenient::records")]
    pub uploaded_documents_details: Vec<UploadedDocument>,
    #[serde(deserialize_with = "lenient::strings")]
    pub pending_documents: Vec<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub completion_percentage: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FormStatus {
    #[serde(deserialize_with = "lenient::strings")]
    pub pending_form_fields: Vec<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub completion_percentage: Option<f64>,
}

/// Everything one report is rendered from.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReportBundle {
    #[serde(deserialize_with = "lenient::section")]
    pub applicant: ApplicantProfile,
    #[serde(deserialize_with = "lenient::section")]
    pub salary_analysis: SalaryAnalysis,
    #[serde(deserialize_with = "lenient::section")]
    pub eligibility: EligibilityResult,
    #[serde(deserialize_with = "lenient::records")]
    pub obligations: Vec<ObligationRecord>,
    #[serde(deserialize_with = "lenient::section")]
    pub documents: DocumentStatus,
    #[serde(deserialize_with = "lenient::section")]
    pub forms: FormStatus,
    #[serde(deserialize_with = "lenient::strings")]
    pub queries: Vec<String>,
}

impl ReportBundle {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

mod lenient {
    use std::collections::BTreeMap;

    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn as_number(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', "").parse().ok(),
            _ => None,
        }
        .filter(|n: &f64| n.is_finite())
    }

    pub(super) fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value.as_ref().and_then(as_number))
    }

    fn as_text(value: Value) -> Option<String> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Strings pass through, numbers and booleans are stringified, blanks are absent.
    pub(super) fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value.and_then(as_text))
    }

    fn items<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Value>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        })
    }

    /// A list of text items. `null` or a non-list is empty; null and blank items are dropped.
    pub(super) fn strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(items(d)?.into_iter().filter_map(as_text).collect())
    }

    /// A list of records. Items that are not objects are dropped.
    pub(super) fn records<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(items(d)?
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect())
    }

    /// A nested record. `null` or a non-object is the empty record.
    pub(super) fn section<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
            _ => T::default(),
        })
    }

    pub(super) fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(Value::Bool(b)) => b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(s)) => {
                matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1")
            }
            _ => false,
        })
    }

    pub(super) fn amounts<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<BTreeMap<String, f64>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        let Some(Value::Object(map)) = value else {
            return Ok(BTreeMap::new());
        };
        Ok(map
            .iter()
            .filter_map(|(k, v)| as_number(v).map(|n| (k.clone(), n)))
            .collect())
    }
}
