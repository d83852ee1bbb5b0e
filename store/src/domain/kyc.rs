//! Multi-step know-your-customer application.
//!
//! The application walks `personal → documents → verification → review →
//! completed`. Leaving a step requires its fields to be filled in; nothing is
//! verified beyond presence.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_NATIONALITY: &str = "Filipino";

/// Position of an application in the KYC flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KycStep {
    /// Identity and contact details.
    #[default]
    Personal,
    /// Supporting document uploads.
    Documents,
    /// Liveness and security checks.
    Verification,
    /// Final confirmation. Leaving it requires accepting the terms, so
    /// verification never submits directly.
    Review,
    /// Submitted.
    Completed,
}

impl KycStep {
    /// Returns the step after this one, or `None` once completed.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Personal => Some(Self::Documents),
            Self::Documents => Some(Self::Verification),
            Self::Verification => Some(Self::Review),
            Self::Review => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Returns the step before this one, or `None` at the start.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Personal | Self::Completed => None,
            Self::Documents => Some(Self::Personal),
            Self::Verification => Some(Self::Documents),
            Self::Review => Some(Self::Verification),
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Documents => "documents",
            Self::Verification => "verification",
            Self::Review => "review",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for KycStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and contact details captured on the first step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Middle name, optional.
    pub middle_name: String,
    /// Date of birth as entered.
    pub birth_date: String,
    /// Citizenship.
    pub nationality: String,
    /// Street address.
    pub address: String,
    /// City of residence.
    pub city: String,
    /// Postal code, optional.
    pub zip_code: String,
    /// Contact phone.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// Current occupation.
    pub occupation: String,
    /// Where invested funds come from.
    pub source_of_income: String,
    /// Monthly income bracket, optional.
    pub monthly_income: String,
}

impl Default for PersonalInfo {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            middle_name: String::new(),
            birth_date: String::new(),
            nationality: DEFAULT_NATIONALITY.to_owned(),
            address: String::new(),
            city: String::new(),
            zip_code: String::new(),
            phone: String::new(),
            email: String::new(),
            occupation: String::new(),
            source_of_income: String::new(),
            monthly_income: String::new(),
        }
    }
}

impl PersonalInfo {
    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("birthDate", &self.birth_date),
            ("address", &self.address),
            ("city", &self.city),
            ("phone", &self.phone),
            ("occupation", &self.occupation),
            ("sourceOfIncome", &self.source_of_income),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Uploaded document references, stored as file names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KycDocuments {
    /// Government-issued identification.
    pub government_id: Option<String>,
    /// Utility bill or similar.
    pub proof_of_address: Option<String>,
    /// Payslip or tax return.
    pub income_proof: Option<String>,
    /// Photo of the applicant.
    pub selfie: Option<String>,
}

impl KycDocuments {
    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("governmentId", &self.government_id),
            ("proofOfAddress", &self.proof_of_address),
            ("incomeProof", &self.income_proof),
            ("selfie", &self.selfie),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|name| name.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }
}

/// Errors raised while filling in or submitting a KYC application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KycError {
    /// Required fields on the current step are empty.
    #[error("cannot leave the {step} step: missing {}", fields.join(", "))]
    MissingFields {
        /// Step being left.
        step: KycStep,
        /// Wire names of the empty fields.
        fields: Vec<&'static str>,
    },
    /// The terms were not accepted on the review step.
    #[error("the review step requires accepting the terms")]
    TermsNotAccepted,
    /// The application was already submitted.
    #[error("the application has already been submitted")]
    AlreadySubmitted,
    /// The account is already verified.
    #[error("user '{user_id}' is already verified")]
    AlreadyVerified {
        /// Verified account.
        user_id: String,
    },
}

/// A KYC application in progress.
///
/// # Examples
///
/// ```
/// use rise_store::domain::{KycApplication, KycError, KycStep};
///
/// let mut application = KycApplication::default();
/// let err = application.advance().expect_err("personal details are empty");
/// assert!(matches!(err, KycError::MissingFields { step: KycStep::Personal, .. }));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KycApplication {
    /// Current step.
    pub step: KycStep,
    /// First-step details.
    pub personal: PersonalInfo,
    /// Second-step uploads.
    pub documents: KycDocuments,
    /// Terms acknowledgement from the review step.
    pub terms_accepted: bool,
}

impl KycApplication {
    /// Lists the empty required fields that block leaving `step`.
    #[must_use]
    pub fn missing_fields(&self, step: KycStep) -> Vec<&'static str> {
        match step {
            KycStep::Personal => self.personal.missing_fields(),
            KycStep::Documents => self.documents.missing_fields(),
            KycStep::Verification | KycStep::Review | KycStep::Completed => Vec::new(),
        }
    }

    /// Moves to the next step when the current one is complete.
    ///
    /// # Errors
    ///
    /// Returns [`KycError::MissingFields`] when the current step has empty
    /// required fields, [`KycError::TermsNotAccepted`] when leaving review
    /// without accepting the terms, and [`KycError::AlreadySubmitted`] once
    /// completed.
    pub fn advance(&mut self) -> Result<KycStep, KycError> {
        self.check_step(self.step)?;
        let next = self.step.next().ok_or(KycError::AlreadySubmitted)?;
        self.step = next;
        Ok(next)
    }

    /// Returns to the previous step, keeping entered data.
    pub const fn back(&mut self) -> KycStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Confirms every step up to review is complete.
    ///
    /// # Errors
    ///
    /// Returns the first blocking [`KycError`] in step order.
    pub fn ensure_submittable(&self) -> Result<(), KycError> {
        if self.step == KycStep::Completed {
            return Err(KycError::AlreadySubmitted);
        }
        [KycStep::Personal, KycStep::Documents, KycStep::Review]
            .into_iter()
            .try_for_each(|step| self.check_step(step))
    }

    fn check_step(&self, step: KycStep) -> Result<(), KycError> {
        if step == KycStep::Review && !self.terms_accepted {
            return Err(KycError::TermsNotAccepted);
        }
        let fields = self.missing_fields(step);
        if fields.is_empty() {
            Ok(())
        } else {
            Err(KycError::MissingFields { step, fields })
        }
    }
}
