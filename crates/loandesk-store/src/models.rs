//! Field shapes of every dashboard screen.
//!
//! Every struct serializes with camelCase keys, which are also the names
//! used for search, sort, and patch operations.

use chrono::NaiveDate;
use loandesk_shared::constants::{MAX_LOAN_AMOUNT, MAX_PRIORITY, MIN_PRIORITY, PIN_CODE_LEN};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::fields::{FieldValue, RecordFields};

fn check_priority(field: &str, priority: u8) -> Result<(), ValidationError> {
    if (MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
        Ok(())
    } else {
        Err(ValidationError::invalid(
            field,
            format!("must be between {MIN_PRIORITY} and {MAX_PRIORITY}"),
        ))
    }
}

// ---------------------------------------------------------------------------
// Branch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfficeType {
    HeadOffice,
    RegionalOffice,
    #[default]
    Branch,
    ExtensionCounter,
}

impl OfficeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeadOffice => "head_office",
            Self::RegionalOffice => "regional_office",
            Self::Branch => "branch",
            Self::ExtensionCounter => "extension_counter",
        }
    }
}

/// A bank office.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub name: String,
    pub code: String,
    pub office_type: OfficeType,
    pub district: String,
    pub taluka: String,
    pub is_active: bool,
}

impl RecordFields for Branch {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(&self.name)),
            "code" => Some(FieldValue::Text(&self.code)),
            "officeType" => Some(FieldValue::Text(self.office_type.as_str())),
            "district" => Some(FieldValue::Text(&self.district)),
            "taluka" => Some(FieldValue::Text(&self.taluka)),
            "isActive" => Some(FieldValue::Flag(self.is_active)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Caste
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasteCategory {
    #[default]
    General,
    Obc,
    Sc,
    St,
    Other,
}

impl CasteCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Obc => "obc",
            Self::Sc => "sc",
            Self::St => "st",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caste {
    pub name: String,
    pub category: CasteCategory,
    pub description: String,
    pub is_active: bool,
}

impl RecordFields for Caste {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(&self.name)),
            "category" => Some(FieldValue::Text(self.category.as_str())),
            "description" => Some(FieldValue::Text(&self.description)),
            "isActive" => Some(FieldValue::Flag(self.is_active)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Taluka
// ---------------------------------------------------------------------------

/// A sub-district administrative unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Taluka {
    pub name: String,
    pub district: String,
    pub state: String,
    pub pin_code: String,
    pub is_active: bool,
}

impl RecordFields for Taluka {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(&self.name)),
            "district" => Some(FieldValue::Text(&self.district)),
            "state" => Some(FieldValue::Text(&self.state)),
            "pinCode" => Some(FieldValue::Text(&self.pin_code)),
            "isActive" => Some(FieldValue::Flag(self.is_active)),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let pin = self.pin_code.trim();
        if !pin.is_empty()
            && (pin.len() != PIN_CODE_LEN || !pin.chars().all(|c| c.is_ascii_digit()))
        {
            return Err(ValidationError::invalid(
                "pinCode",
                format!("must be {PIN_CODE_LEN} digits"),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Action code
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionCode {
    pub code: String,
    pub description: String,
    pub priority: u8,
    pub is_active: bool,
}

impl Default for ActionCode {
    fn default() -> Self {
        Self {
            code: String::new(),
            description: String::new(),
            priority: MIN_PRIORITY,
            is_active: true,
        }
    }
}

impl RecordFields for ActionCode {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "code" => Some(FieldValue::Text(&self.code)),
            "description" => Some(FieldValue::Text(&self.description)),
            "priority" => Some(FieldValue::Number(f64::from(self.priority))),
            "isActive" => Some(FieldValue::Flag(self.is_active)),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_priority("priority", self.priority)
    }
}

// ---------------------------------------------------------------------------
// Organization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub name: String,
    pub org_type: String,
    pub city: String,
    pub contact_email: String,
    pub is_active: bool,
}

impl RecordFields for Organization {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(&self.name)),
            "orgType" => Some(FieldValue::Text(&self.org_type)),
            "city" => Some(FieldValue::Text(&self.city)),
            "contactEmail" => Some(FieldValue::Text(&self.contact_email)),
            "isActive" => Some(FieldValue::Flag(self.is_active)),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let email = self.contact_email.trim();
        if email.is_empty() {
            return Ok(());
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
            _ => Err(ValidationError::invalid(
                "contactEmail",
                "must be an email address",
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Rejection reason
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionReason {
    pub code: String,
    pub reason: String,
    pub category: String,
    pub is_active: bool,
}

impl RecordFields for RejectionReason {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "code" => Some(FieldValue::Text(&self.code)),
            "reason" => Some(FieldValue::Text(&self.reason)),
            "category" => Some(FieldValue::Text(&self.category)),
            "isActive" => Some(FieldValue::Flag(self.is_active)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Database access
// ---------------------------------------------------------------------------

/// A user's grant on one database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseAccess {
    pub user_name: String,
    pub role: String,
    pub database: String,
    pub permissions: Vec<String>,
    pub is_active: bool,
}

impl RecordFields for DatabaseAccess {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "userName" => Some(FieldValue::Text(&self.user_name)),
            "role" => Some(FieldValue::Text(&self.role)),
            "database" => Some(FieldValue::Text(&self.database)),
            "permissions" => Some(FieldValue::List(&self.permissions)),
            "isActive" => Some(FieldValue::Flag(self.is_active)),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.permissions.iter().all(|p| p.trim().is_empty()) {
            return Err(ValidationError::missing("permissions"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// An approval workflow definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub name: String,
    pub description: String,
    pub stages: Vec<String>,
    pub approver_role: String,
    pub priority: u8,
    pub is_active: bool,
}

impl Default for Workflow {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            stages: Vec::new(),
            approver_role: String::new(),
            priority: MIN_PRIORITY,
            is_active: true,
        }
    }
}

impl RecordFields for Workflow {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(&self.name)),
            "description" => Some(FieldValue::Text(&self.description)),
            "stages" => Some(FieldValue::List(&self.stages)),
            "approverRole" => Some(FieldValue::Text(&self.approver_role)),
            "priority" => Some(FieldValue::Number(f64::from(self.priority))),
            "isActive" => Some(FieldValue::Flag(self.is_active)),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.stages.iter().all(|s| s.trim().is_empty()) {
            return Err(ValidationError::missing("stages"));
        }
        check_priority("priority", self.priority)
    }
}

// ---------------------------------------------------------------------------
// Configuration entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub category: String,
    pub description: String,
    pub is_editable: bool,
}

impl Default for ConfigEntry {
    fn default() -> Self {
        Self {
            key: String::new(),
            value: String::new(),
            category: String::new(),
            description: String::new(),
            is_editable: true,
        }
    }
}

impl RecordFields for ConfigEntry {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "key" => Some(FieldValue::Text(&self.key)),
            "value" => Some(FieldValue::Text(&self.value)),
            "category" => Some(FieldValue::Text(&self.category)),
            "description" => Some(FieldValue::Text(&self.description)),
            "isEditable" => Some(FieldValue::Flag(self.is_editable)),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.key.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid("key", "must not contain whitespace"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Loan application (report source)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    #[default]
    Pending,
    Sanctioned,
    Disbursed,
    Rejected,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sanctioned => "sanctioned",
            Self::Disbursed => "disbursed",
            Self::Rejected => "rejected",
        }
    }

    /// Disbursed loans were sanctioned first.
    pub fn is_sanctioned(&self) -> bool {
        matches!(self, Self::Sanctioned | Self::Disbursed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    pub applicant_name: String,
    pub bank: String,
    pub region: String,
    pub branch: String,
    /// Whole rupees.
    pub amount: u64,
    pub status: LoanStatus,
    pub applied_on: NaiveDate,
}

impl Default for LoanApplication {
    fn default() -> Self {
        Self {
            applicant_name: String::new(),
            bank: String::new(),
            region: String::new(),
            branch: String::new(),
            amount: 0,
            status: LoanStatus::default(),
            applied_on: NaiveDate::default(),
        }
    }
}

impl RecordFields for LoanApplication {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "applicantName" => Some(FieldValue::Text(&self.applicant_name)),
            "bank" => Some(FieldValue::Text(&self.bank)),
            "region" => Some(FieldValue::Text(&self.region)),
            "branch" => Some(FieldValue::Text(&self.branch)),
            "amount" => Some(FieldValue::Number(self.amount as f64)),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "appliedOn" => Some(FieldValue::Date(self.applied_on)),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.amount == 0 {
            return Err(ValidationError::invalid("amount", "must be greater than zero"));
        }
        if self.amount > MAX_LOAN_AMOUNT {
            return Err(ValidationError::invalid(
                "amount",
                format!("must not exceed {MAX_LOAN_AMOUNT}"),
            ));
        }
        Ok(())
    }
}
