//! Seed data for the dashboard screens.
//!
//! Screens read their initial collection once, at mount, from a [`Seed`].
//! [`MockDataService`] is the in-process stand-in for a backend; it is
//! read-only, so every later change lives in the screen's controller.

use chrono::{DateTime, NaiveDate, Utc};
use loandesk_shared::constants::ID_COUNTER_WIDTH;
use loandesk_shared::RecordId;

use crate::models::*;
use crate::record::Record;

/// Source of a screen's initial records.
pub trait Seed<T> {
    /// Records for a collection whose ids live in `namespace`.
    fn seed(&self, namespace: &str) -> Vec<Record<T>>;
}

/// Seeds every screen with nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySeed;

impl<T> Seed<T> for EmptySeed {
    fn seed(&self, _namespace: &str) -> Vec<Record<T>> {
        Vec::new()
    }
}

/// Hard-coded sample data for every screen.
#[derive(Debug, Clone)]
pub struct MockDataService {
    seeded_at: DateTime<Utc>,
}

impl MockDataService {
    pub fn new() -> Self {
        // 2024-01-01T00:00:00Z
        let seeded_at = DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_default();
        Self { seeded_at }
    }

    /// Stamp the seed with a specific creation time.
    pub fn with_seeded_at(seeded_at: DateTime<Utc>) -> Self {
        Self { seeded_at }
    }

    fn records<T>(&self, namespace: &str, items: Vec<T>) -> Vec<Record<T>> {
        items
            .into_iter()
            .enumerate()
            .map(|(i, fields)| {
                let id = RecordId::compose(
                    namespace,
                    format!("{:0width$}", i + 1, width = ID_COUNTER_WIDTH),
                );
                Record::new(id, fields, self.seeded_at)
            })
            .collect()
    }
}

impl Default for MockDataService {
    fn default() -> Self {
        Self::new()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Seed<Branch> for MockDataService {
    fn seed(&self, namespace: &str) -> Vec<Record<Branch>> {
        let rows = [
            ("Pune Head Office", "PNHO", OfficeType::HeadOffice, "Pune", "Haveli", true),
            ("Nashik Regional Office", "NSRO", OfficeType::RegionalOffice, "Nashik", "Nashik", true),
            ("Shivajinagar", "PN001", OfficeType::Branch, "Pune", "Haveli", true),
            ("Baramati", "PN014", OfficeType::Branch, "Pune", "Baramati", true),
            ("Mulshi", "PN021", OfficeType::Branch, "Pune", "Mulshi", false),
            ("Sinnar", "NS007", OfficeType::Branch, "Nashik", "Sinnar", true),
            ("Niphad Market Yard", "NS011", OfficeType::ExtensionCounter, "Nashik", "Niphad", true),
            ("Satara City", "ST002", OfficeType::Branch, "Satara", "Satara", true),
            ("Karad", "ST005", OfficeType::Branch, "Satara", "Karad", true),
            ("Aurangabad Regional Office", "AURO", OfficeType::RegionalOffice, "Aurangabad", "Aurangabad", true),
            ("Paithan", "AU009", OfficeType::Branch, "Aurangabad", "Paithan", false),
            ("Junnar", "PN030", OfficeType::ExtensionCounter, "Pune", "Junnar", true),
        ];
        let items = rows
            .into_iter()
            .map(|(name, code, office_type, district, taluka, is_active)| Branch {
                name: name.into(),
                code: code.into(),
                office_type,
                district: district.into(),
                taluka: taluka.into(),
                is_active,
            })
            .collect();
        self.records(namespace, items)
    }
}

impl Seed<Caste> for MockDataService {
    fn seed(&self, namespace: &str) -> Vec<Record<Caste>> {
        let rows = [
            ("Maratha", CasteCategory::General, "Open category", true),
            ("Brahmin", CasteCategory::General, "Open category", true),
            ("Mali", CasteCategory::Obc, "Other backward class", true),
            ("Dhangar", CasteCategory::Obc, "Nomadic tribe (C)", true),
            ("Kunbi", CasteCategory::Obc, "Other backward class", true),
            ("Mahar", CasteCategory::Sc, "Scheduled caste", true),
            ("Matang", CasteCategory::Sc, "Scheduled caste", true),
            ("Bhil", CasteCategory::St, "Scheduled tribe", true),
            ("Warli", CasteCategory::St, "Scheduled tribe", true),
            ("Not disclosed", CasteCategory::Other, "Applicant declined to state", false),
        ];
        let items = rows
            .into_iter()
            .map(|(name, category, description, is_active)| Caste {
                name: name.into(),
                category,
                description: description.into(),
                is_active,
            })
            .collect();
        self.records(namespace, items)
    }
}

impl Seed<Taluka> for MockDataService {
    fn seed(&self, namespace: &str) -> Vec<Record<Taluka>> {
        let rows = [
            ("Haveli", "Pune", "412110"),
            ("Mulshi", "Pune", "412108"),
            ("Baramati", "Pune", "413102"),
            ("Junnar", "Pune", "410502"),
            ("Maval", "Pune", "410506"),
            ("Niphad", "Nashik", "422303"),
            ("Sinnar", "Nashik", "422103"),
            ("Igatpuri", "Nashik", "422403"),
            ("Karad", "Satara", "415110"),
            ("Wai", "Satara", "412803"),
            ("Paithan", "Aurangabad", "431107"),
            ("Vaijapur", "Aurangabad", "423701"),
        ];
        let items = rows
            .into_iter()
            .map(|(name, district, pin)| Taluka {
                name: name.into(),
                district: district.into(),
                state: "Maharashtra".into(),
                pin_code: pin.into(),
                is_active: true,
            })
            .collect();
        self.records(namespace, items)
    }
}

impl Seed<ActionCode> for MockDataService {
    fn seed(&self, namespace: &str) -> Vec<Record<ActionCode>> {
        let rows = [
            ("DOC_PENDING", "Documents pending from applicant", 2),
            ("FIELD_VISIT", "Field verification visit scheduled", 3),
            ("CIBIL_CHECK", "Credit bureau check in progress", 2),
            ("SANCTION", "Forward for sanction", 4),
            ("DISBURSE", "Ready for disbursement", 5),
            ("HOLD", "Application on hold", 1),
            ("ESCALATE", "Escalated to regional office", 5),
        ];
        let items = rows
            .into_iter()
            .map(|(code, description, priority)| ActionCode {
                code: code.into(),
                description: description.into(),
                priority,
                is_active: true,
            })
            .collect();
        self.records(namespace, items)
    }
}

impl Seed<Organization> for MockDataService {
    fn seed(&self, namespace: &str) -> Vec<Record<Organization>> {
        let rows = [
            ("Sahyadri Farmers Producer Co.", "FPO", "Nashik", "contact@sahyadrifpo.in", true),
            ("Mahila Bachat Gat Federation", "SHG Federation", "Pune", "office@mbgf.org", true),
            ("Krishna Valley Sugar Works", "Cooperative", "Karad", "accounts@kvsugar.in", true),
            ("Deccan Dairy Union", "Cooperative", "Baramati", "info@deccandairy.in", false),
            ("Godavari Agro Industries", "Private Limited", "Paithan", "finance@godavariagro.com", true),
        ];
        let items = rows
            .into_iter()
            .map(|(name, org_type, city, email, is_active)| Organization {
                name: name.into(),
                org_type: org_type.into(),
                city: city.into(),
                contact_email: email.into(),
                is_active,
            })
            .collect();
        self.records(namespace, items)
    }
}

impl Seed<RejectionReason> for MockDataService {
    fn seed(&self, namespace: &str) -> Vec<Record<RejectionReason>> {
        let rows = [
            ("R01", "Low credit score", "Credit"),
            ("R02", "Insufficient income proof", "Documentation"),
            ("R03", "Existing loan default", "Credit"),
            ("R04", "Incomplete KYC", "Documentation"),
            ("R05", "Collateral valuation too low", "Security"),
            ("R06", "Applicant outside service area", "Eligibility"),
        ];
        let items = rows
            .into_iter()
            .map(|(code, reason, category)| RejectionReason {
                code: code.into(),
                reason: reason.into(),
                category: category.into(),
                is_active: true,
            })
            .collect();
        self.records(namespace, items)
    }
}

impl Seed<DatabaseAccess> for MockDataService {
    fn seed(&self, namespace: &str) -> Vec<Record<DatabaseAccess>> {
        let items = vec![
            DatabaseAccess {
                user_name: "asha.patil".into(),
                role: "Administrator".into(),
                database: "loans_core".into(),
                permissions: strings(&["read", "write", "delete", "admin"]),
                is_active: true,
            },
            DatabaseAccess {
                user_name: "rahul.deshmukh".into(),
                role: "Branch Manager".into(),
                database: "loans_core".into(),
                permissions: strings(&["read", "write"]),
                is_active: true,
            },
            DatabaseAccess {
                user_name: "sneha.kulkarni".into(),
                role: "Auditor".into(),
                database: "loans_reporting".into(),
                permissions: strings(&["read"]),
                is_active: true,
            },
            DatabaseAccess {
                user_name: "vikas.jadhav".into(),
                role: "Loan Officer".into(),
                database: "loans_core".into(),
                permissions: strings(&["read", "write"]),
                is_active: false,
            },
        ];
        self.records(namespace, items)
    }
}

impl Seed<Workflow> for MockDataService {
    fn seed(&self, namespace: &str) -> Vec<Record<Workflow>> {
        let items = vec![
            Workflow {
                name: "Crop loan approval".into(),
                description: "Kharif and rabi crop loans up to 3 lakh".into(),
                stages: strings(&["Application", "Field visit", "Branch sanction", "Disbursement"]),
                approver_role: "Branch Manager".into(),
                priority: 2,
                is_active: true,
            },
            Workflow {
                name: "Housing loan approval".into(),
                description: "Home purchase and construction".into(),
                stages: strings(&[
                    "Application",
                    "Legal scrutiny",
                    "Valuation",
                    "Regional sanction",
                    "Disbursement",
                ]),
                approver_role: "Regional Manager".into(),
                priority: 3,
                is_active: true,
            },
            Workflow {
                name: "Gold loan fast track".into(),
                description: "Same-day gold loans".into(),
                stages: strings(&["Appraisal", "Sanction"]),
                approver_role: "Loan Officer".into(),
                priority: 1,
                is_active: true,
            },
        ];
        self.records(namespace, items)
    }
}

impl Seed<ConfigEntry> for MockDataService {
    fn seed(&self, namespace: &str) -> Vec<Record<ConfigEntry>> {
        let rows = [
            ("loan.max_amount", "5000000", "Limits", "Maximum sanctionable amount in rupees", true),
            ("loan.min_amount", "10000", "Limits", "Minimum application amount in rupees", true),
            ("interest.base_rate", "8.50", "Rates", "Base annual interest rate (%)", true),
            ("kyc.expiry_days", "365", "Compliance", "Days before KYC must be refreshed", true),
            ("app.version", "2.4.1", "System", "Dashboard release", false),
        ];
        let items = rows
            .into_iter()
            .map(|(key, value, category, description, is_editable)| ConfigEntry {
                key: key.into(),
                value: value.into(),
                category: category.into(),
                description: description.into(),
                is_editable,
            })
            .collect();
        self.records(namespace, items)
    }
}

const LOAN_BANKS: [&str; 4] = [
    "State Bank of India",
    "Bank of Maharashtra",
    "HDFC Bank",
    "Pune District Central Co-op Bank",
];
const LOAN_REGIONS: [&str; 4] = ["Pune", "Nashik", "Satara", "Aurangabad"];
const LOAN_BRANCHES: [&str; 4] = ["Shivajinagar", "Sinnar", "Karad", "Paithan"];
const LOAN_APPLICANTS: [&str; 12] = [
    "Sunita Pawar",
    "Ganesh Shinde",
    "Pooja Bhosale",
    "Amit Gaikwad",
    "Kavita More",
    "Santosh Jagtap",
    "Rekha Salunkhe",
    "Mahesh Chavan",
    "Anjali Kale",
    "Prakash Thorat",
    "Meena Wagh",
    "Nitin Ghorpade",
];
const LOAN_STATUS_CYCLE: [LoanStatus; 5] = [
    LoanStatus::Disbursed,
    LoanStatus::Sanctioned,
    LoanStatus::Pending,
    LoanStatus::Rejected,
    LoanStatus::Disbursed,
];

impl Seed<LoanApplication> for MockDataService {
    /// Thirty-six applications spread over January to June 2024.
    fn seed(&self, namespace: &str) -> Vec<Record<LoanApplication>> {
        let items = (0..36u32)
            .filter_map(|i| {
                let idx = i as usize;
                let month = 1 + i % 6;
                let day = 1 + (i * 7) % 28;
                let applied_on = NaiveDate::from_ymd_opt(2024, month, day)?;
                let region = (idx / 2) % LOAN_REGIONS.len();
                Some(LoanApplication {
                    applicant_name: LOAN_APPLICANTS[idx % LOAN_APPLICANTS.len()].into(),
                    bank: LOAN_BANKS[idx % LOAN_BANKS.len()].into(),
                    region: LOAN_REGIONS[region].into(),
                    branch: LOAN_BRANCHES[region].into(),
                    amount: 50_000 + u64::from((i * 37) % 19) * 25_000,
                    status: LOAN_STATUS_CYCLE[idx % LOAN_STATUS_CYCLE.len()],
                    applied_on,
                })
            })
            .collect();
        self.records(namespace, items)
    }
}
