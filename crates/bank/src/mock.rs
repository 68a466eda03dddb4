//! In-memory bank: demo customers or JSON fixtures.

use crate::schedule::next_emi_date;
use chrono::NaiveDate;
use loandesk_core::error::BankError;
use loandesk_core::{CustomerGateway, CustomerRecord, LoanRecord, LoanStatus};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// A read-only customer map served through [`CustomerGateway`].
#[derive(Debug, Clone, Default)]
pub struct MockBankGateway {
    customers: HashMap<String, CustomerRecord>,
}

impl MockBankGateway {
    /// Build from records, rejecting duplicate loan ids within a customer
    /// and money fields that are negative or not finite.
    ///
    /// A repeated customer id replaces the earlier record.
    pub fn from_records(records: Vec<CustomerRecord>) -> Result<Self, BankError> {
        let mut customers = HashMap::with_capacity(records.len());
        for record in records {
            check_amounts(&record)?;
            let mut seen = HashSet::new();
            for loan in &record.loans {
                if !seen.insert(loan.loan_id.as_str()) {
                    return Err(BankError::DuplicateLoan {
                        customer_id: record.customer_id.clone(),
                        loan_id: loan.loan_id.clone(),
                    });
                }
            }
            if customers.contains_key(&record.customer_id) {
                tracing::warn!(customer_id = %record.customer_id, "Duplicate customer record replaced");
            }
            customers.insert(record.customer_id.clone(), record);
        }
        Ok(Self { customers })
    }

    /// Load a JSON array of customer records.
    pub fn from_json_file(path: &Path) -> Result<Self, BankError> {
        let content = std::fs::read_to_string(path).map_err(|e| BankError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let records: Vec<CustomerRecord> =
            serde_json::from_str(&content).map_err(|e| BankError::ParseFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let gateway = Self::from_records(records)?;
        tracing::info!(
            path = %path.display(),
            customers = gateway.customers.len(),
            "Loaded bank fixtures"
        );
        Ok(gateway)
    }

    /// The two demo customers, with due dates computed against `today`.
    pub fn with_demo_data(today: NaiveDate) -> Self {
        let john = CustomerRecord {
            customer_id: "CUST001".into(),
            name: "John Doe".into(),
            account_number: "ACC123456789".into(),
            account_balance: 125_000.0,
            loans: vec![demo_loan(
                today,
                DemoLoan {
                    id: "LOAN001",
                    kind: "Home Loan",
                    principal: 5_000_000.0,
                    outstanding: 4_250_000.0,
                    rate: 8.5,
                    emi: 42_500.0,
                    emi_day: 5,
                    tenure: 240,
                    remaining: 180,
                    charges: 2.0,
                },
            )],
        };

        let jane = CustomerRecord {
            customer_id: "CUST002".into(),
            name: "Jane Smith".into(),
            account_number: "ACC987654321".into(),
            account_balance: 85_000.0,
            loans: vec![
                demo_loan(
                    today,
                    DemoLoan {
                        id: "LOAN002",
                        kind: "Personal Loan",
                        principal: 500_000.0,
                        outstanding: 320_000.0,
                        rate: 12.0,
                        emi: 15_000.0,
                        emi_day: 15,
                        tenure: 48,
                        remaining: 24,
                        charges: 3.0,
                    },
                ),
                demo_loan(
                    today,
                    DemoLoan {
                        id: "LOAN003",
                        kind: "Car Loan",
                        principal: 800_000.0,
                        outstanding: 450_000.0,
                        rate: 9.5,
                        emi: 18_500.0,
                        emi_day: 10,
                        tenure: 60,
                        remaining: 30,
                        charges: 2.5,
                    },
                ),
            ],
        };

        Self {
            customers: HashMap::from([
                (john.customer_id.clone(), john),
                (jane.customer_id.clone(), jane),
            ]),
        }
    }

    /// Demo customers as of the local date.
    pub fn demo() -> Self {
        Self::with_demo_data(chrono::Local::now().date_naive())
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

impl CustomerGateway for MockBankGateway {
    fn name(&self) -> &str {
        "mock_bank"
    }

    fn get_customer(&self, customer_id: &str) -> Option<CustomerRecord> {
        self.customers.get(customer_id).cloned()
    }
}

fn check_amounts(record: &CustomerRecord) -> Result<(), BankError> {
    let invalid = |loan_id: Option<&str>, field: &'static str| BankError::InvalidAmount {
        customer_id: record.customer_id.clone(),
        loan_id: loan_id.map(str::to_string),
        field,
    };
    let valid = |v: f64| v.is_finite() && v >= 0.0;

    if !valid(record.account_balance) {
        return Err(invalid(None, "account_balance"));
    }
    for loan in &record.loans {
        let fields = [
            ("principal_amount", loan.principal_amount),
            ("outstanding_amount", loan.outstanding_amount),
            ("emi_amount", loan.emi_amount),
            ("prepayment_charges", loan.prepayment_charges),
        ];
        if let Some((field, _)) = fields.into_iter().find(|(_, v)| !valid(*v)) {
            return Err(invalid(Some(&loan.loan_id), field));
        }
    }
    Ok(())
}

struct DemoLoan {
    id: &'static str,
    kind: &'static str,
    principal: f64,
    outstanding: f64,
    rate: f64,
    emi: f64,
    emi_day: u32,
    tenure: u32,
    remaining: u32,
    charges: f64,
}

fn demo_loan(today: NaiveDate, l: DemoLoan) -> LoanRecord {
    LoanRecord {
        loan_id: l.id.into(),
        loan_type: l.kind.into(),
        principal_amount: l.principal,
        outstanding_amount: l.outstanding,
        interest_rate: l.rate,
        emi_amount: l.emi,
        emi_date: l.emi_day,
        tenure_months: l.tenure,
        remaining_months: l.remaining,
        next_emi_date: next_emi_date(today, l.emi_day),
        prepayment_allowed: true,
        prepayment_charges: l.charges,
        status: LoanStatus::Active,
    }
}
