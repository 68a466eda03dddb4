//! Customer, account, and loan records plus the gateway trait that serves
//! them.
//!
//! Records are plain values: a gateway hands out fresh clones on every
//! lookup, so nothing here is shared or mutated across requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

/// Lifecycle state of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Active,
    Closed,
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// A single loan held by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub loan_id: String,
    pub loan_type: String,
    pub principal_amount: f64,
    pub outstanding_amount: f64,
    /// Annual interest rate in percent
    pub interest_rate: f64,
    pub emi_amount: f64,
    /// Day of month the EMI falls due
    pub emi_date: u32,
    pub tenure_months: u32,
    pub remaining_months: u32,
    pub next_emi_date: NaiveDate,
    pub prepayment_allowed: bool,
    /// Prepayment charge in percent of the prepaid amount
    pub prepayment_charges: f64,
    pub status: LoanStatus,
}

impl LoanRecord {
    /// Quote a prepayment of `amount` against this loan.
    ///
    /// Returns [`PrepaymentOutcome::NotAllowed`] when the loan is not
    /// eligible; the arithmetic never fails otherwise.
    pub fn quote_prepayment(&self, amount: f64) -> PrepaymentOutcome {
        if !self.prepayment_allowed {
            return PrepaymentOutcome::NotAllowed {
                message: "Prepayment not allowed for this loan".into(),
            };
        }

        let prepayment_charge = amount * self.prepayment_charges / 100.0;

        PrepaymentOutcome::Allowed(PrepaymentCalculation {
            prepayment_amount: amount,
            prepayment_charge,
            prepayment_charge_percentage: self.prepayment_charges,
            total_amount_to_pay: amount + prepayment_charge,
            current_outstanding: self.outstanding_amount,
            new_outstanding: (self.outstanding_amount - amount).max(0.0),
            loan_type: self.loan_type.clone(),
        })
    }
}

/// A customer with their account and loans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: String,
    pub name: String,
    pub account_number: String,
    pub account_balance: f64,
    #[serde(default)]
    pub loans: Vec<LoanRecord>,
}

impl CustomerRecord {
    /// The account-only projection of this record.
    pub fn account(&self) -> AccountDetails {
        AccountDetails {
            customer_id: self.customer_id.clone(),
            name: self.name.clone(),
            account_number: self.account_number.clone(),
            account_balance: self.account_balance,
        }
    }

    pub fn loan(&self, loan_id: &str) -> Option<&LoanRecord> {
        self.loans.iter().find(|l| l.loan_id == loan_id)
    }
}

/// Account details without loans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDetails {
    pub customer_id: String,
    pub name: String,
    pub account_number: String,
    pub account_balance: f64,
}

/// Breakdown of an allowed prepayment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentCalculation {
    pub prepayment_amount: f64,
    pub prepayment_charge: f64,
    pub prepayment_charge_percentage: f64,
    pub total_amount_to_pay: f64,
    pub current_outstanding: f64,
    pub new_outstanding: f64,
    pub loan_type: String,
}

impl PrepaymentCalculation {
    /// How much the outstanding balance drops.
    pub fn amount_reduced(&self) -> f64 {
        self.current_outstanding - self.new_outstanding
    }
}

/// Result of asking for a prepayment quote.
///
/// Serializes with an `allowed` flag; a refusal carries only a message.
#[derive(Debug, Clone, PartialEq)]
pub enum PrepaymentOutcome {
    Allowed(PrepaymentCalculation),
    NotAllowed { message: String },
}

impl PrepaymentOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }

    pub fn calculation(&self) -> Option<&PrepaymentCalculation> {
        match self {
            Self::Allowed(calc) => Some(calc),
            Self::NotAllowed { .. } => None,
        }
    }
}

impl Serialize for PrepaymentOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Flagged<'a, T> {
            allowed: bool,
            #[serde(flatten)]
            body: &'a T,
        }

        #[derive(Serialize)]
        struct Refusal<'a> {
            message: &'a str,
        }

        match self {
            Self::Allowed(calc) => Flagged {
                allowed: true,
                body: calc,
            }
            .serialize(serializer),
            Self::NotAllowed { message } => Flagged {
                allowed: false,
                body: &Refusal { message },
            }
            .serialize(serializer),
        }
    }
}

/// Compact view of a customer for dashboards and the summary endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub customer_name: String,
    pub account_number: String,
    pub account_balance: f64,
    pub total_loans: usize,
    pub loans: Vec<LoanSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub loan_id: String,
    #[serde(rename = "type")]
    pub loan_type: String,
    pub outstanding: f64,
    pub emi: f64,
    pub next_emi_date: NaiveDate,
}

impl From<&CustomerRecord> for CustomerSummary {
    fn from(customer: &CustomerRecord) -> Self {
        Self {
            customer_name: customer.name.clone(),
            account_number: customer.account_number.clone(),
            account_balance: customer.account_balance,
            total_loans: customer.loans.len(),
            loans: customer
                .loans
                .iter()
                .map(|loan| LoanSummary {
                    loan_id: loan.loan_id.clone(),
                    loan_type: loan.loan_type.clone(),
                    outstanding: loan.outstanding_amount,
                    emi: loan.emi_amount,
                    next_emi_date: loan.next_emi_date,
                })
                .collect(),
        }
    }
}

/// The CustomerGateway trait: read-only lookups against the bank's data.
///
/// Misses are reported as `None`, never as errors. Implementations:
/// in-memory mock bank (demo data or JSON fixtures).
pub trait CustomerGateway: Send + Sync {
    /// The gateway name (e.g., "mock_bank").
    fn name(&self) -> &str;

    /// Full record (account + loans) for a customer.
    fn get_customer(&self, customer_id: &str) -> Option<CustomerRecord>;

    /// Account details for a customer.
    fn get_account(&self, customer_id: &str) -> Option<AccountDetails> {
        self.get_customer(customer_id).map(|c| c.account())
    }

    /// Loans for a customer, optionally narrowed to one loan id.
    ///
    /// `None` when the customer is unknown or no loan matches.
    fn get_loans(&self, customer_id: &str, loan_id: Option<&str>) -> Option<Vec<LoanRecord>> {
        let customer = self.get_customer(customer_id)?;
        let loans: Vec<LoanRecord> = match loan_id {
            Some(id) => customer
                .loans
                .into_iter()
                .filter(|l| l.loan_id == id)
                .collect(),
            None => customer.loans,
        };
        if loans.is_empty() { None } else { Some(loans) }
    }

    /// Quote a prepayment against one loan.
    ///
    /// `None` when the customer or loan is unknown.
    fn calculate_prepayment(
        &self,
        customer_id: &str,
        loan_id: &str,
        amount: f64,
    ) -> Option<PrepaymentOutcome> {
        let loans = self.get_loans(customer_id, Some(loan_id))?;
        loans.first().map(|loan| loan.quote_prepayment(amount))
    }
}
