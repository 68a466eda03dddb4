//! Corpus definition: the built-in loan FAQs and policy sections, and the
//! JSON file format that can replace them.

use loandesk_core::error::KnowledgeError;
use loandesk_core::DocumentEntry;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqRecord {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    pub title: String,
    pub section: String,
    pub content: String,
}

/// Raw documents for both collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    #[serde(default)]
    pub faqs: Vec<FaqRecord>,
    #[serde(default)]
    pub policies: Vec<PolicyRecord>,
}

impl Corpus {
    /// Read a corpus from a JSON file shaped
    /// `{"faqs": [{question, answer}], "policies": [{title, section, content}]}`.
    pub fn from_json_file(path: &Path) -> Result<Self, KnowledgeError> {
        let content = std::fs::read_to_string(path).map_err(|e| KnowledgeError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| KnowledgeError::ParseFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn faq_entries(&self) -> Vec<DocumentEntry> {
        self.faqs
            .iter()
            .map(|f| DocumentEntry::faq(&f.question, &f.answer))
            .collect()
    }

    pub fn policy_entries(&self) -> Vec<DocumentEntry> {
        self.policies
            .iter()
            .map(|p| DocumentEntry::policy(&p.title, &p.section, &p.content))
            .collect()
    }

    /// The ten loan FAQs and ten policy sections shipped with LoanDesk.
    pub fn builtin() -> Self {
        Self {
            faqs: BUILTIN_FAQS
                .iter()
                .map(|(question, answer)| FaqRecord {
                    question: (*question).into(),
                    answer: (*answer).into(),
                })
                .collect(),
            policies: BUILTIN_POLICIES
                .iter()
                .map(|(title, section, content)| PolicyRecord {
                    title: (*title).into(),
                    section: (*section).into(),
                    content: (*content).into(),
                })
                .collect(),
        }
    }
}

const BUILTIN_FAQS: &[(&str, &str)] = &[
    (
        "What is EMI?",
        "EMI stands for Equated Monthly Installment. It is a fixed payment amount made by a borrower to a lender at a specified date each calendar month. EMIs are used to pay off both interest and principal each month, so that over a specified number of years, the loan is paid off in full.",
    ),
    (
        "How is EMI calculated?",
        "EMI is calculated using the formula: EMI = [P x R x (1+R)^N]/[(1+R)^N-1], where P = Principal loan amount, R = Monthly interest rate (annual rate/12/100), N = Loan tenure in months. The EMI includes both principal and interest components.",
    ),
    (
        "Can I prepay my loan?",
        "Yes, most loans allow prepayment. However, prepayment charges may apply depending on your loan type and terms. Home loans typically have 2-3% prepayment charges, personal loans have 3-5%, and car loans have 2.5-4%. Check your loan agreement for specific terms.",
    ),
    (
        "What are prepayment charges?",
        "Prepayment charges are fees charged by the lender when you pay off your loan before the agreed tenure. These charges typically range from 2% to 5% of the outstanding principal amount, depending on the loan type and terms.",
    ),
    (
        "When is my EMI due date?",
        "Your EMI due date is specified in your loan agreement. It's typically a fixed date each month (e.g., 5th, 10th, or 15th). You can find your specific EMI date in your loan details or account statement.",
    ),
    (
        "What happens if I miss an EMI payment?",
        "Missing an EMI payment can have serious consequences: 1) Late payment charges will be applied (typically 2% of EMI amount), 2) Your credit score will be negatively impacted, 3) You may receive penalty notices, 4) After 90 days of non-payment, the loan may be classified as NPA (Non-Performing Asset).",
    ),
    (
        "Can I increase my EMI amount?",
        "Yes, you can increase your EMI amount to pay off your loan faster. This helps reduce the total interest paid over the loan tenure. Contact your bank to modify your EMI amount. There are usually no charges for increasing EMI.",
    ),
    (
        "What is the difference between principal and interest?",
        "Principal is the original loan amount you borrowed, while interest is the cost of borrowing that money. Your EMI contains both components. Early in the loan tenure, a larger portion goes toward interest, while later, more goes toward principal.",
    ),
    (
        "Can I get a loan statement?",
        "Yes, you can request a loan statement anytime through online banking, mobile app, or by visiting a branch. The statement shows all transactions, EMI payments, outstanding balance, and other loan details.",
    ),
    (
        "What is loan tenure?",
        "Loan tenure is the time period over which you agree to repay the loan. It's typically measured in months or years. Longer tenure means lower EMI but higher total interest, while shorter tenure means higher EMI but lower total interest.",
    ),
];

const BUILTIN_POLICIES: &[(&str, &str, &str)] = &[
    (
        "Home Loan Policy",
        "Prepayment Terms",
        "Home loan customers can prepay their outstanding loan amount at any time. Prepayment charges of 2% of the outstanding principal apply for loans less than 3 years old. No prepayment charges apply for loans older than 3 years. Minimum prepayment amount is Rs. 10,000. Prepayment can be done through online banking, mobile app, or branch visit.",
    ),
    (
        "Home Loan Policy",
        "Interest Rate",
        "Home loan interest rates range from 8.0% to 10.5% per annum, depending on the loan amount, tenure, and customer profile. Interest rates are subject to change based on RBI policy and bank's internal assessment. Customers can choose between fixed and floating interest rates.",
    ),
    (
        "Personal Loan Policy",
        "Prepayment Terms",
        "Personal loan prepayment is allowed after 6 months from loan disbursement. Prepayment charges of 3% to 5% of the outstanding principal apply. Full foreclosure is permitted with appropriate charges. Partial prepayment minimum amount is Rs. 5,000.",
    ),
    (
        "Personal Loan Policy",
        "Eligibility",
        "Personal loans are available to salaried and self-employed individuals aged 21-60 years. Minimum income requirement is Rs. 25,000 per month for salaried and Rs. 3 lakhs annual income for self-employed. Credit score of 750 or above preferred.",
    ),
    (
        "Car Loan Policy",
        "Prepayment Terms",
        "Car loan prepayment charges are 2.5% of outstanding principal for loans less than 2 years old. No charges after 2 years. Minimum prepayment amount is Rs. 10,000. Full foreclosure allowed with 12 months notice or applicable charges.",
    ),
    (
        "Car Loan Policy",
        "Loan Amount and Tenure",
        "Car loans are available for up to 90% of the vehicle's on-road price. Maximum loan amount is Rs. 50 lakhs. Tenure ranges from 12 to 84 months. Interest rates start from 9.0% per annum.",
    ),
    (
        "General Loan Policy",
        "EMI Payment Methods",
        "EMI payments can be made through: 1) Auto-debit from savings account (recommended), 2) Online payment through internet banking, 3) Mobile app payment, 4) NEFT/RTGS, 5) Branch payment. Ensure sufficient balance on EMI due date to avoid late payment charges.",
    ),
    (
        "General Loan Policy",
        "Late Payment Charges",
        "Late payment charges apply if EMI is not paid by the due date: 1) 2% of EMI amount for delays up to 30 days, 2) 3% for delays of 31-60 days, 3) 5% for delays beyond 60 days. Additionally, penal interest of 2% per annum may apply on overdue amounts.",
    ),
    (
        "General Loan Policy",
        "Loan Account Management",
        "Customers can manage their loan accounts through online banking and mobile app. Available features include: View loan details, Check outstanding balance, View EMI schedule, Download statements, Request NOC (No Objection Certificate), Update contact details, and Make prepayments.",
    ),
    (
        "General Loan Policy",
        "Customer Support",
        "For loan-related queries, customers can: 1) Use the chatbot for instant support, 2) Call customer care at 1800-XXX-XXXX, 3) Email loansupport@bank.com, 4) Visit nearest branch. Support available 24/7 through digital channels.",
    ),
];
