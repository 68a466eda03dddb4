//! Prompt composition and the assistant's fixed messages.
//!
//! Sections are emitted in a fixed order; a section with nothing to show is
//! left out entirely.

use loandesk_core::{
    CustomerRecord, LoanRecord, PrepaymentCalculation, RetrievedContext, format_currency,
    format_rate,
};

/// Reply to out-of-scope queries.
pub const OUT_OF_SCOPE_MESSAGE: &str = "I apologize, but I can only assist with questions related to your existing loans, EMIs, and account management. For other banking services, please contact our customer care at 1800-XXX-XXXX or visit your nearest branch.";

/// Reply when the customer cannot be found.
pub const NO_CUSTOMER_DATA_MESSAGE: &str = "I don't have access to your account information at the moment. Please ensure you're logged in or contact customer support for assistance.";

/// Reply when prepayment guidance is requested but there are no loans.
pub const NO_ACTIVE_LOANS_MESSAGE: &str = "You don't have any active loans for prepayment.";

/// Reply when a prepayment quote cannot be produced for the customer/loan pair.
pub const CALCULATION_UNAVAILABLE_MESSAGE: &str =
    "Unable to calculate prepayment. Please check your loan details.";

/// Snippets quoted per collection.
const MAX_SNIPPETS: usize = 3;

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn push_loan(parts: &mut Vec<String>, loan: &LoanRecord) {
    parts.push(format!("\nLoan ID: {}", loan.loan_id));
    parts.push(format!("  Type: {}", loan.loan_type));
    parts.push(format!(
        "  Outstanding Amount: {}",
        format_currency(loan.outstanding_amount)
    ));
    parts.push(format!("  EMI Amount: {}", format_currency(loan.emi_amount)));
    parts.push(format!("  EMI Date: {} of each month", loan.emi_date));
    parts.push(format!("  Next EMI Date: {}", loan.next_emi_date));
    parts.push(format!(
        "  Interest Rate: {}% p.a.",
        format_rate(loan.interest_rate)
    ));
    parts.push(format!("  Remaining Months: {}", loan.remaining_months));
    parts.push(format!(
        "  Prepayment Allowed: {}",
        yes_no(loan.prepayment_allowed)
    ));
    if loan.prepayment_allowed {
        parts.push(format!(
            "  Prepayment Charges: {}%",
            format_rate(loan.prepayment_charges)
        ));
    }
}

fn push_snippets(parts: &mut Vec<String>, heading: &str, label: &str, contents: &[&str]) {
    if contents.is_empty() {
        return;
    }
    parts.push(heading.to_string());
    for (i, content) in contents.iter().take(MAX_SNIPPETS).enumerate() {
        parts.push(format!("\n{label} {}:", i + 1));
        parts.push((*content).to_string());
    }
    parts.push(String::new());
}

/// Compose the general-answer prompt from customer data, retrieved
/// snippets, and the user's query.
pub fn query_prompt(query: &str, customer: &CustomerRecord, context: &RetrievedContext) -> String {
    let mut parts = vec![
        "=== CONTEXT INFORMATION ===\n".to_string(),
        "CUSTOMER DATA:".to_string(),
        format!("Customer Name: {}", customer.name),
        format!("Account Number: {}", customer.account_number),
        format!(
            "Account Balance: {}",
            format_currency(customer.account_balance)
        ),
    ];

    if !customer.loans.is_empty() {
        parts.push("\nLOAN DETAILS:".to_string());
        for loan in &customer.loans {
            push_loan(&mut parts, loan);
        }
    }
    parts.push(String::new());

    let faqs: Vec<&str> = context.faqs.iter().map(|r| r.content.as_str()).collect();
    push_snippets(&mut parts, "RELEVANT FAQs:", "FAQ", &faqs);

    let policies: Vec<&str> = context.policies.iter().map(|r| r.content.as_str()).collect();
    push_snippets(&mut parts, "RELEVANT POLICIES:", "Policy", &policies);

    parts.extend([
        "=== USER QUERY ===".to_string(),
        query.to_string(),
        String::new(),
        "=== INSTRUCTIONS ===".to_string(),
        "Based on the context information provided above, answer the user's query accurately and professionally.".to_string(),
        "Use ONLY the information from the context. If you need information not available in the context, clearly state that.".to_string(),
        "Format your response in a clear, friendly manner suitable for a customer.".to_string(),
    ]);

    parts.join("\n")
}

/// Compose the prompt that asks for a plain-language explanation of a
/// prepayment quote.
pub fn calculation_prompt(requested: f64, calc: &PrepaymentCalculation) -> String {
    [
        "=== PREPAYMENT CALCULATION ===\n".to_string(),
        format!("Loan Type: {}", calc.loan_type),
        format!("Prepayment Amount Requested: {}", format_currency(requested)),
        "\nBREAKDOWN:".to_string(),
        format!(
            "- Prepayment Amount: {}",
            format_currency(calc.prepayment_amount)
        ),
        format!(
            "- Prepayment Charges ({}%): {}",
            format_rate(calc.prepayment_charge_percentage),
            format_currency(calc.prepayment_charge)
        ),
        format!(
            "- Total Amount to Pay: {}",
            format_currency(calc.total_amount_to_pay)
        ),
        "\nIMPACT:".to_string(),
        format!(
            "- Current Outstanding: {}",
            format_currency(calc.current_outstanding)
        ),
        format!("- New Outstanding: {}", format_currency(calc.new_outstanding)),
        format!("- Amount Reduced: {}", format_currency(calc.amount_reduced())),
        "\n=== INSTRUCTIONS ===".to_string(),
        "Explain this prepayment calculation to the customer in a clear and friendly manner."
            .to_string(),
        "Mention the benefits of prepayment and confirm if they would like to proceed.".to_string(),
    ]
    .join("\n")
}

/// Ask the customer for a prepayment amount, quoting the loan's terms.
pub fn prepayment_guidance(loan: &LoanRecord) -> String {
    format!(
        "To calculate prepayment for your {}, I need the prepayment amount.

**Your Current Loan Details:**
- Outstanding Amount: {}
- Prepayment Allowed: {}
- Prepayment Charges: {}%

Please specify the amount you'd like to prepay, and I'll calculate the total amount including charges.",
        loan.loan_type,
        format_currency(loan.outstanding_amount),
        yes_no(loan.prepayment_allowed),
        format_rate(loan.prepayment_charges),
    )
}
