//! Deterministic offline responder.
//!
//! Used whenever no backend is configured or the backend fails. The reply
//! depends only on the prompt text: the same prompt always yields the same
//! answer.

const EMI_AND_PREPAYMENT: &str = "Based on your loan details, here's the information about your EMI and prepayment:

**Current EMI Details:**
Your current EMI is being paid regularly. Please refer to the loan details shown above for specific amounts.

**Prepayment Information:**
Yes, you can prepay your loan this month. Here's what you need to know:
- Prepayment is allowed for your loan type
- Prepayment charges will apply as per your loan terms (typically 2-3% for home loans)
- You can make prepayment through online banking, mobile app, or branch visit
- Minimum prepayment amount requirements apply

**Next Steps:**
If you'd like to proceed with prepayment, please specify the amount you wish to prepay, and I can calculate the exact charges and new outstanding amount for you.

Is there anything specific about prepayment you'd like to know more about?";

const PREPAYMENT: &str = "**Prepayment Information:**

Prepayment allows you to pay off your loan faster and save on interest. Here are the key points:

- **Eligibility**: Most loans allow prepayment after a certain period
- **Charges**: Prepayment charges typically range from 2-5% depending on loan type
- **Benefits**: Reduces total interest paid and loan tenure
- **Process**: Can be done through online banking, mobile app, or branch

For your specific loan, please check the loan details section for exact prepayment charge percentage and terms.

Would you like me to calculate the prepayment amount for a specific sum?";

const EMI: &str = "**EMI Information:**

Your EMI (Equated Monthly Installment) details are shown in the loan information above.

Key points about EMI:
- EMI includes both principal and interest components
- Due date is fixed each month as per your loan agreement
- Auto-debit is the recommended payment method to avoid missing payments
- Late payments attract penalties and affect credit score

If you need any specific information about your EMI or want to make changes, please let me know!";

const GENERAL: &str = "Thank you for your query. I'm here to help you with your loan and account management.

Based on the information available, I can assist you with:
- EMI details and payment schedules
- Loan outstanding amounts and tenure
- Prepayment options and calculations
- Policy information about your loans
- Account balance and transaction details

Please feel free to ask specific questions about your loans or account!";

/// Which canned answer a prompt gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfflineTemplate {
    EmiAndPrepayment,
    Prepayment,
    Emi,
    General,
}

impl OfflineTemplate {
    /// Pick a template from markers in the prompt.
    ///
    /// `EMI` is matched case-sensitively, `prepay` case-insensitively.
    pub fn for_prompt(prompt: &str) -> Self {
        let has_emi = prompt.contains("EMI");
        let has_prepay = prompt.to_lowercase().contains("prepay");

        match (has_emi, has_prepay) {
            (true, true) => Self::EmiAndPrepayment,
            (false, true) => Self::Prepayment,
            (true, false) => Self::Emi,
            (false, false) => Self::General,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::EmiAndPrepayment => EMI_AND_PREPAYMENT,
            Self::Prepayment => PREPAYMENT,
            Self::Emi => EMI,
            Self::General => GENERAL,
        }
    }
}

/// Answer `prompt` without a model.
pub fn respond(prompt: &str) -> String {
    OfflineTemplate::for_prompt(prompt).text().to_string()
}
