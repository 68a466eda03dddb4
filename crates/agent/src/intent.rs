//! Intent routing for in-scope queries.

const CALCULATION_KEYWORDS: &[&str] = &["calculate", "how much", "amount"];
const PREPAYMENT_KEYWORDS: &[&str] = &["prepay", "prepayment", "foreclose"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Asks what a prepayment would cost; answered by asking for an amount.
    PrepaymentGuidance,
    /// Everything else; answered by the response generator.
    General,
}

/// Route a query: prepayment guidance needs both a calculation word and a
/// prepayment word.
pub fn classify(query: &str) -> Intent {
    let query = query.to_lowercase();
    let wants_calculation = CALCULATION_KEYWORDS.iter().any(|k| query.contains(k));
    let about_prepayment = PREPAYMENT_KEYWORDS.iter().any(|k| query.contains(k));

    if wants_calculation && about_prepayment {
        Intent::PrepaymentGuidance
    } else {
        Intent::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculation_and_prepayment_route_to_guidance() {
        assert_eq!(
            classify("How much prepayment charges will I have to pay?"),
            Intent::PrepaymentGuidance
        );
        assert_eq!(
            classify("Calculate what it costs to foreclose"),
            Intent::PrepaymentGuidance
        );
    }

    #[test]
    fn one_side_alone_is_general() {
        assert_eq!(classify("Can I prepay this month?"), Intent::General);
        assert_eq!(classify("What is my outstanding loan amount?"), Intent::General);
        assert_eq!(classify("What is EMI?"), Intent::General);
    }
}
