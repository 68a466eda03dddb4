//! Customer data gateway implementations for LoanDesk.
//!
//! Only an in-memory bank exists today: two demo customers, or records
//! loaded from a JSON fixtures file.

pub mod mock;
pub mod schedule;

pub use mock::MockBankGateway;
pub use schedule::next_emi_date;
