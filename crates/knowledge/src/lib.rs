//! Document store for LoanDesk.
//!
//! Two read-only collections (loan FAQs and policy sections) ranked by a
//! keyword-overlap heuristic. There is no embedding index; every search
//! scores every document.

pub mod corpus;
pub mod scorer;
pub mod store;

pub use corpus::{Corpus, FaqRecord, PolicyRecord};
pub use scorer::relevance;
pub use store::{DocumentStore, KeywordCollection};
