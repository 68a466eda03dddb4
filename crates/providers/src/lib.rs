//! Text-generation backends for LoanDesk.
//!
//! The live backend implements `loandesk_core::Provider`. The
//! [`ResponseGenerator`] wraps whichever backend the config selects and
//! answers from the deterministic offline responder when there is none or
//! when it fails.

pub mod generator;
pub mod instructions;
pub mod offline;
pub mod openai_compat;
pub mod router;

pub use generator::{Generation, GenerationSource, ResponseGenerator};
pub use instructions::SYSTEM_PROMPT;
pub use openai_compat::OpenAiCompatProvider;
pub use router::{build_generator, build_provider};
