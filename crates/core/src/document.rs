//! Reference documents (FAQs and policy sections) and retrieval results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which collection a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Faq,
    Policy,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Faq => "faq",
            Self::Policy => "policy",
        }
    }
}

/// A static reference document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DocumentEntry {
    Faq {
        question: String,
        answer: String,
    },
    Policy {
        title: String,
        section: String,
        content: String,
    },
}

impl DocumentEntry {
    pub fn faq(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self::Faq {
            question: question.into(),
            answer: answer.into(),
        }
    }

    pub fn policy(
        title: impl Into<String>,
        section: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::Policy {
            title: title.into(),
            section: section.into(),
            content: content.into(),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Faq { .. } => DocumentKind::Faq,
            Self::Policy { .. } => DocumentKind::Policy,
        }
    }

    /// The labeled text blob that gets scored and quoted in prompts.
    pub fn searchable_text(&self) -> String {
        match self {
            Self::Faq { question, answer } => format!("Q: {question}\nA: {answer}"),
            Self::Policy {
                title,
                section,
                content,
            } => format!("Title: {title}\nSection: {section}\nContent: {content}"),
        }
    }

    /// Descriptive fields carried alongside a search hit.
    pub fn metadata(&self) -> BTreeMap<String, String> {
        let mut meta = BTreeMap::new();
        match self {
            Self::Faq { question, .. } => {
                meta.insert("question".into(), question.clone());
            }
            Self::Policy { title, section, .. } => {
                meta.insert("title".into(), title.clone());
                meta.insert("section".into(), section.clone());
            }
        }
        meta.insert("type".into(), self.kind().as_str().into());
        meta
    }
}

/// A scored search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// The document's searchable text
    pub content: String,

    /// Descriptive fields (question, or title/section) plus `type`
    pub metadata: BTreeMap<String, String>,

    /// Relevance in [0, 1]
    pub score: f64,
}

/// Hits from both collections for one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievedContext {
    pub faqs: Vec<RetrievalResult>,
    pub policies: Vec<RetrievalResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faq_text_is_labeled() {
        let entry = DocumentEntry::faq("What is EMI?", "A monthly payment.");
        assert_eq!(entry.searchable_text(), "Q: What is EMI?\nA: A monthly payment.");
        assert_eq!(entry.kind(), DocumentKind::Faq);
    }

    #[test]
    fn policy_metadata_carries_title_and_section() {
        let entry = DocumentEntry::policy("Home Loan Policy", "Prepayment Terms", "...");
        let meta = entry.metadata();
        assert_eq!(meta["title"], "Home Loan Policy");
        assert_eq!(meta["section"], "Prepayment Terms");
        assert_eq!(meta["type"], "policy");
        assert!(entry.searchable_text().starts_with("Title: Home Loan Policy\nSection: "));
    }

    #[test]
    fn entry_deserializes_from_tagged_json() {
        let entry: DocumentEntry =
            serde_json::from_str(r#"{"type":"faq","question":"Q?","answer":"A."}"#).unwrap();
        assert_eq!(entry, DocumentEntry::faq("Q?", "A."));
    }
}
