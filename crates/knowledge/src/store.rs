//! Read-only document collections searched by keyword relevance.

use crate::corpus::Corpus;
use crate::scorer::relevance;
use loandesk_core::error::KnowledgeError;
use loandesk_core::{DocumentEntry, DocumentKind, RetrievalResult, RetrievedContext};
use std::path::Path;
use tracing::debug;

/// A document with its searchable text rendered once at indexing time.
#[derive(Debug, Clone)]
struct IndexedDocument {
    entry: DocumentEntry,
    text: String,
}

/// One collection (FAQs or policies).
#[derive(Debug, Clone)]
pub struct KeywordCollection {
    kind: DocumentKind,
    documents: Vec<IndexedDocument>,
}

impl KeywordCollection {
    pub fn new(kind: DocumentKind, entries: Vec<DocumentEntry>) -> Self {
        let documents = entries
            .into_iter()
            .map(|entry| IndexedDocument {
                text: entry.searchable_text(),
                entry,
            })
            .collect();
        Self { kind, documents }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Score every document against `query` and return the best `n`.
    ///
    /// Equal scores keep collection order.
    pub fn search(&self, query: &str, n: usize) -> Vec<RetrievalResult> {
        let mut results: Vec<RetrievalResult> = self
            .documents
            .iter()
            .map(|doc| RetrievalResult {
                content: doc.text.clone(),
                metadata: doc.entry.metadata(),
                score: relevance(query, &doc.text),
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(n);

        debug!(
            collection = self.kind.as_str(),
            requested = n,
            returned = results.len(),
            top_score = results.first().map(|r| r.score).unwrap_or(0.0),
            "Collection searched"
        );
        results
    }
}

/// FAQ and policy collections, immutable after construction.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    faqs: KeywordCollection,
    policies: KeywordCollection,
}

impl DocumentStore {
    pub fn new(corpus: &Corpus) -> Self {
        Self {
            faqs: KeywordCollection::new(DocumentKind::Faq, corpus.faq_entries()),
            policies: KeywordCollection::new(DocumentKind::Policy, corpus.policy_entries()),
        }
    }

    /// Store over the built-in corpus.
    pub fn builtin() -> Self {
        Self::new(&Corpus::builtin())
    }

    /// Store over a JSON corpus file.
    pub fn from_json_file(path: &Path) -> Result<Self, KnowledgeError> {
        let store = Self::new(&Corpus::from_json_file(path)?);
        tracing::info!(
            path = %path.display(),
            faqs = store.faqs.len(),
            policies = store.policies.len(),
            "Loaded document corpus"
        );
        Ok(store)
    }

    pub fn search_faqs(&self, query: &str, n: usize) -> Vec<RetrievalResult> {
        self.faqs.search(query, n)
    }

    pub fn search_policies(&self, query: &str, n: usize) -> Vec<RetrievalResult> {
        self.policies.search(query, n)
    }

    /// Search both collections, asking each for `n / 2 + 1` results.
    pub fn search_all(&self, query: &str, n: usize) -> RetrievedContext {
        let per_collection = n / 2 + 1;
        RetrievedContext {
            faqs: self.search_faqs(query, per_collection),
            policies: self.search_policies(query, per_collection),
        }
    }

    pub fn faq_count(&self) -> usize {
        self.faqs.len()
    }

    pub fn policy_count(&self) -> usize {
        self.policies.len()
    }

    /// The collections are fixed, so there is nothing to rebuild.
    pub fn reset(&self) {
        debug!("Document store reset requested; collections are static");
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::builtin()
    }
}
