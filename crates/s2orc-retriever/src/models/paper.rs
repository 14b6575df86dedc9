//! Paper data model matching the Semantic Scholar API schema.

use serde::{Deserialize, Serialize};

/// A research paper from Semantic Scholar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Unique Semantic Scholar paper ID.
    pub paper_id: String,

    /// Paper title.
    #[serde(default)]
    pub title: Option<String>,

    /// Publication year.
    #[serde(default)]
    pub year: Option<i32>,

    /// Publication venue details.
    #[serde(default)]
    pub journal: Option<Journal>,

    /// List of authors.
    #[serde(default)]
    pub authors: Vec<AuthorRef>,

    /// SPECTER embedding (768-dimensional).
    #[serde(default)]
    pub embedding: Option<Embedding>,

    /// AI-generated TLDR summary.
    #[serde(default)]
    pub tldr: Option<Tldr>,
}

impl Paper {
    /// Get the paper title, falling back to "Untitled" if not available.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    /// Get the TLDR text if available.
    #[must_use]
    pub fn tldr_text(&self) -> Option<&str> {
        self.tldr.as_ref()?.text.as_deref()
    }

    /// Get the embedding vector if available.
    #[must_use]
    pub fn embedding_vector(&self) -> Option<&[f32]> {
        self.embedding.as_ref()?.vector.as_deref()
    }

    /// Get the first author's name if available.
    #[must_use]
    pub fn first_author(&self) -> Option<&str> {
        self.authors.first()?.name.as_deref()
    }
}

/// Author reference as embedded in paper records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    /// Semantic Scholar author ID.
    #[serde(default)]
    pub author_id: Option<String>,

    /// Author display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Journal or venue details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    /// Journal name.
    #[serde(default)]
    pub name: Option<String>,

    /// Volume identifier.
    #[serde(default)]
    pub volume: Option<String>,

    /// Page range.
    #[serde(default)]
    pub pages: Option<String>,
}

/// SPECTER embedding vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embedding {
    /// Model identifier.
    pub model: Option<String>,

    /// 768-dimensional embedding vector.
    pub vector: Option<Vec<f32>>,
}

/// AI-generated TLDR summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tldr {
    /// Summary text.
    pub text: Option<String>,

    /// Model used to generate the summary.
    pub model: Option<String>,
}

/// One page of search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPage {
    /// Total number of matching papers.
    #[serde(default)]
    pub total: i64,

    /// Current offset in the result set.
    #[serde(default)]
    pub offset: i64,

    /// Offset of the next page, absent when this page is the last.
    #[serde(default)]
    pub next: Option<i64>,

    /// List of papers in this page.
    pub data: Vec<Paper>,
}

impl SearchPage {
    /// Check if more results are available past this page.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_deserialize_minimal() {
        let json = r#"{"paperId": "abc123"}"#;
        let paper: Paper = serde_json::from_str(json).unwrap();
        assert_eq!(paper.paper_id, "abc123");
        assert!(paper.title.is_none());
        assert!(paper.authors.is_empty());
    }

    #[test]
    fn test_paper_deserialize_full() {
        let json = r#"{
            "paperId": "abc123",
            "title": "Test Paper",
            "year": 2020,
            "journal": {"name": "Nature", "volume": "7"},
            "authors": [{"authorId": "auth1", "name": "John Doe"}],
            "embedding": {"model": "specter@v0.1.1", "vector": [0.5, -0.25]},
            "tldr": {"text": "A short summary.", "model": "tldr@v2.0.0"}
        }"#;

        let paper: Paper = serde_json::from_str(json).unwrap();
        assert_eq!(paper.paper_id, "abc123");
        assert_eq!(paper.title_or_default(), "Test Paper");
        assert_eq!(paper.year, Some(2020));
        assert_eq!(paper.first_author(), Some("John Doe"));
        assert_eq!(paper.embedding_vector(), Some(&[0.5, -0.25][..]));
        assert_eq!(paper.tldr_text(), Some("A short summary."));
    }

    #[test]
    fn test_search_page() {
        let json = r#"{
            "total": 100,
            "offset": 0,
            "next": 10,
            "data": []
        }"#;

        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total, 100);
        assert!(page.has_more());
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_search_page_last() {
        let json = r#"{"total": 3, "offset": 0, "data": [{"paperId": "a"}]}"#;
        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert!(!page.has_more());
        assert_eq!(page.data.len(), 1);
    }
}
