//! Knowledge base backed by the SQLite FTS5 `kb` table

use crate::error::AppError;
use crate::tools::{KbArticle, KnowledgeBase};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, warn};

/// Fields for a new knowledge-base article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewKbEntry {
    /// Article title
    pub title: String,
    /// Article body
    pub content: String,
    /// Category label, `General` when omitted
    #[serde(default = "default_category")]
    pub category: String,
    /// Space-separated search tags
    #[serde(default)]
    pub tags: String,
}

fn default_category() -> String {
    "General".to_string()
}

/// Rewrites free text as an FTS5 query that ORs each quoted word
///
/// Returns `None` when the text holds no words. Quoting keeps FTS5
/// operators and punctuation out of the `MATCH` expression.
pub fn fts_query(text: &str) -> Option<String> {
    let terms: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| format!("\"{}\"", word.to_lowercase()))
        .collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" OR "))
    }
}

/// Stored article with its full-text row id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct KbEntry {
    /// FTS5 rowid
    pub id: i64,
    /// Article title
    pub title: String,
    /// Article body
    pub content: String,
    /// Category label
    pub category: String,
    /// Space-separated search tags
    pub tags: String,
}

/// [`KnowledgeBase`] over the `kb` full-text table
#[derive(Debug, Clone)]
pub struct SqliteKnowledgeBase {
    pool: SqlitePool,
}

impl SqliteKnowledgeBase {
    /// Wrap an open pool; the schema must already exist
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Add an article to the index
    ///
    /// # Errors
    /// * `AppError::InvalidRequest` when title or content is blank
    /// * `AppError::Database` when the insert fails
    pub async fn add_entry(&self, entry: &NewKbEntry) -> Result<i64, AppError> {
        let title = entry.title.trim();
        let content = entry.content.trim();
        if title.is_empty() || content.is_empty() {
            return Err(AppError::InvalidRequest(
                "title and content are required".to_string(),
            ));
        }

        let result =
            sqlx::query("INSERT INTO kb (title, content, category, tags) VALUES (?, ?, ?, ?)")
                .bind(title)
                .bind(content)
                .bind(entry.category.trim())
                .bind(entry.tags.trim())
                .execute(&self.pool)
                .await?;

        let id = result.last_insert_rowid();
        debug!(id = id, "Added knowledge base entry");
        Ok(id)
    }

    /// Every article in insertion order
    pub async fn list_entries(&self) -> Result<Vec<KbEntry>, AppError> {
        let entries = sqlx::query_as::<_, KbEntry>(
            "SELECT rowid AS id, title, content, category, tags FROM kb ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn try_search(&self, query: &str, top_k: usize) -> Result<Vec<KbArticle>, sqlx::Error> {
        let limit = i64::try_from(top_k).unwrap_or(i64::MAX);
        sqlx::query_as::<_, KbArticle>(
            "SELECT title, content FROM kb WHERE kb MATCH ? ORDER BY rank LIMIT ?",
        )
        .bind(query)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}

#[async_trait]
impl KnowledgeBase for SqliteKnowledgeBase {
    async fn search(&self, query: &str, top_k: usize) -> Vec<KbArticle> {
        let Some(query) = fts_query(query) else {
            return Vec::new();
        };
        if top_k == 0 {
            return Vec::new();
        }

        match self.try_search(&query, top_k).await {
            Ok(articles) => {
                debug!(top_k = top_k, hits = articles.len(), "Knowledge base search");
                articles
            }
            Err(e) => {
                warn!(error = %e, "Knowledge base search failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, SEED_ARTICLES};
    use tempfile::TempDir;

    async fn seeded() -> (TempDir, SqliteKnowledgeBase) {
        let dir = TempDir::new().unwrap();
        let db = Database::connect(dir.path().join("kb.db").to_str().unwrap())
            .await
            .unwrap();
        (dir, SqliteKnowledgeBase::new(db.pool().clone()))
    }

    #[tokio::test]
    async fn test_search_finds_return_policy() {
        let (_dir, kb) = seeded().await;
        let hits = kb.search("return policy", 3).await;
        assert!(!hits.is_empty());
        assert!(hits.len() <= 3);
        assert_eq!(hits[0].title, "Return Policy");
    }

    #[tokio::test]
    async fn test_search_respects_top_k() {
        let (_dir, kb) = seeded().await;
        let hits = kb.search("shipping", 1).await;
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_search_blank_or_zero() {
        let (_dir, kb) = seeded().await;
        assert!(kb.search("   ", 5).await.is_empty());
        assert!(kb.search("shipping", 0).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_no_match() {
        let (_dir, kb) = seeded().await;
        assert!(kb.search("zeppelin", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_tolerates_fts_operators() {
        let (_dir, kb) = seeded().await;
        assert!(kb.search("\"unterminated", 5).await.is_empty());
        assert!(kb.search("?! -- ,", 5).await.is_empty());
        assert!(!kb.search("NEAR(return AND", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_natural_language_questions() {
        let (_dir, kb) = seeded().await;
        for query in [
            "What's your return policy?",
            "return policy?",
            "return-policy",
            "returns, refunds",
        ] {
            let hits = kb.search(query, 5).await;
            assert_eq!(
                hits.first().map(|hit| hit.title.as_str()),
                Some("Return Policy"),
                "query: {query}"
            );
        }
    }

    #[test]
    fn test_fts_query_quotes_each_word() {
        assert_eq!(
            fts_query("What's your return-policy?").as_deref(),
            Some(r#""what" OR "s" OR "your" OR "return" OR "policy""#)
        );
        assert_eq!(fts_query("  ?? "), None);
    }

    #[test]
    fn test_new_entry_category_defaults_to_general() {
        let entry: NewKbEntry =
            serde_json::from_str(r#"{"title": "Gift Cards", "content": "Never expire."}"#)
                .unwrap();
        assert_eq!(entry.category, "General");
        assert_eq!(entry.tags, "");
    }

    #[tokio::test]
    async fn test_search_is_deterministic() {
        let (_dir, kb) = seeded().await;
        let first = kb.search("warranty", 5).await;
        let second = kb.search("warranty", 5).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_add_and_list_entries() {
        let (_dir, kb) = seeded().await;
        let id = kb
            .add_entry(&NewKbEntry {
                title: " Loyalty Program ".to_string(),
                content: "Members earn points on every purchase.".to_string(),
                category: "Rewards".to_string(),
                tags: "loyalty points".to_string(),
            })
            .await
            .unwrap();

        let entries = kb.list_entries().await.unwrap();
        assert_eq!(entries.len(), SEED_ARTICLES.len() + 1);
        let added = entries.iter().find(|entry| entry.id == id).unwrap();
        assert_eq!(added.title, "Loyalty Program");

        let hits = kb.search("loyalty", 5).await;
        assert_eq!(hits[0].title, "Loyalty Program");
    }

    #[tokio::test]
    async fn test_add_entry_requires_title_and_content() {
        let (_dir, kb) = seeded().await;
        let err = kb
            .add_entry(&NewKbEntry {
                title: "".to_string(),
                content: "body".to_string(),
                category: String::new(),
                tags: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }
}
