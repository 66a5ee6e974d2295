//! PDF extraction records and their repository

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::{AppError, Result};
use crate::pdf::types::{ExtractedWord, PageText};

/// Stored document record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PdfRecord {
    pub id: i64,
    pub url: String,
    pub created_at: String,
}

/// Page-level text row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PdfTextRow {
    pub id: i64,
    pub pdf_id: i64,
    pub text: String,
    pub page_number: i64,
}

/// Word-level bounding box row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BoundingBoxRow {
    pub id: i64,
    pub pdf_id: i64,
    pub text: String,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub page_number: i64,
}

/// Repository over the pdfs/pdf_texts/bounding_boxes tables
pub struct PdfRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PdfRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist one extraction: the document record plus all of its
    /// word boxes and page texts, in a single transaction.
    ///
    /// A URL that was already extracted is rejected with a conflict
    /// error; nothing is written in that case.
    pub async fn create_extraction(
        &self,
        url: &str,
        words: &[ExtractedWord],
        pages: &[PageText],
    ) -> Result<PdfRecord> {
        let mut tx = self.pool.begin().await?;
        let created_at = Utc::now().to_rfc3339();

        let inserted = sqlx::query("INSERT INTO pdfs (url, created_at) VALUES (?, ?)")
            .bind(url)
            .bind(&created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    AppError::Conflict(format!("PDF already extracted for URL {}", url))
                }
                other => AppError::Database(other),
            })?;
        let pdf_id = inserted.last_insert_rowid();

        for word in words {
            sqlx::query(
                r#"
                INSERT INTO bounding_boxes (pdf_id, text, x0, y0, x1, y1, page_number)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(pdf_id)
            .bind(&word.text)
            .bind(word.bbox[0])
            .bind(word.bbox[1])
            .bind(word.bbox[2])
            .bind(word.bbox[3])
            .bind(word.page as i64)
            .execute(&mut *tx)
            .await?;
        }

        for page in pages {
            sqlx::query("INSERT INTO pdf_texts (pdf_id, text, page_number) VALUES (?, ?, ?)")
                .bind(pdf_id)
                .bind(&page.text)
                .bind(page.page as i64)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.get(pdf_id)
            .await?
            .ok_or_else(|| AppError::Internal("Failed to fetch created PDF record".to_string()))
    }

    /// All stored document records
    pub async fn list(&self) -> Result<Vec<PdfRecord>> {
        let records = sqlx::query_as::<_, PdfRecord>(
            "SELECT id, url, created_at FROM pdfs ORDER BY id ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }

    pub async fn get(&self, id: i64) -> Result<Option<PdfRecord>> {
        let record =
            sqlx::query_as::<_, PdfRecord>("SELECT id, url, created_at FROM pdfs WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(record)
    }

    pub async fn get_by_url(&self, url: &str) -> Result<Option<PdfRecord>> {
        let record =
            sqlx::query_as::<_, PdfRecord>("SELECT id, url, created_at FROM pdfs WHERE url = ?")
                .bind(url)
                .fetch_optional(self.pool)
                .await?;

        Ok(record)
    }

    /// Page texts for a document, in page order
    pub async fn texts(&self, pdf_id: i64) -> Result<Vec<PdfTextRow>> {
        let rows = sqlx::query_as::<_, PdfTextRow>(
            r#"
            SELECT id, pdf_id, text, page_number
            FROM pdf_texts
            WHERE pdf_id = ?
            ORDER BY page_number ASC, id ASC
            "#,
        )
        .bind(pdf_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Word boxes for a document, in extraction order
    pub async fn bounding_boxes(&self, pdf_id: i64) -> Result<Vec<BoundingBoxRow>> {
        let rows = sqlx::query_as::<_, BoundingBoxRow>(
            r#"
            SELECT id, pdf_id, text, x0, y0, x1, y1, page_number
            FROM bounding_boxes
            WHERE pdf_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(pdf_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Delete a document record; dependent rows cascade.
    ///
    /// Returns whether a record existed.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM pdfs WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
