//! Database schema initialization

use sqlx::SqlitePool;

use crate::error::Result;

/// Initialize the database schema
pub async fn initialize_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(SCHEMA_SQL).execute(pool).await?;

    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- One record per extracted document; the URL is the external identity
CREATE TABLE IF NOT EXISTS pdfs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Page-level text from the OCR path
CREATE TABLE IF NOT EXISTS pdf_texts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pdf_id INTEGER NOT NULL REFERENCES pdfs(id) ON DELETE CASCADE,
    text TEXT NOT NULL,
    page_number INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_pdf_texts_pdf_id ON pdf_texts(pdf_id);

-- Word-level boxes from the searchable path (top-left origin)
CREATE TABLE IF NOT EXISTS bounding_boxes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pdf_id INTEGER NOT NULL REFERENCES pdfs(id) ON DELETE CASCADE,
    text TEXT NOT NULL,
    x0 REAL NOT NULL,
    y0 REAL NOT NULL,
    x1 REAL NOT NULL,
    y1 REAL NOT NULL,
    page_number INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_bounding_boxes_pdf_id ON bounding_boxes(pdf_id);
"#;
