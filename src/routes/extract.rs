//! PDF extraction endpoint
//!
//! Orchestrates the whole flow: download the document, classify it,
//! extract words with bounding boxes (searchable) or page text via OCR
//! (scanned), persist, respond. The downloaded temp file is removed on
//! every exit path by its drop guard.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::PdfRepository;
use crate::error::Result;
use crate::pdf::types::ExtractedWord;
use crate::pdf::{classifier, lines, words, WordOptions};
use crate::state::AppState;

/// Word-splitting sensitivity used by this endpoint.
const EXTRACT_X_TOLERANCE: f64 = 1.0;

pub fn router() -> Router<AppState> {
    Router::new().route("/extract", post(extract_pdf))
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub pdf_url: String,
}

/// Response payload; shape depends on how the document was classified.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ExtractResponse {
    Searchable {
        id: i64,
        url: String,
        data: Vec<ExtractedWord>,
        formatted_text: String,
    },
    Scanned {
        id: i64,
        url: String,
        text: String,
    },
}

async fn extract_pdf(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>> {
    let url = request.pdf_url;
    tracing::info!("Extracting PDF from {}", url);

    let temp = state.downloader().fetch_to_temp(&url).await?;
    let path = temp.path().to_path_buf();

    let searchable = {
        let path = path.clone();
        tokio::task::spawn_blocking(move || classifier::is_searchable(&path)).await?
    };

    let repo = PdfRepository::new(state.db());

    let response = if searchable {
        let extracted = tokio::task::spawn_blocking(move || {
            let options = WordOptions {
                x_tolerance: EXTRACT_X_TOLERANCE,
                ..WordOptions::default()
            };
            words::extract_words(&path, &options)
        })
        .await??;

        tracing::info!("Extracted {} words from searchable PDF", extracted.len());
        let formatted_text = lines::group_words_into_lines(&extracted);
        let record = repo.create_extraction(&url, &extracted, &[]).await?;

        ExtractResponse::Searchable {
            id: record.id,
            url: record.url,
            data: extracted,
            formatted_text,
        }
    } else {
        let pages = state.ocr().extract_document(&path).await?;
        tracing::info!("OCR recognized text on {} pages", pages.len());
        let record = repo.create_extraction(&url, &[], &pages).await?;

        let text = pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        ExtractResponse::Scanned {
            id: record.id,
            url: record.url,
            text,
        }
    };

    // temp dropped here, deleting the downloaded file
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn searchable_response_shape() {
        let response = ExtractResponse::Searchable {
            id: 1,
            url: "http://example.com/a.pdf".to_string(),
            data: vec![ExtractedWord {
                text: "hola".to_string(),
                bbox: [1.0, 2.0, 3.0, 4.0],
                page: 1,
            }],
            formatted_text: "hola".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["data"][0]["text"], "hola");
        assert_eq!(json["data"][0]["bbox"][3], 4.0);
        assert_eq!(json["data"][0]["page"], 1);
        assert_eq!(json["formatted_text"], "hola");
        assert!(json.get("text").is_none());
    }

    #[test]
    fn scanned_response_shape() {
        let response = ExtractResponse::Scanned {
            id: 2,
            url: "http://example.com/scan.pdf".to_string(),
            text: "page one\npage two".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["text"], "page one\npage two");
        assert!(json.get("data").is_none());
    }
}
