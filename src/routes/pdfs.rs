//! Read/delete surface over stored extraction results

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::{BoundingBoxRow, PdfRecord, PdfRepository, PdfTextRow};
use crate::error::{AppError, Result};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pdfs", get(list_pdfs))
        .route("/pdf/:id/text", get(get_pdf_text))
        .route("/pdf/:id/bounding_boxes", get(get_pdf_bounding_boxes))
        .route("/pdf/url", get(get_pdf_by_url))
        .route("/pdf/:id", delete(delete_pdf))
}

#[derive(Serialize)]
pub struct PdfListResponse {
    pub pdfs: Vec<PdfRecord>,
}

async fn list_pdfs(State(state): State<AppState>) -> Result<Json<PdfListResponse>> {
    let pdfs = PdfRepository::new(state.db()).list().await?;
    Ok(Json(PdfListResponse { pdfs }))
}

#[derive(Serialize)]
pub struct PdfTextsResponse {
    pub pdf_id: i64,
    pub texts: Vec<TextEntry>,
}

#[derive(Serialize)]
pub struct TextEntry {
    pub text: String,
    pub page_number: i64,
}

impl From<PdfTextRow> for TextEntry {
    fn from(row: PdfTextRow) -> Self {
        Self {
            text: row.text,
            page_number: row.page_number,
        }
    }
}

async fn get_pdf_text(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PdfTextsResponse>> {
    let repo = PdfRepository::new(state.db());
    require_pdf(&repo, id).await?;

    let texts = repo.texts(id).await?.into_iter().map(Into::into).collect();
    Ok(Json(PdfTextsResponse { pdf_id: id, texts }))
}

#[derive(Serialize)]
pub struct BoundingBoxesResponse {
    pub pdf_id: i64,
    pub bounding_boxes: Vec<BoundingBoxEntry>,
}

#[derive(Serialize)]
pub struct BoundingBoxEntry {
    pub text: String,
    pub page_number: i64,
    pub bbox: [f64; 4],
}

impl From<BoundingBoxRow> for BoundingBoxEntry {
    fn from(row: BoundingBoxRow) -> Self {
        Self {
            text: row.text,
            page_number: row.page_number,
            bbox: [row.x0, row.y0, row.x1, row.y1],
        }
    }
}

async fn get_pdf_bounding_boxes(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BoundingBoxesResponse>> {
    let repo = PdfRepository::new(state.db());
    require_pdf(&repo, id).await?;

    let bounding_boxes = repo
        .bounding_boxes(id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(BoundingBoxesResponse {
        pdf_id: id,
        bounding_boxes,
    }))
}

#[derive(Deserialize)]
pub struct UrlQuery {
    pub url: String,
}

async fn get_pdf_by_url(
    State(state): State<AppState>,
    Query(query): Query<UrlQuery>,
) -> Result<Json<PdfRecord>> {
    let record = PdfRepository::new(state.db())
        .get_by_url(&query.url)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No PDF stored for URL {}", query.url)))?;
    Ok(Json(record))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

async fn delete_pdf(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    let deleted = PdfRepository::new(state.db()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("No PDF with id {}", id)));
    }

    Ok(Json(DeleteResponse {
        message: format!("PDF with ID {} deleted", id),
    }))
}

async fn require_pdf(repo: &PdfRepository<'_>, id: i64) -> Result<()> {
    repo.get(id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("No PDF with id {}", id)))
}
