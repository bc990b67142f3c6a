use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Deserializer};

use pagetext_core::{
    extract_all, extract_range, DocumentStats, Download, Extraction, ExtractionReport, PageRange,
    PageSource, PagetextError, PdfDocument, TextEngine,
};

use crate::error::WebError;
use crate::state::{AppState, StoredDocument};
use crate::template;
use crate::upload;

/// Optional bounds from the page-range form. A blank field counts as unset.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RangeQuery {
    #[serde(deserialize_with = "blank_as_none")]
    pub start: Option<u32>,
    #[serde(deserialize_with = "blank_as_none")]
    pub end: Option<u32>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(page) => page.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Redirect, WebError> {
    let file = upload::parse_multipart(multipart).await?;
    let engine = state.config.pdf.engine;

    tracing::debug!(filename = %file.filename, bytes = file.data.len(), "PDF upload received");

    let (file, extraction) = tokio::task::spawn_blocking(move || {
        let document = PdfDocument::load(&file.data, engine)?;
        let extraction = extract_all(&document)?;
        document.close();
        Ok::<_, PagetextError>((file, extraction))
    })
    .await
    .map_err(|e| WebError::Internal(format!("Task join error: {}", e)))??;

    let stats = DocumentStats::compute(&extraction.text, extraction.range.end);
    let id = state.documents().insert(StoredDocument {
        file_name: file.filename,
        data: file.data,
        engine,
        extraction,
        stats,
        uploaded_at: Utc::now(),
    });

    tracing::info!(id, pages = stats.page_count, words = stats.word_count, "Document extracted");
    Ok(Redirect::to(&format!("/documents/{}", id)))
}

pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Html<String>, WebError> {
    let doc = lookup(&state, id)?;
    let range = PageRange::default_selection(
        doc.stats.page_count,
        state.config.output.default_range_span,
    );
    Ok(template::render_document(id, &doc, range, None))
}

pub async fn pages(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Html<String>, WebError> {
    let Query(query) = query?;
    let doc = lookup(&state, id)?;
    let extraction = extract_selected(&state, &doc, &query).await?;
    Ok(template::render_document(id, &doc, extraction.range, Some(&extraction)))
}

pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Response, WebError> {
    let doc = lookup(&state, id)?;
    Ok(attachment(Download::full_text(&doc.file_name, &doc.extraction)))
}

pub async fn download_pages(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(query) = query?;
    let doc = lookup(&state, id)?;
    let extraction = extract_selected(&state, &doc, &query).await?;
    Ok(attachment(Download::page_range(&doc.file_name, &extraction)))
}

pub async fn report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ExtractionReport>, WebError> {
    let doc = lookup(&state, id)?;
    let mut report = ExtractionReport::new(&doc.file_name, doc.engine, &doc.extraction, doc.stats);
    report.extracted_at = doc.uploaded_at;
    Ok(Json(report))
}

fn lookup(state: &AppState, id: u64) -> Result<Arc<StoredDocument>, WebError> {
    state.documents().get(id).ok_or(WebError::NotFound)
}

/// Reopen the stored bytes and extract the requested range.
async fn extract_selected(
    state: &AppState,
    doc: &Arc<StoredDocument>,
    query: &RangeQuery,
) -> Result<Extraction, WebError> {
    let range = PageRange::resolve(
        query.start,
        query.end,
        doc.stats.page_count,
        state.config.output.default_range_span,
    )?;

    let doc = Arc::clone(doc);
    let extraction = tokio::task::spawn_blocking(move || reextract(&doc.data, doc.engine, range))
        .await
        .map_err(|e| WebError::Internal(format!("Task join error: {}", e)))??;

    Ok(extraction)
}

fn reextract(data: &[u8], engine: TextEngine, range: PageRange) -> Result<Extraction, PagetextError> {
    let document = PdfDocument::load(data, engine)?;
    tracing::debug!(pages = document.page_count(), %range, "Re-extracting page range");
    let extraction = extract_range(&document, range)?;
    document.close();
    Ok(extraction)
}

fn attachment(download: Download) -> Response {
    let disposition = download.content_disposition();
    (
        [
            (header::CONTENT_TYPE, download.mime.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        download.content,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    fn parse(uri: &'static str) -> Result<RangeQuery, QueryRejection> {
        Query::<RangeQuery>::try_from_uri(&Uri::from_static(uri)).map(|Query(query)| query)
    }

    #[test]
    fn test_range_query_blank_fields() {
        let query = parse("/documents/1/pages?start=2&end=").unwrap();
        assert_eq!((query.start, query.end), (Some(2), None));

        let query = parse("/documents/1/pages?start=+&end=+3+").unwrap();
        assert_eq!((query.start, query.end), (None, Some(3)));

        let query = parse("/documents/1/pages").unwrap();
        assert_eq!((query.start, query.end), (None, None));
    }

    #[test]
    fn test_range_query_rejects_words() {
        assert!(parse("/documents/1/pages?start=two").is_err());
        assert!(parse("/documents/1/pages?end=-1").is_err());
    }
}
