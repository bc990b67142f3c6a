use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;

use crate::error::WebError;

/// An uploaded PDF with its original file name.
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Read the `pdf` field of a multipart upload, ignoring anything else.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<UploadedFile, WebError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| read_error("Failed to read form field", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "pdf" {
            let filename = field.file_name().unwrap_or("upload.pdf").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| read_error("Failed to read file data", e))?
                .to_vec();

            file = Some(UploadedFile { filename, data });
        } else {
            let _ = field.bytes().await;
        }
    }

    let file = file
        .filter(|f| !f.data.is_empty())
        .ok_or_else(|| WebError::BadRequest("No file uploaded".to_string()))?;
    check_pdf_magic(&file.data)?;

    Ok(file)
}

/// Keep the body limit's 413; anything else is a malformed form.
fn read_error(context: &str, err: MultipartError) -> WebError {
    let message = format!("{}: {}", context, err.body_text());
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        WebError::PayloadTooLarge(message)
    } else {
        WebError::BadRequest(message)
    }
}

fn check_pdf_magic(data: &[u8]) -> Result<(), WebError> {
    if data.starts_with(b"%PDF-") {
        Ok(())
    } else {
        Err(WebError::BadRequest(
            "File doesn't appear to be a valid PDF".to_string(),
        ))
    }
}
