//! Resume document formats and plain-text extraction.

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("Extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Doc,
    Docx,
    Txt,
}

impl ResumeFormat {
    /// Resolves the format from a file name's extension (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractError> {
        let ext = file_extension(file_name)
            .ok_or_else(|| ExtractError::UnsupportedFormat(file_name.to_string()))?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Ok(ResumeFormat::Pdf),
            "doc" => Ok(ResumeFormat::Doc),
            "docx" => Ok(ResumeFormat::Docx),
            "txt" => Ok(ResumeFormat::Txt),
            other => Err(ExtractError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ResumeFormat::Pdf => "pdf",
            ResumeFormat::Doc => "doc",
            ResumeFormat::Docx => "docx",
            ResumeFormat::Txt => "txt",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ResumeFormat::Pdf => "application/pdf",
            ResumeFormat::Doc => "application/msword",
            ResumeFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ResumeFormat::Txt => "text/plain",
        }
    }
}

pub fn file_extension(file_name: &str) -> Option<&str> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// Extracts plain text. Word documents are stored but not parsed, so they
/// yield an empty string.
pub async fn extract_text(bytes: bytes::Bytes, format: ResumeFormat) -> Result<String, ExtractError> {
    let text = match format {
        ResumeFormat::Txt => String::from_utf8_lossy(&bytes).into_owned(),
        ResumeFormat::Pdf => tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
        })
        .await??,
        ResumeFormat::Doc | ResumeFormat::Docx => {
            debug!("No text extractor for .{}; storing file only", format.extension());
            String::new()
        }
    };
    Ok(normalize_whitespace(&text))
}

/// Collapses runs of blank lines and trims trailing spaces.
fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;
    for line in text.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(ResumeFormat::from_file_name("cv.PDF").unwrap(), ResumeFormat::Pdf);
        assert_eq!(ResumeFormat::from_file_name("my.cv.docx").unwrap(), ResumeFormat::Docx);
        assert_eq!(ResumeFormat::from_file_name("notes.txt").unwrap(), ResumeFormat::Txt);
    }

    #[test]
    fn test_unsupported_formats_are_rejected() {
        assert!(ResumeFormat::from_file_name("photo.png").is_err());
        assert!(ResumeFormat::from_file_name("README").is_err());
        assert!(ResumeFormat::from_file_name("trailing.").is_err());
    }

    #[tokio::test]
    async fn test_plain_text_is_decoded_and_tidied() {
        let bytes = bytes::Bytes::from_static(b"Jane Doe   \n\n\n\nRust, Go\n");
        let text = extract_text(bytes, ResumeFormat::Txt).await.unwrap();
        assert_eq!(text, "Jane Doe\n\nRust, Go");
    }

    #[tokio::test]
    async fn test_word_documents_yield_no_text() {
        let bytes = bytes::Bytes::from_static(b"PK\x03\x04");
        assert_eq!(extract_text(bytes, ResumeFormat::Docx).await.unwrap(), "");
    }
}
