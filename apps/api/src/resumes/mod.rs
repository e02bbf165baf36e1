// Resume ingestion: object storage, text extraction, AI field extraction.
// The match engine never sees any of this; it only reads the candidate
// records these drafts eventually become.

pub mod draft;
pub mod extractor;
pub mod handlers;
pub mod prompts;
pub mod storage;
pub mod text;
