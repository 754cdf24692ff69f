pub mod document_start;
