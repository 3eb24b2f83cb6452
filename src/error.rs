//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `OptimizeError` enum per categorizzare tutti gli errori possibili
//! - Fornisce messaggi di errore descrittivi e strutturati
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (file non trovati, permessi, etc.)
//! - `Config`: Config file mancante, malformato o con valori fuori range
//! - `Json`: Errori di parsing/serializzazione JSON
//! - `Image`: Errori di decodifica/encoding immagini
//! - `Compression`: Il minifier esterno ha rifiutato l'input
//! - `UnsupportedFormat`: Formato file non supportato dall'adapter
//!
//! ## Policy:
//! - `Config` e `Io` fermano l'intera invocazione (exit code 1)
//! - `Compression` interrompe la run al file incriminato (fail-fast);
//!   i file già scritti restano al loro posto, nessun rollback
//! - Unica eccezione: output derivati (WebP) sono best-effort, vedi optimizer

/// Custom error types for asset optimization
#[derive(thiserror::Error, Debug)]
pub enum OptimizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Compression error: {0}")]
    Compression(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}
