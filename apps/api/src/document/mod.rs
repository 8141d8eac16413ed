// Résumé documents: text extraction from uploads, paginated layout, PDF rendering.
// Extraction and rendering are CPU-bound; handlers run them inside tokio::task::spawn_blocking.

pub mod extract;
pub mod handlers;
pub mod layout;
pub mod render;
