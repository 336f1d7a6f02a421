//! Concrete document loaders, one per allow-listed file type

pub mod markdown;
pub mod pdf;
pub mod plain_text;

pub use markdown::MarkdownLoader;
pub use pdf::PdfLoader;
pub use plain_text::PlainTextLoader;

use crate::domain::LoaderRegistry;

/// Registry covering the full file-type allow-list.
pub fn default_registry() -> LoaderRegistry {
    LoaderRegistry::new()
        .register(Box::new(PlainTextLoader::new()))
        .register(Box::new(MarkdownLoader::new()))
        .register(Box::new(PdfLoader::new()))
}
