//! Converts a folder of HTML pages into one paginated `.docx` document.
//!
//! Each page's content subtree (the element carrying the anchor id) is
//! transcribed into [`Operation`]s, the pages are sequenced into an
//! [`OutputDocument`], and the result is written as a WordprocessingML
//! package.

pub mod assemble;
pub mod config;
pub mod docx;
pub mod dom;
pub mod error;
pub mod images;
pub mod model;
pub mod style;
pub mod text;
pub mod transcribe;

use log::info;

pub use assemble::{assemble, assemble_folder};
pub use config::Config;
pub use error::{Error, Result};
pub use images::{DirImageResolver, ImageResolver, ResolvedImage};
pub use model::{Emphasis, ListStyle, NodeKind, Operation, OutputDocument};
pub use style::{resolve_color, Rgb};
pub use transcribe::{transcribe, SourceDocument, Transcriber};

/// Validates `config` and assembles its pages, without writing anything.
pub fn build_document(config: &Config) -> Result<OutputDocument> {
    config.validate()?;
    let images = config.image_resolver();
    assemble_folder(
        &config.html_dir,
        &config.first_page,
        &config.transcriber(),
        &images,
    )
}

/// [`build_document`], then writes the `.docx` to `config.out`.
pub fn convert_folder(config: &Config) -> Result<OutputDocument> {
    let doc = build_document(config)?;
    docx::write_docx(&config.out, doc.operations())?;
    info!("Documentation created: {}", config.out.display());
    Ok(doc)
}
