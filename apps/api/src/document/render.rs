//! Document Renderer: lays out text or résumé fields and serializes a PDF.

use std::io::Write;
use std::path::Path;

use lopdf::content::Content;
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use thiserror::Error;
use tracing::info;

use crate::document::layout::{Font, Page, PageGeometry, PageLayout};
use crate::models::resume::{RenderableDocument, ResumeFields};

/// File name the optimized résumé is delivered under.
pub const DEFAULT_OUTPUT_NAME: &str = "optimized_resume.pdf";

const NAME_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 13.0;
const BULLET_INDENT: f32 = 12.0;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF encoding error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Lays out `document` into pages.
pub fn layout_pages(document: &RenderableDocument, geometry: &PageGeometry) -> Vec<Page> {
    match document {
        RenderableDocument::Lines(lines) => layout_lines(lines, geometry),
        RenderableDocument::Resume(fields) => layout_resume(fields, geometry),
    }
}

/// Writes the rendered PDF to any byte sink.
pub fn render_to<W: Write>(
    document: &RenderableDocument,
    geometry: &PageGeometry,
    sink: &mut W,
) -> Result<(), RenderError> {
    let pages = layout_pages(document, geometry);
    let mut pdf = build_pdf(&pages, geometry)?;
    pdf.save_to(sink)?;
    Ok(())
}

pub fn render_to_bytes(
    document: &RenderableDocument,
    geometry: &PageGeometry,
) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    render_to(document, geometry, &mut bytes)?;
    Ok(bytes)
}

/// Writes the rendered PDF to a named file.
pub fn save(
    document: &RenderableDocument,
    geometry: &PageGeometry,
    path: &Path,
) -> Result<(), RenderError> {
    let mut file = std::fs::File::create(path)?;
    render_to(document, geometry, &mut file)?;
    file.flush()?;
    info!("Rendered document saved to {}", path.display());
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

fn layout_lines(lines: &[String], geometry: &PageGeometry) -> Vec<Page> {
    let mut layout = PageLayout::new(geometry.clone());
    for line in lines {
        layout.write_line(line, Font::Regular, geometry.font_size);
    }
    layout.finish()
}

/// Fixed section order. Page breaks happen only between sections.
fn layout_resume(fields: &ResumeFields, geometry: &PageGeometry) -> Vec<Page> {
    let mut layout = PageLayout::new(geometry.clone());
    let size = geometry.font_size;

    layout.write_line_unchecked(fields.name.trim(), Font::Bold, NAME_SIZE, 0.0);
    layout.advance(1);
    if let Some(contact) = fields.contact_line() {
        layout.write_line_unchecked(&contact, Font::Regular, size, 0.0);
    }

    let summary: Vec<String> = fields
        .summary
        .as_deref()
        .map(|s| s.lines().map(|l| l.trim().to_string()).collect())
        .unwrap_or_default();
    let skills: Vec<String> = fields.skills.iter().map(|s| bullet(s)).collect();
    let projects: Vec<String> = fields.projects.iter().map(|p| bullet(p)).collect();

    for (heading, items, indent) in [
        ("Summary", &summary, 0.0),
        ("Skills", &skills, BULLET_INDENT),
        ("Projects", &projects, BULLET_INDENT),
    ] {
        if items.iter().all(|i| i.trim().is_empty()) {
            continue;
        }
        layout.advance(1);
        layout.new_page_if_needed(2);
        layout.write_line_unchecked(heading, Font::Bold, HEADING_SIZE, 0.0);
        for item in items {
            layout.write_line_unchecked(item, Font::Regular, size, indent);
        }
    }

    layout.finish()
}

fn bullet(item: &str) -> String {
    format!("\u{2022} {}", item.trim())
}

// ────────────────────────────────────────────────────────────────────────────
// PDF serialization
// ────────────────────────────────────────────────────────────────────────────

fn build_pdf(pages: &[Page], geometry: &PageGeometry) -> Result<Document, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = add_font(&mut doc, Font::Regular);
    let bold_id = add_font(&mut doc, Font::Bold);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Regular.resource_name() => regular_id,
            Font::Bold.resource_name() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page.operations.clone(),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                geometry.width.into(),
                geometry.height.into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}

fn add_font(doc: &mut Document, font: Font) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    })
}
