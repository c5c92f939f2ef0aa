// 📄 PDF Export - One scripture → multi-page PDF artifact
//
// Assembles a title page followed by one page per verse (label,
// transliteration, wrapped meaning, "verse i of n" footer). Uses the
// built-in Helvetica font, which carries Latin text only, so pages render
// the transliteration and meaning; the source-script line is skipped.
// TODO: embed a Devanagari-capable TTF so the source text renders too.

use anyhow::{bail, Context, Result};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::content::Scripture;

// A4 portrait
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 22.0;

const TITLE_SIZE: f32 = 24.0;
const HEADING_SIZE: f32 = 15.0;
const BODY_SIZE: f32 = 11.5;
const FOOTER_SIZE: f32 = 9.0;
const LINE_HEIGHT_MM: f32 = 6.5;

/// Characters per wrapped body line at BODY_SIZE on an A4 page
const WRAP_WIDTH: usize = 78;

/// Export a scripture as a multi-page PDF.
pub fn export_scripture(scripture: &Scripture, out_path: &Path) -> Result<()> {
    if !scripture.is_available() {
        bail!(
            "'{}' has no verses yet and cannot be exported",
            scripture.id
        );
    }

    let (doc, title_page, title_layer) = PdfDocument::new(
        &scripture.title_translit,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .context("registering PDF font")?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .context("registering PDF font")?;

    // Title page
    {
        let layer = doc.get_page(title_page).get_layer(title_layer);
        let mut y = PAGE_HEIGHT_MM - 90.0;

        layer.use_text(
            scripture.title_translit.clone(),
            TITLE_SIZE,
            Mm(MARGIN_MM),
            Mm(y),
            &bold,
        );
        y -= 12.0;

        layer.use_text(
            scripture.category.as_str().to_string(),
            HEADING_SIZE,
            Mm(MARGIN_MM),
            Mm(y),
            &font,
        );
        y -= 16.0;

        for line in wrap_lines(&scripture.description, WRAP_WIDTH) {
            layer.use_text(line, BODY_SIZE, Mm(MARGIN_MM), Mm(y), &font);
            y -= LINE_HEIGHT_MM;
        }
    }

    // One page per verse
    let total = scripture.verse_count();
    for (idx, verse) in scripture.verses.iter().enumerate() {
        let (page, layer_idx) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer_idx);

        let label = if verse.is_opening() {
            "Doha".to_string()
        } else {
            format!("Verse {}", verse.number)
        };

        let mut y = PAGE_HEIGHT_MM - 40.0;
        layer.use_text(label, HEADING_SIZE, Mm(MARGIN_MM), Mm(y), &bold);
        y -= 14.0;

        for line in wrap_lines(&verse.transliteration, WRAP_WIDTH) {
            layer.use_text(line, BODY_SIZE, Mm(MARGIN_MM), Mm(y), &font);
            y -= LINE_HEIGHT_MM;
        }
        y -= LINE_HEIGHT_MM;

        for line in wrap_lines(&verse.meaning, WRAP_WIDTH) {
            layer.use_text(line, BODY_SIZE, Mm(MARGIN_MM), Mm(y), &font);
            y -= LINE_HEIGHT_MM;
        }

        write_footer(&layer, &font, idx + 1, total);
    }

    let file = File::create(out_path)
        .with_context(|| format!("creating {}", out_path.display()))?;
    doc.save(&mut BufWriter::new(file))
        .context("writing PDF")?;

    Ok(())
}

fn write_footer(layer: &PdfLayerReference, font: &IndirectFontRef, pos: usize, total: usize) {
    layer.use_text(
        format!("verse {} of {}", pos, total),
        FOOTER_SIZE,
        Mm(MARGIN_MM),
        Mm(14.0),
        font,
    );
}

/// Greedy word wrap to a character width
fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

// ============================================================================
// TESTS
// ============================================================================
