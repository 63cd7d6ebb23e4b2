//! Layout → PDF bytes.
//!
//! Text is drawn with the base-14 Helvetica family in WinAnsi encoding, so no
//! font program is embedded. Each page gets one Flate-compressed content
//! stream and a URI annotation per link region.

use crate::error::ExportError;
use crate::layout::{Color, DrawCommand, Layout, LinkRegion, TextRun};
use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::writers::Annotation;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

/// Distance from the top of a line box to the text baseline, in ems.
const BASELINE: f32 = 0.85;
const COMPRESSION_LEVEL: u8 = 6;

const FONTS: [(&[u8], &[u8]); 4] = [
    (b"F1", b"Helvetica"),
    (b"F2", b"Helvetica-Bold"),
    (b"F3", b"Helvetica-Oblique"),
    (b"F4", b"Helvetica-BoldOblique"),
];

fn font_name(bold: bool, italic: bool) -> Name<'static> {
    let index = match (bold, italic) {
        (false, false) => 0,
        (true, false) => 1,
        (false, true) => 2,
        (true, true) => 3,
    };
    Name(FONTS[index].0)
}

fn rgb(color: Color) -> (f32, f32, f32) {
    match color {
        Color::Text => (0.0, 0.0, 0.0),
        Color::Link => (0.145, 0.388, 0.922),
        Color::Muted => (0.42, 0.45, 0.5),
    }
}

/// Encode `text` as WinAnsi bytes; unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' | '\u{a0}'..='\u{ff}' => ch as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

/// Render laid-out pages to a PDF document.
pub fn render_pdf(layout: &Layout) -> Result<Vec<u8>, ExportError> {
    if layout.page_count == 0 {
        return Err(ExportError::Render("layout has no pages".to_string()));
    }
    if let Some(command) = layout.commands.iter().find(|c| c.page() >= layout.page_count) {
        return Err(ExportError::Render(format!(
            "draw command on page {} of a {}-page layout",
            command.page() + 1,
            layout.page_count
        )));
    }

    let page_height = layout.page_size.height;
    let mut pdf = Pdf::new();
    let mut next = Ref::new(1);
    let mut alloc = move || {
        let id = next;
        next = Ref::new(next.get() + 1);
        id
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let font_ids: Vec<Ref> = FONTS.iter().map(|_| alloc()).collect();
    for ((_, base), id) in FONTS.iter().zip(&font_ids) {
        pdf.type1_font(*id)
            .base_font(Name(*base))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let mut page_ids = Vec::with_capacity(layout.page_count);
    for page in 0..layout.page_count {
        let page_id = alloc();
        let content_id = alloc();
        page_ids.push(page_id);

        let mut content = Content::new();
        let mut annotations = Vec::new();
        for command in layout.page_commands(page) {
            match command {
                DrawCommand::Text(run) => draw_text(&mut content, run, page_height),
                DrawCommand::Link(link) => {
                    let annotation_id = alloc();
                    write_link(&mut pdf, annotation_id, link, page_height);
                    annotations.push(annotation_id);
                }
            }
        }

        let raw = content.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, COMPRESSION_LEVEL);
        pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

        let mut page_writer = pdf.page(page_id);
        page_writer
            .media_box(Rect::new(
                0.0,
                0.0,
                layout.page_size.width,
                layout.page_size.height,
            ))
            .parent(pages_id)
            .contents(content_id);
        if !annotations.is_empty() {
            page_writer
                .insert(Name(b"Annots"))
                .array()
                .items(annotations.iter().copied());
        }
        let mut resources = page_writer.resources();
        let mut fonts = resources.fonts();
        for ((name, _), id) in FONTS.iter().zip(&font_ids) {
            fonts.pair(Name(*name), *id);
        }
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    tracing::debug!(pages = layout.page_count, "rendered pdf");
    Ok(pdf.finish())
}

fn draw_text(content: &mut Content, run: &TextRun, page_height: f32) {
    let (r, g, b) = rgb(run.style.color);
    let baseline = page_height - (run.y + run.style.font_size * BASELINE);
    let bytes = encode_win_ansi(&run.text);
    content.set_fill_rgb(r, g, b);
    content
        .begin_text()
        .set_font(font_name(run.style.bold, run.style.italic), run.style.font_size)
        .next_line(run.x, baseline)
        .show(Str(&bytes))
        .end_text();
}

fn write_link(pdf: &mut Pdf, id: Ref, link: &LinkRegion, page_height: f32) {
    let rect = &link.rect;
    let mut annotation = pdf.indirect(id).start::<Annotation>();
    annotation
        .subtype(AnnotationType::Link)
        .rect(Rect::new(
            rect.x,
            page_height - (rect.y + rect.height),
            rect.x + rect.width,
            page_height - rect.y,
        ))
        .border(0.0, 0.0, 0.0, None);
    annotation
        .action()
        .action_type(ActionType::Uri)
        .uri(Str(link.url.as_bytes()));
}
