//! Image-per-page PDF from a raster of the rendered presentation.
//!
//! The image is scaled to the content width and sliced into strips one
//! content-height tall; each strip becomes a page. The output has no
//! selectable text and no link annotations.
//!
//! Only the page geometry is used here. A margin that leaves no room on the
//! page is replaced by the default margin, or by none at all on pages too
//! small for it, so settings the layout engine rejected still produce output.

use crate::error::ExportError;
use crate::layout::LayoutSettings;
use crate::raster::RasterImage;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref};

const IMAGE_NAME: &[u8] = b"Im1";

/// Margin actually used for the image pages.
fn page_margin(settings: &LayoutSettings) -> f32 {
    let smallest = settings.page.width.min(settings.page.height);
    let fits = |margin: f32| margin >= 0.0 && 2.0 * margin < smallest;
    if fits(settings.margin) {
        settings.margin
    } else if fits(LayoutSettings::default().margin) {
        LayoutSettings::default().margin
    } else {
        0.0
    }
}

/// Pixel rows of `image` that fit on one page at content-width scale.
pub fn strip_height(image: &RasterImage, settings: &LayoutSettings) -> u32 {
    let margin = page_margin(settings);
    let scale = (settings.page.width - 2.0 * margin) / image.width() as f32;
    let content_height = settings.page.height - 2.0 * margin;
    ((content_height / scale).floor() as u32).max(1)
}

pub fn raster_pdf(image: &RasterImage, settings: &LayoutSettings) -> Result<Vec<u8>, ExportError> {
    let page = settings.page;
    if !(page.width > 0.0 && page.height > 0.0 && page.width.is_finite() && page.height.is_finite())
    {
        return Err(ExportError::Raster(format!("unusable page size {page}")));
    }
    if image.width() == 0 || image.height() == 0 {
        return Err(ExportError::Raster("empty screenshot".to_string()));
    }

    let margin = page_margin(settings);
    let width = page.width - 2.0 * margin;
    let scale = width / image.width() as f32;
    let strip = strip_height(image, settings);
    let page_count = image.height().div_ceil(strip);

    let mut pdf = Pdf::new();
    let mut next = Ref::new(1);
    let mut alloc = move || {
        let id = next;
        next = Ref::new(next.get() + 1);
        id
    };
    let catalog_id = alloc();
    let pages_id = alloc();

    let mut page_ids = Vec::with_capacity(page_count as usize);
    for index in 0..page_count {
        let top = index * strip;
        let rows = strip.min(image.height() - top);
        let (page_id, content_id, image_id) = (alloc(), alloc(), alloc());
        page_ids.push(page_id);

        let pixels = image.rows(top, rows);
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&pixels, 6);
        let mut xobject = pdf.image_xobject(image_id, &compressed);
        xobject.filter(Filter::FlateDecode);
        xobject.width(image.width() as i32);
        xobject.height(rows as i32);
        xobject.color_space().device_rgb();
        xobject.bits_per_component(8);
        drop(xobject);

        let height = rows as f32 * scale;
        let y = page.height - margin - height;
        let mut content = Content::new();
        content.save_state();
        content.transform([width, 0.0, 0.0, height, margin, y]);
        content.x_object(Name(IMAGE_NAME));
        content.restore_state();
        pdf.stream(content_id, &content.finish());

        let mut pdf_page = pdf.page(page_id);
        pdf_page
            .media_box(Rect::new(0.0, 0.0, page.width, page.height))
            .parent(pages_id)
            .contents(content_id);
        pdf_page.resources().x_objects().pair(Name(IMAGE_NAME), image_id);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    tracing::debug!(pages = page_count, "rendered rasterized pdf");
    Ok(pdf.finish())
}
