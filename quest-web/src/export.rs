//! Certificate downloads: canvas-painted PNG and core-rendered PDF
use quest_game::CertificateData;
use quest_game::certificate::{Align, Shape};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement, Url,
};

use crate::dom::document;

fn font(size: u32, bold: bool) -> String {
    if bold {
        format!("bold {size}px Arial")
    } else {
        format!("{size}px Arial")
    }
}

fn paint(ctx: &CanvasRenderingContext2d, width: f64, height: f64, shape: &Shape) -> Result<(), JsValue> {
    match shape {
        Shape::Fill { color } => {
            ctx.set_fill_style_str(color);
            ctx.fill_rect(0.0, 0.0, width, height);
        }
        Shape::Border {
            inset,
            width: line,
            color,
        } => {
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(*line);
            ctx.stroke_rect(*inset, *inset, width - 2.0 * inset, height - 2.0 * inset);
        }
        Shape::Text {
            text,
            x,
            y,
            size,
            bold,
            color,
            align,
        } => {
            ctx.set_fill_style_str(color);
            ctx.set_font(&font(*size, *bold));
            ctx.set_text_align(match align {
                Align::Left => "left",
                Align::Center => "center",
            });
            ctx.fill_text(text, *x, *y)?;
        }
    }
    Ok(())
}

/// Render the certificate into an off-screen canvas and trigger a PNG download.
///
/// # Errors
/// Returns an error if the canvas or download link cannot be created.
pub fn download_certificate_png(data: &CertificateData) -> Result<(), JsValue> {
    let layout = data.layout();
    let doc = document();

    let canvas = doc
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(JsValue::from)?;
    canvas.set_width(layout.width);
    canvas.set_height(layout.height);
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)?;

    let (width, height) = (f64::from(layout.width), f64::from(layout.height));
    for shape in &layout.shapes {
        paint(&ctx, width, height, shape)?;
    }

    save_as(&data.image_file_name(), &canvas.to_data_url()?)?;
    log::info!("certificate exported for {}", data.player_name);
    Ok(())
}

/// Render the certificate as an A4 PDF and trigger a download.
///
/// # Errors
/// Returns an error if rendering fails or the blob URL cannot be created.
pub fn download_certificate_pdf(data: &CertificateData) -> Result<(), JsValue> {
    let bytes = data.to_pdf().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type("application/pdf");
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;
    let saved = save_as(&data.pdf_file_name(), &url);
    Url::revoke_object_url(&url)?;
    saved?;
    log::info!("certificate PDF exported for {}", data.player_name);
    Ok(())
}

fn save_as(file_name: &str, href: &str) -> Result<(), JsValue> {
    let link = document()
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(JsValue::from)?;
    link.set_download(file_name);
    link.set_href(href);
    link.click();
    Ok(())
}
