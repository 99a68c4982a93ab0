//! A4 landscape PDF rendering of the certificate page layout
use printpdf::path::PaintMode;
use printpdf::*;

use crate::certificate::{Align, CertificateData, CertificateLayout, Shape, QUEST_TITLE};

/// Points per millimetre.
const PT_PER_MM: f64 = 72.0 / 25.4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PdfError {
    #[error("failed to load certificate font: {0}")]
    Font(String),
    #[error("failed to render certificate PDF: {0}")]
    Render(String),
}

impl CertificateData {
    /// Render the certificate as a single A4 landscape PDF page.
    ///
    /// # Errors
    ///
    /// Returns an error if a builtin font cannot be registered or the
    /// document cannot be serialized.
    pub fn to_pdf(&self) -> Result<Vec<u8>, PdfError> {
        let bytes = render_pdf(&self.page_layout())?;
        log::debug!("certificate PDF for {} is {} bytes", self.player_name, bytes.len());
        Ok(bytes)
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Draw `page` (millimetres, origin top-left) onto one PDF page of the same size.
///
/// # Errors
///
/// See [`CertificateData::to_pdf`].
pub fn render_pdf(page: &CertificateLayout) -> Result<Vec<u8>, PdfError> {
    let width = f64::from(page.width);
    let height = f64::from(page.height);
    let (doc, page_index, layer_index) =
        PdfDocument::new(QUEST_TITLE, mm(width), mm(height), "certificate");
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| PdfError::Font(format!("{e:?}")))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| PdfError::Font(format!("{e:?}")))?,
    };
    let layer = doc.get_page(page_index).get_layer(layer_index);

    for shape in &page.shapes {
        draw(&layer, &fonts, width, height, shape);
    }

    doc.save_to_bytes().map_err(|e| PdfError::Render(format!("{e:?}")))
}

fn draw(layer: &PdfLayerReference, fonts: &Fonts, width: f64, height: f64, shape: &Shape) {
    match shape {
        Shape::Fill { color } => {
            layer.set_fill_color(rgb(color));
            layer.add_rect(
                Rect::new(mm(0.0), mm(0.0), mm(width), mm(height)).with_mode(PaintMode::Fill),
            );
        }
        Shape::Border {
            inset,
            width: line,
            color,
        } => {
            layer.set_outline_color(rgb(color));
            layer.set_outline_thickness(narrow(line * PT_PER_MM));
            layer.add_rect(
                Rect::new(mm(*inset), mm(*inset), mm(width - inset), mm(height - inset))
                    .with_mode(PaintMode::Stroke),
            );
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
            let text = latin1(text);
            if text.is_empty() {
                return;
            }
            let size = f64::from(*size);
            let left = match align {
                Align::Left => *x,
                Align::Center => x - text_width_mm(&text, size, *bold) / 2.0,
            };
            let font = if *bold { &fonts.bold } else { &fonts.regular };
            layer.set_fill_color(rgb(color));
            layer.use_text(text, narrow(size), mm(left), mm(height - y), font);
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn narrow(value: f64) -> f32 {
    value as f32
}

fn mm(value: f64) -> Mm {
    Mm(narrow(value))
}

fn rgb(hex: &str) -> Color {
    let (r, g, b) = channels(hex);
    Color::Rgb(Rgb::new(r, g, b, None))
}

/// `#rrggbb` to unit channels; anything else is black.
fn channels(hex: &str) -> (f32, f32, f32) {
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
            .map_or(0.0, |value| f32::from(value) / 255.0)
    };
    if hex.len() == 7 && hex.starts_with('#') {
        (channel(1..3), channel(3..5), channel(5..7))
    } else {
        (0.0, 0.0, 0.0)
    }
}

/// The builtin fonts only cover Latin-1.
fn latin1(text: &str) -> String {
    text.chars()
        .filter(|c| u32::from(*c) <= 0xFF)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Approximate Helvetica advance width, enough to centre a line.
fn text_width_mm(text: &str, size_pt: f64, bold: bool) -> f64 {
    let em = if bold { 0.55 } else { 0.5 };
    let chars = f64::from(u32::try_from(text.chars().count()).unwrap_or(u32::MAX));
    chars * size_pt * em / PT_PER_MM
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BadgeId;
    use crate::certificate::issue_certificate;
    use crate::state::GameState;
    use chrono::NaiveDate;

    fn certificate(name: &str) -> CertificateData {
        let mut state = GameState::fresh(name);
        for badge in BadgeId::ALL {
            state.badges.unlock(badge);
        }
        state.total_points = 815;
        let issued_on = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        issue_certificate(&state, issued_on).unwrap()
    }

    #[test]
    fn certificate_renders_as_pdf() {
        let cert = certificate("Ada Lovelace");
        let bytes = cert.to_pdf().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(cert.pdf_file_name(), "PowerBI_Certificate_Ada_Lovelace.pdf");
    }

    #[test]
    fn names_outside_latin1_still_render() {
        let bytes = certificate("Zoë 🚀 Żak").to_pdf().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn latin1_drops_emoji_and_check_marks() {
        assert_eq!(latin1("🏆 CERTIFICATE 🏆"), "CERTIFICATE");
        assert_eq!(latin1("✓ Zoë"), "Zoë");
    }

    #[test]
    fn hex_colours_map_to_unit_channels() {
        assert_eq!(channels("#ff0000"), (1.0, 0.0, 0.0));
        assert_eq!(channels("#000000"), (0.0, 0.0, 0.0));
        assert_eq!(channels("teal"), (0.0, 0.0, 0.0));
    }

    #[test]
    fn centred_text_width_grows_with_length() {
        let short = text_width_mm("Ada", 20.0, true);
        let long = text_width_mm("Ada Lovelace", 20.0, true);
        assert!(long > short);
        assert!(long < 297.0);
    }
}
