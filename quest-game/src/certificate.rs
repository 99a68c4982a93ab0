//! Completion certificate data and layout
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::sync::OnceLock;

use crate::state::GameState;

pub const SKILLS: [&str; 6] = [
    "Data Connection & Import",
    "Professional Visualizations",
    "Dashboard Design & Formatting",
    "Interactive Elements & Filtering",
    "Publishing & Sharing",
    "HR Analytics Best Practices",
];

pub const QUEST_TITLE: &str = "Power BI Dashboard Mastery Quest";
pub const PROGRAM_NAME: &str = "Power BI Quest Certification Program";

/// Why a certificate cannot be issued yet. The messages are shown to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CertificateError {
    #[error("Please enter your name in the header to generate your certificate!")]
    MissingName,
    #[error("Complete all modules and earn all badges to unlock your certificate!")]
    BadgesLocked,
}

/// Everything a renderer needs to draw a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateData {
    pub player_name: String,
    pub total_points: u32,
    pub issued_on: NaiveDate,
    pub skills: [&'static str; 6],
}

/// Build certificate data for `state`, checking the name before the badges.
///
/// # Errors
///
/// Returns an error if the player name is blank or any badge is still locked.
pub fn issue_certificate(
    state: &GameState,
    issued_on: NaiveDate,
) -> Result<CertificateData, CertificateError> {
    if !state.has_player_name() {
        return Err(CertificateError::MissingName);
    }
    if !state.badges.all_unlocked() {
        return Err(CertificateError::BadgesLocked);
    }
    Ok(CertificateData {
        player_name: state.player_name.trim().to_string(),
        total_points: state.total_points,
        issued_on,
        skills: SKILLS,
    })
}

fn whitespace_runs() -> Option<&'static Regex> {
    static WHITESPACE: OnceLock<Option<Regex>> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").ok()).as_ref()
}

impl CertificateData {
    /// Download name without extension, e.g. `PowerBI_Certificate_Ada_Lovelace`.
    #[must_use]
    pub fn file_stem(&self) -> String {
        let name = whitespace_runs().map_or_else(
            || self.player_name.split_whitespace().collect::<Vec<_>>().join("_"),
            |re| re.replace_all(&self.player_name, "_").into_owned(),
        );
        format!("PowerBI_Certificate_{name}")
    }

    #[must_use]
    pub fn date_label(&self) -> String {
        format!("Date: {}", self.issued_on.format("%B %-d, %Y"))
    }

    #[must_use]
    pub fn score_label(&self) -> String {
        format!("Score: {} Points", self.total_points)
    }

    #[must_use]
    pub fn layout(&self) -> CertificateLayout {
        CertificateLayout::for_certificate(self)
    }

    /// A4 landscape page, measured in millimetres from the top-left corner.
    #[must_use]
    pub fn page_layout(&self) -> CertificateLayout {
        CertificateLayout::for_page(self)
    }

    #[must_use]
    pub fn image_file_name(&self) -> String {
        format!("{}.png", self.file_stem())
    }

    #[must_use]
    pub fn pdf_file_name(&self) -> String {
        format!("{}.pdf", self.file_stem())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
}

/// One drawing instruction, in the units of its layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Fill {
        color: &'static str,
    },
    Border {
        inset: f64,
        width: f64,
        color: &'static str,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        size: u32,
        bold: bool,
        color: &'static str,
        align: Align,
    },
}

/// Resolution-fixed certificate drawing shared by the canvas and SVG renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateLayout {
    pub width: u32,
    pub height: u32,
    pub shapes: Vec<Shape>,
}

const INK: &str = "#2c3e50";
const ACCENT: &str = "#3498db";
const NAME_RED: &str = "#e74c3c";
const SKILL_GREEN: &str = "#27ae60";
const PAPER: &str = "#f8f9fa";

fn text(text: impl Into<String>, x: f64, y: f64, size: u32, bold: bool, color: &'static str, align: Align) -> Shape {
    Shape::Text {
        text: text.into(),
        x,
        y,
        size,
        bold,
        color,
        align,
    }
}

impl CertificateLayout {
    pub const WIDTH: u32 = 1200;
    pub const HEIGHT: u32 = 800;
    pub const PAGE_WIDTH_MM: u32 = 297;
    pub const PAGE_HEIGHT_MM: u32 = 210;

    fn for_certificate(data: &CertificateData) -> Self {
        let mid = f64::from(Self::WIDTH) / 2.0;
        let mut shapes = vec![
            Shape::Fill { color: PAPER },
            Shape::Border {
                inset: 20.0,
                width: 8.0,
                color: ACCENT,
            },
            text("🏆 CERTIFICATE OF COMPLETION 🏆", mid, 120.0, 48, true, INK, Align::Center),
            text(QUEST_TITLE, mid, 160.0, 24, true, ACCENT, Align::Center),
            text("This is to certify that", mid, 220.0, 20, false, INK, Align::Center),
            text(data.player_name.to_uppercase(), mid, 280.0, 40, true, NAME_RED, Align::Center),
            text(
                format!("has successfully completed the {QUEST_TITLE}"),
                mid,
                340.0,
                20,
                false,
                INK,
                Align::Center,
            ),
        ];

        let mut y = 420.0;
        for pair in data.skills.chunks(2) {
            for (column, skill) in pair.iter().enumerate() {
                let x = if column == 0 { 200.0 } else { 650.0 };
                shapes.push(text(format!("✓ {skill}"), x, y, 16, true, SKILL_GREEN, Align::Left));
            }
            y += 30.0;
        }

        shapes.push(text(data.date_label(), 300.0, 680.0, 16, false, INK, Align::Center));
        shapes.push(text(data.score_label(), 900.0, 680.0, 16, false, INK, Align::Center));
        shapes.push(text(PROGRAM_NAME, mid, 720.0, 16, false, INK, Align::Center));

        Self {
            width: Self::WIDTH,
            height: Self::HEIGHT,
            shapes,
        }
    }

    fn for_page(data: &CertificateData) -> Self {
        let mid = f64::from(Self::PAGE_WIDTH_MM) / 2.0;
        let mut shapes = vec![
            Shape::Fill { color: PAPER },
            Shape::Border {
                inset: 10.0,
                width: 2.0,
                color: ACCENT,
            },
            text("CERTIFICATE OF COMPLETION", mid, 40.0, 24, true, INK, Align::Center),
            text(QUEST_TITLE, mid, 50.0, 14, true, ACCENT, Align::Center),
            text("This is to certify that", mid, 70.0, 12, false, INK, Align::Center),
            text(data.player_name.to_uppercase(), mid, 85.0, 20, true, NAME_RED, Align::Center),
            text(
                format!("has successfully completed the {QUEST_TITLE}"),
                mid,
                100.0,
                12,
                false,
                INK,
                Align::Center,
            ),
            text(
                "and has demonstrated proficiency in dashboard creation",
                mid,
                110.0,
                12,
                false,
                INK,
                Align::Center,
            ),
        ];

        let mut y = 130.0;
        for pair in data.skills.chunks(2) {
            for (column, skill) in pair.iter().enumerate() {
                let x = if column == 0 { 60.0 } else { 180.0 };
                shapes.push(text(format!("+ {skill}"), x, y, 10, false, SKILL_GREEN, Align::Left));
            }
            y += 8.0;
        }

        shapes.push(text(data.date_label(), 50.0, 180.0, 10, false, INK, Align::Left));
        shapes.push(text(data.score_label(), 200.0, 180.0, 10, false, INK, Align::Left));
        shapes.push(text(PROGRAM_NAME, mid, 190.0, 10, false, INK, Align::Center));

        Self {
            width: Self::PAGE_WIDTH_MM,
            height: Self::PAGE_HEIGHT_MM,
            shapes,
        }
    }

    /// Render as a standalone SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let (w, h) = (self.width, self.height);
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        svg.push('\n');
        for shape in &self.shapes {
            if write_shape(&mut svg, w, h, shape).is_err() {
                break;
            }
        }
        svg.push_str("</svg>\n");
        svg
    }
}

fn write_shape(svg: &mut String, w: u32, h: u32, shape: &Shape) -> fmt::Result {
    match shape {
        Shape::Fill { color } => {
            writeln!(svg, r#"  <rect width="{w}" height="{h}" fill="{color}"/>"#)?;
        }
        Shape::Border {
            inset,
            width,
            color,
        } => writeln!(
            svg,
            r#"  <rect x="{inset}" y="{inset}" width="{}" height="{}" fill="none" stroke="{color}" stroke-width="{width}"/>"#,
            f64::from(w) - 2.0 * inset,
            f64::from(h) - 2.0 * inset,
        )?,
        Shape::Text {
            text,
            x,
            y,
            size,
            bold,
            color,
            align,
        } => {
            let anchor = match align {
                Align::Left => "start",
                Align::Center => "middle",
            };
            let weight = if *bold { "bold" } else { "normal" };
            writeln!(
                svg,
                r#"  <text x="{x}" y="{y}" font-family="Arial" font-size="{size}" font-weight="{weight}" fill="{color}" text-anchor="{anchor}">{}</text>"#,
                escape_xml(text)
            )?;
        }
    }
    Ok(())
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
