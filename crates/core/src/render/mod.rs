//! Document rendering.
//!
//! The report engine produces an abstract [`ReportDocument`]; renderers turn
//! it into a deliverable byte stream. Style is an explicit value handed to
//! the renderer at construction time and shared read-only - there is no
//! process-wide mutable generator.

pub mod pdf;

use thiserror::Error;

use crate::reports::ReportDocument;

pub use pdf::PdfRenderer;

/// Delivery formats a renderer can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFormat {
    /// Portable Document Format, the only format currently required.
    Pdf,
}

impl std::str::FromStr for DeliveryFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(Self::Pdf),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Errors that can occur while rendering a document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The requested delivery format is not supported.
    #[error("Unsupported delivery format: {0}")]
    UnsupportedFormat(String),

    /// PDF assembly failed.
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

/// A rendered document ready for delivery.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// The document bytes.
    pub bytes: Vec<u8>,
    /// Suggested download filename, `<report-kind>_<YYYYMMDD_HHMMSS>.<ext>`.
    pub filename: String,
    /// MIME type of the bytes.
    pub content_type: &'static str,
}

/// Renders assembled report documents into deliverable bytes.
pub trait DocumentRenderer: Send + Sync {
    /// Renders the document in the requested format.
    fn render(
        &self,
        document: &ReportDocument,
        format: DeliveryFormat,
    ) -> Result<RenderedDocument, RenderError>;
}

/// Suggested download filename for a document.
#[must_use]
pub fn suggested_filename(document: &ReportDocument, extension: &str) -> String {
    format!(
        "{}_{}.{extension}",
        document.kind.slug(),
        document.generated_at.format("%Y%m%d_%H%M%S")
    )
}

/// An RGB color in the 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleColor {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
}

/// Visual configuration for rendered reports.
///
/// Construct once (usually [`ReportStyle::default`]) and share read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportStyle {
    /// Product name printed on every header.
    pub product_name: String,
    /// Title font size in points.
    pub title_size: f32,
    /// Section heading font size in points.
    pub heading_size: f32,
    /// Body font size in points.
    pub body_size: f32,
    /// Footer/meta font size in points.
    pub small_size: f32,
    /// Color of the product title.
    pub title_color: StyleColor,
    /// Color of section headings.
    pub heading_color: StyleColor,
    /// Color of meta text (generated-at line, banners, footer).
    pub muted_color: StyleColor,
    /// Color of body text.
    pub text_color: StyleColor,
    /// Color of table rules.
    pub rule_color: StyleColor,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            product_name: "QUADRA".to_string(),
            title_size: 24.0,
            heading_size: 16.0,
            body_size: 10.0,
            small_size: 9.0,
            // Blue-700
            title_color: StyleColor {
                r: 0.118,
                g: 0.251,
                b: 0.686,
            },
            // Gray-700
            heading_color: StyleColor {
                r: 0.216,
                g: 0.255,
                b: 0.318,
            },
            // Gray-500
            muted_color: StyleColor {
                r: 0.420,
                g: 0.447,
                b: 0.502,
            },
            text_color: StyleColor {
                r: 0.0,
                g: 0.0,
                b: 0.0,
            },
            rule_color: StyleColor {
                r: 0.7,
                g: 0.72,
                b: 0.75,
            },
        }
    }
}
