//! Paginated PDF rendering of report documents.
//!
//! Walks the section sequence top to bottom, breaking to a new A4 page when
//! the cursor reaches the bottom margin. Uses the built-in Helvetica fonts,
//! so no font files are needed at runtime.

// Page geometry, not money.
#![allow(clippy::float_arithmetic)]

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};

use crate::reports::{ReportDocument, Section, SummaryRow};

use super::{
    DeliveryFormat, DocumentRenderer, RenderError, RenderedDocument, ReportStyle, StyleColor,
    suggested_filename,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
/// Points to millimeters.
const PT_TO_MM: f32 = 0.352_778;
/// Label column share of a summary table.
const SUMMARY_LABEL_WIDTH: f32 = CONTENT_WIDTH * 0.6;

/// Renders report documents as paginated A4 PDFs.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    style: ReportStyle,
}

impl PdfRenderer {
    /// Creates a renderer with the given style.
    #[must_use]
    pub const fn new(style: ReportStyle) -> Self {
        Self { style }
    }

    fn render_pdf(&self, document: &ReportDocument) -> Result<Vec<u8>, RenderError> {
        let (doc, page, layer) = PdfDocument::new(
            format!("{} - Relatório", self.style.product_name),
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "Layer 1",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        let mut writer = PageWriter {
            layer: doc.get_page(page).get_layer(layer),
            doc: &doc,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
        };

        for section in &document.sections {
            self.render_section(&mut writer, section);
        }

        doc.save_to_bytes()
            .map_err(|e| RenderError::Pdf(e.to_string()))
    }

    fn render_section(&self, writer: &mut PageWriter<'_>, section: &Section) {
        let style = &self.style;
        match section {
            Section::Header {
                title,
                generated_at,
            } => {
                writer.text_line(
                    &style.product_name,
                    style.title_size,
                    style.title_color,
                    true,
                );
                writer.text_line(title, style.heading_size, style.heading_color, false);
                writer.text_line(
                    &format!("Gerado em: {}", generated_at.format("%d/%m/%Y às %H:%M")),
                    style.small_size,
                    style.muted_color,
                    false,
                );
                writer.gap(6.0);
            }
            Section::PeriodBanner { text } => {
                writer.text_line(text, style.body_size, style.muted_color, false);
                writer.gap(4.0);
            }
            Section::SummaryTable { title, rows } => {
                writer.heading(title, style);
                for row in rows {
                    self.summary_row(writer, row);
                }
                writer.gap(6.0);
            }
            Section::DetailTable {
                title,
                columns,
                rows,
                truncated_count,
            } => {
                writer.heading(title, style);
                self.detail_header(writer, columns);
                for row in rows {
                    self.detail_row(writer, columns.len(), row);
                }
                if *truncated_count > 0 {
                    writer.text_line(
                        &format!("... e mais {truncated_count} registros"),
                        style.small_size,
                        style.muted_color,
                        false,
                    );
                }
                writer.gap(6.0);
            }
            Section::Narrative { text } => {
                writer.text_line(text, style.body_size, style.text_color, false);
                writer.gap(4.0);
            }
            Section::Footer { text } => {
                writer.gap(8.0);
                writer.text_line(text, style.small_size, style.muted_color, false);
            }
        }
    }

    fn summary_row(&self, writer: &mut PageWriter<'_>, row: &SummaryRow) {
        let style = &self.style;
        let height = line_height(style.body_size);
        writer.ensure_space(height);
        writer.text_at(&row.label, style.body_size, style.text_color, MARGIN, false);
        writer.text_at(
            &row.value,
            style.body_size,
            style.text_color,
            MARGIN + SUMMARY_LABEL_WIDTH,
            false,
        );
        writer.advance(height);
    }

    fn detail_header(&self, writer: &mut PageWriter<'_>, columns: &[String]) {
        let style = &self.style;
        let height = line_height(style.body_size);
        writer.ensure_space(height * 2.0);
        for (index, column) in columns.iter().enumerate() {
            writer.text_at(
                column,
                style.body_size,
                style.heading_color,
                column_x(index, columns.len()),
                true,
            );
        }
        writer.advance(height);
        writer.rule(style.rule_color);
    }

    fn detail_row(&self, writer: &mut PageWriter<'_>, column_count: usize, row: &[String]) {
        let style = &self.style;
        let height = line_height(style.body_size);
        writer.ensure_space(height);
        for (index, cell) in row.iter().enumerate() {
            writer.text_at(
                cell,
                style.body_size,
                style.text_color,
                column_x(index, column_count),
                false,
            );
        }
        writer.advance(height);
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(
        &self,
        document: &ReportDocument,
        format: DeliveryFormat,
    ) -> Result<RenderedDocument, RenderError> {
        match format {
            DeliveryFormat::Pdf => Ok(RenderedDocument {
                bytes: self.render_pdf(document)?,
                filename: suggested_filename(document, "pdf"),
                content_type: "application/pdf",
            }),
        }
    }
}

/// Cursor over the current page; breaks to a fresh page when full.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PageWriter<'_> {
    /// Starts a new page when fewer than `needed` millimeters remain.
    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < MARGIN {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    /// Writes one full line at the left margin and advances the cursor.
    fn text_line(&mut self, text: &str, size: f32, color: StyleColor, bold: bool) {
        let height = line_height(size);
        self.ensure_space(height);
        self.text_at(text, size, color, MARGIN, bold);
        self.advance(height);
    }

    /// Writes text at an explicit x position without advancing.
    fn text_at(&mut self, text: &str, size: f32, color: StyleColor, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(color.r, color.g, color.b, None)));
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    /// Draws a horizontal rule across the content width.
    fn rule(&mut self, color: StyleColor) {
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(color.r, color.g, color.b, None)));
        self.layer.set_outline_thickness(0.5);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN), Mm(self.y + 1.5)), false),
                (
                    Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(self.y + 1.5)),
                    false,
                ),
            ],
            is_closed: false,
        });
    }

    /// Writes a section heading with a small gap above.
    fn heading(&mut self, title: &str, style: &ReportStyle) {
        self.gap(2.0);
        self.text_line(title, style.heading_size, style.heading_color, true);
        self.gap(1.0);
    }

    fn advance(&mut self, height: f32) {
        self.y -= height;
    }

    fn gap(&mut self, millimeters: f32) {
        self.y -= millimeters;
    }
}

/// Line height in millimeters for a font size in points.
fn line_height(size: f32) -> f32 {
    size * PT_TO_MM * 1.45
}

/// Left edge of column `index` out of `count` equal columns.
fn column_x(index: usize, count: usize) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let count = count.max(1) as f32;
    #[allow(clippy::cast_precision_loss)]
    let index = index as f32;
    MARGIN + CONTENT_WIDTH / count * index
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::reports::{ReportDocument, ReportKind, Section, SummaryRow};

    use super::*;

    fn sample_document() -> ReportDocument {
        let generated_at = Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap();
        ReportDocument {
            kind: ReportKind::Financial,
            generated_at,
            sections: vec![
                Section::Header {
                    title: "Relatório Financeiro".to_string(),
                    generated_at,
                },
                Section::SummaryTable {
                    title: "Resumo Financeiro".to_string(),
                    rows: vec![SummaryRow::new("Total de Receitas", "R$ 150.00")],
                },
                Section::Footer {
                    text: "Relatório gerado pelo Quadra".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_renders_pdf_magic_bytes() {
        let renderer = PdfRenderer::new(ReportStyle::default());
        let rendered = renderer
            .render(&sample_document(), DeliveryFormat::Pdf)
            .unwrap();

        assert!(rendered.bytes.starts_with(b"%PDF"));
        assert_eq!(rendered.content_type, "application/pdf");
    }

    #[test]
    fn test_suggested_filename_shape() {
        let rendered = PdfRenderer::new(ReportStyle::default())
            .render(&sample_document(), DeliveryFormat::Pdf)
            .unwrap();

        assert_eq!(rendered.filename, "financial_20260314_150926.pdf");
    }

    #[test]
    fn test_long_document_paginates() {
        let mut document = sample_document();
        for i in 0..200 {
            document.sections.push(Section::Narrative {
                text: format!("Linha {i}"),
            });
        }

        let rendered = PdfRenderer::new(ReportStyle::default())
            .render(&document, DeliveryFormat::Pdf)
            .unwrap();
        assert!(rendered.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_unknown_format_tag_is_rejected() {
        let error = "docx".parse::<DeliveryFormat>().unwrap_err();
        assert!(matches!(error, RenderError::UnsupportedFormat(tag) if tag == "docx"));
    }
}
