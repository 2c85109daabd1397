use printpdf::path::PaintMode;
use printpdf::{
  BuiltinFont, Color, CustomPdfConformance, IndirectFontRef, Line, Mm, PdfConformance,
  PdfDocument, PdfLayerReference, Point, Rect, Rgb, TextMatrix,
};
use std::io::BufWriter;
use time::OffsetDateTime;

use super::layout::{Block, PagePlan, paginate};
use super::style::{
  COL_DESCRIPTION_MM, COL_QUANTITY_MM, COL_TOTAL_MM, COL_UNIT_PRICE_MM, COLOR_MUTED,
  COLOR_ROW_SHADE, COLOR_RULE, COLOR_TEXT, COLOR_WATERMARK, CONTENT_RIGHT_MM,
  DESCRIPTION_CHAR_BUDGET, FONT_BODY, FONT_SECTION, FONT_SMALL, FONT_TITLE, FONT_WATERMARK,
  HEADER_BAND_MM, LINE_HEIGHT_MM, MARGIN_LEFT_MM, MARGIN_TOP_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
  ROW_VPAD_MM, Tone, status_tone, wrap_text,
};
use crate::domain::billing::{DocumentError, Invoice, InvoiceStatus, Project};
use crate::infrastructure::config::IssuerConfig;
use crate::infrastructure::locales::Locale;

const PANEL_CHAR_BUDGET: usize = 38;
const NOTES_CHAR_BUDGET: usize = 92;

/// A complete, paginated invoice document. Transient; the caller decides
/// whether to stream it over HTTP or hand it to the delivery pipeline.
#[derive(Debug, Clone)]
pub struct RenderedInvoice {
  pub bytes: Vec<u8>,
  pub page_count: usize,
  /// Derived from the invoice number, safe for a Content-Disposition
  /// attachment filename.
  pub filename: String,
}

/// Deterministic invoice-to-PDF renderer. Each call owns its own cursor and
/// page state, so independent renders can run concurrently.
pub struct InvoicePdfRenderer {
  issuer: IssuerConfig,
}

impl InvoicePdfRenderer {
  pub fn new(issuer: IssuerConfig) -> Self {
    Self { issuer }
  }

  pub fn render(
    &self,
    invoice: &Invoice,
    project: &Project,
  ) -> Result<RenderedInvoice, DocumentError> {
    invoice.validate()?;

    let locale = Locale::document();
    let blocks = self.build_blocks(invoice, project, locale);
    let plan = paginate(blocks);
    let bytes = self.draw(invoice, &plan, locale)?;

    Ok(RenderedInvoice {
      bytes,
      page_count: plan.page_count(),
      filename: attachment_filename(invoice.number.value()),
    })
  }

  fn build_blocks(&self, invoice: &Invoice, project: &Project, locale: &Locale) -> Vec<Block> {
    let currency = invoice.display_currency(project);
    let mut blocks = Vec::new();

    // Dated info block
    let mut date_rows = vec![
      (
        locale.issue_date.to_string(),
        locale.format_date(invoice.date),
      ),
      (
        locale.due_date.to_string(),
        locale.format_date(invoice.due_date),
      ),
    ];
    if let Some(paid_date) = invoice.paid_date {
      date_rows.push((locale.paid_on.to_string(), locale.format_date(paid_date)));
    }
    blocks.push(Block::DateInfo {
      rows: date_rows,
      urgent: invoice.status == InvoiceStatus::Overdue,
    });
    blocks.push(Block::Spacer { height: 3.0 });

    // Status badge
    blocks.push(Block::StatusBadge {
      label: locale.status_label(invoice.status).to_uppercase(),
      tone: status_tone(invoice.status),
    });
    blocks.push(Block::Spacer { height: 5.0 });

    // Issuer and client panels side by side
    let mut issuer_lines = vec![self.issuer.name.clone()];
    for line in &self.issuer.address_lines {
      issuer_lines.extend(wrap_text(line, PANEL_CHAR_BUDGET));
    }
    if let Some(tax) = &self.issuer.tax_number {
      issuer_lines.push(format!("{}: {}", locale.tax_number, tax));
    }
    if let Some(email) = &self.issuer.email {
      issuer_lines.push(email.clone());
    }

    let client = &project.client;
    let mut client_lines = vec![client.name.clone()];
    if let Some(company) = &client.company_name {
      if company != &client.name {
        client_lines.push(company.clone());
      }
    }
    if let Some(address) = &client.address {
      client_lines.extend(wrap_text(address, PANEL_CHAR_BUDGET));
    }
    if let Some(tax) = &client.tax_number {
      client_lines.push(format!("{}: {}", locale.tax_number, tax));
    }
    if let Some(email) = &client.email {
      client_lines.push(email.as_str().to_string());
    }

    blocks.push(Block::PartyPanels {
      issuer_title: locale.issued_by.to_string(),
      issuer_lines,
      client_title: locale.billed_to.to_string(),
      client_lines,
    });
    blocks.push(Block::Spacer { height: 6.0 });

    // Line items table
    blocks.push(Block::TableHeader {
      description: locale.col_description.to_string(),
      quantity: locale.col_quantity.to_string(),
      unit_price: locale.col_unit_price.to_string(),
      total: locale.col_total.to_string(),
    });
    for (index, item) in invoice.items.iter().enumerate() {
      blocks.push(Block::ItemRow {
        index,
        description_lines: wrap_text(&item.description, DESCRIPTION_CHAR_BUDGET),
        quantity: format!("{:.2}", item.quantity),
        unit_price: locale.format_money(item.unit_price, currency),
        total: locale.format_money(item.total, currency),
      });
    }
    blocks.push(Block::Spacer { height: 2.0 });

    // Totals summary
    let mut totals_rows = vec![(
      locale.grand_total.to_string(),
      locale.format_money(invoice.total_amount, currency),
    )];
    if invoice.is_partially_paid() {
      let paid = invoice.paid_amount.unwrap_or_default();
      totals_rows.push((
        locale.amount_paid.to_string(),
        locale.format_money(paid, currency),
      ));
      totals_rows.push((
        locale.balance_due.to_string(),
        locale.format_money(invoice.outstanding_amount(), currency),
      ));
    }
    blocks.push(Block::Totals { rows: totals_rows });

    // Bank transfer details, only while payment is still expected
    if invoice.status.expects_payment() {
      blocks.push(Block::Spacer { height: 6.0 });
      blocks.push(Block::PaymentInstructions {
        title: locale.payment_instructions.to_string(),
        lines: vec![
          format!("{}: {}", locale.bank, self.issuer.bank_name),
          format!("{}: {}", locale.iban, self.issuer.iban),
          format!("{}: {}", locale.payment_reference, invoice.number),
        ],
      });
    }

    // Free-text notes
    if invoice.has_notes() {
      blocks.push(Block::Spacer { height: 6.0 });
      blocks.push(Block::NotesTitle {
        title: locale.notes.to_string(),
      });
      if let Some(notes) = &invoice.notes {
        for raw_line in notes.lines() {
          for line in wrap_text(raw_line, NOTES_CHAR_BUDGET) {
            blocks.push(Block::NoteLine { text: line });
          }
        }
      }
    }

    blocks
  }

  fn draw(
    &self,
    invoice: &Invoice,
    plan: &PagePlan,
    locale: &Locale,
  ) -> Result<Vec<u8>, DocumentError> {
    let title = format!("{} {}", locale.invoice_title, invoice.number);
    let (doc, first_page, first_layer) = PdfDocument::new(
      &title,
      Mm(PAGE_WIDTH_MM),
      Mm(PAGE_HEIGHT_MM),
      "content",
    );
    // Pin every piece of document metadata the library lets us pin, so
    // identical inputs produce identical documents. The creation date is
    // still stamped by the library; it is the only varying field.
    let doc = doc
      .with_conformance(PdfConformance::Custom(CustomPdfConformance {
        requires_xmp_metadata: false,
        requires_icc_profile: false,
        ..Default::default()
      }))
      .with_document_id(format!("billpost-{}", invoice.number))
      .with_mod_date(OffsetDateTime::UNIX_EPOCH);

    let font = doc
      .add_builtin_font(BuiltinFont::Helvetica)
      .map_err(|e| DocumentError::RenderFailed(e.to_string()))?;
    let bold = doc
      .add_builtin_font(BuiltinFont::HelveticaBold)
      .map_err(|e| DocumentError::RenderFailed(e.to_string()))?;

    let logo = self.load_logo();
    let watermark_page = if invoice.status == InvoiceStatus::Paid {
      plan.totals_page()
    } else {
      None
    };
    let total_pages = plan.page_count();

    for (page_index, page_blocks) in plan.pages.iter().enumerate() {
      let layer = if page_index == 0 {
        doc.get_page(first_page).get_layer(first_layer)
      } else {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
        doc.get_page(page).get_layer(layer)
      };

      self.draw_page_header(&layer, &font, &bold, invoice, locale, logo.as_deref());
      draw_page_footer(&layer, &font, locale, page_index + 1, total_pages);

      let mut cursor = 0.0_f32;
      for block in page_blocks {
        draw_block(&layer, &font, &bold, block, &mut cursor);
      }

      if watermark_page == Some(page_index) {
        draw_watermark(&layer, &bold, locale.watermark_paid);
      }
    }

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc
      .save(&mut writer)
      .map_err(|e| DocumentError::RenderFailed(e.to_string()))?;
    writer
      .into_inner()
      .map_err(|e| DocumentError::RenderFailed(e.to_string()))
  }

  fn draw_page_header(
    &self,
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
    invoice: &Invoice,
    locale: &Locale,
    logo: Option<&[u8]>,
  ) {
    let top = PAGE_HEIGHT_MM - MARGIN_TOP_MM;

    set_fill(layer, Tone::Primary.rgb());
    layer.use_text(locale.invoice_title, FONT_TITLE, Mm(MARGIN_LEFT_MM), Mm(top - 8.0), bold);

    set_fill(layer, COLOR_TEXT);
    layer.use_text(
      invoice.number.value(),
      FONT_SECTION,
      Mm(MARGIN_LEFT_MM),
      Mm(top - 15.0),
      font,
    );

    if let Some(bytes) = logo {
      draw_logo(layer, bytes);
    }

    // Divider under the header band
    set_outline(layer, COLOR_RULE, 0.6);
    draw_rule(layer, top - HEADER_BAND_MM + 4.0);
  }

  /// The logo is an optional branding asset. Any failure here is logged and
  /// skipped; the rest of the document still renders.
  fn load_logo(&self) -> Option<Vec<u8>> {
    let path = self.issuer.logo_path.as_ref()?;
    match std::fs::read(path) {
      Ok(bytes) => Some(bytes),
      Err(e) => {
        tracing::warn!(path = %path, error = %e, "Logo asset missing, rendering without it");
        None
      }
    }
  }
}

fn draw_logo(layer: &PdfLayerReference, bytes: &[u8]) {
  use printpdf::image_crate::codecs::png::PngDecoder;
  use printpdf::{Image, ImageTransform};

  let decoder = match PngDecoder::new(std::io::Cursor::new(bytes)) {
    Ok(decoder) => decoder,
    Err(e) => {
      tracing::warn!(error = %e, "Logo asset is not a decodable PNG, skipping");
      return;
    }
  };
  let image = match Image::try_from(decoder) {
    Ok(image) => image,
    Err(e) => {
      tracing::warn!(error = %e, "Logo asset could not be embedded, skipping");
      return;
    }
  };
  image.add_to_layer(
    layer.clone(),
    ImageTransform {
      translate_x: Some(Mm(CONTENT_RIGHT_MM - 35.0)),
      translate_y: Some(Mm(PAGE_HEIGHT_MM - MARGIN_TOP_MM - 16.0)),
      ..Default::default()
    },
  );
}

fn draw_page_footer(
  layer: &PdfLayerReference,
  font: &IndirectFontRef,
  locale: &Locale,
  page: usize,
  total: usize,
) {
  set_fill(layer, COLOR_MUTED);
  layer.use_text(
    &format!("{} {} {} {}", locale.page, page, locale.of, total),
    FONT_SMALL,
    Mm(MARGIN_LEFT_MM),
    Mm(9.0),
    font,
  );
  layer.use_text(locale.disclaimer, FONT_SMALL, Mm(MARGIN_LEFT_MM), Mm(5.0), font);
}

fn draw_block(
  layer: &PdfLayerReference,
  font: &IndirectFontRef,
  bold: &IndirectFontRef,
  block: &Block,
  cursor: &mut f32,
) {
  let top = content_y(*cursor);

  match block {
    Block::Spacer { .. } => {}

    Block::DateInfo { rows, urgent } => {
      for (i, (label, value)) in rows.iter().enumerate() {
        let y = top - (i as f32 + 1.0) * LINE_HEIGHT_MM + 1.0;
        set_fill(layer, COLOR_MUTED);
        layer.use_text(label, FONT_BODY, Mm(MARGIN_LEFT_MM), Mm(y), font);
        // The due-date row switches to the warning tone when the invoice
        // is overdue.
        if i == 1 && *urgent {
          set_fill(layer, Tone::Warning.rgb());
        } else {
          set_fill(layer, COLOR_TEXT);
        }
        layer.use_text(value, FONT_BODY, Mm(MARGIN_LEFT_MM + 38.0), Mm(y), bold);
      }
    }

    Block::StatusBadge { label, tone } => {
      let width = label.len() as f32 * 2.4 + 8.0;
      set_fill(layer, tone.rgb());
      layer.add_rect(
        Rect::new(
          Mm(MARGIN_LEFT_MM),
          Mm(top - 10.0),
          Mm(MARGIN_LEFT_MM + width),
          Mm(top - 2.0),
        )
        .with_mode(PaintMode::Fill),
      );
      set_fill(layer, (1.0, 1.0, 1.0));
      layer.use_text(label, FONT_SECTION, Mm(MARGIN_LEFT_MM + 4.0), Mm(top - 7.6), bold);
    }

    Block::PartyPanels {
      issuer_title,
      issuer_lines,
      client_title,
      client_lines,
    } => {
      let client_x = 115.0;
      set_fill(layer, COLOR_MUTED);
      layer.use_text(issuer_title, FONT_SECTION, Mm(MARGIN_LEFT_MM), Mm(top - 5.0), bold);
      layer.use_text(client_title, FONT_SECTION, Mm(client_x), Mm(top - 5.0), bold);
      set_fill(layer, COLOR_TEXT);
      for (i, line) in issuer_lines.iter().enumerate() {
        let y = top - 9.0 - (i as f32 + 1.0) * LINE_HEIGHT_MM + LINE_HEIGHT_MM;
        layer.use_text(line, FONT_BODY, Mm(MARGIN_LEFT_MM), Mm(y), font);
      }
      for (i, line) in client_lines.iter().enumerate() {
        let y = top - 9.0 - (i as f32 + 1.0) * LINE_HEIGHT_MM + LINE_HEIGHT_MM;
        layer.use_text(line, FONT_BODY, Mm(client_x), Mm(y), font);
      }
    }

    Block::TableHeader {
      description,
      quantity,
      unit_price,
      total,
    } => {
      set_fill(layer, COLOR_MUTED);
      let y = top - 5.0;
      layer.use_text(description, FONT_BODY, Mm(COL_DESCRIPTION_MM), Mm(y), bold);
      layer.use_text(quantity, FONT_BODY, Mm(COL_QUANTITY_MM), Mm(y), bold);
      layer.use_text(unit_price, FONT_BODY, Mm(COL_UNIT_PRICE_MM), Mm(y), bold);
      layer.use_text(total, FONT_BODY, Mm(COL_TOTAL_MM), Mm(y), bold);
      set_outline(layer, COLOR_RULE, 0.5);
      draw_rule(layer, top - 7.0);
    }

    Block::ItemRow {
      index,
      description_lines,
      quantity,
      unit_price,
      total,
    } => {
      let height = block.height();
      // Shading alternates on absolute item index parity; continuation
      // pages keep the sequence going.
      if index % 2 == 1 {
        set_fill(layer, COLOR_ROW_SHADE);
        layer.add_rect(
          Rect::new(
            Mm(MARGIN_LEFT_MM),
            Mm(top - height),
            Mm(CONTENT_RIGHT_MM),
            Mm(top),
          )
          .with_mode(PaintMode::Fill),
        );
      }
      set_fill(layer, COLOR_TEXT);
      let first_y = top - ROW_VPAD_MM - LINE_HEIGHT_MM + 1.2;
      for (i, line) in description_lines.iter().enumerate() {
        let y = first_y - i as f32 * LINE_HEIGHT_MM;
        layer.use_text(line, FONT_BODY, Mm(COL_DESCRIPTION_MM), Mm(y), font);
      }
      layer.use_text(quantity, FONT_BODY, Mm(COL_QUANTITY_MM), Mm(first_y), font);
      layer.use_text(unit_price, FONT_BODY, Mm(COL_UNIT_PRICE_MM), Mm(first_y), font);
      layer.use_text(total, FONT_BODY, Mm(COL_TOTAL_MM), Mm(first_y), font);
    }

    Block::Totals { rows } => {
      set_outline(layer, COLOR_RULE, 0.6);
      draw_rule(layer, top - 1.0);
      for (i, (label, value)) in rows.iter().enumerate() {
        let y = top - 6.0 - i as f32 * (LINE_HEIGHT_MM + 1.5);
        let emphasize = i == 0 || i == rows.len() - 1;
        let face = if emphasize { bold } else { font };
        set_fill(layer, COLOR_MUTED);
        layer.use_text(label, FONT_SECTION, Mm(COL_QUANTITY_MM), Mm(y), face);
        set_fill(layer, COLOR_TEXT);
        layer.use_text(value, FONT_SECTION, Mm(COL_TOTAL_MM), Mm(y), face);
      }
    }

    Block::PaymentInstructions { title, lines } => {
      set_fill(layer, Tone::Primary.rgb());
      layer.use_text(title, FONT_SECTION, Mm(MARGIN_LEFT_MM), Mm(top - 5.5), bold);
      set_fill(layer, COLOR_TEXT);
      for (i, line) in lines.iter().enumerate() {
        let y = top - 9.0 - (i as f32 + 1.0) * LINE_HEIGHT_MM + LINE_HEIGHT_MM;
        layer.use_text(line, FONT_BODY, Mm(MARGIN_LEFT_MM), Mm(y), font);
      }
    }

    Block::NotesTitle { title } => {
      set_fill(layer, COLOR_MUTED);
      layer.use_text(title, FONT_SECTION, Mm(MARGIN_LEFT_MM), Mm(top - 5.5), bold);
    }

    Block::NoteLine { text } => {
      set_fill(layer, COLOR_TEXT);
      layer.use_text(text, FONT_BODY, Mm(MARGIN_LEFT_MM), Mm(top - LINE_HEIGHT_MM + 1.0), font);
    }
  }

  *cursor += block.height();
}

/// Large diagonal overlay drawn across the page carrying the totals block.
fn draw_watermark(layer: &PdfLayerReference, bold: &IndirectFontRef, label: &str) {
  set_fill(layer, COLOR_WATERMARK);
  layer.begin_text_section();
  layer.set_font(bold, FONT_WATERMARK);
  layer.set_text_matrix(TextMatrix::TranslateRotate(
    Mm(35.0).into_pt(),
    Mm(70.0).into_pt(),
    42.0,
  ));
  layer.write_text(label, bold);
  layer.end_text_section();
}

fn content_y(cursor: f32) -> f32 {
  PAGE_HEIGHT_MM - MARGIN_TOP_MM - HEADER_BAND_MM - cursor
}

fn draw_rule(layer: &PdfLayerReference, y: f32) {
  layer.add_line(Line {
    points: vec![
      (Point::new(Mm(MARGIN_LEFT_MM), Mm(y)), false),
      (Point::new(Mm(CONTENT_RIGHT_MM), Mm(y)), false),
    ],
    is_closed: false,
  });
}

fn set_fill(layer: &PdfLayerReference, (r, g, b): (f32, f32, f32)) {
  layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
}

fn set_outline(layer: &PdfLayerReference, (r, g, b): (f32, f32, f32), thickness: f32) {
  layer.set_outline_color(Color::Rgb(Rgb::new(r, g, b, None)));
  layer.set_outline_thickness(thickness);
}

/// Keep only characters that are safe inside a Content-Disposition
/// attachment filename.
fn attachment_filename(invoice_number: &str) -> String {
  let mut out = String::with_capacity(invoice_number.len());
  for ch in invoice_number.chars() {
    let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.';
    out.push(if ok { ch } else { '_' });
  }
  let stem = out.trim_matches('_');
  if stem.is_empty() {
    "invoice.pdf".to_string()
  } else {
    format!("{}.pdf", stem)
  }
}
