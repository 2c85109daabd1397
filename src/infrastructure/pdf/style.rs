use crate::domain::billing::InvoiceStatus;

// A4 geometry, millimeters. Origin for drawing is the bottom-left corner,
// the layout cursor runs top-down inside the printable band.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_LEFT_MM: f32 = 15.0;
pub const MARGIN_RIGHT_MM: f32 = 15.0;
pub const MARGIN_TOP_MM: f32 = 12.0;
pub const MARGIN_BOTTOM_MM: f32 = 12.0;

/// Band reserved for the repeating page header (title + invoice number).
pub const HEADER_BAND_MM: f32 = 28.0;
/// Band reserved for the repeating footer (page number + disclaimer).
pub const FOOTER_BAND_MM: f32 = 14.0;

/// Vertical space available for content blocks on every page.
pub const PRINTABLE_HEIGHT_MM: f32 =
  PAGE_HEIGHT_MM - MARGIN_TOP_MM - HEADER_BAND_MM - MARGIN_BOTTOM_MM - FOOTER_BAND_MM;

pub const CONTENT_RIGHT_MM: f32 = PAGE_WIDTH_MM - MARGIN_RIGHT_MM;

// Items table column x-positions
pub const COL_DESCRIPTION_MM: f32 = 17.0;
pub const COL_QUANTITY_MM: f32 = 120.0;
pub const COL_UNIT_PRICE_MM: f32 = 143.0;
pub const COL_TOTAL_MM: f32 = 170.0;

// Character budget for the description column with 10pt Helvetica.
pub const DESCRIPTION_CHAR_BUDGET: usize = 48;

// Font sizes (pt)
pub const FONT_TITLE: f32 = 22.0;
pub const FONT_SECTION: f32 = 11.0;
pub const FONT_BODY: f32 = 10.0;
pub const FONT_SMALL: f32 = 8.0;
pub const FONT_WATERMARK: f32 = 78.0;

// Line geometry (mm)
pub const LINE_HEIGHT_MM: f32 = 5.0;
pub const ROW_VPAD_MM: f32 = 1.5;
pub const TABLE_HEADER_HEIGHT_MM: f32 = 8.0;

/// Color tones used for the status badge and the dated info block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
  Primary,
  Success,
  Warning,
  Neutral,
}

impl Tone {
  pub fn rgb(&self) -> (f32, f32, f32) {
    match self {
      Tone::Primary => (0.16, 0.34, 0.58),
      Tone::Success => (0.18, 0.55, 0.34),
      Tone::Warning => (0.80, 0.33, 0.10),
      Tone::Neutral => (0.45, 0.45, 0.45),
    }
  }
}

/// Badge tone per status: paid reads as success, overdue as a warning,
/// canceled stays neutral, anything else uses the primary tone.
pub fn status_tone(status: InvoiceStatus) -> Tone {
  match status {
    InvoiceStatus::Paid => Tone::Success,
    InvoiceStatus::Overdue => Tone::Warning,
    InvoiceStatus::Canceled => Tone::Neutral,
    InvoiceStatus::Issued => Tone::Primary,
  }
}

pub const COLOR_TEXT: (f32, f32, f32) = (0.13, 0.13, 0.13);
pub const COLOR_MUTED: (f32, f32, f32) = (0.42, 0.42, 0.42);
pub const COLOR_ROW_SHADE: (f32, f32, f32) = (0.94, 0.94, 0.96);
pub const COLOR_RULE: (f32, f32, f32) = (0.75, 0.75, 0.78);
pub const COLOR_WATERMARK: (f32, f32, f32) = (0.80, 0.88, 0.82);

/// Greedy word wrap against a character budget. Words longer than the
/// budget are hard-split so a pathological token cannot overflow the column.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
  let mut lines = Vec::new();
  let mut current = String::new();

  for word in text.split_whitespace() {
    let mut word = word;
    while word.len() > max_chars {
      if !current.is_empty() {
        lines.push(std::mem::take(&mut current));
      }
      let split_at = word
        .char_indices()
        .take_while(|(i, _)| *i < max_chars)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(word.len());
      lines.push(word[..split_at].to_string());
      word = &word[split_at..];
    }
    if word.is_empty() {
      continue;
    }
    if current.is_empty() {
      current.push_str(word);
    } else if current.len() + 1 + word.len() <= max_chars {
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
  if lines.is_empty() {
    lines.push(String::new());
  }
  lines
}
