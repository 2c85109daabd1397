//! Pure pagination pass. Blocks carry pre-formatted content and a height in
//! millimeters; `paginate` distributes them over pages with a running
//! cursor. Keeping this free of any PDF types makes the page-break rules
//! unit-testable without parsing document bytes.

use super::style::{
  LINE_HEIGHT_MM, PRINTABLE_HEIGHT_MM, ROW_VPAD_MM, TABLE_HEADER_HEIGHT_MM, Tone,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
  /// Vertical gap between sections. Dropped when it would start a page.
  Spacer { height: f32 },
  /// Issue/due/paid dates. `urgent` switches the due-date color to the
  /// warning tone; it is derived from the status, never from the wall
  /// clock, so rendering stays deterministic.
  DateInfo {
    rows: Vec<(String, String)>,
    urgent: bool,
  },
  StatusBadge { label: String, tone: Tone },
  /// Issuer and client info panels, drawn side by side.
  PartyPanels {
    issuer_title: String,
    issuer_lines: Vec<String>,
    client_title: String,
    client_lines: Vec<String>,
  },
  /// Column header of the items table; re-inserted at the top of every
  /// page the table spans.
  TableHeader {
    description: String,
    quantity: String,
    unit_price: String,
    total: String,
  },
  ItemRow {
    /// Absolute item index. Row shading alternates on its parity and does
    /// not reset across page breaks.
    index: usize,
    description_lines: Vec<String>,
    quantity: String,
    unit_price: String,
    total: String,
  },
  /// Totals summary. The PAID watermark is anchored to the page that
  /// carries this block.
  Totals {
    rows: Vec<(String, String)>,
  },
  PaymentInstructions {
    title: String,
    lines: Vec<String>,
  },
  NotesTitle { title: String },
  NoteLine { text: String },
}

impl Block {
  pub fn height(&self) -> f32 {
    match self {
      Block::Spacer { height } => *height,
      Block::DateInfo { rows, .. } => rows.len() as f32 * LINE_HEIGHT_MM + 3.0,
      Block::StatusBadge { .. } => 12.0,
      Block::PartyPanels {
        issuer_lines,
        client_lines,
        ..
      } => {
        let deepest = issuer_lines.len().max(client_lines.len());
        deepest as f32 * LINE_HEIGHT_MM + 9.0
      }
      Block::TableHeader { .. } => TABLE_HEADER_HEIGHT_MM,
      Block::ItemRow {
        description_lines, ..
      } => description_lines.len() as f32 * LINE_HEIGHT_MM + 2.0 * ROW_VPAD_MM,
      Block::Totals { rows } => rows.len() as f32 * (LINE_HEIGHT_MM + 1.5) + 6.0,
      Block::PaymentInstructions { lines, .. } => lines.len() as f32 * LINE_HEIGHT_MM + 11.0,
      Block::NotesTitle { .. } => 8.0,
      Block::NoteLine { .. } => LINE_HEIGHT_MM,
    }
  }

  fn is_item_row(&self) -> bool {
    matches!(self, Block::ItemRow { .. })
  }

  fn is_table_header(&self) -> bool {
    matches!(self, Block::TableHeader { .. })
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
  pub pages: Vec<Vec<Block>>,
}

impl PagePlan {
  pub fn page_count(&self) -> usize {
    self.pages.len()
  }

  /// Index of the page carrying the totals block, if any.
  pub fn totals_page(&self) -> Option<usize> {
    self
      .pages
      .iter()
      .position(|page| page.iter().any(|b| matches!(b, Block::Totals { .. })))
  }
}

/// Distributes blocks over pages. Before any block is placed, the cursor is
/// checked against the printable height; an overflowing block starts a new
/// page. When the items table continues onto a new page its column header
/// is re-inserted first, and a header left dangling at the very bottom of
/// the previous page is carried over instead of duplicated.
pub fn paginate(blocks: Vec<Block>) -> PagePlan {
  let mut pages: Vec<Vec<Block>> = Vec::new();
  let mut current: Vec<Block> = Vec::new();
  let mut cursor: f32 = 0.0;
  let mut header_template: Option<Block> = None;

  for block in blocks {
    if block.is_table_header() {
      header_template = Some(block.clone());
    } else if !block.is_item_row() {
      // Any other section closes the table; later breaks must not
      // resurrect its header.
      header_template = None;
    }

    // Spacers carry no content; never let one open a page.
    if matches!(block, Block::Spacer { .. }) && current.is_empty() {
      continue;
    }

    if cursor + block.height() > PRINTABLE_HEIGHT_MM && !current.is_empty() {
      let mut carried: Vec<Block> = Vec::new();

      // A table header as the last block of the old page belongs with the
      // row that triggered the break.
      if block.is_item_row() && current.last().is_some_and(Block::is_table_header) {
        if let Some(header) = current.pop() {
          carried.push(header);
        }
      } else if block.is_item_row() {
        if let Some(header) = header_template.clone() {
          carried.push(header);
        }
      }

      while current.last().is_some_and(|b| matches!(b, Block::Spacer { .. })) {
        current.pop();
      }

      pages.push(std::mem::take(&mut current));
      cursor = 0.0;
      for header in carried {
        cursor += header.height();
        current.push(header);
      }
    }

    cursor += block.height();
    current.push(block);
  }

  while current.last().is_some_and(|b| matches!(b, Block::Spacer { .. })) {
    current.pop();
  }
  if !current.is_empty() {
    pages.push(current);
  }
  if pages.is_empty() {
    pages.push(Vec::new());
  }

  PagePlan { pages }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn header() -> Block {
    Block::TableHeader {
      description: "Description".to_string(),
      quantity: "Qty".to_string(),
      unit_price: "Unit price".to_string(),
      total: "Total".to_string(),
    }
  }

  fn row(index: usize) -> Block {
    Block::ItemRow {
      index,
      description_lines: vec![format!("Item {}", index)],
      quantity: "1.00".to_string(),
      unit_price: "100.00 EUR".to_string(),
      total: "100.00 EUR".to_string(),
    }
  }

  fn totals() -> Block {
    Block::Totals {
      rows: vec![("Total".to_string(), "500.00 EUR".to_string())],
    }
  }

  fn rows_per_page() -> usize {
    let row_height = row(0).height();
    ((PRINTABLE_HEIGHT_MM - TABLE_HEADER_HEIGHT_MM) / row_height).floor() as usize
  }

  #[test]
  fn test_single_page_when_content_fits() {
    let mut blocks = vec![header()];
    blocks.extend((0..3).map(row));
    blocks.push(totals());

    let plan = paginate(blocks);
    assert_eq!(plan.page_count(), 1);
    assert_eq!(plan.totals_page(), Some(0));
  }

  #[test]
  fn test_page_count_matches_cumulative_height() {
    let per_page = rows_per_page();
    let n = per_page * 2 + 3;
    let mut blocks = vec![header()];
    blocks.extend((0..n).map(row));

    let plan = paginate(blocks);

    // Every page must fit within the printable band.
    for page in &plan.pages {
      let used: f32 = page.iter().map(Block::height).sum();
      assert!(used <= PRINTABLE_HEIGHT_MM + f32::EPSILON);
    }
    assert_eq!(plan.page_count(), 3);
  }

  #[test]
  fn test_table_header_repeats_on_every_page_with_rows() {
    let mut blocks = vec![header()];
    blocks.extend((0..rows_per_page() * 2).map(row));

    let plan = paginate(blocks);
    assert!(plan.page_count() > 1);
    for page in &plan.pages {
      let has_rows = page.iter().any(Block::is_item_row);
      let headers = page.iter().filter(|b| b.is_table_header()).count();
      if has_rows {
        assert_eq!(headers, 1);
      }
    }
  }

  #[test]
  fn test_no_page_ends_with_dangling_table_header() {
    // Force the header to land exactly at the bottom of a page by padding
    // the space above it, then follow with rows.
    let pad = PRINTABLE_HEIGHT_MM - TABLE_HEADER_HEIGHT_MM - 1.0;
    let mut blocks = vec![
      Block::NotesTitle {
        title: "Filler".to_string(),
      },
      Block::Spacer { height: pad - 8.0 },
      header(),
    ];
    blocks.extend((0..2).map(row));

    let plan = paginate(blocks);
    for page in &plan.pages {
      assert!(!page.last().is_some_and(|b| b.is_table_header()));
    }
    // The rows ended up under a header on their own page.
    let last = plan.pages.last().unwrap();
    assert!(last.first().unwrap().is_table_header());
  }

  #[test]
  fn test_row_indices_keep_absolute_parity_across_breaks() {
    let mut blocks = vec![header()];
    blocks.extend((0..rows_per_page() + 5).map(row));

    let plan = paginate(blocks);
    assert_eq!(plan.page_count(), 2);

    let mut expected = 0;
    for page in &plan.pages {
      for block in page {
        if let Block::ItemRow { index, .. } = block {
          // Shading parity comes from the absolute index, so continuation
          // pages pick up where the previous page left off.
          assert_eq!(*index, expected);
          expected += 1;
        }
      }
    }
  }

  #[test]
  fn test_header_not_reinserted_after_table_closes() {
    let mut blocks = vec![header()];
    blocks.extend((0..3).map(row));
    blocks.push(totals());
    // Enough note lines to overflow onto a second page.
    blocks.push(Block::NotesTitle {
      title: "Notes".to_string(),
    });
    let note_lines = (PRINTABLE_HEIGHT_MM / Block::NoteLine { text: String::new() }.height())
      .ceil() as usize
      + 5;
    blocks.extend((0..note_lines).map(|i| Block::NoteLine {
      text: format!("line {}", i),
    }));

    let plan = paginate(blocks);
    assert!(plan.page_count() > 1);
    let later_headers = plan
      .pages
      .iter()
      .skip(1)
      .flatten()
      .filter(|b| b.is_table_header())
      .count();
    assert_eq!(later_headers, 0);
  }

  #[test]
  fn test_spacer_never_opens_a_page() {
    let mut blocks = vec![Block::Spacer { height: 10.0 }, header()];
    blocks.extend((0..rows_per_page() + 1).map(row));

    let plan = paginate(blocks);
    for page in &plan.pages {
      assert!(!matches!(page.first(), Some(Block::Spacer { .. })));
      assert!(!matches!(page.last(), Some(Block::Spacer { .. })));
    }
  }

  #[test]
  fn test_totals_page_found_on_overflow() {
    let mut blocks = vec![header()];
    blocks.extend((0..rows_per_page() + 2).map(row));
    blocks.push(totals());

    let plan = paginate(blocks);
    assert_eq!(plan.totals_page(), Some(plan.page_count() - 1));
  }
}
