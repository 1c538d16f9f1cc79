//! Deterministic invoice layout: turns an invoice snapshot plus its
//! computed totals into positioned draw commands on A4 pages.

use tracing::debug;

use crate::commands::{Color, DrawCmd, Page, Stroke, TextAlign};
use crate::fonts::BuiltinFont;
use crate::logo::Logo;
use crate::model::{InvoiceSnapshot, LineItem};
use crate::money::{format_amount, format_quantity};
use crate::totals::Totals;

/// A4 portrait width in millimetres.
pub const PAGE_WIDTH: f64 = 210.0;
/// A4 portrait height in millimetres.
pub const PAGE_HEIGHT: f64 = 297.0;

// Left margin shared by the bill-to block, the table and the footer.
const MARGIN_LEFT: f64 = 15.0;

// Item table geometry. Rows are uniform height; the table restarts at
// the same top offset on every page it continues onto, so the first
// data row always sits at TABLE_TOP + ROW_HEIGHT.
const TABLE_TOP: f64 = 75.0;
const TABLE_BOTTOM: f64 = 285.0;
const ROW_HEIGHT: f64 = 10.0;
const TABLE_WIDTH: f64 = 180.0; // column widths sum
const COLUMN_WIDTHS: [f64; 5] = [20.0, 80.0, 20.0, 30.0, 30.0];
const COLUMN_TITLES: [&str; 5] = ["S.No", "Description", "Qty", "Unit Price", "Total"];
const COLUMN_ALIGNS: [TextAlign; 5] = [
    TextAlign::Center,
    TextAlign::Left,
    TextAlign::Center,
    TextAlign::Right,
    TextAlign::Right,
];
const TABLE_FONT_SIZE: f64 = 10.0;
// Horizontal inset from the cell edge on the aligned side.
const CELL_INSET: f64 = 4.0;
// Baseline offset that visually centres 10pt text in a row.
const CELL_BASELINE: f64 = 6.3;
const GRID_LINE_WIDTH: f64 = 0.1;

const RULE_WIDTH: f64 = 0.2;

// Placeholders substituted for empty input at render time.
const CLIENT_PLACEHOLDER: &str = "______________";
const META_PLACEHOLDER: &str = "_____";
const EMPTY_DESCRIPTION: &str = "—";

// ── palette ───────────────────────────────────────────────────────────────────

fn band_blue() -> Color {
    Color::rgb8(41, 128, 185)
}
fn white() -> Color {
    Color::rgb8(255, 255, 255)
}
fn black() -> Color {
    Color::rgb8(0, 0, 0)
}
fn rule_gray() -> Color {
    Color::rgb8(200, 200, 200)
}
fn footer_gray() -> Color {
    Color::rgb8(100, 100, 100)
}
fn grid_line() -> Color {
    Color::rgb8(10, 10, 10)
}

// ── engine ────────────────────────────────────────────────────────────────────

/// Lays one invoice out onto A4 pages.
///
/// Never fails: empty text falls back to placeholders and nonsensical
/// numbers render as they are. The engine borrows everything it reads,
/// so one is built fresh per render and carries no state across calls.
pub struct LayoutEngine<'a> {
    snapshot: InvoiceSnapshot<'a>,
    totals: Totals,
    logo: Option<&'a Logo>,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(snapshot: InvoiceSnapshot<'a>, totals: Totals, logo: Option<&'a Logo>) -> Self {
        LayoutEngine {
            snapshot,
            totals,
            logo,
        }
    }

    /// Produce the full page sequence for the current snapshot.
    ///
    /// Page 1 carries the header and metadata bands; the item table
    /// starts there and breaks onto continuation pages as needed, with
    /// the column-header row repeated on each. The totals block follows
    /// the table's final row; the footer lands on the last page only.
    pub fn paginate(&self) -> Vec<Page> {
        let mut pages = Vec::new();
        let mut page = Page::new(PAGE_WIDTH, PAGE_HEIGHT);

        self.header_band(&mut page);
        self.metadata_band(&mut page);
        let table_end = self.item_table(&mut pages, &mut page);
        self.totals_block(&mut page, table_end);
        self.footer(&mut page);
        pages.push(page);

        debug!(
            pages = pages.len(),
            items = self.snapshot.items.len(),
            "layout complete"
        );
        pages
    }

    // ── header band ───────────────────────────────────────────────────────────

    fn header_band(&self, page: &mut Page) {
        page.push(DrawCmd::Rect {
            x: 0.0,
            y: 0.0,
            width: PAGE_WIDTH,
            height: 40.0,
            fill: Some(band_blue()),
            stroke: None,
        });
        if self.logo.is_some() {
            page.push(DrawCmd::Image {
                x: 15.0,
                y: 8.0,
                width: 30.0,
                height: 24.0,
            });
        }

        let company = self.snapshot.company;
        text(page, 50.0, 15.0, &company.name, regular(16.0), white());
        text(page, 50.0, 22.0, &company.address, regular(10.0), white());
        let phone = format!("Phone: {}", company.phone);
        text(page, 50.0, 27.0, &phone, regular(10.0), white());
        let email = format!("Email: {}", company.email);
        text(page, 50.0, 32.0, &email, regular(10.0), white());

        text(page, 160.0, 20.0, "INVOICE", bold(22.0), white());
    }

    // ── metadata band ─────────────────────────────────────────────────────────

    fn metadata_band(&self, page: &mut Page) {
        let client = self.snapshot.client;
        let meta = self.snapshot.meta;

        text(page, MARGIN_LEFT, 50.0, "BILL TO:", bold(11.0), black());
        let name = fallback(&client.name, CLIENT_PLACEHOLDER);
        text(page, MARGIN_LEFT, 56.0, name, regular(11.0), black());
        let address = fallback(&client.address, CLIENT_PLACEHOLDER);
        text(page, MARGIN_LEFT, 61.0, address, regular(11.0), black());

        let fields: [(&str, &str, f64); 3] = [
            ("Invoice No:", &meta.number, 50.0),
            ("Invoice Date:", &meta.issue_date, 56.0),
            ("Due Date:", &meta.due_date, 61.0),
        ];
        for (label, value, y) in fields {
            text(page, 140.0, y, label, bold(11.0), black());
            let value = fallback(value, META_PLACEHOLDER);
            text(page, 180.0, y, value, regular(11.0), black());
        }
    }

    // ── item table ────────────────────────────────────────────────────────────

    /// Emit the item table, breaking onto a fresh page whenever the
    /// next row would cross the bottom limit. Returns the y position
    /// just past the final row, for the totals block to build on.
    fn item_table(&self, pages: &mut Vec<Page>, page: &mut Page) -> f64 {
        let mut y = TABLE_TOP;
        self.table_header_row(page, y);
        y += ROW_HEIGHT;

        for (index, item) in self.snapshot.items.iter().enumerate() {
            if y + ROW_HEIGHT > TABLE_BOTTOM {
                let full = std::mem::replace(page, Page::new(PAGE_WIDTH, PAGE_HEIGHT));
                pages.push(full);
                y = TABLE_TOP;
                self.table_header_row(page, y);
                y += ROW_HEIGHT;
            }
            self.table_data_row(page, y, index, item);
            y += ROW_HEIGHT;
        }
        y
    }

    fn table_header_row(&self, page: &mut Page, y: f64) {
        page.push(DrawCmd::Rect {
            x: MARGIN_LEFT,
            y,
            width: TABLE_WIDTH,
            height: ROW_HEIGHT,
            fill: Some(band_blue()),
            stroke: None,
        });
        let mut x = MARGIN_LEFT;
        for (title, width) in COLUMN_TITLES.iter().zip(COLUMN_WIDTHS) {
            page.push(DrawCmd::Text {
                x: x + width / 2.0,
                y: y + CELL_BASELINE,
                content: (*title).to_string(),
                font: BuiltinFont::HelveticaBold,
                size: TABLE_FONT_SIZE,
                color: white(),
                align: TextAlign::Center,
            });
            x += width;
        }
        row_borders(page, y);
    }

    fn table_data_row(&self, page: &mut Page, y: f64, index: usize, item: &LineItem) {
        let description = if item.description.is_empty() {
            EMPTY_DESCRIPTION.to_string()
        } else {
            item.description.clone()
        };
        let cells = [
            (index + 1).to_string(),
            description,
            format_quantity(item.quantity),
            format_amount(item.unit_price),
            format_amount(item.line_total()),
        ];
        let mut x = MARGIN_LEFT;
        for ((content, width), align) in cells.into_iter().zip(COLUMN_WIDTHS).zip(COLUMN_ALIGNS) {
            let anchor_x = match align {
                TextAlign::Left => x + CELL_INSET,
                TextAlign::Center => x + width / 2.0,
                TextAlign::Right => x + width - CELL_INSET,
            };
            page.push(DrawCmd::Text {
                x: anchor_x,
                y: y + CELL_BASELINE,
                content,
                font: BuiltinFont::Helvetica,
                size: TABLE_FONT_SIZE,
                color: black(),
                align,
            });
            x += width;
        }
        row_borders(page, y);
    }

    // ── totals block ──────────────────────────────────────────────────────────

    /// `table_end` is the y just past the table's final row, on
    /// whichever page that row landed. Fixed offsets from there; if the
    /// table ran to the bottom limit the block can overrun the page,
    /// the same way the footer overlap is accepted.
    fn totals_block(&self, page: &mut Page, table_end: f64) {
        let rate = format_quantity(self.snapshot.meta.tax_rate_percent);
        let rows = [
            ("Subtotal:".to_string(), format_amount(self.totals.subtotal)),
            (format!("Tax ({}%):", rate), format_amount(self.totals.tax_amount)),
            ("Grand Total:".to_string(), format_amount(self.totals.grand_total)),
        ];
        let base = table_end + 10.0;
        for (i, (label, value)) in rows.into_iter().enumerate() {
            let y = base + 7.0 * i as f64;
            text(page, 140.0, y, &label, bold(11.0), black());
            text(page, 180.0, y, &value, regular(11.0), black());
        }
    }

    // ── footer ────────────────────────────────────────────────────────────────

    /// Fixed position near the bottom of the last page, independent of
    /// where the table ended. A long table can visually overlap it;
    /// that is accepted fixed-layout behavior, not adjusted for.
    fn footer(&self, page: &mut Page) {
        page.push(DrawCmd::Line {
            x1: MARGIN_LEFT,
            y1: 280.0,
            x2: 195.0,
            y2: 280.0,
            stroke: Stroke {
                color: rule_gray(),
                width: RULE_WIDTH,
            },
        });
        let reference = &self.snapshot.company.payment_reference;
        text(page, MARGIN_LEFT, 286.0, reference, regular(9.0), footer_gray());
        text(
            page,
            MARGIN_LEFT,
            292.0,
            "Thank you for your business!",
            regular(9.0),
            footer_gray(),
        );
    }
}

// ── helpers ───────────────────────────────────────────────────────────────────

struct TextStyle {
    font: BuiltinFont,
    size: f64,
}

fn bold(size: f64) -> TextStyle {
    TextStyle {
        font: BuiltinFont::HelveticaBold,
        size,
    }
}

fn regular(size: f64) -> TextStyle {
    TextStyle {
        font: BuiltinFont::Helvetica,
        size,
    }
}

fn text(page: &mut Page, x: f64, y: f64, content: &str, style: TextStyle, color: Color) {
    page.push(DrawCmd::Text {
        x,
        y,
        content: content.to_string(),
        font: style.font,
        size: style.size,
        color,
        align: TextAlign::Left,
    });
}

fn fallback<'s>(value: &'s str, placeholder: &'s str) -> &'s str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

/// Grid borders for one row: outer rectangle plus the interior column
/// dividers, hairline near-black.
fn row_borders(page: &mut Page, y: f64) {
    let stroke = Stroke {
        color: grid_line(),
        width: GRID_LINE_WIDTH,
    };
    page.push(DrawCmd::Rect {
        x: MARGIN_LEFT,
        y,
        width: TABLE_WIDTH,
        height: ROW_HEIGHT,
        fill: None,
        stroke: Some(stroke),
    });
    let mut x = MARGIN_LEFT;
    for width in &COLUMN_WIDTHS[..COLUMN_WIDTHS.len() - 1] {
        x += width;
        page.push(DrawCmd::Line {
            x1: x,
            y1: y,
            x2: x,
            y2: y + ROW_HEIGHT,
            stroke,
        });
    }
}
