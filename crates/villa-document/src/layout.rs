//! # Programmatic Invoice Layout
//!
//! Places every element of the tax invoice on A4 pages as drawing
//! operations. The layout is a pure function of the record: the same record
//! always produces the same document.
//!
//! ## Page Structure
//! ```text
//! ┌──────────────────────────────────────────────┐ ◄─ frame (every page)
//! │ ┌──────────────────────────────────┬───────┐ │
//! │ │ Issuer name, address, GSTIN ...  │emblem │ │ ◄─ header band
//! │ └──────────────────────────────────┴───────┘ │
//! │ ░░░░░░░░░░░░░░░░ Tax Invoice ░░░░░░░░░░░░░░░ │ ◄─ title banner
//! │ Bill To: ...                 Check-in Time:  │
//! │ Address: ...                Check-out Time:  │ ◄─ details
//! │ Contact No.: ...               Invoice No.:  │
//! │ ┌─┬──────────┬─────┬───┬───────┬───┬──────┐  │
//! │ │#│Item name │ HSN │Qty│ Price │GST│Amount│  │ ◄─ item table, header
//! │ ├─┼──────────┼─────┼───┼───────┼───┼──────┤  │    repeated on each
//! │ │1│...       │     │   │       │   │      │  │    continuation page
//! │ ░ Total ░░░░░░░░░░░░ qty ░░░ subtotal ░ total │
//! │ Amount in words:          Sub Total:  ...    │
//! │ ...                       SGST / CGST | IGST │ ◄─ amounts block
//! │                           Total, Balance ... │
//! │ Terms & Conditions                           │
//! │                        Company seal and Sign │ ◄─ last page only
//! └──────────────────────────────────────────────┘
//! ```
//!
//! A block that does not fit above the bottom margin moves to a fresh page.

use chrono::NaiveDateTime;
use tracing::debug;
use villa_core::invoice_number::document_filename;
use villa_core::words::amount_to_words;
use villa_core::{InvoiceRecord, IssuerProfile, LineItem, Money, TaxSplit};

use crate::document::{Align, Document, DrawOp, Font, Page, Paint, TextRun};
use crate::emblem::{draw_emblem, EMBLEM_SIZE_MM};
use crate::geometry::{Color, Point, Rect, CONTENT_WIDTH_MM, MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::metrics::{split_text_to_size, truncate_to_width};

// =============================================================================
// Layout Constants (mm)
// =============================================================================

/// Item table columns: heading and width.
const COLUMNS: [(&str, f32); 7] = [
    ("#", 10.0),
    ("Item name", 50.0),
    ("HSN Code", 25.0),
    ("Qty.", 15.0),
    ("Price/Unit", 25.0),
    ("GST", 15.0),
    ("Amount", 25.0),
];

const TABLE_X: f32 = MARGIN_MM + 2.0;
const TABLE_HEADER_HEIGHT: f32 = 8.0;
const ROW_HEIGHT: f32 = 7.0;
const TOTAL_ROW_HEIGHT: f32 = 10.0;

const LEFT_X: f32 = MARGIN_MM + 5.0;
const RIGHT_X: f32 = PAGE_WIDTH_MM - MARGIN_MM - 5.0;
const TOTALS_X: f32 = PAGE_WIDTH_MM - MARGIN_MM - 60.0;
const WRAP_WIDTH: f32 = 100.0;

const EMBLEM_ORIGIN: Point = Point::new(PAGE_WIDTH_MM - MARGIN_MM - EMBLEM_SIZE_MM, 17.0);

/// Lowest baseline for body content.
const BODY_BOTTOM: f32 = PAGE_HEIGHT_MM - MARGIN_MM - 3.0;

/// Where content resumes on a continuation page.
const CONTINUATION_TOP: f32 = MARGIN_MM + 8.0;

const SIGNATURE_Y: f32 = PAGE_HEIGHT_MM - MARGIN_MM - 15.0;

/// Content on the last page stays this far above the signature.
const SIGNATURE_CLEARANCE: f32 = 8.0;

const EMPTY_TABLE_TEXT: &str = "No items added";

// =============================================================================
// Layout
// =============================================================================

/// Lays an [`InvoiceRecord`] out as a paged [`Document`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceLayout;

impl InvoiceLayout {
    pub fn new() -> Self {
        InvoiceLayout
    }

    pub fn layout(&self, record: &InvoiceRecord) -> Document {
        let title = document_filename(record.invoice_no()).trim_end_matches(".pdf").to_string();
        let mut c = Composer::new(title);

        draw_header(&mut c, record.issuer());
        draw_title(&mut c);
        draw_details(&mut c, record);
        draw_item_table(&mut c, record.items());
        draw_total_row(&mut c, record);
        draw_amounts(&mut c, record);
        draw_terms(&mut c, record.terms());
        draw_signature(&mut c);

        let document = c.finish();
        debug!(
            invoice_no = %record.invoice_no(),
            items = record.items().len(),
            pages = document.page_count(),
            "Invoice laid out"
        );
        document
    }
}

// =============================================================================
// Composer
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct Style {
    font: Font,
    size: f32,
    color: Color,
    align: Align,
}

impl Style {
    const fn regular(size: f32) -> Self {
        Style { font: Font::Regular, size, color: Color::BLACK, align: Align::Left }
    }

    const fn bold(size: f32) -> Self {
        Style { font: Font::Bold, size, color: Color::BLACK, align: Align::Left }
    }

    const fn right(self) -> Self {
        Style { align: Align::Right, ..self }
    }

    const fn center(self) -> Self {
        Style { align: Align::Center, ..self }
    }

    const fn color(self, color: Color) -> Self {
        Style { color, ..self }
    }
}

/// Cursor over the page being filled.
struct Composer {
    document: Document,
    page: Page,
    y: f32,
}

impl Composer {
    fn new(title: String) -> Self {
        let mut composer = Composer {
            document: Document::new(title),
            page: Page::new(),
            y: MARGIN_MM,
        };
        composer.draw_frame();
        composer
    }

    fn draw_frame(&mut self) {
        self.page.push(DrawOp::Rect {
            rect: Rect::new(MARGIN_MM, MARGIN_MM, CONTENT_WIDTH_MM, PAGE_HEIGHT_MM - 2.0 * MARGIN_MM),
            paint: Paint::Stroke { width: 0.5, color: Color::BLACK },
        });
    }

    fn new_page(&mut self) {
        let full = std::mem::take(&mut self.page);
        self.document.push_page(full);
        self.draw_frame();
        self.y = CONTINUATION_TOP;
        debug!(page = self.document.page_count() + 1, "Invoice continues on a new page");
    }

    /// Moves to a new page unless `height` more fits above `limit`.
    /// Returns true if a page break happened.
    fn ensure_room(&mut self, height: f32, limit: f32) -> bool {
        if self.y + height <= limit {
            return false;
        }
        self.new_page();
        true
    }

    fn text(&mut self, text: impl Into<String>, x: f32, y: f32, style: Style) {
        self.page.push(DrawOp::Text(TextRun {
            text: text.into(),
            x,
            y,
            font: style.font,
            size: style.size,
            color: style.color,
            align: style.align,
        }));
    }

    fn fill(&mut self, rect: Rect, color: Color) {
        self.page.push(DrawOp::Rect { rect, paint: Paint::Fill(color) });
    }

    fn finish(mut self) -> Document {
        self.document.push_page(self.page);
        self.document
    }
}

// =============================================================================
// Sections
// =============================================================================

fn draw_header(c: &mut Composer, issuer: &IssuerProfile) {
    c.y += 5.0;
    c.fill(Rect::new(MARGIN_MM, c.y, CONTENT_WIDTH_MM, 35.0), Color::PANEL_GRAY);
    draw_emblem(&mut c.page, EMBLEM_ORIGIN);

    let max_width = EMBLEM_ORIGIN.x - 5.0 - LEFT_X;

    c.y += 7.0;
    let name = truncate_to_width(issuer.name.trim(), Font::Bold, 12.0, max_width);
    c.text(name, LEFT_X, c.y, Style::bold(12.0));
    let lines = [
        ("Address", issuer.address.as_str()),
        ("Phone No", issuer.phone.as_str()),
        ("Email ID", issuer.email.as_str()),
        ("GSTIN", issuer.gstin.as_str()),
        ("State", issuer.state.name()),
    ];
    for (i, (label, value)) in lines.into_iter().enumerate() {
        c.y += if i == 0 { 6.0 } else { 5.0 };
        let line = truncate_to_width(&format!("{}: {}", label, value), Font::Regular, 9.0, max_width);
        c.text(line, LEFT_X, c.y, Style::regular(9.0));
    }
}

fn draw_title(c: &mut Composer) {
    c.y += 8.0;
    c.fill(Rect::new(MARGIN_MM, c.y, CONTENT_WIDTH_MM, 12.0), Color::BLUSH);
    c.y += 8.0;
    c.text(
        "Tax Invoice",
        PAGE_WIDTH_MM / 2.0,
        c.y,
        Style::bold(18.0).center().color(Color::BRAND_PINK),
    );
}

fn draw_details(c: &mut Composer, record: &InvoiceRecord) {
    c.y += 10.0;
    let top = c.y;
    let customer = record.customer();

    let bill_to = format!("Bill To: {}", customer.bill_to());
    c.text(truncate_to_width(&bill_to, Font::Bold, 10.0, WRAP_WIDTH), LEFT_X, c.y, Style::bold(10.0));
    c.y += 5.0;

    let has_company = customer
        .company_name
        .as_deref()
        .is_some_and(|company| !company.trim().is_empty());
    if has_company {
        let name = format!("Name: {}", customer.name.trim());
        c.text(truncate_to_width(&name, Font::Regular, 9.0, WRAP_WIDTH), LEFT_X, c.y, Style::regular(9.0));
        c.y += 5.0;
    }

    let state_name = customer.state.map(|s| s.name()).unwrap_or_default();
    let address = [customer.address.trim(), customer.city.trim(), state_name, customer.pincode.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    for line in split_text_to_size(&format!("Address: {}", address), Font::Regular, 9.0, WRAP_WIDTH) {
        c.text(line, LEFT_X, c.y, Style::regular(9.0));
        c.y += 4.0;
    }
    c.y += 2.0;

    c.text(format!("Contact No.: {}", customer.contact_no.trim()), LEFT_X, c.y, Style::regular(9.0));
    c.y += 5.0;

    if let Some(gstin) = customer.gstin() {
        c.text(format!("GSTIN No.: {}", gstin), LEFT_X, c.y, Style::regular(9.0));
        c.y += 5.0;
    }
    if let Some(state) = customer.state {
        c.text(format!("State: {}", state.name()), LEFT_X, c.y, Style::regular(9.0));
    }

    let mut right_y = top;
    c.text(
        format!("Check-in Time: {}", format_stay(record.check_in())),
        RIGHT_X,
        right_y,
        Style::regular(9.0).right(),
    );
    right_y += 5.0;
    c.text(
        format!("Check-out Time: {}", format_stay(record.check_out())),
        RIGHT_X,
        right_y,
        Style::regular(9.0).right(),
    );
    right_y += 7.0;
    c.text(format!("Invoice No.: {}", record.invoice_no()), RIGHT_X, right_y, Style::bold(10.0).right());
    right_y += 5.0;
    c.text(
        format!("Date: {}", record.invoice_date().format("%d/%m/%Y")),
        RIGHT_X,
        right_y,
        Style::bold(10.0).right(),
    );

    c.y = c.y.max(right_y) + 10.0;
}

/// Left edge of column `index` for cell text.
fn column_x(index: usize) -> f32 {
    TABLE_X + COLUMNS[..index].iter().map(|(_, width)| width).sum::<f32>()
}

fn draw_table_header(c: &mut Composer) {
    // Keep the header with at least one row.
    c.ensure_room(TABLE_HEADER_HEIGHT + ROW_HEIGHT, BODY_BOTTOM);

    c.fill(Rect::new(MARGIN_MM, c.y, CONTENT_WIDTH_MM, TABLE_HEADER_HEIGHT), Color::PANEL_GRAY);
    for (index, (heading, _)) in COLUMNS.iter().enumerate() {
        c.text(*heading, column_x(index), c.y + 5.0, Style::bold(9.0));
    }
    c.y += TABLE_HEADER_HEIGHT;
}

fn draw_item_table(c: &mut Composer, items: &[LineItem]) {
    draw_table_header(c);

    if items.is_empty() {
        let table_center = MARGIN_MM + CONTENT_WIDTH_MM / 2.0;
        c.text(
            EMPTY_TABLE_TEXT,
            table_center,
            c.y + 5.0,
            Style::regular(9.0).center().color(Color::MUTED),
        );
        c.y += ROW_HEIGHT;
        return;
    }

    let name_width = COLUMNS[1].1 - 2.0;
    for (index, item) in items.iter().enumerate() {
        if c.ensure_room(ROW_HEIGHT, BODY_BOTTOM) {
            draw_table_header(c);
        }

        let cells = [
            (index + 1).to_string(),
            truncate_to_width(item.name(), Font::Regular, 9.0, name_width),
            item.hsn_code().to_string(),
            item.quantity().to_string(),
            format!("₹ {}", item.unit_price()),
            item.tax_rate().to_string(),
            item.amount().to_string(),
        ];
        let baseline = c.y + 5.0;
        for (column, cell) in cells.into_iter().enumerate() {
            c.text(cell, column_x(column), baseline, Style::regular(9.0));
        }
        c.y += ROW_HEIGHT;
    }
}

fn draw_total_row(c: &mut Composer, record: &InvoiceRecord) {
    let totals = record.totals();
    let edge = |columns: usize| MARGIN_MM + COLUMNS[..columns].iter().map(|(_, w)| w).sum::<f32>();

    c.y += 3.0;
    c.ensure_room(TOTAL_ROW_HEIGHT, BODY_BOTTOM);
    c.fill(Rect::new(MARGIN_MM, c.y, CONTENT_WIDTH_MM, TOTAL_ROW_HEIGHT), Color::BLUSH);

    let baseline = c.y + 6.0;
    c.text("Total", MARGIN_MM + 20.0, baseline, Style::bold(11.0));
    c.text(totals.total_quantity.to_string(), edge(3) + 5.0, baseline, Style::bold(11.0));
    c.text(totals.subtotal.to_string(), edge(5), baseline, Style::bold(11.0));
    c.text(
        totals.grand_total.to_string(),
        PAGE_WIDTH_MM - MARGIN_MM - 30.0,
        baseline,
        Style::bold(11.0),
    );
}

fn draw_amounts(c: &mut Composer, record: &InvoiceRecord) {
    let totals = record.totals();
    let words = split_text_to_size(&amount_to_words(totals.grand_total), Font::Regular, 9.0, WRAP_WIDTH);

    let tax_lines = match totals.tax {
        TaxSplit::IntraState { .. } => 2.0,
        TaxSplit::InterState { .. } => 1.0,
    };
    let words_height = 5.0 + words.len() as f32 * 5.0;
    let totals_height = 5.0 + 6.0 + tax_lines * 5.0 + 15.0;

    c.y += 15.0;
    c.ensure_room(words_height.max(totals_height), BODY_BOTTOM);

    c.text("Amount in words:", LEFT_X, c.y, Style::bold(10.0));
    c.y += 5.0;
    let mut totals_y = c.y;
    for line in words {
        c.text(line, LEFT_X, c.y, Style::regular(9.0));
        c.y += 5.0;
    }

    c.fill(Rect::new(TOTALS_X - 5.0, totals_y - 5.0, 65.0, 8.0), Color::BLUSH);
    totals_line(c, "Sub Total:", totals.subtotal, totals_y, Style::bold(10.0));
    totals_y += 6.0;

    match totals.tax {
        TaxSplit::InterState { igst } => {
            totals_line(c, "IGST", igst, totals_y, Style::regular(9.0));
            totals_y += 5.0;
        }
        TaxSplit::IntraState { cgst, sgst } => {
            totals_line(c, "SGST", sgst, totals_y, Style::regular(9.0));
            totals_y += 5.0;
            totals_line(c, "CGST", cgst, totals_y, Style::regular(9.0));
            totals_y += 5.0;
        }
    }

    totals_line(c, "Total", totals.grand_total, totals_y, Style::bold(10.0));
    totals_y += 5.0;

    c.text("Payment Type", TOTALS_X, totals_y, Style::regular(9.0));
    c.text(record.payment_method().to_string(), RIGHT_X, totals_y, Style::bold(9.0).right());
    totals_y += 5.0;

    totals_line(c, "Received", record.amount_received(), totals_y, Style::regular(9.0));
    totals_y += 5.0;
    totals_line(c, "Balance", record.balance(), totals_y, Style::bold(9.0));

    c.y = c.y.max(totals_y);
}

fn totals_line(c: &mut Composer, label: &str, value: Money, y: f32, style: Style) {
    c.text(label, TOTALS_X, y, style);
    c.text(value.to_string(), RIGHT_X, y, style.right());
}

fn draw_terms(c: &mut Composer, terms: Option<&str>) {
    let limit = SIGNATURE_Y - SIGNATURE_CLEARANCE;
    let lines = terms
        .map(|text| split_text_to_size(text, Font::Regular, 9.0, CONTENT_WIDTH_MM - 10.0))
        .unwrap_or_default();

    c.y += 10.0;
    let first_block = if lines.is_empty() { 0.0 } else { 5.0 };
    c.ensure_room(first_block, limit);
    c.text("Terms & Conditions", LEFT_X, c.y, Style::bold(10.0));

    for line in lines {
        c.y += 5.0;
        c.ensure_room(0.0, limit);
        c.text(line, LEFT_X, c.y, Style::regular(9.0));
    }
}

fn draw_signature(c: &mut Composer) {
    c.text("Company seal and Sign", RIGHT_X, SIGNATURE_Y, Style::regular(10.0).right());
}

/// `17/10/2026 02:30 PM`
fn format_stay(at: NaiveDateTime) -> String {
    at.format("%d/%m/%Y %I:%M %p").to_string()
}
