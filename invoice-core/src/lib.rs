//! Invoice generation: data model, derived totals, deterministic page
//! layout, and a self-contained PDF 1.7 writer.
//!
//! The pipeline has three stages. Line items live in a
//! [`LineItemStore`]; together with the company, client, and invoice
//! header records they form an [`InvoiceSnapshot`]. [`LayoutEngine`]
//! turns a snapshot into pages of positioned draw commands, and
//! [`PdfRenderer`] serializes those pages into PDF bytes. Totals are
//! never stored; [`Totals::compute`] derives them from the items on
//! every use.

pub mod commands;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod logo;
pub mod model;
pub mod money;
pub mod pdf;
pub mod store;
pub mod totals;
mod writer;

pub use commands::{Color, DrawCmd, Page, Stroke, TextAlign};
pub use error::InvoiceError;
pub use fonts::{BuiltinFont, FontMetrics};
pub use layout::{LayoutEngine, PAGE_HEIGHT, PAGE_WIDTH};
pub use logo::{ColorSpace, Logo};
pub use model::{ClientInfo, CompanyInfo, InvoiceMeta, InvoiceSnapshot, LineItem};
pub use money::{format_amount, format_quantity};
pub use pdf::{output_filename, PdfRenderer};
pub use store::{parse_numeric_input, LineItemStore};
pub use totals::Totals;
