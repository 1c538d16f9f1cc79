use serde::{Deserialize, Serialize};

/// One row of the invoice's item table.
///
/// Quantity and unit price are plain numbers with no business
/// validation: zero and negative values flow through to the rendered
/// document unchanged. Rows are addressed by position, not identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit_price: f64,
}

impl LineItem {
    /// Derived row amount: quantity times unit price.
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Invoice-level fields. All free-form text apart from the tax rate;
/// the due date is never checked against the issue date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceMeta {
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub issue_date: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default = "default_tax_rate")]
    pub tax_rate_percent: f64,
}

impl Default for InvoiceMeta {
    fn default() -> Self {
        InvoiceMeta {
            number: String::new(),
            issue_date: String::new(),
            due_date: String::new(),
            tax_rate_percent: default_tax_rate(),
        }
    }
}

fn default_tax_rate() -> f64 {
    20.0
}

/// Who the invoice bills. Both fields may be empty; rendering
/// substitutes a placeholder instead of leaving a gap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
}

/// The issuing company's identity. An immutable configuration value
/// constructed once at startup and passed into the layout engine;
/// nothing in the pipeline can change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Payment instructions printed in the document footer
    /// (bank account details, transfer reference, ...).
    #[serde(default)]
    pub payment_reference: String,
}

/// Read-only view of everything a single render needs. The editing
/// surface assembles one of these per render trigger; the pipeline
/// borrows and never mutates.
#[derive(Debug, Clone, Copy)]
pub struct InvoiceSnapshot<'a> {
    pub company: &'a CompanyInfo,
    pub client: &'a ClientInfo,
    pub meta: &'a InvoiceMeta,
    pub items: &'a [LineItem],
}
