use serde::Serialize;

use crate::model::LineItem;

/// Derived invoice amounts. Never stored: callers recompute from the
/// current items and tax rate on every read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub grand_total: f64,
}

impl Totals {
    /// Pure computation over a line-item slice.
    ///
    /// Accumulates at full f64 precision; rounding to cents happens
    /// only when a value is formatted for display. A zero tax rate
    /// yields an exactly zero tax amount, and an empty slice yields
    /// all zeros.
    pub fn compute(items: &[LineItem], tax_rate_percent: f64) -> Totals {
        let subtotal: f64 = items.iter().map(LineItem::line_total).sum();
        let tax_amount = subtotal * tax_rate_percent / 100.0;
        Totals {
            subtotal,
            tax_amount,
            grand_total: subtotal + tax_amount,
        }
    }
}
