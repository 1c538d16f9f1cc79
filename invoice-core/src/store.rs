use crate::model::LineItem;

/// Ordered, editable collection of line items.
///
/// Indices are the addressing scheme: removing an item shifts every
/// later item down by one. Edits against an out-of-range index are
/// silent no-ops, so a stale index from the editing surface can never
/// panic the process. Totals are never cached here; they are recomputed
/// from `items()` on every read, so any mutation invalidates them for
/// free.
#[derive(Debug, Clone, Default)]
pub struct LineItemStore {
    items: Vec<LineItem>,
}

impl LineItemStore {
    pub fn new() -> Self {
        LineItemStore::default()
    }

    /// Append an empty zero-valued item and return its index.
    pub fn add(&mut self) -> usize {
        self.items.push(LineItem::default());
        self.items.len() - 1
    }

    /// Remove the item at `index`, shifting later items down.
    /// No-op when the index is out of range.
    pub fn remove(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    /// No-op when the index is out of range.
    pub fn set_description(&mut self, index: usize, description: impl Into<String>) {
        if let Some(item) = self.items.get_mut(index) {
            item.description = description.into();
        }
    }

    /// No-op when the index is out of range.
    pub fn set_quantity(&mut self, index: usize, quantity: f64) {
        if let Some(item) = self.items.get_mut(index) {
            item.quantity = quantity;
        }
    }

    /// No-op when the index is out of range.
    pub fn set_unit_price(&mut self, index: usize, unit_price: f64) {
        if let Some(item) = self.items.get_mut(index) {
            item.unit_price = unit_price;
        }
    }

    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// The current item sequence, in order. This is the snapshot the
    /// totals calculator and the layout engine read.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Parse raw text destined for a numeric field (quantity, unit price).
///
/// Returns `None` for anything that does not parse to a finite number,
/// so a bad edit is rejected at the input edge instead of riding as NaN
/// through the totals into the rendered document. What rejection means
/// (keep the previous value, flag the field, ...) is the caller's call.
pub fn parse_numeric_input(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    value.is_finite().then_some(value)
}
