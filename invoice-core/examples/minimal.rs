use invoice_core::{
    ClientInfo, CompanyInfo, InvoiceMeta, InvoiceSnapshot, LayoutEngine, LineItem, PdfRenderer,
    Totals,
};

fn main() {
    let company = CompanyInfo {
        name: "Acme Consulting".to_string(),
        address: "1 Main Street, Springfield".to_string(),
        phone: "+1 555 0100".to_string(),
        email: "billing@acme.example".to_string(),
        payment_reference: "Payment due within 14 days.".to_string(),
    };
    let client = ClientInfo {
        name: "Jane Customer".to_string(),
        address: "2 Side Street, Springfield".to_string(),
    };
    let meta = InvoiceMeta {
        number: "INV-001".to_string(),
        issue_date: "2024-06-01".to_string(),
        due_date: "2024-06-15".to_string(),
        tax_rate_percent: 20.0,
    };
    let items = vec![LineItem {
        description: "Consulting, June".to_string(),
        quantity: 8.0,
        unit_price: 95.0,
    }];

    let totals = Totals::compute(&items, meta.tax_rate_percent);
    let snapshot = InvoiceSnapshot {
        company: &company,
        client: &client,
        meta: &meta,
        items: &items,
    };
    let pages = LayoutEngine::new(snapshot, totals, None).paginate();

    let path = PdfRenderer::new().save_to_dir(&pages, &meta, ".").unwrap();
    println!("Generated: {}", path.display());
}
