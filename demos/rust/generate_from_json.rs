/// JSON-driven example — build an invoice from a serialized document.
///
/// The model types derive `serde::Deserialize`, so a stored invoice can
/// be parsed straight into them. The embedded sample leaves out
/// `tax_rate_percent` to show the fallback: the parsed metadata picks
/// up the default 20% rate.
///
/// Run with:
///   cargo run --example generate_from_json -p invoice-demos
///
/// Opens output at: demos/output/HB-2024-117.pdf
use invoice_core::{
    format_amount, ClientInfo, CompanyInfo, InvoiceMeta, InvoiceSnapshot, LayoutEngine, LineItem,
    PdfRenderer, Totals,
};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// On-disk invoice document: everything except the derived totals.
#[derive(Deserialize)]
struct InvoiceFile {
    company: CompanyInfo,
    client: ClientInfo,
    meta: InvoiceMeta,
    items: Vec<LineItem>,
}

const SAMPLE: &str = r#"{
  "company": {
    "name": "Harborline Construction",
    "address": "Dokstraat 14, 3011 XA Rotterdam",
    "phone": "+31 10 555 0188",
    "email": "invoices@harborline.example",
    "payment_reference": "Payment within 30 days to NL29 HBRL 0000 4821 33"
  },
  "client": {
    "name": "Van Dijk Vastgoed B.V.",
    "address": "Weena 505, 3013 AL Rotterdam"
  },
  "meta": {
    "number": "HB-2024-117",
    "issue_date": "2024-09-02",
    "due_date": "2024-10-02"
  },
  "items": [
    { "description": "Scaffolding rental, September", "quantity": 1, "unit_price": 1850.0 },
    { "description": "Concrete pump, half days", "quantity": 3.5, "unit_price": 420.0 },
    { "description": "Site supervision, hours", "quantity": 12, "unit_price": 95.0 }
  ]
}"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let invoice: InvoiceFile = serde_json::from_str(SAMPLE)?;

    let totals = Totals::compute(&invoice.items, invoice.meta.tax_rate_percent);
    println!("Invoice {} for {}", invoice.meta.number, invoice.client.name);
    println!("  Subtotal     {:>10}", format_amount(totals.subtotal));
    println!(
        "  Tax ({}%)    {:>10}",
        invoice.meta.tax_rate_percent,
        format_amount(totals.tax_amount)
    );
    println!("  Grand total  {:>10}", format_amount(totals.grand_total));

    let snapshot = InvoiceSnapshot {
        company: &invoice.company,
        client: &invoice.client,
        meta: &invoice.meta,
        items: &invoice.items,
    };
    let pages = LayoutEngine::new(snapshot, totals, None).paginate();

    let mut renderer = PdfRenderer::new();
    renderer
        .set_compression(true)
        .set_info("Creator", "Harborline Construction billing");
    let path = renderer.save_to_dir(&pages, &invoice.meta, "demos/output")?;
    println!("Written to {}", path.display());
    Ok(())
}
