/// Multi-page example — a 45-row invoice spilling over three pages.
///
/// Shows the pagination rules: the item table restarts at the same top
/// offset on every page with its column-header row repeated, serial
/// numbers keep counting, and the totals block and footer land on the
/// last page.
///
/// Run with:
///   cargo run --example generate_multipage -p invoice-demos
///
/// Opens output at: demos/output/HB-2024-119.pdf
use invoice_core::{
    format_amount, ClientInfo, CompanyInfo, InvoiceMeta, InvoiceSnapshot, LayoutEngine, LineItem,
    PdfRenderer, Totals,
};
use tracing_subscriber::EnvFilter;

fn company() -> CompanyInfo {
    CompanyInfo {
        name: "Harborline Construction".to_string(),
        address: "Dokstraat 14, 3011 XA Rotterdam".to_string(),
        phone: "+31 10 555 0188".to_string(),
        email: "invoices@harborline.example".to_string(),
        payment_reference: "Payment within 30 days to NL29 HBRL 0000 4821 33".to_string(),
    }
}

fn client() -> ClientInfo {
    ClientInfo {
        name: "Gemeente Rotterdam, Stadsbeheer".to_string(),
        address: "Coolsingel 40, 3011 AD Rotterdam".to_string(),
    }
}

fn meta() -> InvoiceMeta {
    InvoiceMeta {
        number: "HB-2024-119".to_string(),
        issue_date: "2024-11-01".to_string(),
        due_date: "2024-12-01".to_string(),
        tax_rate_percent: 21.0,
    }
}

/// Weekly site-labour billing for a 45-week framework contract.
fn weekly_items() -> Vec<LineItem> {
    (1..=45)
        .map(|week| LineItem {
            description: format!("Site works, week {}", week),
            quantity: 40.0,
            unit_price: 38.50,
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let company = company();
    let client = client();
    let meta = meta();
    let items = weekly_items();

    let totals = Totals::compute(&items, meta.tax_rate_percent);
    let snapshot = InvoiceSnapshot {
        company: &company,
        client: &client,
        meta: &meta,
        items: &items,
    };
    let pages = LayoutEngine::new(snapshot, totals, None).paginate();
    println!(
        "{} items over {} pages, grand total {}",
        items.len(),
        pages.len(),
        format_amount(totals.grand_total)
    );

    let mut renderer = PdfRenderer::new();
    renderer.set_compression(true);
    let path = renderer.save_to_dir(&pages, &meta, "demos/output")?;
    println!("Written to {}", path.display());
    Ok(())
}
