/// Invoice example — the full editing-to-PDF round trip.
///
/// Scripts what an editing surface would do: build up line items,
/// apply corrections, then snapshot, lay out, and render with a logo
/// and compressed content streams.
///
/// Run with:
///   cargo run --example generate_invoice -p invoice-demos
///
/// Opens output at: demos/output/HB-2024-112.pdf
use invoice_core::{
    format_amount, parse_numeric_input, ClientInfo, CompanyInfo, InvoiceMeta, InvoiceSnapshot,
    LayoutEngine, LineItemStore, Logo, PdfRenderer, Totals,
};
use tracing_subscriber::EnvFilter;

// ── invoice data ──────────────────────────────────────────────────────────────

const ITEMS: &[(&str, f64, f64)] = &[
    ("Foundation works, phase 1",         1.0, 5_800.00),
    ("Cement bags (50kg)",               64.0,    12.40),
    ("Steel reinforcement, grade B500",   2.4, 1_380.00),
    ("Bricklaying labour (hours)",      120.0,    42.50),
    ("Scaffolding rental (weeks)",        3.0,   260.00),
    ("Site waste disposal",               2.0,   185.00),
];

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
        name: "Van Dijk Vastgoed".to_string(),
        address: "Parklaan 8, 3016 BB Rotterdam".to_string(),
    }
}

fn meta() -> InvoiceMeta {
    InvoiceMeta {
        number: "HB-2024-112".to_string(),
        issue_date: "2024-06-03".to_string(),
        due_date: "2024-07-03".to_string(),
        tax_rate_percent: 21.0,
    }
}

// ── logo ──────────────────────────────────────────────────────────────────────

/// Builds the company mark as an in-memory PNG: a navy block with a
/// teal accent stripe along the bottom.
fn logo_png() -> anyhow::Result<Vec<u8>> {
    const W: u32 = 60;
    const H: u32 = 40;
    let navy = [16u8, 42, 67];
    let teal = [0u8, 168, 196];

    let mut pixels = Vec::with_capacity((W * H * 3) as usize);
    for y in 0..H {
        let color = if y >= 32 { teal } else { navy };
        for _ in 0..W {
            pixels.extend_from_slice(&color);
        }
    }

    let mut bytes = Vec::new();
    let mut encoder = png::Encoder::new(&mut bytes, W, H);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    writer.finish()?;
    Ok(bytes)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut store = LineItemStore::new();
    for &(description, quantity, unit_price) in ITEMS {
        let idx = store.add();
        store.set_description(idx, description);
        store.set_quantity(idx, quantity);
        store.set_unit_price(idx, unit_price);
    }

    // Corrections phoned in after the first draft: more cement, the
    // waste-disposal line moved to a separate invoice.
    store.set_quantity(1, 72.0);
    store.remove(5);

    // Quantities arrive as text from the editing surface.
    if let Some(weeks) = parse_numeric_input("4") {
        store.set_quantity(4, weeks);
    }

    let company = company();
    let client = client();
    let meta = meta();
    let totals = Totals::compute(store.items(), meta.tax_rate_percent);
    println!("Subtotal:    {}", format_amount(totals.subtotal));
    println!("Tax ({}%):   {}", meta.tax_rate_percent, format_amount(totals.tax_amount));
    println!("Grand total: {}", format_amount(totals.grand_total));

    let logo = Logo::from_png_bytes(&logo_png()?)?;
    let snapshot = InvoiceSnapshot {
        company: &company,
        client: &client,
        meta: &meta,
        items: store.items(),
    };
    let pages = LayoutEngine::new(snapshot, totals, Some(&logo)).paginate();

    let mut renderer = PdfRenderer::new();
    renderer
        .set_logo(&logo)
        .set_compression(true)
        .set_info("Creator", "Harborline Construction billing");
    let path = renderer.save_to_dir(&pages, &meta, "demos/output")?;
    println!("Written to {}", path.display());
    Ok(())
}
