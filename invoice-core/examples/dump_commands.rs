/// Prints the draw-command list the layout engine produces, without
/// rendering a PDF. Handy when checking where an element lands: every
/// command carries millimetre coordinates from the page's top-left
/// corner.
use invoice_core::{
    ClientInfo, CompanyInfo, DrawCmd, InvoiceMeta, InvoiceSnapshot, LayoutEngine, LineItem, Totals,
};

fn main() {
    let company = CompanyInfo {
        name: "Acme Consulting".to_string(),
        address: "1 Main Street, Springfield".to_string(),
        phone: "+1 555 0100".to_string(),
        email: "billing@acme.example".to_string(),
        payment_reference: "Payment due within 14 days.".to_string(),
    };
    let client = ClientInfo::default();
    let meta = InvoiceMeta::default();
    let items = vec![
        LineItem {
            description: "Design".to_string(),
            quantity: 3.0,
            unit_price: 120.0,
        },
        LineItem {
            description: "Build".to_string(),
            quantity: 12.0,
            unit_price: 80.0,
        },
    ];

    let totals = Totals::compute(&items, meta.tax_rate_percent);
    let snapshot = InvoiceSnapshot {
        company: &company,
        client: &client,
        meta: &meta,
        items: &items,
    };
    let pages = LayoutEngine::new(snapshot, totals, None).paginate();

    for (i, page) in pages.iter().enumerate() {
        println!("page {} ({} commands)", i + 1, page.commands.len());
        for cmd in &page.commands {
            match cmd {
                DrawCmd::Text {
                    x, y, content, size, ..
                } => println!("  text  ({:>6.1}, {:>6.1})  {}pt  {:?}", x, y, size, content),
                DrawCmd::Rect {
                    x, y, width, height, ..
                } => println!("  rect  ({:>6.1}, {:>6.1})  {} x {}", x, y, width, height),
                DrawCmd::Line { x1, y1, x2, y2, .. } => {
                    println!("  line  ({:>6.1}, {:>6.1}) to ({:.1}, {:.1})", x1, y1, x2, y2)
                }
                DrawCmd::Image { x, y, width, height } => {
                    println!("  image ({:>6.1}, {:>6.1})  {} x {}", x, y, width, height)
                }
            }
        }
    }
}
