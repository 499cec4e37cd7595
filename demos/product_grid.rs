/// Product Grid Demo
///
/// Loads a small product store, then walks through the interactions of the product
/// dashboard: searching, filtering by status and price, sorting from the header,
/// paging and hiding columns. Prints each resulting page as a text table.
///
/// Run with `cargo run --example product_grid`; set `RUST_LOG=debug` to see every
/// committed state change.

use catalogview::catalog::{product_schema, Product, ProductStatus};
use catalogview::{
    DataStatus, FilterValue, JsonRecordSource, SortOrder, ViewConfig, ViewController, ViewStateError,
};
use log::info;

const CATEGORIES: [&str; 4] = ["Auto Parts", "Electronics", "Fashions", "Furnitures"];
const NAMES: [&str; 8] = [
    "Sleek Steel Lamp",
    "Rustic Cotton Towels",
    "Ergonomic Office Chair",
    "Handcrafted Oak Table",
    "Ceramic Brake Pads",
    "Wireless Keyboard",
    "Refined Leather Jacket",
    "LED Headlight Kit",
];

fn store() -> serde_json::Value {
    let products: Vec<Product> = (0..27)
        .map(|i| Product {
            id: Some(i as i64 + 1),
            sku: format!("978-{:04}", 1000 + i * 37),
            name: format!("{} {}", NAMES[i % NAMES.len()], i / NAMES.len() + 1),
            description: format!("{} from the spring catalog", NAMES[i % NAMES.len()]),
            price_cents: ((i * 4_513) % 20_000 + 499) as i64,
            category_name: CATEGORIES[i % CATEGORIES.len()].to_string(),
            stock: (i % 6) as i32,
            on_stock: i % 6 != 0,
            images: vec![format!("https://img.example.com/products/{}.jpg", i + 1)],
            status: ProductStatus::ALL[i % 3],
            keywords: Vec::new(),
        })
        .collect();

    serde_json::json!({
        "products": products,
        "categories": CATEGORIES,
    })
}

fn print_page(title: &str, controller: &ViewController) {
    println!("\n== {} ==", title);
    let Some(view) = controller.view() else {
        println!("No data available");
        return;
    };

    let projection = view.projection(controller.state(), controller.schema());
    println!("{}", projection.columns().join(" | "));
    for i in 0..projection.len() {
        let cells: Vec<String> = projection
            .row(i)
            .into_iter()
            .map(|(_, value)| value.to_text().unwrap_or_default())
            .collect();
        println!("{}", cells.join(" | "));
    }

    let summary = view.page_summary();
    let pages: Vec<String> = controller
        .page_block()
        .map(|block| block.pages().iter().map(|p| (p + 1).to_string()).collect())
        .unwrap_or_default();
    println!(
        "Showing {} - {} of {} products  [pages {}]  page {}/{}",
        summary.first_row_number,
        summary.last_row_number,
        summary.total_count,
        pages.join(" "),
        view.pagination.page_index + 1,
        view.page_count.max(1)
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ViewConfig::from_env()?;
    let source = JsonRecordSource::new(product_schema(), store());
    let mut controller = ViewController::new(product_schema(), config).with_category_column("categoryName");

    if let DataStatus::Unavailable(reason) = controller.load(&source) {
        return Err(reason.clone().into());
    }
    info!("Row size options: {:?}", controller.config().page_size_options);
    print_page("All products", &controller);

    controller.set_global_filter("chair")?;
    print_page("Search \"chair\"", &controller);

    controller.set_global_filter("")?;
    controller.set_column_filter("status", Some(FilterValue::select("ACTIVE")))?;
    controller.set_column_filter("priceCents", Some(FilterValue::range(Some(1_000.0), Some(15_000.0))))?;
    controller.toggle_sort("priceCents")?;
    print_page("Active, $10 - $150, cheapest first", &controller);

    controller.clear_column_filters()?;
    controller.set_sort("priceCents", Some(SortOrder::Descending))?;
    controller.set_page_size(10)?;
    controller.last_page()?;
    print_page("Most expensive first, last page of 10", &controller);

    controller.set_column_visibility("description", false)?;
    controller.set_column_visibility("images", false)?;
    println!("\nCategory options: {:?}", controller.select_options("categoryName")?);
    print_page("Without description and images", &controller);

    match controller.set_sort("description", Some(SortOrder::Ascending)) {
        Err(ViewStateError::NotSortable(column)) => println!("\n'{}' cannot be sorted; state kept", column),
        other => println!("\nUnexpected: {:?}", other.map(|s| s.sort.clone())),
    }

    Ok(())
}
