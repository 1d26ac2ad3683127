use std::path::Path;

use crate::cli::commands::workspace::Workspace;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::log_entry::LogFilter;
use crate::core::traits::log_store::LogStore;
use crate::core::validation::validate_record_id;

const PER_PAGE: usize = 10;

/// Execute the `ordertrail show` command: the history of one order,
/// newest first, ten entries per page.
pub fn execute(dir: &Path, order_id: &str, page: usize) -> Result<()> {
    validate_record_id(order_id)?;
    let ws = Workspace::open(dir)?;
    let page = page.max(1);

    let filter = LogFilter {
        order_id: Some(order_id.to_string()),
        limit: Some(PER_PAGE),
        offset: (page - 1).saturating_mul(PER_PAGE),
        ..LogFilter::default()
    };

    let total = ws.log.count(&filter)?;
    let entries = ws.log.query(&filter)?;

    output::header(&format!("Order {order_id}: change history"));

    if entries.is_empty() {
        if total > 0 {
            output::warning(&format!("Page {page} is past the end ({total} changes)"));
        } else {
            output::warning("No changes recorded for this order yet");
        }
        return Ok(());
    }

    println!();
    for entry in &entries {
        output::print_entry(entry);
    }

    if total > PER_PAGE {
        println!(
            "\n  Page {page} of {} ({total} changes)",
            total.div_ceil(PER_PAGE)
        );
    }

    Ok(())
}
