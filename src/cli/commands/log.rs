use std::path::Path;

use chrono::NaiveDate;

use crate::cli::SortArg;
use crate::cli::commands::workspace::Workspace;
use crate::cli::output;
use crate::core::errors::{OrderTrailError, Result};
use crate::core::models::change_event::ChangeKind;
use crate::core::models::log_entry::LogFilter;
use crate::core::traits::log_store::LogStore;

/// Filters collected from the `log` command line.
#[derive(Debug, Default)]
pub struct LogArgs<'a> {
    pub order: Option<&'a str>,
    pub action: Option<&'a str>,
    pub user: Option<&'a str>,
    pub from: Option<&'a str>,
    pub to: Option<&'a str>,
    pub search: Option<&'a str>,
    pub sort: Option<SortArg>,
    pub ascending: bool,
    pub page: usize,
    pub per_page: Option<usize>,
}

/// Execute the `ordertrail log` command.
///
/// Lists change log entries, newest first unless told otherwise,
/// one page at a time.
pub fn execute(dir: &Path, args: &LogArgs<'_>) -> Result<()> {
    let ws = Workspace::open(dir)?;

    let action = args.action.map(str::parse::<ChangeKind>).transpose()?;
    let date_from = args.from.map(parse_date).transpose()?;
    let date_to = args.to.map(parse_date).transpose()?;
    let per_page = args.per_page.unwrap_or(ws.log_section().per_page).max(1);
    let page = args.page.max(1);

    let filter = LogFilter {
        order_id: args.order.map(str::to_string),
        action,
        user: args.user.map(str::to_string),
        date_from,
        date_to,
        search: args.search.map(str::to_string),
        sort_by: args.sort.unwrap_or(SortArg::Date).into(),
        descending: !args.ascending,
        limit: Some(per_page),
        offset: (page - 1).saturating_mul(per_page),
    };

    let total = ws.log.count(&filter)?;
    let entries = ws.log.query(&filter)?;

    output::header("ordertrail log");

    if entries.is_empty() {
        output::warning("No change log entries found");
        if total > 0 {
            println!("  Page {page} is past the end ({total} entries).");
        } else if has_filters(args) {
            println!("  Try removing filters to see all entries.");
        }
        return Ok(());
    }

    println!();
    for entry in &entries {
        output::print_entry(entry);
    }

    let pages = total.div_ceil(per_page);
    println!("\n  Page {page} of {pages} ({total} entries)");

    Ok(())
}

/// Parse an ISO 8601 day (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| OrderTrailError::InvalidDate {
        value: s.to_string(),
    })
}

fn has_filters(args: &LogArgs<'_>) -> bool {
    args.order.is_some()
        || args.action.is_some()
        || args.user.is_some()
        || args.from.is_some()
        || args.to.is_some()
        || args.search.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_day() {
        assert_eq!(
            parse_date("2026-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
        );
    }

    #[test]
    fn rejects_other_formats() {
        assert!(matches!(
            parse_date("15/01/2026"),
            Err(OrderTrailError::InvalidDate { .. })
        ));
        assert!(parse_date("2026-02-30").is_err());
    }
}
