//! Terminal rendering of records, facets, stats, and page controls.

use std::fmt::Write as _;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use directory_model::{CompanyStatus, Record};
use directory_query::{DirectoryStats, Favorites, PageInfo, PageItem};

const FAVORITE_MARK: &str = "*";

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn number_cell(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

fn status_list(statuses: &[CompanyStatus]) -> String {
    statuses
        .iter()
        .map(CompanyStatus::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn favorite_mark(favorites: &Favorites, record: &Record) -> &'static str {
    if favorites.contains(&record.id) {
        FAVORITE_MARK
    } else {
        ""
    }
}

/// Records as a table, one row per company.
pub fn records_table(records: &[&Record], favorites: &Favorites) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(""),
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Location"),
        header_cell("Industry"),
        header_cell("Employees"),
        header_cell("Founded"),
        header_cell("Trend"),
        header_cell("Status"),
    ]);
    for record in records {
        table.add_row(vec![
            Cell::new(favorite_mark(favorites, record)),
            Cell::new(record.id.as_str()),
            Cell::new(&record.name),
            Cell::new(&record.location),
            Cell::new(&record.industry),
            number_cell(record.employees),
            number_cell(record.founded),
            Cell::new(record.growth_trend().as_str()),
            Cell::new(status_list(&record.statuses())),
        ]);
    }
    apply_table_style(&mut table);
    table
}

/// Records as text cards.
pub fn records_cards(records: &[&Record], favorites: &Favorites) -> String {
    let mut out = String::new();
    for (position, record) in records.iter().enumerate() {
        if position > 0 {
            out.push('\n');
        }
        let mark = favorite_mark(favorites, record);
        let _ = writeln!(out, "{mark:1} {} (#{})", record.name, record.id);
        let _ = writeln!(out, "  {} | {}", record.location, record.industry);
        let _ = writeln!(
            out,
            "  {} employees | founded {}",
            record.employees, record.founded
        );
        let _ = writeln!(
            out,
            "  {} | {}",
            record.growth_trend(),
            status_list(&record.statuses())
        );
        if !record.description.is_empty() {
            let _ = writeln!(out, "  {}", record.description);
        }
    }
    out
}

/// "Showing X-Y of Z" summary line. `filtered` tells an empty result apart
/// from an empty directory.
pub fn page_summary(info: &PageInfo, filtered: bool) -> String {
    if info.total_items == 0 {
        let message = if filtered {
            "No companies match the current filters."
        } else {
            "The directory has no companies."
        };
        return message.to_string();
    }
    format!(
        "Showing {}-{} of {} companies (page {} of {})",
        info.first_item, info.last_item, info.total_items, info.current_page, info.page_count
    )
}

/// Page navigation line, with the current page in brackets.
pub fn page_nav(items: &[PageItem], current: usize) -> String {
    items
        .iter()
        .map(|item| match item {
            PageItem::Page(page) if *page == current => format!("[{page}]"),
            PageItem::Page(page) => page.to_string(),
            PageItem::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One facet value per line.
pub fn facet_list(values: &[String]) -> String {
    let mut out = String::new();
    for value in values {
        out.push_str(value);
        out.push('\n');
    }
    out
}

pub fn stats_table(stats: &DirectoryStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    table.add_row(vec![Cell::new("Total companies"), number_cell(stats.total_records)]);
    table.add_row(vec![Cell::new("Locations"), number_cell(stats.locations)]);
    table.add_row(vec![Cell::new("Industries"), number_cell(stats.industries)]);
    table.add_row(vec![
        Cell::new("Filtered results"),
        Cell::new(format!("{} ({})", stats.filtered_count, stats.scope.as_str()))
            .set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![Cell::new("Favorites"), number_cell(stats.favorites_count)]);
    apply_table_style(&mut table);
    table
}
