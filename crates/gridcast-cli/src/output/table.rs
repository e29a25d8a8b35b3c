use gridcast_core::canvas::{column_letter, MemoryCanvas};
use gridcast_core::model::PageTables;
use gridcast_core::{PageLayout, PlacedPage};

pub fn print_layouts(layouts: &[PageLayout]) {
    for (i, layout) in layouts.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!(
            "=== Page {} ({} rows x {} columns) ===\n",
            layout.page_number,
            layout.grid.row_count(),
            layout.grid.column_count()
        );
        if layout.grid.is_empty() {
            println!("  (no usable words)");
            continue;
        }
        print!("{}", format_canvas(&layout.canvas));
    }
}

pub fn print_placed(pages: &[PlacedPage], zone_count: usize) {
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== Page {} ===\n", page.page_number);
        if page.placements.is_empty() {
            println!("  (no tables placed)");
            continue;
        }
        for p in &page.placements {
            println!(
                "  {:<10} {}{}:{}{}",
                p.zone.label(zone_count),
                column_letter(p.start_column),
                p.start_row,
                column_letter(p.end_column),
                p.end_row
            );
        }
        println!();
        print!("{}", format_canvas(&page.canvas));
    }
}

pub fn print_key_values(pages: &[PageTables]) {
    for page in pages {
        for (t, table) in page.tables.iter().enumerate() {
            println!("--- Page {}, table {} ---", page.page_number, t + 1);
            let records = table.key_value_rows();
            if records.is_empty() {
                println!("  (no data rows)\n");
                continue;
            }
            let key_width = records
                .iter()
                .flatten()
                .map(|(k, _)| k.chars().count())
                .max()
                .unwrap_or(0);
            for record in &records {
                for (key, value) in record {
                    println!("  {:<width$}  {}", key, value, width = key_width);
                }
                println!();
            }
        }
    }
}

/// Render a canvas as an aligned text grid with column letters and row numbers.
fn format_canvas(canvas: &MemoryCanvas) -> String {
    let rows = canvas.to_rows();
    let columns = canvas.max_column() as usize;
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            rows.iter()
                .map(|r| r[c].chars().count())
                .max()
                .unwrap_or(0)
                .max(column_letter(c as u32 + 1).len())
        })
        .collect();
    let row_label = rows.len().to_string().len();

    let mut out = String::new();
    out.push_str(&format!("  {:>row_label$} ", ""));
    for (c, width) in widths.iter().enumerate() {
        out.push_str(&format!("| {:<width$} ", column_letter(c as u32 + 1)));
    }
    out.push('\n');

    for (r, row) in rows.iter().enumerate() {
        out.push_str(&format!("  {:>row_label$} ", r + 1));
        for (value, width) in row.iter().zip(&widths) {
            out.push_str(&format!("| {:<width$} ", value));
        }
        out.push('\n');
    }

    if !canvas.merges().is_empty() {
        let merges: Vec<String> = canvas.merges().iter().map(|m| m.to_string()).collect();
        out.push_str(&format!("\n  Merged: {}\n", merges.join(", ")));
    }
    out
}
