use super::ui;
use crate::core::{Converter, RateSource};
use anyhow::Result;
use comfy_table::Cell;
use std::io::Write;

/// Refreshes the rate once and prints it with its status.
pub async fn run<W: Write>(
    converter: &mut Converter,
    source: &dyn RateSource,
    output: &mut W,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching exchange rate...");
    converter.refresh_rate(source).await;
    pb.finish_and_clear();

    writeln!(
        output,
        "{}",
        ui::style_text("EUR → Toman", ui::StyleType::Title)
    )?;
    writeln!(output, "{}", display_rate_table(converter, source.name()))?;
    Ok(())
}

pub fn display_rate_table(converter: &Converter, source_name: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Toman per EUR"),
        ui::header_cell("Source"),
        ui::header_cell("Status"),
    ]);

    let rate = if converter.rate().is_set() {
        converter.rate().to_string()
    } else {
        "N/A".to_string()
    };
    table.add_row(vec![
        ui::amount_cell(&rate),
        Cell::new(source_name),
        ui::status_cell(converter.status()),
    ]);
    table.to_string()
}
