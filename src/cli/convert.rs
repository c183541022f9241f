use super::ui;
use crate::core::{Converter, Edit, Field, RateSource};
use anyhow::Result;
use comfy_table::Cell;
use std::io::Write;

/// Refreshes the rate, applies a single edit and prints both fields.
pub async fn run<W: Write>(
    converter: &mut Converter,
    source: &dyn RateSource,
    edit: Edit,
    output: &mut W,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching exchange rate...");
    converter.refresh_rate(source).await;
    pb.finish_and_clear();

    let edited = edit.source;
    converter.apply(edit);
    writeln!(output, "{}", display_fields(converter, edited))?;
    writeln!(output, "{}", ui::style_status(converter.status()))?;
    Ok(())
}

/// Renders both fields, highlighting the derived one.
pub fn display_fields(converter: &Converter, edited: Field) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("EUR"),
        ui::header_cell("Toman"),
        ui::header_cell("Rate"),
    ]);

    let (euro, toman) = match edited {
        Field::Euro => (
            ui::amount_cell(converter.euro()),
            ui::amount_cell(converter.toman()).fg(comfy_table::Color::Green),
        ),
        Field::Toman => (
            ui::amount_cell(converter.euro()).fg(comfy_table::Color::Green),
            ui::amount_cell(converter.toman()),
        ),
    };
    table.add_row(vec![euro, toman, Cell::new(converter.rate().to_string())]);
    table.to_string()
}
