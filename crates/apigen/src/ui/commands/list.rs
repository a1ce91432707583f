use std::path::Path;

use apigen::generator::{ast::DescriptorSet, orchestrator::Orchestrator};
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};

use super::read_source;
use crate::ui::{Colors, term_width};

fn endpoint_table(set: &DescriptorSet, colors: &Colors) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  for title in ["RECEIVER", "METHOD", "VERB", "ROUTE", "AUTH", "PARAMS"] {
    header.add_cell(Cell::new(title).fg(Colors::cell(colors.label())));
  }
  table.set_header(header);

  for endpoint in set.iter_endpoints() {
    let mut row = Row::new();
    row.add_cell(Cell::new(&endpoint.receiver).fg(Colors::cell(colors.primary())));
    row.add_cell(
      Cell::new(&endpoint.method)
        .fg(Colors::cell(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(endpoint.http_method_label())
        .fg(Colors::cell(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(&endpoint.route).fg(Colors::cell(colors.primary())));
    row.add_cell(Cell::new(if endpoint.auth { "yes" } else { "no" }));
    row.add_cell(Cell::new(&endpoint.param_type));
    table.add_row(row);
  }

  table
}

pub async fn list_endpoints(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let source = read_source(input).await?;
  let set = Orchestrator::new(source).descriptors()?;

  println!("{}", endpoint_table(&set, colors));

  Ok(())
}
