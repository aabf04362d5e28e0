use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::models::RawDeal;
use crate::parser::schema::{ColumnSpec, DEAL_SCHEMA};
use crate::parser::ParseError;

/// Parses an uploaded deal file into raw rows, in file order.
///
/// The whole file is rejected on the first structural problem: a missing
/// required header, a row whose field count differs from the header, invalid
/// UTF-8, or an amount that is not a decimal literal. Blank lines are skipped.
pub fn parse_deals(bytes: &[u8]) -> Result<Vec<RawDeal>, ParseError> {
    if bytes.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let bindings = bind_columns(&headers, &DEAL_SCHEMA)?;
    let mut deals = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|position| position.line()).unwrap_or_default();
        let mut deal = RawDeal { line, ..RawDeal::default() };

        for (index, column) in &bindings {
            let value = record.get(*index).unwrap_or_default();

            (column.coerce)(&mut deal, value).map_err(|message| ParseError::InvalidField {
                line,
                column: column.name,
                message
            })?;
        }

        deals.push(deal);
    }

    debug!("Parsed {} deal rows", deals.len());

    Ok(deals)
}

/// Resolves every schema column to its position in the header row.
fn bind_columns<'a>(headers: &StringRecord, schema: &'a [ColumnSpec]) -> Result<Vec<(usize, &'a ColumnSpec)>, ParseError> {
    let mut bindings = Vec::with_capacity(schema.len());
    let mut missing = Vec::new();

    for column in schema {
        match headers.iter().position(|header| header == column.name) {
            Some(index) => bindings.push((index, column)),
            None if column.required => missing.push(column.name),
            None => {}
        }
    }

    if !missing.is_empty() {
        return Err(ParseError::MissingColumns(missing));
    }

    Ok(bindings)
}
