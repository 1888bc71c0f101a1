use super::normalizer::{normalize_header, parse_days, parse_decimal};
use super::{CommercialImportError, RowRejection};
use crate::margin::ClientCommercialConfig;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) const CLIENT_ID_HEADER: &str = "client id";

/// One parsed spreadsheet row. Empty cells are `None` and leave stored values untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommercialRow {
    pub line: u64,
    pub client_id: String,
    pub client_name: Option<String>,
    pub commercial: ClientCommercialConfig,
}

pub(crate) enum ParsedRow {
    Valid(CommercialRow),
    Rejected(RowRejection),
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ParsedRow>, CommercialImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: csv::StringRecord = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();
    if !headers.iter().any(|header| header == CLIENT_ID_HEADER) {
        return Err(CommercialImportError::MissingColumn("Client ID"));
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|position| position.line()).unwrap_or(0);
        let row = match record.deserialize::<CommercialCsvRow>(Some(&headers)) {
            Ok(row) => row,
            Err(err) => {
                rows.push(ParsedRow::Rejected(RowRejection {
                    line,
                    client_id: None,
                    reason: err.to_string(),
                }));
                continue;
            }
        };
        rows.push(row.into_parsed(line));
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct CommercialCsvRow {
    #[serde(rename = "client id", default, deserialize_with = "empty_string_as_none")]
    client_id: Option<String>,
    #[serde(rename = "client name", default, deserialize_with = "empty_string_as_none")]
    client_name: Option<String>,
    #[serde(
        rename = "target margin %",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    target_margin_percent: Option<String>,
    #[serde(
        rename = "minimum margin %",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    minimum_margin_percent: Option<String>,
    #[serde(rename = "discount %", default, deserialize_with = "empty_string_as_none")]
    discount_percent: Option<String>,
    #[serde(
        rename = "forced vacation days",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    forced_vacation_days: Option<String>,
    #[serde(
        rename = "target hourly rate",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    target_hourly_rate: Option<String>,
}

impl CommercialCsvRow {
    fn into_parsed(self, line: u64) -> ParsedRow {
        let commercial = self.commercial();
        match (self.client_id, commercial) {
            (None, _) => ParsedRow::Rejected(RowRejection {
                line,
                client_id: None,
                reason: "missing client id".to_string(),
            }),
            (Some(client_id), Ok(commercial)) => ParsedRow::Valid(CommercialRow {
                line,
                client_id,
                client_name: self.client_name,
                commercial,
            }),
            (Some(client_id), Err(reason)) => ParsedRow::Rejected(RowRejection {
                line,
                client_id: Some(client_id),
                reason,
            }),
        }
    }

    fn commercial(&self) -> Result<ClientCommercialConfig, String> {
        Ok(ClientCommercialConfig {
            target_margin_percent: decimal_cell("Target Margin %", &self.target_margin_percent)?,
            minimum_margin_percent: decimal_cell(
                "Minimum Margin %",
                &self.minimum_margin_percent,
            )?,
            discount_percent: decimal_cell("Discount %", &self.discount_percent)?,
            forced_vacation_days_per_year: self
                .forced_vacation_days
                .as_deref()
                .map(parse_days)
                .transpose()
                .map_err(|err| format!("Forced Vacation Days: {err}"))?,
            target_hourly_rate: decimal_cell("Target Hourly Rate", &self.target_hourly_rate)?,
        })
    }
}

fn decimal_cell(
    column: &str,
    cell: &Option<String>,
) -> Result<Option<rust_decimal::Decimal>, String> {
    cell.as_deref()
        .map(parse_decimal)
        .transpose()
        .map_err(|err| format!("{column}: {err}"))
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
