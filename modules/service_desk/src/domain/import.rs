//! Spreadsheet interchange: client import and inventory export
//!
//! The client sheet uses the Spanish headers of the paper intake form
//! (`Cedula`, `Nombre`, `Telefono`, `Email`, `Direccion`, `Categoria`).
//! Header matching ignores case, accents and surrounding whitespace.

use crate::contract::{ClientCategory, NewClient, Part, ServiceDeskError};
use std::collections::HashMap;

/// One data row of the client sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientRow {
    /// Row carries the required columns
    Valid { row: usize, client: NewClient },
    /// Row lacks `Cedula` or `Nombre` and is not imported
    Skipped { row: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Column {
    NationalId,
    FullName,
    Phone,
    Email,
    Address,
    Category,
}

impl Column {
    fn from_header(header: &str) -> Option<Self> {
        match fold_header(header).as_str() {
            "cedula" | "ci" | "rif" => Some(Self::NationalId),
            "nombre" | "nombre completo" | "cliente" => Some(Self::FullName),
            "telefono" | "celular" => Some(Self::Phone),
            "email" | "correo" => Some(Self::Email),
            "direccion" => Some(Self::Address),
            "categoria" | "tipo" => Some(Self::Category),
            _ => None,
        }
    }
}

/// Lowercase, strip accents and collapse inner whitespace
fn fold_header(header: &str) -> String {
    header
        .trim()
        .chars()
        .map(|c| match c {
            'á' | 'Á' => 'a',
            'é' | 'É' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'Ó' => 'o',
            'ú' | 'Ú' | 'ü' | 'Ü' => 'u',
            'ñ' | 'Ñ' => 'n',
            other => other.to_ascii_lowercase(),
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map the sheet's category labels, falling back to REGULAR
pub fn parse_category(raw: &str) -> ClientCategory {
    match fold_header(raw).as_str() {
        "premium" => ClientCategory::Premium,
        "enterprise" | "empresa" | "empresarial" | "corporativo" => ClientCategory::Enterprise,
        _ => ClientCategory::Regular,
    }
}

/// Parse a client sheet exported as CSV
///
/// Fails only when the sheet cannot be read or lacks the required headers;
/// incomplete rows are reported as [`ClientRow::Skipped`].
pub fn parse_client_sheet(bytes: &[u8]) -> Result<Vec<ClientRow>, ServiceDeskError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader.headers().map_err(import_error)?.clone();
    let columns: HashMap<Column, usize> = headers
        .iter()
        .enumerate()
        .filter_map(|(idx, header)| {
            let header = header.trim_start_matches('\u{feff}');
            Column::from_header(header).map(|column| (column, idx))
        })
        .collect();

    for required in [Column::NationalId, Column::FullName] {
        if !columns.contains_key(&required) {
            return Err(ServiceDeskError::Import {
                details: format!(
                    "missing required column '{}'",
                    match required {
                        Column::NationalId => "Cedula",
                        _ => "Nombre",
                    }
                ),
            });
        }
    }

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        // Spreadsheet row number; the header is row 1
        let row = idx + 2;
        let record = record.map_err(import_error)?;
        let cell = |column: Column| -> Option<String> {
            columns
                .get(&column)
                .and_then(|&i| record.get(i))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let (Some(national_id), Some(full_name)) =
            (cell(Column::NationalId), cell(Column::FullName))
        else {
            rows.push(ClientRow::Skipped { row });
            continue;
        };

        rows.push(ClientRow::Valid {
            row,
            client: NewClient {
                national_id,
                full_name,
                phone: cell(Column::Phone),
                email: cell(Column::Email),
                address: cell(Column::Address),
                category: cell(Column::Category)
                    .map(|c| parse_category(&c))
                    .unwrap_or_default(),
            },
        });
    }

    Ok(rows)
}

/// Render the inventory as CSV
pub fn write_parts_sheet(parts: &[Part]) -> Result<Vec<u8>, ServiceDeskError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "code",
            "name",
            "stock_level",
            "min_stock",
            "unit_cost",
            "unit_price",
        ])
        .map_err(export_error)?;

    for part in parts {
        writer
            .write_record([
                part.code.clone(),
                part.name.clone(),
                part.stock_level.to_string(),
                part.min_stock.to_string(),
                part.unit_cost.to_string(),
                part.unit_price.to_string(),
            ])
            .map_err(export_error)?;
    }

    writer.into_inner().map_err(|e| {
        tracing::error!("Failed to flush parts sheet: {}", e);
        ServiceDeskError::Internal
    })
}

fn import_error(e: csv::Error) -> ServiceDeskError {
    ServiceDeskError::Import {
        details: e.to_string(),
    }
}

fn export_error(e: csv::Error) -> ServiceDeskError {
    tracing::error!("Failed to write parts sheet: {}", e);
    ServiceDeskError::Internal
}
