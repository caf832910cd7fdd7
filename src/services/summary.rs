use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::warn;

use crate::catalog::Catalog;
use crate::error::AppError;
use crate::models::Quotation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub producto: String,
    pub cantidad: i64,
    pub precio_unitario: i64,
    pub total: i64,
}

#[derive(Debug, Clone)]
pub struct QuotationSummary {
    pub id: i64,
    pub nombre: String,
    pub ciudad: String,
    pub direccion: String,
    pub celular: String,
    pub fecha: DateTime<Utc>,
    pub lines: Vec<SummaryLine>,
    pub gran_total: i64,
}

/// Reads a stored quantity the lenient way stored rows require: numbers and
/// numeric strings count, a leading integer prefix counts, anything else is 0.
fn quantity_of(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => leading_integer(s),
        Some(Value::Bool(true)) => 1,
        _ => 0,
    }
}

fn leading_integer(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

/// Joins a stored quotation against the price list.
///
/// A product missing from `catalog` is priced at 0 and still listed. That
/// keeps old rows renderable after catalog changes, but it also hides
/// mistyped names, so each occurrence is logged.
pub fn summarize(quotation: &Quotation, catalog: &Catalog) -> Result<QuotationSummary, AppError> {
    let productos: Vec<String> = serde_json::from_str(&quotation.productos)?;
    let cantidades: Vec<Value> = serde_json::from_str(&quotation.cantidades)?;

    let mut gran_total: i64 = 0;
    let lines: Vec<SummaryLine> = productos
        .into_iter()
        .enumerate()
        .map(|(index, producto)| {
            let cantidad = quantity_of(cantidades.get(index));
            let precio_unitario = catalog.unit_price(&producto).unwrap_or_else(|| {
                warn!(
                    "quotation {} lists unknown product {:?}, pricing it at 0",
                    quotation.id, producto
                );
                0
            });
            let total = cantidad.saturating_mul(precio_unitario);
            gran_total = gran_total.saturating_add(total);
            SummaryLine {
                producto,
                cantidad,
                precio_unitario,
                total,
            }
        })
        .collect();

    Ok(QuotationSummary {
        id: quotation.id,
        nombre: quotation.nombre.clone(),
        ciudad: quotation.ciudad.clone(),
        direccion: quotation.direccion.clone(),
        celular: quotation.celular.clone(),
        fecha: quotation.fecha,
        lines,
        gran_total,
    })
}
