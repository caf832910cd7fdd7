use chrono::Utc;
use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::{NewQuotation, Quotation};

/// Process-local quotation table. Clones share the same rows.
#[derive(Clone, Default)]
pub struct MemoryQuotations {
    rows: Arc<Mutex<Vec<Quotation>>>,
}

impl MemoryQuotations {
    pub fn insert(&self, new: &NewQuotation) -> Result<i64, AppError> {
        let mut rows = self.rows.lock().map_err(|_| AppError::Poisoned)?;
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        rows.push(new.clone().into_stored(id, Utc::now()));
        Ok(id)
    }

    pub fn latest(&self) -> Result<Option<Quotation>, AppError> {
        let rows = self.rows.lock().map_err(|_| AppError::Poisoned)?;
        Ok(rows
            .iter()
            .max_by(|a, b| a.fecha.cmp(&b.fecha).then(a.id.cmp(&b.id)))
            .cloned())
    }

    /// Places a row exactly as given, bypassing submission checks.
    pub fn push_raw(&self, row: Quotation) -> Result<(), AppError> {
        self.rows.lock().map_err(|_| AppError::Poisoned)?.push(row);
        Ok(())
    }

    pub fn rows(&self) -> Result<Vec<Quotation>, AppError> {
        Ok(self.rows.lock().map_err(|_| AppError::Poisoned)?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_quotation(nombre: &str) -> NewQuotation {
        NewQuotation {
            nombre: nombre.to_string(),
            ciudad: "Cali".to_string(),
            direccion: "Calle 5 # 10-20".to_string(),
            celular: "3001234567".to_string(),
            productos: "[]".to_string(),
            cantidades: "[]".to_string(),
        }
    }

    #[test]
    fn latest_is_last_inserted() {
        let store = MemoryQuotations::default();
        assert!(store.latest().unwrap().is_none());

        assert_eq!(store.insert(&new_quotation("Ana")).unwrap(), 1);
        assert_eq!(store.insert(&new_quotation("Luis")).unwrap(), 2);

        let latest = store.latest().unwrap().unwrap();
        assert_eq!(latest.id, 2);
        assert_eq!(latest.nombre, "Luis");
        assert_eq!(store.rows().unwrap().len(), 2);
    }

    #[test]
    fn ids_continue_after_raw_rows() {
        let store = MemoryQuotations::default();
        store
            .push_raw(new_quotation("Importada").into_stored(40, Utc::now()))
            .unwrap();

        assert_eq!(store.insert(&new_quotation("Nueva")).unwrap(), 41);
        let ids: Vec<i64> = store.rows().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![40, 41]);
    }

    #[test]
    fn latest_orders_by_timestamp_first() {
        let store = MemoryQuotations::default();
        let newer = new_quotation("Nueva").into_stored(1, Utc::now());
        let older = new_quotation("Vieja")
            .into_stored(2, Utc::now() - chrono::Duration::hours(1));
        store.push_raw(newer).unwrap();
        store.push_raw(older).unwrap();

        assert_eq!(store.latest().unwrap().unwrap().nombre, "Nueva");
    }
}
