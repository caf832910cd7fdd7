use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A stored quotation row. `productos` and `cantidades` hold the serialized
/// JSON arrays exactly as persisted.
#[derive(Debug, Clone, FromRow)]
pub struct Quotation {
    pub id: i64,
    pub nombre: String,
    pub ciudad: String,
    pub direccion: String,
    pub celular: String,
    pub productos: String,
    pub cantidades: String,
    pub fecha: DateTime<Utc>,
}

/// Values bound into the single INSERT. Built only from a validated submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuotation {
    pub nombre: String,
    pub ciudad: String,
    pub direccion: String,
    pub celular: String,
    pub productos: String,
    pub cantidades: String,
}

impl NewQuotation {
    pub(crate) fn into_stored(self, id: i64, fecha: DateTime<Utc>) -> Quotation {
        Quotation {
            id,
            nombre: self.nombre,
            ciudad: self.ciudad,
            direccion: self.direccion,
            celular: self.celular,
            productos: self.productos,
            cantidades: self.cantidades,
            fecha,
        }
    }
}

impl Quotation {
    pub async fn insert(new: &NewQuotation, db: &crate::database::Database) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO cotizaciones (nombre, ciudad, direccion, celular, productos, cantidades)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id"
        )
        .bind(&new.nombre)
        .bind(&new.ciudad)
        .bind(&new.direccion)
        .bind(&new.celular)
        .bind(&new.productos)
        .bind(&new.cantidades)
        .fetch_one(&db.pool)
        .await
    }

    // Most recent by insertion time; id breaks ties within the same timestamp
    pub async fn latest(db: &crate::database::Database) -> Result<Option<Quotation>, sqlx::Error> {
        sqlx::query_as::<_, Quotation>(
            "SELECT id, nombre, ciudad, direccion, celular, productos, cantidades, fecha
             FROM cotizaciones
             ORDER BY fecha DESC, id DESC
             LIMIT 1"
        )
        .fetch_optional(&db.pool)
        .await
    }
}
