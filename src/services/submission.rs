//! Submission pipeline after the token check: sanitize, validate, serialize.
//!
//! The raw form arrives as ordered key/value pairs so repeated `productos[]`
//! and `cantidad[]` fields keep their order and index alignment.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::catalog::{self, Catalog};
use crate::csrf;
use crate::error::AppError;
use crate::models::NewQuotation;

pub const INVALID_PHONE: &str = "Número de celular inválido.";
pub const INVALID_LISTS: &str = "Los productos y cantidades no son válidos.";

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("phone pattern compiles"));

/// A repeated form field. Sent under its `[]` name it is a list; sent under
/// the bare name it is a scalar and never valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListField {
    Items(Vec<String>),
    NotAList,
}

impl Default for ListField {
    fn default() -> Self {
        ListField::Items(Vec::new())
    }
}

impl ListField {
    fn push(&mut self, value: String) {
        if let ListField::Items(items) = self {
            items.push(value);
        }
    }
}

/// The submission exactly as posted.
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub csrf_token: Option<String>,
    pub nombre: String,
    pub ciudad: String,
    pub direccion: String,
    pub celular: String,
    pub productos: ListField,
    pub cantidades: ListField,
}

impl SubmissionForm {
    /// Scalars keep the last value sent; unknown fields are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut form = SubmissionForm::default();
        for (name, value) in pairs {
            match name.as_str() {
                csrf::FORM_FIELD => form.csrf_token = Some(value),
                "nombre" => form.nombre = value,
                "ciudad" => form.ciudad = value,
                "direccion" => form.direccion = value,
                "celular" => form.celular = value,
                "productos[]" => form.productos.push(value),
                "cantidad[]" => form.cantidades.push(value),
                "productos" => form.productos = ListField::NotAList,
                "cantidad" => form.cantidades = ListField::NotAList,
                _ => {}
            }
        }
        form
    }

    /// Parses an `application/x-www-form-urlencoded` body. A malformed body
    /// yields an empty form, which then fails the token check.
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body).unwrap_or_default();
        Self::from_pairs(pairs)
    }
}

/// Contact fields after sanitizing.
#[derive(Debug, Clone, Validate)]
pub struct ContactDetails {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
    #[validate(custom(function = known_city))]
    pub ciudad: String,
    #[validate(length(min = 1, message = "La dirección es obligatoria."))]
    pub direccion: String,
    // Same text as INVALID_PHONE; phone_is_checked_before_other_fields compares them
    #[validate(regex(path = *PHONE_PATTERN, message = "Número de celular inválido."))]
    pub celular: String,
}

fn known_city(ciudad: &str) -> Result<(), ValidationError> {
    if catalog::is_known_city(ciudad) {
        Ok(())
    } else {
        Err(ValidationError::new("city").with_message(Cow::Borrowed("Ciudad no válida.")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSelection {
    pub producto: String,
    pub cantidad: u32,
}

/// A submission that passed every check; `lines` pairs each product with its
/// quantity so the two stored arrays cannot diverge.
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    pub contact: ContactDetails,
    pub lines: Vec<LineSelection>,
}

/// Removes `<...>` runs (an unterminated `<` drops the rest) and control
/// characters, then trims. Quotes and `&` are kept; views escape them.
pub fn sanitize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    for c in raw.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            c if c.is_control() && c != '\t' => {}
            c => out.push(c),
        }
    }
    out.trim().to_string()
}

/// Keeps digits and the sign characters an integer may carry.
pub fn sanitize_phone(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+' || *c == '-')
        .collect()
}

pub fn sanitize(form: &SubmissionForm) -> ContactDetails {
    ContactDetails {
        nombre: sanitize_text(&form.nombre),
        ciudad: sanitize_text(&form.ciudad),
        direccion: sanitize_text(&form.direccion),
        celular: sanitize_phone(&form.celular),
    }
}

// Phone first, then the order fields appear on the form
const FIELD_ORDER: [&str; 4] = ["celular", "nombre", "ciudad", "direccion"];

fn first_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    FIELD_ORDER
        .iter()
        .filter_map(|name| fields.get(*name).and_then(|errs| errs.first()))
        .chain(fields.values().flat_map(|errs| errs.iter()))
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Datos del formulario inválidos.".to_string())
}

fn pair_lines(
    productos: &ListField,
    cantidades: &ListField,
    catalog: &Catalog,
) -> Result<Vec<LineSelection>, AppError> {
    let (ListField::Items(productos), ListField::Items(cantidades)) = (productos, cantidades) else {
        return Err(AppError::Validation(INVALID_LISTS.to_string()));
    };
    if productos.len() != cantidades.len() {
        return Err(AppError::Validation(INVALID_LISTS.to_string()));
    }

    productos
        .iter()
        .zip(cantidades)
        .map(|(producto, cantidad)| {
            let producto = producto.trim();
            if !catalog.contains(producto) {
                return Err(AppError::Validation(format!("Producto no disponible: {producto}")));
            }
            let cantidad = cantidad
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|q| *q > 0)
                .ok_or_else(|| AppError::Validation(format!("Cantidad inválida para {producto}.")))?;
            Ok(LineSelection {
                producto: producto.to_string(),
                cantidad,
            })
        })
        .collect()
}

pub fn validate(form: &SubmissionForm, catalog: &Catalog) -> Result<ValidatedSubmission, AppError> {
    let contact = sanitize(form);

    if let Err(errors) = contact.validate() {
        return Err(AppError::Validation(first_message(&errors)));
    }

    let lines = pair_lines(&form.productos, &form.cantidades, catalog)?;
    Ok(ValidatedSubmission { contact, lines })
}

/// Encodes both parallel arrays as JSON. Quantities are stored as strings,
/// the format existing rows already use.
pub fn serialize(submission: ValidatedSubmission) -> Result<NewQuotation, AppError> {
    let (productos, cantidades): (Vec<String>, Vec<String>) = submission
        .lines
        .into_iter()
        .map(|line| (line.producto, line.cantidad.to_string()))
        .unzip();

    Ok(NewQuotation {
        nombre: submission.contact.nombre,
        ciudad: submission.contact.ciudad,
        direccion: submission.contact.direccion,
        celular: submission.contact.celular,
        productos: serde_json::to_string(&productos)?,
        cantidades: serde_json::to_string(&cantidades)?,
    })
}

/// Sanitize, validate, serialize.
pub fn prepare(form: &SubmissionForm, catalog: &Catalog) -> Result<NewQuotation, AppError> {
    serialize(validate(form, catalog)?)
}
