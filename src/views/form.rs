use std::fmt::Write;

use crate::catalog::{Catalog, CITIES};
use crate::csrf;

use super::{escape_html, page};

const TOGGLE_SCRIPT: &str = r#"<script>
        function toggleCantidad(checkbox) {
            let cantidad = document.getElementById("cantidad_" + checkbox.dataset.index);
            cantidad.disabled = !checkbox.checked;
            if (!checkbox.checked) cantidad.value = '';
        }
    </script>"#;

pub fn render_form(token: &str, catalog: &Catalog) -> String {
    let mut cities = String::new();
    for city in CITIES {
        let city = escape_html(city);
        let _ = writeln!(cities, r#"                <option value="{city}">{city}</option>"#);
    }

    // Quantity inputs stay disabled until checked, so cantidad[] only
    // carries values for selected products and stays index-aligned.
    let mut products = String::new();
    for (index, product) in catalog.products().iter().enumerate() {
        let name = escape_html(&product.name);
        let _ = write!(
            products,
            r#"
            <div class="col-md-6 mb-3">
                <div class="form-check">
                    <input class="form-check-input" type="checkbox" id="producto_{index}" name="productos[]" value="{name}" data-index="{index}" onclick="toggleCantidad(this)">
                    <label class="form-check-label" for="producto_{index}">{name}</label>
                </div>
                <input type="number" class="form-control mt-1" id="cantidad_{index}" name="cantidad[]" min="1" placeholder="Cantidad" disabled>
            </div>"#
        );
    }

    let body = format!(
        r#"{TOGGLE_SCRIPT}
<div class="container mt-5">
    <div class="card shadow-lg">
        <div class="card-header bg-primary text-white text-center">
            <h2 class="mb-0">Formulario de Cotización</h2>
        </div>
        <div class="card-body">
        <form action="/cotizacion" method="POST">
            <input type="hidden" name="{field}" value="{token}">

            <div class="mb-3">
                <label for="nombre" class="form-label">Nombres y Apellidos:</label>
                <input type="text" class="form-control" id="nombre" name="nombre" required>
            </div>

            <div class="mb-3">
                <label for="ciudad" class="form-label">Ciudad:</label>
                <select class="form-select" id="ciudad" name="ciudad" required>
                <option value="">Seleccione una ciudad</option>
{cities}                </select>
            </div>

            <div class="mb-3">
                <label for="direccion" class="form-label">Dirección:</label>
                <input type="text" class="form-control" id="direccion" name="direccion" required>
            </div>

            <div class="mb-3">
                <label for="celular" class="form-label">Celular:</label>
                <input type="tel" class="form-control" id="celular" name="celular" maxlength="10" minlength="10" pattern="\d{{10}}" title="Debe ser un número de 10 dígitos" required>
            </div>

            <h4 class="text-primary mt-4">Selecciona los productos y sus cantidades:</h4>
            <div class="row">{products}
            </div>

            <div class="mt-3 d-flex justify-content-between">
                <button type="submit" class="btn btn-success">Enviar cotización</button>
                <a href="/cotizacion" class="btn btn-danger">Cancelar</a>
            </div>
        </form>
        </div>
    </div>
</div>"#,
        field = csrf::FORM_FIELD,
        token = escape_html(token),
    );

    page("Formulario de Cotización", "bg-light", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_token_and_every_product() {
        let catalog = Catalog::default();
        let html = render_form("deadbeef", &catalog);

        assert!(html.contains(r#"<input type="hidden" name="csrf_token" value="deadbeef">"#));
        for product in catalog.products() {
            assert!(html.contains(&format!(r#"value="{}""#, product.name)));
        }
        assert_eq!(html.matches(r#"name="cantidad[]""#).count(), catalog.products().len());
        assert!(html.contains(r#"<option value="Medellín">Medellín</option>"#));
    }

    #[test]
    fn product_names_are_escaped() {
        let catalog = Catalog::new([(r#"Cable "HDMI" <2m>"#, 10_000)]);
        let html = render_form("t", &catalog);
        assert!(html.contains("Cable &quot;HDMI&quot; &lt;2m&gt;"));
    }
}
