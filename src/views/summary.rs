use std::fmt::Write;

use crate::services::summary::QuotationSummary;

use super::{escape_html, format_money, page};

pub fn render_summary(summary: &QuotationSummary) -> String {
    let mut rows = String::new();
    for line in &summary.lines {
        let _ = write!(
            rows,
            r#"
            <tr>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
            </tr>"#,
            escape_html(&line.producto),
            line.cantidad,
            format_money(line.precio_unitario),
            format_money(line.total),
        );
    }

    let body = format!(
        r#"<h2 class="text-center">Resumen de Cotización</h2>

<table class="table table-bordered mt-3">
    <tr><th>Nombre</th><td>{nombre}</td></tr>
    <tr><th>Ciudad</th><td>{ciudad}</td></tr>
    <tr><th>Dirección</th><td>{direccion}</td></tr>
    <tr><th>Celular</th><td>{celular}</td></tr>
</table>

<h4 class="mt-4">Productos Cotizados</h4>
<table class="table table-striped">
    <thead>
        <tr>
            <th>Producto</th>
            <th>Cantidad</th>
            <th>Precio Unitario</th>
            <th>Total</th>
        </tr>
    </thead>
    <tbody>{rows}
    </tbody>
    <tfoot>
        <tr>
            <th colspan="3" class="text-end">Total General:</th>
            <th>{gran_total}</th>
        </tr>
    </tfoot>
</table>

<div class="mt-3">
    <a href="/cotizacion" class="btn btn-primary">Nueva Cotización</a>
</div>"#,
        nombre = escape_html(&summary.nombre),
        ciudad = escape_html(&summary.ciudad),
        direccion = escape_html(&summary.direccion),
        celular = escape_html(&summary.celular),
        gran_total = format_money(summary.gran_total),
    );

    page("Vista de Cotización", "container mt-4", &body)
}
