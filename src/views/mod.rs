//! HTML rendering. Everything that came from a user goes through
//! [`escape_html`] here; callers pass raw values.

pub mod form;
pub mod summary;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css";

/// Escapes the five characters that matter in element content and quoted
/// attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// `$` followed by the amount with thousands separators and two decimals,
/// e.g. `$1,200,000.00`.
pub fn format_money(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("${sign}{grouped}.00")
}

pub fn page(title: &str, body_class: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="{BOOTSTRAP_CSS}">
</head>
<body class="{body_class}">
{body}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

pub fn error_heading(message: &str) -> String {
    format!(
        "<h2 style='color: red;'>{}</h2>",
        escape_html(message)
    )
}

pub fn alert(kind: &str, message: &str) -> String {
    format!(
        "<div class='alert alert-{}'>{}</div>",
        kind,
        escape_html(message)
    )
}
