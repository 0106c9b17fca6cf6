use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::form::{ClientForm, FormField};
use crate::models::HEADERS;

/// Fields in the order they are drawn, one per line.
pub(crate) const FIELDS: [FormField; 4] = [
    FormField::Name,
    FormField::Code,
    FormField::TaxId,
    FormField::Status,
];

/// Label shown before a field; the same text as the matching table header.
pub(crate) fn field_label(field: FormField) -> &'static str {
    match field {
        FormField::Name => HEADERS[0],
        FormField::Code => HEADERS[1],
        FormField::TaxId => HEADERS[2],
        FormField::Status => HEADERS[3],
    }
}

/// Prefix width shared by every line so the values line up.
pub(crate) fn label_width() -> usize {
    FIELDS
        .iter()
        .map(|field| field_label(*field).chars().count())
        .max()
        .unwrap_or(0)
        + 2
}

/// Render a single line of the form. `focused` is false while the table has
/// focus, in which case no field is highlighted.
pub(crate) fn build_line(form: &ClientForm, field: FormField, focused: bool) -> Line<'static> {
    let is_active = focused && form.active == field;
    let value = form.value(field);

    let display = match field {
        FormField::Status => format!("< {value} >"),
        _ if value.is_empty() => "<obrigatório>".to_string(),
        _ => value.to_string(),
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let label = format!("{}:", field_label(field));
    Line::from(vec![
        Span::raw(format!("{label:<width$}", width = label_width())),
        Span::styled(display, style),
    ])
}

/// Line drawn under the fields: the last submit error in red, or nothing.
pub(crate) fn error_line(form: &ClientForm) -> Line<'static> {
    match &form.error {
        Some(error) => Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(""),
    }
}

/// Column offset of the text cursor for the active field, or `None` for the
/// status selector which takes no typed input.
pub(crate) fn cursor_offset(form: &ClientForm) -> Option<usize> {
    match form.active {
        FormField::Status => None,
        field => Some(label_width() + form.value_len(field)),
    }
}
