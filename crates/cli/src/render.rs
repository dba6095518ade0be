//! Plain-text layout of the form view model.

use std::fmt::Write as _;

use physio_core::{FieldView, FooterView, FormView, TabView};

/// Renders the tab bar, the active section's fields and the footer.
pub fn render_form(view: &FormView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out, "{}", render_tabs(&view.tabs));
    let _ = writeln!(out, "{}", "-".repeat(view.title.len().max(40)));

    for field in &view.fields {
        out.push_str(&render_field(field));
    }

    if let Some(footer) = &view.footer {
        let _ = writeln!(out, "{}", render_footer(footer));
    }
    out
}

fn render_tabs(tabs: &[TabView]) -> String {
    tabs.iter()
        .map(|tab| {
            let marker = if tab.has_errors { "*" } else { "" };
            if tab.active {
                format!("[{}{}]", tab.label, marker)
            } else {
                format!(" {}{} ", tab.label, marker)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_field(field: &FieldView) -> String {
    let mut out = String::new();
    let required = if field.required { " *" } else { "" };
    let locked = if field.disabled { " (read-only)" } else { "" };
    let value = field.value.to_string();
    let value = if value.is_empty() { "-" } else { value.as_str() };

    let _ = writeln!(out, "{}{}{}: {}", field.label, required, locked, value);
    if let Some(error) = &field.error {
        let _ = writeln!(out, "    ! {error}");
    }
    out
}

fn render_footer(footer: &FooterView) -> String {
    let state = |enabled: bool| if enabled { "" } else { " (disabled)" };
    format!(
        "[ {}{} ] [ {}{} ]",
        footer.submit_label,
        state(footer.submit_enabled),
        footer.cancel_label,
        state(footer.cancel_enabled)
    )
}
