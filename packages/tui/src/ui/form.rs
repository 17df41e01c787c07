use crate::state::{FormField, ProductoForm};
use crate::ui::foto_label;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

const FIELDS: [FormField; 5] = [
    FormField::Nombre,
    FormField::Descripcion,
    FormField::Precio,
    FormField::Estado,
    FormField::Categoria,
];

/// Render the product creation form
pub fn render_with_area(frame: &mut Frame, draft: &ProductoForm, area: Rect) {
    let block = Block::default()
        .title("Crear Producto - Enter Guardar • Ctrl+T Tomar Foto • Esc Volver")
        .title_style(Style::default().fg(Color::Cyan))
        .borders(Borders::ALL);

    let mut lines: Vec<Line> = Vec::new();
    for field in FIELDS {
        let value = match field {
            FormField::Nombre => draft.nombre.clone(),
            FormField::Descripcion => draft.descripcion.clone(),
            FormField::Precio => draft.precio.clone(),
            FormField::Estado => format!("{} (←/→ cambiar)", draft.estado),
            FormField::Categoria => draft.categoria.clone(),
        };

        let focused = draft.focus == field;
        let marker = if focused { "> " } else { "  " };
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };

        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{}: ", field.label()), label_style),
            Span::styled(value, Style::default().fg(Color::White)),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("Foto: ", Style::default().fg(Color::Yellow)),
        Span::styled(
            foto_label(Some(&draft.url_fotografia)),
            Style::default().fg(Color::Gray),
        ),
    ]));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
