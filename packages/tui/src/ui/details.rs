use crate::ui::foto_label;
use bodega_catalog::Producto;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

fn detail_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

/// Render the product details screen
pub fn render_with_area(frame: &mut Frame, producto: &Producto, area: Rect) {
    let title = format!(
        "Detalle del Producto: {} - d Eliminar • Esc Volver",
        producto.nombre
    );
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Cyan))
        .borders(Borders::ALL);

    let details = vec![
        detail_line("Foto", foto_label(producto.url_fotografia.as_deref())),
        Line::raw(""),
        detail_line("Nombre", producto.nombre.clone()),
        detail_line(
            "Descripción",
            producto.descripcion.clone().unwrap_or_default(),
        ),
        detail_line("Precio", format!("${:.2}", producto.precio)),
        detail_line("Estado", producto.estado.to_string()),
        detail_line("Categoría", producto.categoria.clone().unwrap_or_default()),
        Line::raw(""),
        detail_line("ID", producto.id.to_string()),
    ];

    let paragraph = Paragraph::new(Text::from(details))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
