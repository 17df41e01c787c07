use crate::state::AppState;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

/// Render the product list screen
pub fn render_with_area(frame: &mut Frame, state: &AppState, area: Rect) {
    if state.productos.is_empty() {
        let block = Block::default()
            .title("Lista de Productos")
            .title_style(Style::default().fg(Color::Yellow))
            .borders(Borders::ALL);

        let paragraph = Paragraph::new(
            "No hay productos para mostrar.\n\n\
             • 'n' - Agregar nuevo producto\n\
             • 'r' - Recargar\n\
             • 'q' - Salir",
        )
        .block(block)
        .style(Style::default().fg(Color::Gray));
        frame.render_widget(paragraph, area);
        return;
    }

    let title = format!(
        "Lista de Productos ({}) - ↑↓ Navegar • Enter Ver • n Nuevo • r Recargar • q Salir",
        state.productos.len()
    );
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Green))
        .borders(Borders::ALL);

    let items: Vec<ListItem> = state
        .productos
        .iter()
        .map(|producto| {
            let line = Line::from(vec![
                Span::styled(
                    producto.nombre.clone(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("${:.2}", producto.precio),
                    Style::default().fg(Color::White),
                ),
                Span::raw("  "),
                Span::styled(
                    producto.estado.to_string(),
                    Style::default().fg(Color::Gray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(state.selected);

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, area, &mut list_state);
}
