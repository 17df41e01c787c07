pub mod details;
pub mod form;
pub mod list;

use crate::state::{AppState, Screen, PLACEHOLDER_FOTO};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Main UI rendering function
pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Main content area (flexible)
            Constraint::Length(1), // Status bar (fixed height)
        ])
        .split(frame.area());

    match &state.screen {
        Screen::List => list::render_with_area(frame, state, chunks[0]),
        Screen::Form { draft } => form::render_with_area(frame, draft, chunks[0]),
        Screen::Details { producto } => details::render_with_area(frame, producto, chunks[0]),
    }

    render_status_bar(frame, state, chunks[1]);
}

fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let (text, style) = match &state.alert {
        Some(alert) => (
            alert.clone(),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
        None => (
            "Bodega".to_string(),
            Style::default().fg(Color::Gray).bg(Color::Black),
        ),
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}

/// Displayable label for a photo reference. References that cannot be
/// rendered (empty, or neither a URL nor a data URI) fall back to the
/// placeholder reference instead of surfacing an error.
pub fn foto_label(url: Option<&str>) -> String {
    match url {
        Some(uri) if uri.starts_with("data:") => {
            // Do not dump the whole base64 payload into the frame
            let kb = uri.len() * 3 / 4 / 1024;
            format!("foto capturada (~{} KB)", kb.max(1))
        }
        Some(u) if u.starts_with("http://") || u.starts_with("https://") => u.to_string(),
        _ => PLACEHOLDER_FOTO.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrenderable_photo_references_fall_back_to_the_placeholder() {
        assert_eq!(foto_label(None), PLACEHOLDER_FOTO);
        assert_eq!(foto_label(Some("")), PLACEHOLDER_FOTO);
        assert_eq!(foto_label(Some("C:\\fotos\\silla.jpg")), PLACEHOLDER_FOTO);
    }

    #[test]
    fn urls_are_shown_verbatim_and_data_uris_are_summarized() {
        assert_eq!(
            foto_label(Some("https://example.com/silla.jpg")),
            "https://example.com/silla.jpg"
        );
        let label = foto_label(Some("data:image/jpeg;base64,AAAA"));
        assert!(label.starts_with("foto capturada"));
    }
}
