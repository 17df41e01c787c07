use crate::api::{ApiClient, ApiError};
use crate::camera::{data_uri, PhotoCapture};
use crate::events::{AppEvent, EventHandler};
use crate::state::{AppState, Screen};
use crate::ui;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};

pub(crate) const FETCH_ERROR: &str = "No se pudieron obtener los productos.";
pub(crate) const CREATE_ERROR: &str = "No se pudo crear el producto.";
pub(crate) const DELETE_ERROR: &str = "No se pudo eliminar el producto.";
pub(crate) const CREATE_OK: &str = "Producto creado con éxito.";
pub(crate) const DELETE_OK: &str = "Producto eliminado con éxito.";
pub(crate) const PRECIO_INVALIDO: &str = "Precio inválido.";

/// Main TUI application struct. One user action runs to completion
/// (including its network round trip) before the next key is processed.
pub struct App {
    pub state: AppState,
    client: ApiClient,
    camera: Box<dyn PhotoCapture>,
    pub should_quit: bool,
}

impl App {
    pub fn new(client: ApiClient, camera: Box<dyn PhotoCapture>) -> Self {
        Self {
            state: AppState::new(),
            client,
            camera,
            should_quit: false,
        }
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        let mut event_handler = EventHandler::new(250); // 250ms tick rate

        // Load the catalog on startup
        self.refresh().await;

        while !self.should_quit {
            terminal.draw(|frame| {
                ui::render(frame, &self.state);
            })?;

            if let Some(event) = event_handler.next().await {
                if let AppEvent::Key(key) = event {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key).await;
                    }
                }
            }
        }

        Ok(())
    }

    /// Dispatch a key press to the handler for the current screen
    async fn handle_key_event(&mut self, key: KeyEvent) {
        match self.state.screen {
            Screen::List => self.handle_list_key(key).await,
            Screen::Form { .. } => self.handle_form_key(key).await,
            Screen::Details { .. } => self.handle_details_key(key).await,
        }
    }

    async fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('n') => {
                self.state.open_form();
            }
            KeyCode::Char('r') => self.refresh().await,
            KeyCode::Up => {
                self.state.select_previous();
            }
            KeyCode::Down => {
                self.state.select_next();
            }
            KeyCode::Enter => {
                self.state.open_details();
            }
            _ => {}
        }
    }

    async fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.back_to_list(),
            KeyCode::Enter => self.submit_form().await,
            KeyCode::Tab | KeyCode::Down => {
                if let Some(form) = self.state.form_mut() {
                    form.focus = form.focus.next();
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Some(form) = self.state.form_mut() {
                    form.focus = form.focus.previous();
                }
            }
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.capture_photo();
            }
            KeyCode::Char(c) => {
                if let Some(form) = self.state.form_mut() {
                    form.insert_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(form) = self.state.form_mut() {
                    form.backspace();
                }
            }
            KeyCode::Left | KeyCode::Right => {
                if let Some(form) = self.state.form_mut() {
                    if form.focused_text_mut().is_none() {
                        form.estado = form.estado.toggled();
                    }
                }
            }
            _ => {}
        }
    }

    async fn handle_details_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.back_to_list(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_current().await,
            _ => {}
        }
    }

    /// Refetch the whole product list. On failure the cache is left as-is.
    pub async fn refresh(&mut self) {
        match self.client.fetch_productos().await {
            Ok(productos) => self.state.set_productos(productos),
            Err(e) => self.alert_error(e, FETCH_ERROR),
        }
    }

    /// Submit the draft. On success the list is refetched before returning
    /// to it; on any failure the form and draft are left untouched.
    pub async fn submit_form(&mut self) {
        let input = match &self.state.screen {
            Screen::Form { draft } => match draft.precio.trim().parse::<f64>() {
                Ok(precio) => draft.to_create_input(precio),
                Err(_) => {
                    self.state.set_alert(PRECIO_INVALIDO);
                    return;
                }
            },
            _ => return,
        };

        match self.client.create_producto(&input).await {
            Ok(_) => {
                self.state.set_alert(CREATE_OK);
                self.refresh().await;
                self.state.back_to_list();
            }
            Err(e) => self.alert_error(e, CREATE_ERROR),
        }
    }

    /// Delete the product being viewed. On success the list is refetched
    /// before returning to it; on failure the details view stays put.
    pub async fn delete_current(&mut self) {
        let id = match self.state.detalle() {
            Some(producto) => producto.id,
            None => return,
        };

        match self.client.delete_producto(id).await {
            Ok(_) => {
                self.state.set_alert(DELETE_OK);
                self.refresh().await;
                self.state.back_to_list();
            }
            Err(e) => self.alert_error(e, DELETE_ERROR),
        }
    }

    /// Capture a photo into the draft, overwriting whatever reference it
    /// held (placeholder included). No retry on failure.
    pub fn capture_photo(&mut self) {
        match self.camera.capture() {
            Ok(bytes) => {
                let uri = data_uri(&bytes);
                if let Some(form) = self.state.form_mut() {
                    form.url_fotografia = uri;
                }
            }
            Err(e) => self.state.set_alert(format!("No se pudo tomar la foto: {}", e)),
        }
    }

    /// Every failure surfaces as exactly one alert: the server's message
    /// when there is one, a generic message for transport errors.
    fn alert_error(&mut self, error: ApiError, transport_message: &str) {
        match error {
            ApiError::Server(message) => self.state.set_alert(message),
            ApiError::Transport(_) => self.state.set_alert(transport_message),
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CaptureError;
    use crate::state::PLACEHOLDER_FOTO;
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct StubCapture(Option<Vec<u8>>);

    impl PhotoCapture for StubCapture {
        fn capture(&mut self) -> Result<Vec<u8>, CaptureError> {
            match &self.0 {
                Some(bytes) => Ok(bytes.clone()),
                None => Err(CaptureError::Empty),
            }
        }
    }

    fn producto_json(id: i64, nombre: &str) -> Value {
        json!({
            "id": id,
            "nombre": nombre,
            "descripcion": null,
            "precio": 49.99,
            "estado": "Disponible",
            "categoria": null,
            "url_fotografia": null
        })
    }

    fn app_against(server: &MockServer) -> App {
        App::new(
            ApiClient::new(server.uri()),
            Box::new(StubCapture(Some(vec![1, 2, 3]))),
        )
    }

    async fn mock_list(server: &MockServer, data: Value) {
        Mock::given(method("GET"))
            .and(path("/productos"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({
                    "message": "success",
                    "data": data
                })),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn successful_create_refetches_the_list_and_returns_to_it() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/productos"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Producto creado con éxito",
                "data": producto_json(1, "Silla")
            })))
            .mount(&server)
            .await;
        mock_list(&server, json!([producto_json(1, "Silla")])).await;

        let mut app = app_against(&server);
        app.state.open_form();
        {
            let form = app.state.form_mut().unwrap();
            form.nombre = "Silla".to_string();
            form.precio = "49.99".to_string();
        }

        app.submit_form().await;

        assert_eq!(app.state.screen, Screen::List);
        assert_eq!(app.state.productos.len(), 1);
        assert_eq!(app.state.productos[0].nombre, "Silla");
        assert_eq!(app.state.alert.as_deref(), Some(CREATE_OK));
    }

    #[tokio::test]
    async fn failed_create_keeps_the_form_and_shows_the_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/productos"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "Faltan campos obligatorios: nombre, precio y estado."
            })))
            .mount(&server)
            .await;

        let mut app = app_against(&server);
        app.state.open_form();
        app.state.form_mut().unwrap().precio = "10".to_string();

        app.submit_form().await;

        assert!(matches!(app.state.screen, Screen::Form { .. }));
        assert_eq!(
            app.state.alert.as_deref(),
            Some("Faltan campos obligatorios: nombre, precio y estado.")
        );
    }

    #[tokio::test]
    async fn unparseable_precio_never_reaches_the_server() {
        let server = MockServer::start().await;
        // No POST mock mounted: a request would fail the test via a 404
        // transport-level error being alerted instead of PRECIO_INVALIDO.

        let mut app = app_against(&server);
        app.state.open_form();
        {
            let form = app.state.form_mut().unwrap();
            form.nombre = "Silla".to_string();
            form.precio = "gratis".to_string();
        }

        app.submit_form().await;

        assert!(matches!(app.state.screen, Screen::Form { .. }));
        assert_eq!(app.state.alert.as_deref(), Some(PRECIO_INVALIDO));
    }

    #[tokio::test]
    async fn transport_failure_alerts_the_generic_message() {
        let mut app = App::new(
            ApiClient::new("http://127.0.0.1:1".to_string()),
            Box::new(StubCapture(None)),
        );
        app.state.open_form();
        {
            let form = app.state.form_mut().unwrap();
            form.nombre = "Silla".to_string();
            form.precio = "10".to_string();
        }

        app.submit_form().await;

        assert!(matches!(app.state.screen, Screen::Form { .. }));
        assert_eq!(app.state.alert.as_deref(), Some(CREATE_ERROR));
    }

    #[tokio::test]
    async fn successful_delete_refetches_and_returns_to_the_list() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/items/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Producto eliminado con éxito",
                "id": 1
            })))
            .mount(&server)
            .await;
        mock_list(&server, json!([])).await;

        let mut app = app_against(&server);
        app.state
            .set_productos(vec![serde_json::from_value(producto_json(1, "Silla")).unwrap()]);
        app.state.select_next();
        assert!(app.state.open_details());

        app.delete_current().await;

        assert_eq!(app.state.screen, Screen::List);
        assert!(app.state.productos.is_empty());
        assert_eq!(app.state.alert.as_deref(), Some(DELETE_OK));
    }

    #[tokio::test]
    async fn deleting_an_already_deleted_product_stays_on_details() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/items/1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": "Producto no encontrado."
            })))
            .mount(&server)
            .await;

        let mut app = app_against(&server);
        app.state
            .set_productos(vec![serde_json::from_value(producto_json(1, "Silla")).unwrap()]);
        app.state.select_next();
        assert!(app.state.open_details());

        app.delete_current().await;

        assert!(matches!(app.state.screen, Screen::Details { .. }));
        assert_eq!(app.state.alert.as_deref(), Some("Producto no encontrado."));
    }

    #[tokio::test]
    async fn capture_overwrites_the_placeholder_with_a_data_uri() {
        let server = MockServer::start().await;
        let mut app = app_against(&server);
        app.state.open_form();
        assert_eq!(
            app.state.form_mut().unwrap().url_fotografia,
            PLACEHOLDER_FOTO
        );

        app.capture_photo();

        let url = app.state.form_mut().unwrap().url_fotografia.clone();
        assert!(url.starts_with("data:image/jpeg;base64,"), "{}", url);
    }

    #[tokio::test]
    async fn failed_capture_leaves_the_draft_untouched() {
        let server = MockServer::start().await;
        let mut app = App::new(ApiClient::new(server.uri()), Box::new(StubCapture(None)));
        app.state.open_form();

        app.capture_photo();

        assert_eq!(
            app.state.form_mut().unwrap().url_fotografia,
            PLACEHOLDER_FOTO
        );
        assert!(app.state.alert.is_some());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_last_known_list() {
        let server = MockServer::start().await;
        mock_list(&server, json!([producto_json(1, "Silla")])).await;

        let mut app = app_against(&server);
        app.refresh().await;
        assert_eq!(app.state.productos.len(), 1);

        // Point the next fetch at nothing
        let mut app = App {
            client: ApiClient::new("http://127.0.0.1:1".to_string()),
            ..app
        };
        app.refresh().await;

        assert_eq!(app.state.productos.len(), 1);
        assert_eq!(app.state.alert.as_deref(), Some(FETCH_ERROR));
    }
}
