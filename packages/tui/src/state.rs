use bodega_catalog::{EstadoProducto, Producto, ProductoCreateInput};

/// Photo reference used until a picture is taken, and as the render
/// fallback for references that cannot be displayed.
pub const PLACEHOLDER_FOTO: &str = "https://placehold.co/100x100";

/// The three mutually exclusive screens. Per-screen data lives inside the
/// variant, so being "in the form" and "viewing details" at once cannot be
/// represented.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    List,
    Form { draft: ProductoForm },
    Details { producto: Producto },
}

/// Editable fields of the creation form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Nombre,
    Descripcion,
    Precio,
    Estado,
    Categoria,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Nombre => FormField::Descripcion,
            FormField::Descripcion => FormField::Precio,
            FormField::Precio => FormField::Estado,
            FormField::Estado => FormField::Categoria,
            FormField::Categoria => FormField::Nombre,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Nombre => FormField::Categoria,
            FormField::Descripcion => FormField::Nombre,
            FormField::Precio => FormField::Descripcion,
            FormField::Estado => FormField::Precio,
            FormField::Categoria => FormField::Estado,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Nombre => "Nombre",
            FormField::Descripcion => "Descripción",
            FormField::Precio => "Precio",
            FormField::Estado => "Estado",
            FormField::Categoria => "Categoría",
        }
    }
}

/// Unsaved draft of a new product. `precio` stays free text until submit.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductoForm {
    pub nombre: String,
    pub descripcion: String,
    pub precio: String,
    pub estado: EstadoProducto,
    pub categoria: String,
    pub url_fotografia: String,
    pub focus: FormField,
}

impl Default for ProductoForm {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            descripcion: String::new(),
            precio: String::new(),
            estado: EstadoProducto::Disponible,
            categoria: String::new(),
            url_fotografia: PLACEHOLDER_FOTO.to_string(),
            focus: FormField::Nombre,
        }
    }
}

impl ProductoForm {
    /// The text buffer under focus; `None` while the estado toggle is focused.
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Nombre => Some(&mut self.nombre),
            FormField::Descripcion => Some(&mut self.descripcion),
            FormField::Precio => Some(&mut self.precio),
            FormField::Estado => None,
            FormField::Categoria => Some(&mut self.categoria),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if self.focus == FormField::Estado {
            self.estado = self.estado.toggled();
        } else if let Some(text) = self.focused_text_mut() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }

    pub fn to_create_input(&self, precio: f64) -> ProductoCreateInput {
        ProductoCreateInput {
            nombre: Some(self.nombre.clone()),
            descripcion: Some(self.descripcion.clone()),
            precio: Some(precio),
            estado: Some(self.estado.as_str().to_string()),
            categoria: Some(self.categoria.clone()),
            url_fotografia: Some(self.url_fotografia.clone()),
        }
    }
}

/// Application state management
#[derive(Debug)]
pub struct AppState {
    /// Last fetched snapshot of the server's product set. Not authoritative;
    /// refreshed wholesale after every successful mutation.
    pub productos: Vec<Producto>,
    pub selected: Option<usize>,
    pub screen: Screen,
    /// Last user-visible notice (success or failure). Displayed until the
    /// next action replaces it.
    pub alert: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            productos: Vec::new(),
            selected: None,
            screen: Screen::List,
            alert: None,
        }
    }

    pub fn set_productos(&mut self, productos: Vec<Producto>) {
        self.productos = productos;
        // Reset selection if the refetched list invalidated it
        if let Some(selected) = self.selected {
            if selected >= self.productos.len() {
                self.selected = if self.productos.is_empty() {
                    None
                } else {
                    Some(0)
                };
            }
        }
    }

    /// Navigate to the previous product in the list
    pub fn select_previous(&mut self) -> bool {
        if self.productos.is_empty() {
            return false;
        }

        self.selected = match self.selected {
            None | Some(0) => Some(self.productos.len() - 1),
            Some(index) => Some(index - 1),
        };
        true
    }

    /// Navigate to the next product in the list
    pub fn select_next(&mut self) -> bool {
        if self.productos.is_empty() {
            return false;
        }

        self.selected = match self.selected {
            None => Some(0),
            Some(index) if index + 1 >= self.productos.len() => Some(0),
            Some(index) => Some(index + 1),
        };
        true
    }

    pub fn selected_producto(&self) -> Option<&Producto> {
        self.selected.and_then(|index| self.productos.get(index))
    }

    /// List → Form with a fresh draft. No-op from any other screen.
    pub fn open_form(&mut self) -> bool {
        if !matches!(self.screen, Screen::List) {
            return false;
        }
        self.screen = Screen::Form {
            draft: ProductoForm::default(),
        };
        true
    }

    /// List → Details for the selected row. The details snapshot is copied
    /// from the list cache; there is no single-product fetch.
    pub fn open_details(&mut self) -> bool {
        if !matches!(self.screen, Screen::List) {
            return false;
        }
        match self.selected_producto() {
            Some(producto) => {
                self.screen = Screen::Details {
                    producto: producto.clone(),
                };
                true
            }
            None => false,
        }
    }

    /// Form|Details → List, dropping any draft or selection snapshot.
    pub fn back_to_list(&mut self) {
        self.screen = Screen::List;
    }

    pub fn form_mut(&mut self) -> Option<&mut ProductoForm> {
        match &mut self.screen {
            Screen::Form { draft } => Some(draft),
            _ => None,
        }
    }

    pub fn detalle(&self) -> Option<&Producto> {
        match &self.screen {
            Screen::Details { producto } => Some(producto),
            _ => None,
        }
    }

    pub fn set_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }
}
