//! # Tabla de Rutas
//! src/router/mod.rs
//!
//! Mapea pares (método, path) a handlers registrados por la aplicación.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router.lookup(método, path) → Handler → escribe la response
//! ```
//!
//! La estructura es de dos niveles (método → path → handler) para que el
//! lookup sea O(1) promedio en ambas claves. El conjunto de métodos que el
//! servidor acepta es cerrado (GET/POST), pero la tabla no lo hardcodea:
//! cualquier string puede registrarse como método; la restricción vive en
//! el manejo de la conexión.
//!
//! La tabla es el único recurso compartido entre workers: se lee en cada
//! request y se escribe ocasionalmente al registrar. Un `RwLock` permite
//! lecturas concurrentes sin serializar los lookups entre sí.

use crate::http::Request;
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Arc, RwLock};

/// Tipo de función handler
///
/// Un handler recibe el `Request` y el stream de salida de la conexión, y
/// es el único responsable de escribir y hacer flush de una response HTTP
/// completa (status line, headers y body).
pub type Handler = Arc<dyn Fn(&Request, &mut dyn Write) -> io::Result<()> + Send + Sync>;

/// Router que mapea (método, path) a handlers
pub struct Router {
    /// Mapa de método → (path → handler)
    routes: RwLock<HashMap<String, HashMap<String, Handler>>>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self {
            routes: RwLock::new(HashMap::new()),
        }
    }

    /// Registra una ruta con su handler
    ///
    /// Si ya existía un handler para el mismo (método, path), se
    /// sobrescribe: gana el último registro. Puede llamarse de forma
    /// concurrente con lookups de otros threads.
    ///
    /// # Ejemplo
    /// ```
    /// use handler_server::router::Router;
    /// use std::io::Write;
    ///
    /// let router = Router::new();
    /// router.register("GET", "/ping", |_request, out| {
    ///     out.write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n")
    /// });
    ///
    /// assert!(router.lookup("GET", "/ping").is_some());
    /// assert!(router.lookup("POST", "/ping").is_none());
    /// ```
    pub fn register<F>(&self, method: &str, path: &str, handler: F)
    where
        F: Fn(&Request, &mut dyn Write) -> io::Result<()> + Send + Sync + 'static,
    {
        let mut routes = self.routes.write().unwrap();
        routes
            .entry(method.to_string())
            .or_default()
            .insert(path.to_string(), Arc::new(handler));
    }

    /// Busca el handler registrado para (método, path)
    ///
    /// Retorna un clon del `Arc` para que el handler pueda invocarse sin
    /// retener el lock de la tabla.
    pub fn lookup(&self, method: &str, path: &str) -> Option<Handler> {
        let routes = self.routes.read().unwrap();
        routes.get(method).and_then(|paths| paths.get(path)).cloned()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
