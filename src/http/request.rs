//! # Modelo de Request HTTP/1.1
//! src/http/request.rs
//!
//! Valor inmutable que representa un request ya parseado. Se construye una
//! vez por conexión y vive exactamente lo que dura el ciclo
//! request/response de esa conexión.
//!
//! ## Formato de un Request HTTP/1.1
//!
//! ```text
//! POST /messages HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! Los headers se conservan como líneas crudas (`"Host: localhost:8080"`),
//! en el orden en que llegaron por el cable. Descomponerlos en clave/valor
//! es responsabilidad de quien los consuma, no de esta capa.

/// Métodos HTTP aceptados por el servidor
///
/// Cualquier otro método se rechaza con `400` antes de construir el
/// `Request`. La tabla de rutas no comparte esta restricción: acepta
/// cualquier string como método.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso (nunca lleva body)
    GET,

    /// POST - Enviar datos a un recurso
    POST,
}

impl Method {
    /// Parsea un método HTTP desde un string
    ///
    /// La comparación es exacta y sensible a mayúsculas: `get` no es `GET`.
    ///
    /// # Errores
    ///
    /// Retorna error si el método no es soportado
    pub fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

/// Errores que pueden ocurrir al enmarcar y parsear un request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// La conexión no entregó ningún byte
    EmptyRequest,

    /// No apareció `\r\n` dentro de la región leída
    MissingRequestLine,

    /// La request line no tiene exactamente 3 tokens
    InvalidRequestLine,

    /// Método HTTP no soportado
    UnsupportedMethod(String),

    /// El path no comienza con `/`
    InvalidPath(String),

    /// No apareció `\r\n\r\n` dentro de la región leída
    MissingHeadersEnd,

    /// El valor de `Content-Length` no es un entero no negativo
    InvalidContentLength(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::MissingRequestLine => write!(f, "Missing request line terminator"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
            ParseError::UnsupportedMethod(m) => write!(f, "Unsupported HTTP method: {}", m),
            ParseError::InvalidPath(p) => write!(f, "Invalid request path: {}", p),
            ParseError::MissingHeadersEnd => write!(f, "Missing headers terminator"),
            ParseError::InvalidContentLength(v) => write!(f, "Invalid Content-Length value: {}", v),
        }
    }
}

impl std::error::Error for ParseError {}

/// Representa un request HTTP/1.1 ya enmarcado y validado
///
/// Inmutable una vez construido: solo expone accessors.
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (GET o POST)
    method: Method,

    /// Path del recurso, sin query string (ej: "/messages")
    path: String,

    /// Query string cruda, si el target traía una (ej: "user=ana")
    query: Option<String>,

    /// Líneas de header crudas, en orden de llegada
    headers: Vec<String>,

    /// Body del request, solo presente en POST con Content-Length
    body: Option<String>,
}

impl Request {
    /// Construye un request a partir de sus componentes ya enmarcados
    ///
    /// El `target` es el segundo token de la request line tal cual llegó;
    /// si contiene `?`, el path se recorta ahí y el resto queda disponible
    /// como query cruda. El path resultante nunca contiene `?`.
    ///
    /// # Ejemplo
    /// ```
    /// use handler_server::http::{Method, Request};
    ///
    /// let request = Request::new(Method::GET, "/messages?user=ana", Vec::new(), None);
    /// assert_eq!(request.path(), "/messages");
    /// assert_eq!(request.query(), Some("user=ana"));
    /// ```
    pub fn new(method: Method, target: &str, headers: Vec<String>, body: Option<String>) -> Self {
        let (path, query) = match target.find('?') {
            Some(pos) => (
                target[..pos].to_string(),
                Some(target[pos + 1..].to_string()),
            ),
            None => (target.to_string(), None),
        };

        Self {
            method,
            path,
            query,
            headers,
            body,
        }
    }

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el path del request (sin query string)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la query string cruda, si el target traía una
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Obtiene las líneas de header crudas, en orden de llegada
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Obtiene el body del request, si existe
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
