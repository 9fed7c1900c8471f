//! # Módulo HTTP
//!
//! Este módulo implementa el lado request del protocolo HTTP/1.1 desde
//! cero, sin librerías de alto nivel:
//!
//! - Escaneo de delimitadores sobre el buffer de lectura (`scan`)
//! - Modelo inmutable del request parseado (`request`)
//!
//! ## Subconjunto soportado
//!
//! El servidor maneja un subconjunto deliberadamente pequeño de HTTP/1.1:
//! - Solo métodos `GET` y `POST`
//! - Una conexión = un request (sin keep-alive)
//! - Body delimitado por `Content-Length` (sin chunked encoding)
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! Another-Header: Value\r\n
//! \r\n
//! ```

pub mod request; // Modelo del request y errores de parsing
pub mod scan;    // Búsqueda de subsecuencias en el buffer

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use request::{Method, ParseError, Request};
