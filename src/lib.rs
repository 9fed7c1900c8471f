//! # Handler Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado desde cero: acepta conexiones
//! TCP, enmarca el request a nivel de bytes dentro de un buffer de tamaño
//! fijo, lo despacha al handler registrado para (método, path) y deja que
//! el handler escriba la respuesta cruda sobre la conexión.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: enmarcado a nivel de bytes y modelo inmutable del request
//! - `router`: tabla de rutas (método → path → handler), segura para
//!   lecturas y escrituras concurrentes
//! - `server`: accept loop, pool de workers y manejo de conexiones
//! - `config`: configuración por CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use handler_server::config::Config;
//! use handler_server::server::Server;
//! use std::io::Write;
//!
//! let mut server = Server::new(Config::default());
//! server.register("GET", "/messages", |_request, out| {
//!     out.write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")?;
//!     out.flush()
//! });
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod http;
pub mod router;
pub mod server;
