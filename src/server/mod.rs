//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Este módulo implementa la capa de red del servidor:
//! 1. `tcp`: accept loop y despacho de conexiones al pool
//! 2. `pool`: pool de workers de tamaño fijo (paralelismo acotado)
//! 3. `connection`: máquina de estados que atiende cada conexión
//!
//! Una conexión es un ciclo request/response exacto: se acepta, un worker
//! la procesa de principio a fin y el socket se cierra. No hay keep-alive.

pub mod connection;
pub mod pool;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use pool::WorkerPool;
pub use tcp::Server;
