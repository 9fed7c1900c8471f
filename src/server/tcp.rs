//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! El Listener/Dispatcher: es dueño del socket de escucha y del pool de
//! workers. Acepta conexiones en un loop y entrega cada una al pool, donde
//! un worker la atiende completa (lectura, ruteo, respuesta, cierre).
//!
//! Si el pool está saturado, `execute` bloquea el accept loop hasta que un
//! worker se libere: backpressure implícito, sin descartar conexiones. Un
//! fallo de I/O al aceptar aborta el loop y sale de `run()`; los errores
//! dentro de una conexión quedan aislados en su worker.

use crate::config::Config;
use crate::router::Router;
use crate::server::connection;
use crate::server::pool::WorkerPool;
use crate::http::Request;
use std::io::{self, Write};
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

/// Servidor HTTP/1.1 concurrente con handlers registrables
pub struct Server {
    config: Config,
    router: Arc<Router>,
    pool: WorkerPool,
    listener: Option<TcpListener>,
}

impl Server {
    /// Crea el servidor: tabla de rutas vacía y pool ya arrancado
    pub fn new(config: Config) -> Self {
        let pool = WorkerPool::new(config.workers);

        Self {
            config,
            router: Arc::new(Router::new()),
            pool,
            listener: None,
        }
    }

    /// Registra un handler para (método, path)
    ///
    /// Puede llamarse antes de `run()` o de forma concurrente con tráfico
    /// en vivo; el último registro para una misma clave gana.
    pub fn register<F>(&self, method: &str, path: &str, handler: F)
    where
        F: Fn(&Request, &mut dyn Write) -> io::Result<()> + Send + Sync + 'static,
    {
        self.router.register(method, path, handler);
    }

    /// Hace bind de la dirección configurada y retorna la dirección local
    ///
    /// Separado de `run()` para poder usar puerto 0 (efímero) en tests y
    /// conocer el puerto real antes de arrancar el loop.
    pub fn bind(&mut self) -> io::Result<SocketAddr> {
        let address = self.config.address();
        println!("[*] Iniciando servidor en {}", address);

        let listener = TcpListener::bind(&address)?;
        let local_addr = listener.local_addr()?;
        println!("[+] Servidor escuchando en {}", local_addr);

        self.listener = Some(listener);
        Ok(local_addr)
    }

    /// Loop principal: acepta conexiones y las entrega al pool
    ///
    /// Bloquea al thread llamador para siempre. Solo retorna si el accept
    /// falla a nivel de I/O; ese error se propaga al caller.
    pub fn run(&mut self) -> io::Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }
        let listener = self.listener.as_ref().unwrap();

        println!("[*] Pool de workers: {}\n", self.pool.size());

        for stream in listener.incoming() {
            // Un fallo del accept aborta el loop
            let stream = stream?;

            let peer_addr = stream
                .peer_addr()
                .map(|addr| addr.to_string())
                .unwrap_or_else(|_| "unknown".to_string());
            println!("   [+] Nueva conexion desde {}", peer_addr);

            let router = Arc::clone(&self.router);
            self.pool.execute(move || {
                // El error de una conexión muere aquí: nunca alcanza a
                // otras conexiones ni al accept loop
                if let Err(e) = connection::handle_connection(stream, router) {
                    eprintln!("   [-] Conexion abandonada: {}", e);
                }
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::{Shutdown, TcpStream};
    use std::thread;
    use std::time::Duration;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.port = 0; // puerto efímero
        config.workers = 2;
        config
    }

    #[test]
    fn test_bind_reports_ephemeral_port() {
        let mut server = Server::new(test_config());
        let addr = server.bind().expect("bind");
        assert_ne!(addr.port(), 0);
    }

    #[test]
    fn test_server_end_to_end() {
        let mut server = Server::new(test_config());
        server.register("GET", "/ping", |_request, out| {
            out.write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 4\r\nConnection: close\r\n\r\npong")?;
            out.flush()
        });

        let addr = server.bind().expect("bind");
        thread::spawn(move || {
            let _ = server.run();
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        client.write_all(b"GET /ping HTTP/1.1\r\nHost: x\r\n\r\n").unwrap();
        client.shutdown(Shutdown::Write).unwrap();

        let mut response = Vec::new();
        client.read_to_end(&mut response).unwrap();
        let text = String::from_utf8(response).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.ends_with("pong"));
    }

    #[test]
    fn test_registration_during_live_traffic() {
        let mut server = Server::new(test_config());
        let addr = server.bind().expect("bind");

        // El server arranca sin rutas; se registra mientras ya acepta
        let router_handle = Arc::clone(&server.router);
        thread::spawn(move || {
            let _ = server.run();
        });

        router_handle.register("GET", "/late", |_request, out| {
            out.write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")?;
            out.flush()
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        client.write_all(b"GET /late HTTP/1.1\r\n\r\n").unwrap();
        client.shutdown(Shutdown::Write).unwrap();

        let mut response = Vec::new();
        client.read_to_end(&mut response).unwrap();
        let text = String::from_utf8(response).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    }
}
