//! # Handler Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor: parsea la configuración, registra los
//! handlers de la aplicación y arranca el accept loop (bloquea para
//! siempre).

use handler_server::config::Config;
use handler_server::server::Server;
use std::io::Write;

fn main() {
    println!("=================================");
    println!("  Handler HTTP/1.1 Server");
    println!("=================================\n");

    // Crear configuración (CLI o env)
    let config = Config::new();
    if let Err(e) = config.validate() {
        eprintln!("[-] Configuracion invalida: {}", e);
        std::process::exit(1);
    }
    config.print_summary();

    let mut server = Server::new(config);

    // Registro de handlers de la aplicación. Cada handler escribe y
    // flushea la response HTTP completa sobre la conexión.
    server.register("GET", "/messages", |_request, out| {
        let body = "Hello from GET";
        let response = format!(
            "HTTP/1.1 201 Created\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        out.write_all(response.as_bytes())?;
        out.flush()
    });

    server.register("POST", "/messages", |request, out| {
        println!("   [*] Body recibido: {:?}", request.body());
        out.write_all(b"HTTP/1.1 202 Accepted\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")?;
        out.flush()
    });

    server.register("GET", "/status", |_request, out| {
        let body = serde_json::json!({
            "status": "running",
            "server": "handler_server/0.1.0",
        })
        .to_string();
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        out.write_all(response.as_bytes())?;
        out.flush()
    });

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        eprintln!("[-] Error fatal: {}", e);
        std::process::exit(1);
    }
}
