//! # Escaneo de Buffers
//! src/http/scan.rs
//!
//! Búsqueda de subsecuencias de bytes dentro de una región acotada de un
//! buffer. El servidor lee el request en un buffer de tamaño fijo y usa
//! esta función para ubicar los delimitadores del protocolo:
//!
//! - `\r\n` → fin de la request line
//! - `\r\n\r\n` → fin del bloque de headers
//!
//! La búsqueda nunca pasa de `end`, de modo que los bytes no leídos del
//! buffer (basura de conexiones anteriores o ceros) jamás participan.

/// Busca la primera ocurrencia de `target` dentro de `buffer[start..end]`.
///
/// Retorna el índice (relativo a `buffer`) donde comienza la primera
/// coincidencia, o `None` si no existe. `end` se recorta al largo real del
/// buffer, así que pasar un límite mayor no es un error.
///
/// # Ejemplo
/// ```
/// use handler_server::http::scan::index_of;
///
/// let buffer = b"GET / HTTP/1.1\r\nHost: x\r\n\r\n";
/// assert_eq!(index_of(buffer, b"\r\n", 0, buffer.len()), Some(14));
/// assert_eq!(index_of(buffer, b"\r\n\r\n", 14, buffer.len()), Some(23));
/// assert_eq!(index_of(buffer, b"zzz", 0, buffer.len()), None);
/// ```
pub fn index_of(buffer: &[u8], target: &[u8], start: usize, end: usize) -> Option<usize> {
    if target.is_empty() {
        return None;
    }

    let end = end.min(buffer.len());
    if start >= end || end - start < target.len() {
        return None;
    }

    // Barrido de izquierda a derecha: gana la primera coincidencia
    for i in start..=(end - target.len()) {
        if &buffer[i..i + target.len()] == target {
            return Some(i);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_first_occurrence() {
        let buffer = b"aaXbbXcc";
        assert_eq!(index_of(buffer, b"X", 0, buffer.len()), Some(2));
    }

    #[test]
    fn test_respects_start_offset() {
        let buffer = b"aaXbbXcc";
        assert_eq!(index_of(buffer, b"X", 3, buffer.len()), Some(5));
    }

    #[test]
    fn test_respects_end_bound() {
        // La X en la posición 5 queda fuera de la ventana [0, 5)
        let buffer = b"aaXbbXcc";
        assert_eq!(index_of(buffer, b"X", 3, 5), None);
    }

    #[test]
    fn test_multibyte_target() {
        let buffer = b"GET /x HTTP/1.1\r\nHost: a\r\n\r\nbody";
        assert_eq!(index_of(buffer, b"\r\n", 0, buffer.len()), Some(15));
        assert_eq!(index_of(buffer, b"\r\n\r\n", 15, buffer.len()), Some(24));
    }

    #[test]
    fn test_target_overlapping_end_is_not_found() {
        // El target empieza dentro de la ventana pero termina fuera
        let buffer = b"abcd";
        assert_eq!(index_of(buffer, b"cd", 0, 3), None);
    }

    #[test]
    fn test_end_clamped_to_buffer_len() {
        let buffer = b"abcd";
        assert_eq!(index_of(buffer, b"cd", 0, 9999), Some(2));
    }

    #[test]
    fn test_empty_target_never_matches() {
        let buffer = b"abcd";
        assert_eq!(index_of(buffer, b"", 0, buffer.len()), None);
    }

    #[test]
    fn test_empty_window() {
        let buffer = b"abcd";
        assert_eq!(index_of(buffer, b"a", 2, 2), None);
        assert_eq!(index_of(buffer, b"a", 4, 4), None);
    }

    #[test]
    fn test_target_longer_than_window() {
        let buffer = b"ab";
        assert_eq!(index_of(buffer, b"abc", 0, buffer.len()), None);
    }

    #[test]
    fn test_match_at_window_edges() {
        let buffer = b"XabcX";
        assert_eq!(index_of(buffer, b"X", 0, buffer.len()), Some(0));
        assert_eq!(index_of(buffer, b"X", 1, buffer.len()), Some(4));
    }
}
