//! # Pool de Workers
//! src/server/pool.rs
//!
//! Pool de threads de tamaño fijo que acota el paralelismo del servidor.
//! El accept loop le entrega cada conexión aceptada; si todos los workers
//! están ocupados y la cola interna está llena, `execute` bloquea al
//! llamador hasta que se libere espacio. Ese bloqueo es el mecanismo de
//! backpressure: ninguna conexión se descarta por sobrecarga, a costa de
//! que la latencia del accept crezca.
//!
//! No hay shutdown: los workers viven hasta que el proceso termina.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;

/// Tarea encolada: una conexión lista para ser atendida
type Job = Box<dyn FnOnce() + Send + 'static>;

/// Estado compartido entre el pool y sus workers
struct PoolState {
    /// Cola FIFO de tareas pendientes
    queue: Mutex<VecDeque<Job>>,

    /// Notifica a los workers cuando llega una tarea
    not_empty: Condvar,

    /// Notifica a `execute` cuando se libera espacio en la cola
    not_full: Condvar,

    /// Capacidad de la cola; al alcanzarla, `execute` bloquea
    capacity: usize,
}

/// Pool de workers de tamaño fijo
pub struct WorkerPool {
    state: Arc<PoolState>,
    size: usize,
}

impl WorkerPool {
    /// Crea el pool y lanza `size` threads worker
    ///
    /// La cola interna tiene capacidad igual al número de workers.
    ///
    /// # Panics
    ///
    /// Si `size` es 0 (la configuración lo valida antes).
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "worker pool size must be >= 1");

        let state = Arc::new(PoolState {
            queue: Mutex::new(VecDeque::with_capacity(size)),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity: size,
        });

        for i in 0..size {
            let state = Arc::clone(&state);
            thread::Builder::new()
                .name(format!("worker-{}", i))
                .spawn(move || Self::worker_loop(state))
                .expect("Failed to spawn worker thread");
        }

        Self { state, size }
    }

    /// Loop de cada worker: desencola y ejecuta tareas para siempre
    fn worker_loop(state: Arc<PoolState>) {
        loop {
            let job = {
                let mut queue = state.queue.lock().unwrap();
                loop {
                    if let Some(job) = queue.pop_front() {
                        break job;
                    }
                    // Esperar a que llegue trabajo
                    queue = state.not_empty.wait(queue).unwrap();
                }
            };

            // Ya soltamos el lock: avisar que hay espacio y ejecutar
            state.not_full.notify_one();
            job();
        }
    }

    /// Encola una tarea para que la ejecute algún worker
    ///
    /// Bloquea mientras la cola esté llena. Las tareas se ejecutan en
    /// orden FIFO de encolado, cada una completa en un solo worker.
    pub fn execute<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut queue = self.state.queue.lock().unwrap();
        while queue.len() >= self.state.capacity {
            queue = self.state.not_full.wait(queue).unwrap();
        }
        queue.push_back(Box::new(job));
        self.state.not_empty.notify_one();
    }

    /// Número de workers del pool
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Clone for WorkerPool {
    /// Clonar el pool comparte la misma cola y los mismos workers
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            size: self.size,
        }
    }
}
