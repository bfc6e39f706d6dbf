//! Shared thread pool for the Monte Carlo simulation.
//!
//! All parallel replicates run on one lazily built rayon pool so repeated
//! calculator calls do not each spin up their own workers.

#[cfg(feature = "parallel")]
use rayon::ThreadPool;

#[cfg(feature = "parallel")]
use std::sync::OnceLock;

#[cfg(feature = "parallel")]
static THREAD_POOL: OnceLock<Option<ThreadPool>> = OnceLock::new();

/// Get the shared pool, building it on first use.
///
/// One worker per logical CPU, with thread names for easier profiling.
/// Returns `None` if the pool could not be built, in which case callers run
/// on rayon's global pool.
#[cfg(feature = "parallel")]
pub fn get_thread_pool() -> Option<&'static ThreadPool> {
    THREAD_POOL
        .get_or_init(|| {
            rayon::ThreadPoolBuilder::new()
                .thread_name(|i| format!("sample-size-{}", i))
                .build()
                .map_err(|err| {
                    tracing::warn!(error = %err, "failed to build simulation thread pool");
                })
                .ok()
        })
        .as_ref()
}

/// Execute a parallel operation on the shared pool.
#[cfg(feature = "parallel")]
pub fn install<OP, R>(op: OP) -> R
where
    OP: FnOnce() -> R + Send,
    R: Send,
{
    match get_thread_pool() {
        Some(pool) => pool.install(op),
        None => op(),
    }
}

/// Execute `op` directly; without the `parallel` feature there is no pool.
#[cfg(not(feature = "parallel"))]
pub fn install<OP, R>(op: OP) -> R
where
    OP: FnOnce() -> R,
{
    op()
}
