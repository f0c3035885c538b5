#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Runs `f` inside a tracing span and logs how long it took.
pub fn profiled<T>(label: &'static str, f: impl FnOnce() -> T) -> T {
    let span = tracing::debug_span!("profiled", label);
    let _guard = span.enter();
    let start = Instant::now();
    let result = f();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    tracing::debug!(label, elapsed_ms, "profiled call finished");
    result
}

/// Applies [`profiled`] only when `enabled` is set, so call sites can opt in
/// from configuration.
pub fn maybe_profiled<T>(enabled: bool, label: &'static str, f: impl FnOnce() -> T) -> T {
    if enabled {
        profiled(label, f)
    } else {
        f()
    }
}
