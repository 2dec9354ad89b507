use candle_core::Device;
use tracing::warn;

#[cfg(any(feature = "metal", feature = "cuda"))]
use tracing::info;

#[cfg(not(any(feature = "metal", feature = "cuda")))]
use tracing::debug;

/// Picks the compute device for `model` (a label used only in logs).
///
/// GPU backends are tried in feature order (Metal, then CUDA); every failure is
/// logged and the CPU is used as the last resort, so this never fails.
pub fn select_device(model: &str) -> Device {
    #[cfg(any(feature = "metal", feature = "cuda"))]
    let mut failures: Vec<String> = Vec::new();

    #[cfg(not(any(feature = "metal", feature = "cuda")))]
    let failures: Vec<String> = Vec::new();

    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(device) => {
                info!(model, "Using Metal GPU acceleration");
                return device;
            }
            Err(e) => {
                warn!(model, error = %e, "Metal device unavailable");
                failures.push(format!("metal failed: {e}"));
            }
        }
    }

    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(0) {
            Ok(device) => {
                info!(model, "Using CUDA GPU acceleration");
                return device;
            }
            Err(e) => {
                warn!(model, error = %e, "CUDA device unavailable");
                failures.push(format!("cuda failed: {e}"));
            }
        }
    }

    #[cfg(not(any(feature = "metal", feature = "cuda")))]
    {
        debug!(model, "No GPU features enabled");
    }

    if failures.is_empty() && !cfg!(any(feature = "metal", feature = "cuda")) {
        return Device::Cpu;
    }

    warn!(model, reason = %failures.join("; "), "Falling back to CPU device");
    Device::Cpu
}
