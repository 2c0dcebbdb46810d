//! Endpoint colors for the comparison tables.

/// Assigns each endpoint a display color string (for example `"rgb(12, 34, 56)"`)
pub trait ColorAssigner: Send + Sync {
    fn color_for(&self, endpoint: &str) -> String;
}

impl<F> ColorAssigner for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn color_for(&self, endpoint: &str) -> String {
        self(endpoint)
    }
}

/// Derives a stable color from the endpoint name, so an endpoint keeps its
/// color across pages and restarts
#[derive(Debug, Clone, Copy, Default)]
pub struct HashColorAssigner;

impl ColorAssigner for HashColorAssigner {
    fn color_for(&self, endpoint: &str) -> String {
        // FNV-1a
        let hash = endpoint.bytes().fold(0x811c_9dc5_u32, |hash, byte| {
            (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
        });
        let [r, g, b, _] = hash.to_be_bytes();
        format!("rgb({r}, {g}, {b})")
    }
}
