pub mod core;
pub mod events;
pub mod plugin;
pub mod transport;

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Parse the bundle API version string from the build script into u32
pub fn get_bundle_api_version() -> u32 {
    BUNDLE_API_VERSION.parse().unwrap_or(20250806)
}
