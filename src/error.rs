//! Startup and persistence errors

use thiserror::Error;

/// Errors that stop the game from starting or from persisting data
#[derive(Debug, Error)]
pub enum GameError {
    /// Window or event loop creation failed
    #[error("Window error: {0}")]
    Window(String),

    /// The render surface could not be created
    #[error("Surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// No compatible GPU adapter
    #[error("No suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    /// The adapter refused to create a device
    #[error("Device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
