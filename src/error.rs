use std::path::PathBuf;

use thiserror::Error;

/// Failures that prevent a viewer session from existing at all.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to start the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to initialise renderer: {0}")]
    Renderer(#[from] softbuffer::SoftBufferError),
}

/// An image that could not be decoded. Never fatal: the viewport goes blank.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{}: image has no pixels ({width}x{height})", .path.display())]
    Empty { path: PathBuf, width: u32, height: u32 },
}

/// A drawing call that failed mid render pass.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render surface error: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),

    #[error("render surface is not available")]
    SurfaceLost,

    #[error("cannot upload {width}x{height} image: expected {expected} bytes, got {actual}")]
    Upload {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}
