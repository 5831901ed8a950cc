use std::num::NonZeroU32;
use std::sync::Arc;
use softbuffer::Surface;
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::cli::APP_NAME;
use crate::error::{RenderError, ViewerError};
use crate::loader::DecodedImage;
use crate::ui::render::{blit_scaled, fill_rect, BG_COLOR, Color, Rect};

// ---------------------------------------------------------------------------
// Render surface capability
// ---------------------------------------------------------------------------

/// An uploaded image the canvas can draw. Dropping it releases it.
pub trait Renderable {
    /// Native size in pixels.
    fn size(&self) -> (u32, u32);
}

/// The drawing operations a viewer session needs from its window.
pub trait Canvas {
    type Texture: Renderable;

    fn set_draw_color(&mut self, color: Color);
    /// Clear the whole output with the draw color.
    fn clear(&mut self) -> Result<(), RenderError>;
    /// Fill `rect` with the draw color; `None` fills the whole output.
    fn fill_rect(&mut self, rect: Option<Rect>) -> Result<(), RenderError>;
    fn copy(&mut self, texture: &Self::Texture, dst: Rect) -> Result<(), RenderError>;
    fn present(&mut self) -> Result<(), RenderError>;
    fn output_size(&self) -> Result<(u32, u32), RenderError>;
    fn create_texture(&mut self, image: DecodedImage) -> Result<Self::Texture, RenderError>;
    fn show(&mut self);
    fn set_title(&mut self, title: &str);
    /// Drop the surface; the platform may have already destroyed it.
    fn release_surface(&mut self);
    fn recreate_surface(&mut self) -> Result<(), RenderError>;
}

#[derive(Debug, Clone)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub background: Color,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            background: BG_COLOR,
        }
    }
}

// ---------------------------------------------------------------------------
// softbuffer implementation
// ---------------------------------------------------------------------------

/// RGBA pixels kept on the CPU side, ready to be blitted into the frame.
pub struct Texture {
    rgba_bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl Renderable for Texture {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// CPU back buffer a frame is drawn into before being presented.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Match the buffer to the output size, reallocating only on change.
    pub fn sync_size(&mut self, width: u32, height: u32) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels = vec![0; width as usize * height as usize];
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.packed());
    }

    pub fn fill_rect(&mut self, rect: Option<Rect>, color: Color) {
        let rect = rect.unwrap_or(Rect::new(0, 0, self.width, self.height));
        fill_rect(&mut self.pixels, self.width, self.height, rect, color);
    }

    pub fn blit(&mut self, texture: &Texture, dst: Rect) {
        blit_scaled(
            &mut self.pixels, self.width, self.height,
            &texture.rgba_bytes, texture.width, texture.height,
            dst,
        );
    }
}

/// A window plus a softbuffer surface. Frames are drawn into `frame` and
/// copied to the surface on `present`.
pub struct SoftbufferCanvas {
    surface: Option<Surface<Arc<Window>, Arc<Window>>>,
    context: softbuffer::Context<Arc<Window>>,
    window: Arc<Window>,
    frame: FrameBuffer,
    draw_color: Color,
}

impl SoftbufferCanvas {
    /// Create a hidden, resizable window and bind a surface to it.
    pub fn new(event_loop: &ActiveEventLoop, settings: &WindowSettings) -> Result<Self, ViewerError> {
        let attrs = Window::default_attributes()
            .with_title(APP_NAME)
            .with_inner_size(LogicalSize::new(settings.width, settings.height))
            .with_resizable(true)
            .with_visible(false);
        let window = Arc::new(event_loop.create_window(attrs)?);
        let context = softbuffer::Context::new(Arc::clone(&window))?;
        let surface = Surface::new(&context, Arc::clone(&window))?;
        log::info!(
            "window created ({}x{} physical, scale factor {})",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );

        Ok(Self {
            surface: Some(surface),
            context,
            window,
            frame: FrameBuffer::default(),
            draw_color: settings.background,
        })
    }
}

impl Canvas for SoftbufferCanvas {
    type Texture = Texture;

    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn clear(&mut self) -> Result<(), RenderError> {
        if self.surface.is_none() {
            return Err(RenderError::SurfaceLost);
        }
        let size = self.window.inner_size();
        self.frame.sync_size(size.width, size.height);
        self.frame.fill(self.draw_color);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Option<Rect>) -> Result<(), RenderError> {
        self.frame.fill_rect(rect, self.draw_color);
        Ok(())
    }

    fn copy(&mut self, texture: &Texture, dst: Rect) -> Result<(), RenderError> {
        self.frame.blit(texture, dst);
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        let surface = self.surface.as_mut().ok_or(RenderError::SurfaceLost)?;
        let (frame_w, frame_h) = self.frame.size();
        let (Some(w), Some(h)) = (NonZeroU32::new(frame_w), NonZeroU32::new(frame_h)) else {
            // minimized; nothing to show
            return Ok(());
        };
        surface.resize(w, h)?;
        let mut buffer = surface.buffer_mut()?;
        buffer.copy_from_slice(self.frame.pixels());
        buffer.present()?;
        Ok(())
    }

    /// Size of the back buffer as of the last `clear`, which is what the
    /// frame being drawn will be presented at.
    fn output_size(&self) -> Result<(u32, u32), RenderError> {
        Ok(self.frame.size())
    }

    fn create_texture(&mut self, image: DecodedImage) -> Result<Texture, RenderError> {
        let expected = image.width as usize * image.height as usize * 4;
        if image.rgba_bytes.len() != expected {
            return Err(RenderError::Upload {
                width: image.width,
                height: image.height,
                expected,
                actual: image.rgba_bytes.len(),
            });
        }
        Ok(Texture {
            rgba_bytes: image.rgba_bytes,
            width: image.width,
            height: image.height,
        })
    }

    fn show(&mut self) {
        self.window.set_visible(true);
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn release_surface(&mut self) {
        self.surface = None;
    }

    fn recreate_surface(&mut self) -> Result<(), RenderError> {
        self.surface = None;
        self.surface = Some(Surface::new(&self.context, Arc::clone(&self.window))?);
        Ok(())
    }
}
