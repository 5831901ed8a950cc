use std::path::PathBuf;

use crate::cli::APP_NAME;
use crate::error::RenderError;
use crate::files::PathList;
use crate::loader::ImageLoader;
use crate::ui::canvas::{Canvas, Renderable};
use crate::ui::render::{fit_rect, Color};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// The uploaded image and the path it came from.
struct LoadedImage<T> {
    path: PathBuf,
    texture: T,
}

// ---------------------------------------------------------------------------
// Viewer session
// ---------------------------------------------------------------------------

/// Keeps the canvas showing the image at the path list's cursor.
///
/// Only the image on screen is kept. It is replaced whenever the current
/// path changes, and dropped on a failed load so a broken file shows as a
/// blank viewport rather than the previous picture.
pub struct ViewerSession<C: Canvas, L: ImageLoader> {
    paths: PathList,
    canvas: C,
    loader: L,
    image: Option<LoadedImage<C::Texture>>,
}

impl<C: Canvas, L: ImageLoader> ViewerSession<C, L> {
    pub fn new(paths: PathList, mut canvas: C, loader: L, background: Color) -> Self {
        canvas.set_draw_color(background);
        Self {
            paths,
            canvas,
            loader,
            image: None,
        }
    }

    #[cfg(test)]
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// Path of the image currently uploaded, if any.
    #[cfg(test)]
    pub fn displayed_path(&self) -> Option<&std::path::Path> {
        self.image.as_ref().map(|img| img.path.as_path())
    }

    /// Make the window visible and draw the first frame.
    pub fn show(&mut self) {
        self.canvas.show();
        self.render();
    }

    pub fn advance(&mut self, direction: Direction) {
        let target = match direction {
            Direction::Forward => self.paths.to_next(),
            Direction::Backward => self.paths.to_previous(),
        };
        log::debug!("[nav] {:?} -> {:?}", direction, target);
        self.render();
    }

    /// Forget the uploaded image; the next render loads it again. Needed when
    /// the render target was lost.
    pub fn invalidate(&mut self) {
        self.image = None;
    }

    /// Bring the uploaded image in line with the current path, then draw a
    /// frame. Failures are logged and only affect this pass.
    pub fn render(&mut self) {
        self.sync_image();
        if let Err(e) = self.draw_frame() {
            log::error!("render: {}", e);
        }
    }

    fn sync_image(&mut self) {
        let Some(path) = self.paths.current() else {
            self.image = None;
            return;
        };
        if self.image.as_ref().is_some_and(|img| img.path == path) {
            return;
        }

        // Release the old image before decoding the next one.
        let had_image = self.image.take().is_some();
        let position = self.paths.index().map_or(0, |i| i + 1);
        let title = match path.file_name() {
            Some(name) => format!(
                "{} - {} [{}/{}]",
                APP_NAME,
                name.to_string_lossy(),
                position,
                self.paths.len()
            ),
            None => APP_NAME.to_string(),
        };
        self.canvas.set_title(&title);

        let decoded = match self.loader.load(path) {
            Ok(decoded) => decoded,
            Err(e) => {
                log::warn!("could not load {}", e);
                return;
            }
        };
        let bytes = decoded.mem_size();
        match self.canvas.create_texture(decoded) {
            Ok(texture) => {
                log::debug!(
                    "showing {} ({} bytes, replaced previous: {})",
                    path.display(),
                    bytes,
                    had_image
                );
                self.image = Some(LoadedImage {
                    path: path.to_path_buf(),
                    texture,
                });
            }
            Err(e) => log::warn!("{}: {}", path.display(), e),
        }
    }

    /// One render pass: clear, draw the image fitted to the output (or fill
    /// the blank viewport), present. Stops at the first failing call, which
    /// leaves the previously presented frame on screen.
    fn draw_frame(&mut self) -> Result<(), RenderError> {
        self.canvas.clear()?;
        match &self.image {
            Some(img) => {
                let (img_w, img_h) = img.texture.size();
                let (out_w, out_h) = self.canvas.output_size()?;
                if let Some(dst) = fit_rect(img_w, img_h, out_w, out_h) {
                    self.canvas.copy(&img.texture, dst)?;
                }
            }
            None => self.canvas.fill_rect(None)?,
        }
        self.canvas.present()
    }
}
