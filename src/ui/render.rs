// Pixel primitives for the softbuffer framebuffer (u32 per pixel, 0x00RRGGBB)
// and the fit-to-viewport geometry.

/// Opaque black, the default blank/clear color.
pub const BG_COLOR: Color = Color::rgba(0, 0, 0, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `RRGGBB`, with or without a leading `#`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, 255))
    }

    pub fn packed(self) -> u32 {
        rgb(self.r, self.g, self.b)
    }
}

/// Destination rectangle in output pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// Pack RGB into softbuffer u32 format: 0x00RRGGBB.
pub fn rgb(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Unpack softbuffer u32 into (r, g, b).
fn unpack_rgb(v: u32) -> (u8, u8, u8) {
    ((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

fn blend(src: (u8, u8, u8), alpha: u32, dst: u32) -> u32 {
    let inv = 255 - alpha;
    let (dr, dg, db) = unpack_rgb(dst);
    let r = ((src.0 as u32 * alpha + dr as u32 * inv) / 255) as u8;
    let g = ((src.1 as u32 * alpha + dg as u32 * inv) / 255) as u8;
    let b = ((src.2 as u32 * alpha + db as u32 * inv) / 255) as u8;
    rgb(r, g, b)
}

/// Fill a rectangle with a color (with alpha blending).
pub fn fill_rect(buf: &mut [u32], stride: u32, buf_h: u32, rect: Rect, color: Color) {
    let a = color.a as u32;
    for row in 0..rect.h {
        let y = rect.y + row as i32;
        if y < 0 || y as u32 >= buf_h {
            continue;
        }
        for col in 0..rect.w {
            let x = rect.x + col as i32;
            if x < 0 || x as u32 >= stride {
                continue;
            }
            let off = (y as u32 * stride + x as u32) as usize;
            buf[off] = if a == 255 {
                color.packed()
            } else {
                blend((color.r, color.g, color.b), a, buf[off])
            };
        }
    }
}

pub fn fit_scale(img_w: f32, img_h: f32, win_w: f32, win_h: f32) -> f32 {
    (win_w / img_w).min(win_h / img_h)
}

/// Largest centered rectangle with the image's aspect ratio that fits the
/// output. Small images are scaled up to fit, large ones down; nothing is
/// cropped. `None` when either side is zero.
pub fn fit_rect(img_w: u32, img_h: u32, out_w: u32, out_h: u32) -> Option<Rect> {
    if img_w == 0 || img_h == 0 || out_w == 0 || out_h == 0 {
        return None;
    }
    let scale = fit_scale(img_w as f32, img_h as f32, out_w as f32, out_h as f32);
    let w = ((img_w as f32 * scale).round() as u32).clamp(1, out_w);
    let h = ((img_h as f32 * scale).round() as u32).clamp(1, out_h);
    let x = (out_w - w) as i32 / 2;
    let y = (out_h - h) as i32 / 2;
    Some(Rect::new(x, y, w, h))
}

/// Nearest-neighbour copy of an RGBA image into `dst_rect`, clipped to the
/// framebuffer. Translucent pixels are blended over what is already there.
pub fn blit_scaled(
    dst: &mut [u32], dst_w: u32, dst_h: u32,
    src: &[u8], src_w: u32, src_h: u32,
    dst_rect: Rect,
) {
    if src_w == 0 || src_h == 0 || dst_rect.w == 0 || dst_rect.h == 0 {
        return;
    }

    let x0 = dst_rect.x;
    let y0 = dst_rect.y;
    let dx_start = x0.max(0) as u32;
    let dy_start = y0.max(0) as u32;
    let dx_end = ((x0 + dst_rect.w as i32).max(0) as u32).min(dst_w);
    let dy_end = ((y0 + dst_rect.h as i32).max(0) as u32).min(dst_h);

    let sx_step = src_w as f32 / dst_rect.w as f32;
    let sy_step = src_h as f32 / dst_rect.h as f32;

    for dy in dy_start..dy_end {
        let sy = (((dy as i32 - y0) as f32 + 0.5) * sy_step) as u32;
        let sy = sy.min(src_h - 1);
        for dx in dx_start..dx_end {
            let sx = (((dx as i32 - x0) as f32 + 0.5) * sx_step) as u32;
            let sx = sx.min(src_w - 1);

            let si = (sy as usize * src_w as usize + sx as usize) * 4;
            let di = dy as usize * dst_w as usize + dx as usize;

            let sa = src[si + 3] as u32;
            if sa == 255 {
                dst[di] = rgb(src[si], src[si + 1], src[si + 2]);
            } else if sa > 0 {
                dst[di] = blend((src[si], src[si + 1], src[si + 2]), sa, dst[di]);
            }
        }
    }
}
