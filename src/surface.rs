//! Drawing surface metrics
//!
//! The scene is laid out in logical pixels. The device pixel ratio is capped
//! to `[1, 2]`; the renderer hands that ratio to the canvas as its DPI.
//!
//! A native GL surface always matches the window framebuffer, so the backing
//! size computed here does not size any buffer. It only decides whether the
//! surface is drawable at all.

use crate::config::timing;
use crate::math::clamp;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    /// Logical width in pixels
    pub width: f32,
    /// Logical height in pixels
    pub height: f32,
    /// Device pixel ratio actually used, in `[1, 2]`
    pub pixel_ratio: f32,
    /// Logical size times `pixel_ratio`, floored; zero means nothing to draw
    pub backing_width: u32,
    pub backing_height: u32,
}

impl Surface {
    /// Surface for a logical size and the host's scale hint.
    pub fn new(width: f32, height: f32, scale_hint: f32) -> Self {
        let hint = if scale_hint.is_finite() { scale_hint } else { 1.0 };
        let pixel_ratio = clamp(hint, timing::MIN_PIXEL_RATIO, timing::MAX_PIXEL_RATIO);
        let width = width.max(0.0);
        let height = height.max(0.0);
        Self {
            width,
            height,
            pixel_ratio,
            backing_width: (width * pixel_ratio).floor() as u32,
            backing_height: (height * pixel_ratio).floor() as u32,
        }
    }

    /// Surface for a physical window size reported with `scale_factor`.
    pub fn from_physical(physical_width: u32, physical_height: u32, scale_factor: f32) -> Self {
        let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        Self::new(
            physical_width as f32 / scale,
            physical_height as f32 / scale,
            scale,
        )
    }

    /// Whether there is anything to draw into
    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.backing_width > 0 && self.backing_height > 0
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(720.0, 420.0, 1.0)
    }
}
