//=========================================================================
// Pointer Sprites
//=========================================================================
//
// Frame-packed cursor bitmaps and the carried-object compositor.
//
// Layout: `frames` consecutive `width * height` byte images, one palette
// index per pixel. In source sprites index 0 is see-through; composed
// sprites use `TRANSPARENT_INDEX` instead so the display layer can key it.
//
// Composite layout (carried item in hand):
// ```text
//   +---------+------+
//   | pointer |      |
//   |    +----+----+ |
//   |    | carried  | |
//   +----+----------+-+
// ```
// The carried sprite sits at the bottom-right, the pointer at the origin on
// top of it. On interlaced targets every stored source row is drawn twice.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use crate::core::collaborators::SpriteSource;

//=== Constants ===========================================================

/// Resource id of a pointer or carried-object sprite.
pub type SpriteId = u32;

/// Key colour of composed sprites.
pub const TRANSPARENT_INDEX: u8 = 255;

/// See-through colour of source sprites.
const SOURCE_CLEAR: u8 = 0;

//=== PointerSprite =======================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerSprite {
    pub frames: u16,
    pub width: u16,
    pub height: u16,
    pub hotspot_x: u16,
    pub hotspot_y: u16,
    pub pixels: Vec<u8>,
}

impl PointerSprite {
    /// # Panics
    ///
    /// Panics if `pixels` is not exactly `frames * width * height` bytes.
    pub fn new(
        frames: u16,
        width: u16,
        height: u16,
        hotspot: (u16, u16),
        pixels: Vec<u8>,
    ) -> Self {
        let expected = frames as usize * width as usize * height as usize;
        assert!(
            pixels.len() == expected,
            "Sprite data is {} bytes, expected {}",
            pixels.len(),
            expected
        );

        Self {
            frames,
            width,
            height,
            hotspot_x: hotspot.0,
            hotspot_y: hotspot.1,
            pixels,
        }
    }

    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Pixels of frame `index`; empty if out of range.
    pub fn frame(&self, index: usize) -> &[u8] {
        let len = self.frame_len();
        self.pixels
            .get(index * len..(index + 1) * len)
            .unwrap_or(&[])
    }

    //--- Composition ------------------------------------------------------

    /// Builds a fresh cursor from `pointer` and an optional carried item.
    ///
    /// The result has the pointer's frame count and hotspot. Without a
    /// carried item it has the pointer's own size (rows doubled when
    /// `interlaced`). With one, it grows to `max(pw, pw/2 + cw)` by
    /// `max(ph, ph/2 + ch)`; only the carried sprite's first frame is used.
    /// Both dimensions saturate at `u16::MAX` and layers are clipped to fit.
    pub fn compose(
        pointer: &PointerSprite,
        carried: Option<&PointerSprite>,
        interlaced: bool,
    ) -> PointerSprite {
        let row_repeat = if interlaced { 2 } else { 1 };
        let ptr_w = pointer.width as usize;
        let ptr_h = pointer.height as usize * row_repeat;

        let (width, height) = match carried {
            Some(item) => {
                let item_w = item.width as usize;
                let item_h = item.height as usize * row_repeat;
                (
                    ptr_w.max(ptr_w / 2 + item_w),
                    ptr_h.max(ptr_h / 2 + item_h),
                )
            }
            None => (ptr_w, ptr_h),
        };

        let width = width.min(u16::MAX as usize);
        let height = height.min(u16::MAX as usize);
        let frame_len = width * height;
        let mut pixels = vec![TRANSPARENT_INDEX; frame_len * pointer.frames as usize];

        if frame_len > 0 {
            for (index, target) in pixels.chunks_exact_mut(frame_len).enumerate() {
                if let Some(item) = carried {
                    let item_h = item.height as usize * row_repeat;
                    let layer = Layer {
                        pixels: item.frame(0),
                        width: item.width as usize,
                        rows: item.height as usize,
                    };
                    let x = width.saturating_sub(layer.width);
                    layer.draw(target, width, x, height.saturating_sub(item_h), row_repeat);
                }

                let layer = Layer {
                    pixels: pointer.frame(index),
                    width: ptr_w,
                    rows: pointer.height as usize,
                };
                layer.draw(target, width, 0, 0, row_repeat);
            }
        }

        PointerSprite {
            frames: pointer.frames,
            width: width as u16,
            height: height as u16,
            hotspot_x: pointer.hotspot_x,
            hotspot_y: pointer.hotspot_y,
            pixels,
        }
    }
}

//=== Layer ===============================================================

/// One source image being stamped into a composite frame.
struct Layer<'a> {
    pixels: &'a [u8],
    width: usize,
    rows: usize,
}

impl Layer<'_> {
    /// Copies opaque pixels to `(x, y)` of a frame `stride` pixels wide.
    fn draw(&self, target: &mut [u8], stride: usize, x: usize, y: usize, row_repeat: usize) {
        if self.width == 0 {
            return;
        }

        let visible = self.width.min(stride.saturating_sub(x));
        for (row, line) in self.pixels.chunks_exact(self.width).take(self.rows).enumerate() {
            for copy in 0..row_repeat {
                let start = (y + row * row_repeat + copy) * stride + x;
                let Some(dst) = target.get_mut(start..start + visible) else {
                    return;
                };
                for (dst, &src) in dst.iter_mut().zip(line) {
                    if src != SOURCE_CLEAR {
                        *dst = src;
                    }
                }
            }
        }
    }
}

//=== SpriteSource for HashMap ============================================

impl SpriteSource for HashMap<SpriteId, PointerSprite> {
    fn fetch_sprite(&self, id: SpriteId) -> Option<&PointerSprite> {
        self.get(&id)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
