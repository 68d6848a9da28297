use crate::foundation::math::mul_div255_u16;

/// One rendered frame: RGBA8, row-major, `width * height * 4` bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// Opaque RGBA8 copy composited over `background`.
    pub fn flatten_onto(&self, background: [u8; 3]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let a = u16::from(px[3]);
            for (&c, &bg) in px[..3].iter().zip(&background) {
                let fg = if self.premultiplied {
                    u16::from(c)
                } else {
                    mul_div255_u16(u16::from(c), a)
                };
                out.push((fg + mul_div255_u16(u16::from(bg), 255 - a)).min(255) as u8);
            }
            out.push(255);
        }
        out
    }

    /// Straight-alpha `image` buffer.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
