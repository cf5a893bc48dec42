//! Portrait decoding, rescaling and kitty graphics encoding.

use base64::{engine::general_purpose, Engine as _};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Kitty `f=` value for raw 8-bit RGBA payloads.
pub const RGBA_FORMAT: u32 = 32;

/// Upscale factor applied before handing portraits to the terminal.
pub const PORTRAIT_SCALE: u32 = 4;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteFrame {
    pub payload: String,
    pub width: u32,
    pub height: u32,
    pub format: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteData {
    pub frames: Vec<SpriteFrame>,
    pub width: u32,
    pub height: u32,
}

impl SpriteData {
    pub fn frame(&self, index: usize) -> Option<&SpriteFrame> {
        if self.frames.is_empty() {
            return None;
        }
        self.frames.get(index % self.frames.len())
    }

    /// Scales every frame by `factor`; `pixelated` keeps hard pixel edges.
    pub fn rescaled(&self, factor: u32, pixelated: bool) -> SpriteData {
        let frames: Vec<SpriteFrame> = self
            .frames
            .iter()
            .map(|frame| frame.rescaled(factor, pixelated))
            .collect();
        let (width, height) = frames
            .first()
            .map(|frame| (frame.width, frame.height))
            .unwrap_or((self.width, self.height));
        SpriteData {
            frames,
            width,
            height,
        }
    }
}

impl SpriteFrame {
    pub fn rescaled(&self, factor: u32, pixelated: bool) -> SpriteFrame {
        if self.format != RGBA_FORMAT || factor <= 1 {
            return self.clone();
        }
        let Ok(bytes) = general_purpose::STANDARD.decode(&self.payload) else {
            return self.clone();
        };
        let Some(image) = RgbaImage::from_raw(self.width, self.height, bytes) else {
            return self.clone();
        };
        let resized = imageops::resize(
            &image,
            self.width * factor,
            self.height * factor,
            scale_filter(pixelated),
        );
        SpriteFrame {
            payload: general_purpose::STANDARD.encode(resized.as_raw()),
            width: resized.width(),
            height: resized.height(),
            format: RGBA_FORMAT,
        }
    }
}

pub fn scale_filter(pixelated: bool) -> FilterType {
    if pixelated {
        FilterType::Nearest
    } else {
        FilterType::CatmullRom
    }
}

/// Decodes a portrait image into a single raw RGBA frame.
pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteData, DataError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = image.dimensions();
    Ok(SpriteData {
        frames: vec![SpriteFrame {
            payload: general_purpose::STANDARD.encode(image.as_raw()),
            width,
            height,
            format: RGBA_FORMAT,
        }],
        width,
        height,
    })
}

/// Cell size that fits the sprite into `max_cols` x `max_rows`, assuming
/// cells twice as tall as they are wide.
pub fn sprite_fit(sprite: &SpriteData, max_cols: u16, max_rows: u16) -> (u16, u16) {
    if sprite.width == 0 || sprite.height == 0 || max_cols == 0 || max_rows == 0 {
        return (0, 0);
    }
    let aspect = sprite.width as f32 / sprite.height as f32;
    let mut cols = max_cols;
    let mut rows = ((cols as f32 / aspect) / 2.0).round().max(1.0) as u16;
    if rows > max_rows {
        rows = max_rows;
        cols = ((rows as f32 * 2.0) * aspect).round().max(1.0) as u16;
    }
    (cols.min(max_cols), rows)
}

pub fn kitty_sequence(
    frame: &SpriteFrame,
    cols: u16,
    rows: u16,
    id: u32,
) -> Result<String, std::str::Utf8Error> {
    const CHUNK: usize = 4096;
    let payload = frame.payload.as_bytes();
    let total = payload.len().div_ceil(CHUNK);
    let mut out = String::new();

    for (index, chunk) in payload.chunks(CHUNK).enumerate() {
        let more = u8::from(index + 1 < total);
        let chunk = std::str::from_utf8(chunk)?;
        if index == 0 {
            let mut params = format!(
                "f={},s={},v={},a=T,t=d,i={id},q=2",
                frame.format, frame.width, frame.height
            );
            if cols > 0 {
                params.push_str(&format!(",c={cols}"));
            }
            if rows > 0 {
                params.push_str(&format!(",r={rows}"));
            }
            out.push_str(&format!("\x1b_G{params},m={more};{chunk}\x1b\\"));
        } else {
            out.push_str(&format!("\x1b_Gm={more};{chunk}\x1b\\"));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn checker_png() -> Vec<u8> {
        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        image.put_pixel(0, 1, Rgba([0, 0, 255, 255]));
        image.put_pixel(1, 1, Rgba([255, 255, 255, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        bytes
    }

    #[test]
    fn decodes_png_to_rgba() {
        let sprite = decode_sprite(&checker_png()).expect("decode");
        assert_eq!((sprite.width, sprite.height), (2, 2));
        let frame = sprite.frame(0).expect("frame");
        assert_eq!(frame.format, RGBA_FORMAT);
        assert_eq!(
            general_purpose::STANDARD.decode(&frame.payload).expect("b64").len(),
            16
        );
    }

    #[test]
    fn pixelated_rescale_replicates_pixels() {
        let sprite = decode_sprite(&checker_png()).expect("decode").rescaled(2, true);
        assert_eq!((sprite.width, sprite.height), (4, 4));
        let frame = sprite.frame(0).expect("frame");
        let raw = general_purpose::STANDARD.decode(&frame.payload).expect("b64");
        let image = RgbaImage::from_raw(4, 4, raw).expect("raw");
        assert_eq!(image.get_pixel(1, 1), &Rgba([255, 0, 0, 255]));
        assert_eq!(image.get_pixel(2, 0), &Rgba([0, 255, 0, 255]));
        assert_eq!(image.get_pixel(3, 3), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(matches!(
            decode_sprite(b"not an image"),
            Err(DataError::Image(_))
        ));
    }

    #[test]
    fn kitty_sequence_chunks_payload() {
        let frame = SpriteFrame {
            payload: "A".repeat(5000),
            width: 10,
            height: 10,
            format: RGBA_FORMAT,
        };
        let sequence = kitty_sequence(&frame, 8, 4, 7).expect("sequence");
        assert!(sequence.starts_with("\x1b_Gf=32,s=10,v=10,a=T,t=d,i=7,q=2,c=8,r=4,m=1;"));
        assert!(sequence.contains("\x1b_Gm=0;"));
    }

    #[test]
    fn fit_keeps_within_bounds() {
        let sprite = SpriteData {
            frames: Vec::new(),
            width: 40,
            height: 40,
        };
        let (cols, rows) = sprite_fit(&sprite, 20, 6);
        assert!(cols <= 20 && rows <= 6);
        assert_eq!(sprite_fit(&sprite, 0, 6), (0, 0));
    }
}
