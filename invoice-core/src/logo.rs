use std::fs;
use std::path::Path;

use crate::error::InvoiceError;

/// PDF color space for embedded image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceRGB,
    DeviceGray,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceGray => "DeviceGray",
        }
    }
}

/// The company logo, decoded once at startup and treated as an
/// immutable value from then on. The sink embeds it as an image
/// XObject; the layout engine only references it by identity.
#[derive(Debug)]
pub struct Logo {
    pub width: u32,
    pub height: u32,
    pub color_space: ColorSpace,
    /// Raw 8-bit samples (RGB triplets or single gray bytes).
    pub samples: Vec<u8>,
    /// Separate 8-bit alpha plane, if the PNG carried one.
    pub alpha: Option<Vec<u8>>,
}

impl Logo {
    /// Decode a PNG into raw samples ready for embedding.
    ///
    /// RGB and RGBA map to DeviceRGB (alpha split off into a soft-mask
    /// plane); grayscale variants map to DeviceGray. Palette images
    /// reach us already expanded to RGB by the decoder; 16-bit depths
    /// are rejected as unsupported.
    pub fn from_png_bytes(data: &[u8]) -> Result<Logo, InvoiceError> {
        let decoder = png::Decoder::new(data);
        let mut reader = decoder.read_info()?;

        let mut buf = vec![0u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());

        if info.bit_depth != png::BitDepth::Eight {
            return Err(InvoiceError::UnsupportedLogo(format!(
                "bit depth {:?} (expected 8)",
                info.bit_depth
            )));
        }

        let (color_space, samples, alpha) = match info.color_type {
            png::ColorType::Rgb => (ColorSpace::DeviceRGB, buf, None),
            png::ColorType::Rgba => {
                let n = (info.width * info.height) as usize;
                let mut rgb = Vec::with_capacity(n * 3);
                let mut mask = Vec::with_capacity(n);
                for px in buf.chunks_exact(4) {
                    rgb.extend_from_slice(&px[..3]);
                    mask.push(px[3]);
                }
                (ColorSpace::DeviceRGB, rgb, Some(mask))
            }
            png::ColorType::Grayscale => (ColorSpace::DeviceGray, buf, None),
            png::ColorType::GrayscaleAlpha => {
                let n = (info.width * info.height) as usize;
                let mut gray = Vec::with_capacity(n);
                let mut mask = Vec::with_capacity(n);
                for px in buf.chunks_exact(2) {
                    gray.push(px[0]);
                    mask.push(px[1]);
                }
                (ColorSpace::DeviceGray, gray, Some(mask))
            }
            other => {
                return Err(InvoiceError::UnsupportedLogo(format!(
                    "color type {:?}",
                    other
                )))
            }
        };

        Ok(Logo {
            width: info.width,
            height: info.height,
            color_space,
            samples,
            alpha,
        })
    }

    /// One-time load from disk, for the process-lifetime asset.
    pub fn from_png_file<P: AsRef<Path>>(path: P) -> Result<Logo, InvoiceError> {
        let data = fs::read(path)?;
        Logo::from_png_bytes(&data)
    }
}
