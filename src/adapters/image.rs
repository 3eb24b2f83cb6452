//! Adapter immagini: re-encoding in-process con `image`, `oxipng` e `webp`.
//!
//! ## Strategia per formato:
//! - **JPEG**: decode + re-encode a qualità configurabile (`quality`, 1-100)
//! - **PNG**: ottimizzazione lossless con oxipng (`pngPreset`, 0-6)
//! - **WebP**: decode + re-encode lossy (`webpQuality`, 1-100)
//!
//! ## Output derivato:
//! Con `generateWebp: true` ogni immagine non-WebP produce anche una
//! variante `.webp` accanto al file primario. La variante è best-effort:
//! un suo fallimento non tocca il file primario.

use super::CompressionAdapter;
use crate::config::CategorySettings;
use crate::error::OptimizeError;
use crate::walker::FileTask;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::path::{Path, PathBuf};

pub struct ImageAdapter {
    jpeg_quality: u8,
    png_preset: u8,
    webp_quality: u8,
    generate_webp: bool,
}

impl ImageAdapter {
    pub fn new(settings: &CategorySettings) -> Self {
        Self {
            jpeg_quality: settings.u8_option("quality", 80),
            png_preset: settings.u8_option("pngPreset", 2),
            webp_quality: settings.u8_option("webpQuality", 80),
            generate_webp: settings.bool_option("generateWebp", false),
        }
    }

    fn extension(path: &Path) -> String {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    fn encode_jpeg(&self, input: &[u8]) -> Result<Vec<u8>, OptimizeError> {
        let decoded = image::load_from_memory(input)?;
        let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
        let mut output = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut output, self.jpeg_quality);
        rgb.write_with_encoder(encoder)?;
        Ok(output)
    }

    fn encode_png(&self, input: &[u8]) -> Result<Vec<u8>, OptimizeError> {
        let options = oxipng::Options::from_preset(self.png_preset);
        oxipng::optimize_from_memory(input, &options)
            .map_err(|e| OptimizeError::Compression(format!("PNG optimization failed: {}", e)))
    }

    fn encode_webp(&self, input: &[u8]) -> Result<Vec<u8>, OptimizeError> {
        let decoded = image::load_from_memory(input)?;
        let rgba = DynamicImage::ImageRgba8(decoded.to_rgba8());
        let encoder = webp::Encoder::from_image(&rgba)
            .map_err(|e| OptimizeError::Compression(format!("WebP encoding failed: {}", e)))?;
        let memory = encoder.encode(self.webp_quality as f32);
        Ok(memory.to_vec())
    }
}

impl CompressionAdapter for ImageAdapter {
    fn transform(&self, task: &FileTask, input: &[u8]) -> Result<Vec<u8>, OptimizeError> {
        match Self::extension(&task.relative_path).as_str() {
            "jpg" | "jpeg" => self.encode_jpeg(input),
            "png" => self.encode_png(input),
            "webp" => self.encode_webp(input),
            other => Err(OptimizeError::UnsupportedFormat(format!(
                "No image encoder for .{} ({})",
                other,
                task.relative_path.display()
            ))),
        }
    }

    fn derivative(
        &self,
        task: &FileTask,
        input: &[u8],
    ) -> Option<(PathBuf, Result<Vec<u8>, OptimizeError>)> {
        if !self.generate_webp || Self::extension(&task.relative_path) == "webp" {
            return None;
        }
        let relative = task.relative_path.with_extension("webp");
        Some((relative, self.encode_webp(input)))
    }
}
