//! Pixel data access and PNG input/output for RasterSurface.

use super::RasterSurface;
use crate::error::{SurfaceError, SurfaceResult};

impl RasterSurface {
    /// Get non-premultiplied RGBA data for a region of the surface.
    ///
    /// Pixels outside the surface read as transparent black.
    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0u8; width as usize * height as usize * 4];
        let pixels = self.pixmap.data();

        for dy in 0..height {
            let src_y = y + dy as i32;
            if src_y < 0 || src_y >= self.height as i32 {
                continue;
            }
            for dx in 0..width {
                let src_x = x + dx as i32;
                if src_x < 0 || src_x >= self.width as i32 {
                    continue;
                }

                let src_idx = (src_y as usize * self.width as usize + src_x as usize) * 4;
                let dst_idx = (dy as usize * width as usize + dx as usize) * 4;
                let pixel = &pixels[src_idx..src_idx + 4];

                // Convert from premultiplied alpha to straight alpha, rounding so
                // that writing the result back reproduces the stored pixel.
                let a = pixel[3];
                match a {
                    0 => {}
                    255 => data[dst_idx..dst_idx + 4].copy_from_slice(pixel),
                    _ => {
                        let a16 = a as u16;
                        for c in 0..3 {
                            let v = (pixel[c] as u16 * 255 + a16 / 2) / a16;
                            data[dst_idx + c] = v.min(255) as u8;
                        }
                        data[dst_idx + 3] = a;
                    }
                }
            }
        }

        data
    }

    /// Write non-premultiplied RGBA data to the surface at (dx, dy).
    ///
    /// This bypasses compositing and writes pixels directly. Pixels that land
    /// outside the surface are silently dropped. `data` shorter than
    /// `width * height * 4` bytes is ignored.
    pub fn put_image_data(&mut self, data: &[u8], width: u32, height: u32, dx: i32, dy: i32) {
        log::debug!(target: "canvas", "putImageData {}x{} at {} {}", width, height, dx, dy);
        if data.len() < width as usize * height as usize * 4 {
            log::warn!(
                target: "canvas",
                "putImageData ignored: {} bytes for {}x{}",
                data.len(),
                width,
                height
            );
            return;
        }

        let surface_width = self.width as i32;
        let surface_height = self.height as i32;
        let pixmap_data = self.pixmap.data_mut();

        for sy in 0..height as i32 {
            let dst_row = dy + sy;
            if dst_row < 0 || dst_row >= surface_height {
                continue;
            }
            for sx in 0..width as i32 {
                let dst_col = dx + sx;
                if dst_col < 0 || dst_col >= surface_width {
                    continue;
                }

                let src_idx = (sy as usize * width as usize + sx as usize) * 4;
                let dst_idx = (dst_row as usize * surface_width as usize + dst_col as usize) * 4;

                let [r, g, b, a] = [
                    data[src_idx],
                    data[src_idx + 1],
                    data[src_idx + 2],
                    data[src_idx + 3],
                ];

                // Convert to premultiplied alpha using integer math
                let (pr, pg, pb) = match a {
                    255 => (r, g, b),
                    0 => (0, 0, 0),
                    _ => {
                        let a16 = a as u16;
                        (
                            ((r as u16 * a16 + 127) / 255) as u8,
                            ((g as u16 * a16 + 127) / 255) as u8,
                            ((b as u16 * a16 + 127) / 255) as u8,
                        )
                    }
                };

                pixmap_data[dst_idx] = pr;
                pixmap_data[dst_idx + 1] = pg;
                pixmap_data[dst_idx + 2] = pb;
                pixmap_data[dst_idx + 3] = a;
            }
        }
    }

    /// The alpha channel of every pixel, row-major.
    pub fn alpha_channel(&self) -> Vec<u8> {
        self.pixmap.data().chunks_exact(4).map(|px| px[3]).collect()
    }

    /// Export the surface as PNG data.
    ///
    /// # Arguments
    /// * `ppi` - Optional pixels per inch for PNG metadata. Defaults to 72 if not specified.
    pub fn to_png(&self, ppi: Option<f32>) -> SurfaceResult<Vec<u8>> {
        let ppi = ppi.unwrap_or(72.0);

        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            // Set pixel density metadata (pixels per meter)
            let ppm = (ppi.max(0.0) / 0.0254).round() as u32;
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;

            // Convert from premultiplied to straight alpha for PNG
            let data = self.get_image_data(0, 0, self.width, self.height);
            writer.write_image_data(&data)?;
        }
        log::debug!(target: "canvas", "toPng {}x{} -> {} bytes", self.width, self.height, buf.len());
        Ok(buf)
    }

    /// Decode PNG data into a new surface.
    ///
    /// Any PNG color type and bit depth is accepted and normalized to RGBA8.
    pub fn from_png(data: &[u8]) -> SurfaceResult<Self> {
        let mut decoder = png::Decoder::new(data);
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        let pixels = &buf[..info.buffer_size()];

        let rgba: Vec<u8> = match info.color_type {
            png::ColorType::Rgba => pixels.to_vec(),
            png::ColorType::Rgb => pixels
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], 255])
                .collect(),
            png::ColorType::GrayscaleAlpha => pixels
                .chunks_exact(2)
                .flat_map(|px| [px[0], px[0], px[0], px[1]])
                .collect(),
            png::ColorType::Grayscale => pixels
                .iter()
                .flat_map(|&v| [v, v, v, 255])
                .collect(),
            png::ColorType::Indexed => {
                return Err(SurfaceError::PngDecodeError(
                    "indexed color was not expanded".to_string(),
                ))
            }
        };

        let mut surface = Self::new(info.width, info.height)?;
        surface.put_image_data(&rgba, info.width, info.height, 0, 0);
        log::debug!(target: "canvas", "fromPng {}x{}", info.width, info.height);
        Ok(surface)
    }
}
