//! Export pipeline: PNG, SVG (embedded raster) and single-frame GIF.
//!
//! PNG and SVG encode synchronously. GIF encoding is handed to a background
//! thread and completes through a [`GifExport`] handle. Every export of an
//! absent surface is a no-op that returns `None`.

mod gif;
mod sink;

pub use gif::{encode_gif, GifExport};
pub use sink::{DirectorySink, DownloadSink, MemorySink};

use crate::config::ExportOptions;
use crate::error::{RasterError, RasterResult};
use base64::{engine::general_purpose, Engine as _};
use gif::GifWorker;
use scribble_canvas2d::RasterSurface;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Svg,
    Gif,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Gif => "gif",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Gif => "image/gif",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "svg" => Ok(ExportFormat::Svg),
            "gif" => Ok(ExportFormat::Gif),
            other => Err(RasterError::Config(format!(
                "Unsupported export format: {other}"
            ))),
        }
    }
}

/// An encoded file ready to be handed to a [`DownloadSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Download {
    /// `name` is the file name without extension.
    pub fn new(name: &str, format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            filename: format!("{name}.{}", format.extension()),
            mime_type: format.mime_type(),
            bytes,
        }
    }

    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// Minimal SVG document wrapping the surface as one embedded PNG image.
///
/// This is a raster inside a vector container; no tracing is performed.
pub fn svg_document(surface: &RasterSurface, ppi: Option<f32>) -> RasterResult<String> {
    let png = surface.to_png(ppi)?;
    let (width, height) = (surface.width(), surface.height());
    Ok(format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" "#,
            r#"width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r#"<image x="0" y="0" width="{w}" height="{h}" href="data:image/png;base64,{data}"/>"#,
            "</svg>"
        ),
        w = width,
        h = height,
        data = general_purpose::STANDARD.encode(png)
    ))
}

/// Encodes surfaces and delivers the results to a sink.
#[derive(Clone)]
pub struct Exporter {
    sink: Arc<dyn DownloadSink>,
    options: ExportOptions,
    gif_worker: GifWorker,
}

impl Exporter {
    pub fn new(sink: impl DownloadSink + 'static, options: ExportOptions) -> Self {
        Self {
            sink: Arc::new(sink),
            options,
            gif_worker: GifWorker::new(),
        }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    fn deliver(&self, name: &str, format: ExportFormat, bytes: Vec<u8>) -> RasterResult<Download> {
        let download = Download::new(name, format, bytes);
        self.sink.deliver(&download)?;
        log::info!(
            "Exported {} ({} bytes)",
            download.filename,
            download.bytes.len()
        );
        Ok(download)
    }

    pub fn export_png(
        &self,
        surface: Option<&RasterSurface>,
        name: &str,
    ) -> RasterResult<Option<Download>> {
        let Some(surface) = surface else {
            return Ok(None);
        };
        let bytes = surface.to_png(self.options.ppi)?;
        self.deliver(name, ExportFormat::Png, bytes).map(Some)
    }

    pub fn export_svg(
        &self,
        surface: Option<&RasterSurface>,
        name: &str,
    ) -> RasterResult<Option<Download>> {
        let Some(surface) = surface else {
            return Ok(None);
        };
        let svg = svg_document(surface, self.options.ppi)?;
        self.deliver(name, ExportFormat::Svg, svg.into_bytes())
            .map(Some)
    }

    /// Snapshot `surface` and queue a single-frame GIF encode.
    ///
    /// The returned handle must be finished for the download to happen.
    /// `cancel` aborts the wait; a fresh token is used when none is given.
    pub fn export_gif(
        &self,
        surface: Option<&RasterSurface>,
        name: &str,
        cancel: Option<CancellationToken>,
    ) -> RasterResult<Option<GifExport>> {
        let Some(surface) = surface else {
            return Ok(None);
        };
        let (width, height) = (surface.width(), surface.height());
        let pixels = surface.get_image_data(0, 0, width, height);
        let cancel = cancel.unwrap_or_default();

        let receiver = self.gif_worker.dispatch(
            pixels,
            width,
            height,
            self.options.gif_frame_delay_ms,
            cancel.clone(),
        )?;
        log::debug!("Queued {width}x{height} GIF export of {name}");

        Ok(Some(GifExport::new(
            name.to_string(),
            receiver,
            self.sink.clone(),
            cancel,
            self.options.gif_timeout(),
        )))
    }

    /// Export in a synchronous format.
    ///
    /// GIF goes through [`Exporter::export_gif`] because it completes later.
    pub fn export(
        &self,
        format: ExportFormat,
        surface: Option<&RasterSurface>,
        name: &str,
    ) -> RasterResult<Option<Download>> {
        match format {
            ExportFormat::Png => self.export_png(surface, name),
            ExportFormat::Svg => self.export_svg(surface, name),
            ExportFormat::Gif => Err(RasterError::Config(
                "GIF exports complete asynchronously; use export_gif".to_string(),
            )),
        }
    }
}
