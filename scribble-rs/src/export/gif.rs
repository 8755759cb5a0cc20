//! Background GIF encoding.
//!
//! Encoding runs on a dedicated thread fed through a command channel. Each
//! request carries its own pixel snapshot, so the caller may keep drawing on
//! the source surface as soon as the export is dispatched.

use super::{Download, DownloadSink, ExportFormat};
use crate::error::{RasterError, RasterResult};
use futures::channel::{mpsc, mpsc::Sender, oneshot};
use futures::StreamExt;
use image::codecs::gif::GifEncoder;
use image::{Delay, Frame, RgbaImage};
use std::future::Future;
use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::task::JoinHandle as TaskHandle;
use tokio_util::sync::CancellationToken;

/// NeuQuant sampling factor: 1 is slowest, 30 fastest.
const ENCODER_SPEED: i32 = 10;

pub(crate) enum GifCommand {
    Encode {
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        delay_ms: u16,
        cancel: CancellationToken,
        responder: oneshot::Sender<RasterResult<Vec<u8>>>,
    },
}

/// Handle to the encoder thread. Cloning shares the thread.
#[derive(Clone)]
pub(crate) struct GifWorker {
    sender: Sender<GifCommand>,
    _handle: Arc<JoinHandle<()>>,
}

impl GifWorker {
    pub(crate) fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<GifCommand>(32);

        let handle = Arc::new(thread::spawn(move || {
            while let Some(cmd) = futures::executor::block_on(receiver.next()) {
                match cmd {
                    GifCommand::Encode {
                        pixels,
                        width,
                        height,
                        delay_ms,
                        cancel,
                        responder,
                    } => {
                        let result = if cancel.is_cancelled() {
                            Err(RasterError::Cancelled)
                        } else {
                            encode_gif(pixels, width, height, delay_ms)
                        };
                        responder.send(result).ok();
                    }
                }
            }
            log::debug!("GIF encoder thread exiting");
        }));

        Self {
            sender,
            _handle: handle,
        }
    }

    /// Queue an encode and return the receiving end of its result.
    pub(crate) fn dispatch(
        &self,
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        delay_ms: u16,
        cancel: CancellationToken,
    ) -> RasterResult<oneshot::Receiver<RasterResult<Vec<u8>>>> {
        let (resp_tx, resp_rx) = oneshot::channel::<RasterResult<Vec<u8>>>();
        let cmd = GifCommand::Encode {
            pixels,
            width,
            height,
            delay_ms,
            cancel,
            responder: resp_tx,
        };

        // A fresh sender clone always has a free slot, so this only fails
        // once the thread is gone.
        self.sender
            .clone()
            .try_send(cmd)
            .map_err(|err| RasterError::EncoderUnavailable(err.to_string()))?;
        Ok(resp_rx)
    }
}

/// Encode straight-alpha RGBA pixels as a single-frame GIF.
pub fn encode_gif(pixels: Vec<u8>, width: u32, height: u32, delay_ms: u16) -> RasterResult<Vec<u8>> {
    let frame = RgbaImage::from_raw(width, height, pixels).ok_or_else(|| {
        RasterError::Encode(format!("pixel buffer does not match {width}x{height}"))
    })?;

    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut bytes, ENCODER_SPEED);
        encoder.encode_frame(Frame::from_parts(
            frame,
            0,
            0,
            Delay::from_numer_denom_ms(delay_ms as u32, 1),
        ))?;
    }
    log::debug!("encoded {width}x{height} GIF: {} bytes", bytes.len());
    Ok(bytes)
}

/// A dispatched GIF export.
///
/// Resolve it with [`GifExport::finish`] or hand it a callback with
/// [`GifExport::on_complete`]. Either way it completes exactly once.
#[must_use = "a GIF export does nothing until it is finished"]
pub struct GifExport {
    name: String,
    receiver: oneshot::Receiver<RasterResult<Vec<u8>>>,
    sink: Arc<dyn DownloadSink>,
    cancel: CancellationToken,
    timeout: Option<Duration>,
}

impl GifExport {
    pub(crate) fn new(
        name: String,
        receiver: oneshot::Receiver<RasterResult<Vec<u8>>>,
        sink: Arc<dyn DownloadSink>,
        cancel: CancellationToken,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            name,
            receiver,
            sink,
            cancel,
            timeout,
        }
    }

    /// Token that aborts this export when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Wait for the encoder and deliver the result to the sink.
    pub async fn finish(self) -> RasterResult<Download> {
        let GifExport {
            name,
            receiver,
            sink,
            cancel,
            timeout,
        } = self;

        let encoded = async move {
            match receiver.await {
                Ok(result) => result,
                Err(_) => Err(RasterError::EncoderUnavailable(
                    "encoder dropped the request".to_string(),
                )),
            }
        };

        let bytes = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::info!("GIF export of {name} cancelled");
                return Err(RasterError::Cancelled);
            }
            result = with_timeout(timeout, encoded) => match result {
                Err(err @ RasterError::TimedOut(_)) => {
                    // Nobody will receive the frame, so let the worker skip it.
                    cancel.cancel();
                    return Err(err);
                }
                other => other?,
            },
        };

        let download = Download::new(&name, ExportFormat::Gif, bytes);
        sink.deliver(&download)?;
        Ok(download)
    }

    /// Finish on the current tokio runtime and pass the outcome to `callback`.
    pub fn on_complete<F>(self, callback: F) -> RasterResult<TaskHandle<()>>
    where
        F: FnOnce(RasterResult<Download>) + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|err| RasterError::EncoderUnavailable(err.to_string()))?;
        Ok(runtime.spawn(async move { callback(self.finish().await) }))
    }
}

async fn with_timeout<F>(timeout: Option<Duration>, encoded: F) -> RasterResult<Vec<u8>>
where
    F: Future<Output = RasterResult<Vec<u8>>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, encoded)
            .await
            .map_err(|_| RasterError::TimedOut(limit.as_millis() as u64))?,
        None => encoded.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_gif_single_frame() {
        let pixels = [255u8, 0, 0, 255].repeat(4 * 3);
        let bytes = encode_gif(pixels, 4, 3, 200).unwrap();
        assert_eq!(&bytes[..6], b"GIF89a");

        let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Gif)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 3));
        let [r, g, b, a] = decoded.get_pixel(2, 1).0;
        assert!(r > 240 && g < 15 && b < 15, "{r} {g} {b}");
        assert_eq!(a, 255);
    }

    #[test]
    fn test_encode_gif_rejects_short_buffer() {
        let err = encode_gif(vec![0; 7], 2, 2, 200).unwrap_err();
        assert!(matches!(err, RasterError::Encode(_)));
    }

    #[test]
    fn test_worker_answers_each_request() {
        let worker = GifWorker::new();
        let first = worker
            .dispatch(vec![0; 16], 2, 2, 100, CancellationToken::new())
            .unwrap();
        let cancelled = CancellationToken::new();
        cancelled.cancel();
        let second = worker.dispatch(vec![0; 16], 2, 2, 100, cancelled).unwrap();

        let first = futures::executor::block_on(first).unwrap();
        assert!(first.is_ok());
        let second = futures::executor::block_on(second).unwrap();
        assert!(matches!(second, Err(RasterError::Cancelled)));
    }
}
