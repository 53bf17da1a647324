use std::path::Path;

use log::info;

use crate::config::ViewerConfig;
use crate::markers::{MarkerRegistry, ScannerTransform};
use crate::model::{ImageData, Volume};

use super::{AppError, IoService, Result};

/// Everything one viewer session shares: settings, markers with their undo
/// history, and the loaded image. Callers that need threads wrap the whole
/// context in a single lock.
#[derive(Debug, Default)]
pub struct ViewerContext {
    config: ViewerConfig,
    io_service: IoService,
    markers: MarkerRegistry,
    image: Option<ImageData>,
}

impl ViewerContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ViewerConfig) -> Self {
        let mut markers = MarkerRegistry::new(config.lookup.build());
        markers.set_default_color(config.default_color);
        if !config.labels_on {
            markers.set_labels_off();
        }
        Self {
            config,
            io_service: IoService,
            markers,
            image: None,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn io_service(&self) -> &IoService {
        &self.io_service
    }

    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    pub fn markers_mut(&mut self) -> &mut MarkerRegistry {
        &mut self.markers
    }

    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }

    pub fn image_mut(&mut self) -> Result<&mut ImageData> {
        self.image.as_mut().ok_or(AppError::NoImage)
    }

    /// Reads a volume from disk and makes it the current image.
    pub fn load_image(&mut self, path: impl AsRef<Path>) -> Result<&ImageData> {
        let volume = self.io_service.read(path)?;
        self.set_volume(volume)
    }

    /// Replaces the current volume, keeping the plane and clamping the slice
    /// index. The volume's affine becomes the markers' scanner transform.
    pub fn set_volume(&mut self, volume: Volume) -> Result<&ImageData> {
        let transform = volume
            .affine
            .map(|affine| ScannerTransform::new(affine, volume.spacings));
        let shape = volume.shape().to_vec();

        match self.image.as_mut() {
            Some(image) => image.set_volume(volume)?,
            None => self.image = Some(ImageData::new(volume)?),
        }
        self.markers.set_scanner_transform(transform);
        info!(
            "event=image_load module=runtime status=ok shape={shape:?} scanner_transform={}",
            transform.is_some()
        );
        self.image.as_ref().ok_or(AppError::NoImage)
    }

    pub fn undo(&mut self) -> bool {
        self.markers.undo()
    }
}
