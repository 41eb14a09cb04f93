//! Stateful conversion pipeline.
//!
//! Owns the loaded image, the settings and every buffer derived from them.
//! Derived buffers form a small dependency graph:
//!
//! ```text
//! source ─> pixels ─┬─> luminance
//!                   └─> blurred ─> blurred luminance
//! ```
//!
//! Each buffer is computed on first read and kept until something upstream
//! changes; invalidating a stage also invalidates everything below it.

use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::ascii::{
    apply_contrast, gaussian_blur, render_color_shaded, render_edges, render_shaded,
    render_true_color, resample, to_luminance_into, CharSet, GlyphGrid, Mode, PixelBuffer,
    RenderPlan,
};
use crate::error::ConvertError;
use crate::settings::{Invalidation, SettingUpdate, Settings};

/// Where to read an encoded image from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        ImageSource::Bytes(bytes)
    }
}

/// Dimensions of the loaded source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceInfo {
    pub width: u32,
    pub height: u32,
}

impl SourceInfo {
    /// Width / height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// A derived buffer in the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Pixels,
    Luminance,
    Blurred,
    BlurredLuminance,
}

impl Stage {
    /// Stages computed directly from this one.
    pub fn dependents(&self) -> &'static [Stage] {
        match self {
            Stage::Pixels => &[Stage::Luminance, Stage::Blurred],
            Stage::Blurred => &[Stage::BlurredLuminance],
            Stage::Luminance | Stage::BlurredLuminance => &[],
        }
    }
}

/// A cached value plus whether it reflects the current upstream state.
///
/// Stale slots keep their allocation so recomputation can reuse it.
#[derive(Debug, Default)]
struct Slot<T> {
    value: T,
    fresh: bool,
}

impl<T> Slot<T> {
    fn get(&self) -> Option<&T> {
        self.fresh.then_some(&self.value)
    }

    fn store(&mut self, value: T) {
        self.value = value;
        self.fresh = true;
    }

    fn mark_stale(&mut self) {
        self.fresh = false;
    }
}

#[derive(Debug, Default)]
struct BufferCache {
    pixels: Slot<PixelBuffer>,
    luminance: Slot<Vec<u8>>,
    blurred: Slot<PixelBuffer>,
    blurred_luminance: Slot<Vec<u8>>,
}

impl BufferCache {
    /// Mark `stage` and everything downstream of it stale.
    fn invalidate(&mut self, stage: Stage) {
        match stage {
            Stage::Pixels => self.pixels.mark_stale(),
            Stage::Luminance => self.luminance.mark_stale(),
            Stage::Blurred => self.blurred.mark_stale(),
            Stage::BlurredLuminance => self.blurred_luminance.mark_stale(),
        }
        for &dependent in stage.dependents() {
            self.invalidate(dependent);
        }
    }

    fn is_fresh(&self, stage: Stage) -> bool {
        match stage {
            Stage::Pixels => self.pixels.fresh,
            Stage::Luminance => self.luminance.fresh,
            Stage::Blurred => self.blurred.fresh,
            Stage::BlurredLuminance => self.blurred_luminance.fresh,
        }
    }
}

struct SourceImage {
    image: DynamicImage,
    info: SourceInfo,
}

/// Image to glyph converter for one image at a time.
///
/// All operations take `&mut self`, so a load can never interleave with a
/// render or another load on the same instance.
pub struct Pipeline {
    settings: Settings,
    source: Option<SourceImage>,
    cache: BufferCache,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            source: None,
            cache: BufferCache::default(),
        }
    }
}

impl Pipeline {
    /// Create a pipeline with the given settings.
    ///
    /// Fails with a validation error when any field is out of range.
    pub fn new(settings: Settings) -> Result<Self, ConvertError> {
        settings.validate()?;
        Ok(Self {
            settings,
            ..Self::default()
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Dimensions of the loaded image, if any.
    pub fn source_info(&self) -> Option<SourceInfo> {
        self.source.as_ref().map(|s| s.info)
    }

    /// Whether a derived buffer is currently cached and current.
    pub fn is_fresh(&self, stage: Stage) -> bool {
        self.cache.is_fresh(stage)
    }

    /// Decode an image and make it the current source.
    ///
    /// Decoding runs on the blocking thread pool. On failure the previously
    /// loaded image and its buffers are left as they were.
    pub async fn load_image(
        &mut self,
        source: impl Into<ImageSource>,
    ) -> Result<SourceInfo, ConvertError> {
        let bytes = match source.into() {
            ImageSource::Path(path) => {
                if path.as_os_str().is_empty() {
                    return Err(ConvertError::NoSource);
                }
                log::debug!("Reading image from {}", path.display());
                let read = tokio::fs::read(&path).await;
                read.map_err(|source| ConvertError::Read { path, source })?
            }
            ImageSource::Bytes(bytes) => bytes,
        };
        if bytes.is_empty() {
            return Err(ConvertError::NoSource);
        }

        let image = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
            .await
            .map_err(|e| ConvertError::DecodeTask(e.to_string()))??;

        Ok(self.load_decoded(image))
    }

    /// Make an already decoded image the current source.
    pub fn load_decoded(&mut self, image: DynamicImage) -> SourceInfo {
        let info = SourceInfo {
            width: image.width(),
            height: image.height(),
        };
        log::info!(
            "Loaded {}x{} image (aspect ratio {:.3})",
            info.width,
            info.height,
            info.aspect_ratio()
        );

        self.source = Some(SourceImage { image, info });
        self.cache.invalidate(Stage::Pixels);
        if info.height > 0 {
            self.settings.fit_to_aspect(info.aspect_ratio());
        }
        info
    }

    /// Drop the current image and all derived buffers.
    pub fn unload(&mut self) {
        self.source = None;
        self.cache = BufferCache::default();
    }

    /// Apply a typed settings update, invalidating stale buffers.
    pub fn update(&mut self, update: SettingUpdate) -> Result<Invalidation, ConvertError> {
        let aspect = self
            .source
            .as_ref()
            .map(|s| s.info)
            .filter(|info| info.height > 0)
            .map(|info| info.aspect_ratio());
        let invalidation = self.settings.apply(update, aspect)?;
        match invalidation {
            Invalidation::None => {}
            Invalidation::Blur => self.cache.invalidate(Stage::Blurred),
            Invalidation::All => self.cache.invalidate(Stage::Pixels),
        }
        if invalidation != Invalidation::None {
            log::debug!("Setting {:?} invalidated {} buffers", update, invalidation);
        }
        Ok(invalidation)
    }

    /// Apply a string-keyed settings update.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConvertError> {
        let update = SettingUpdate::parse(key, value)?;
        self.update(update)?;
        Ok(())
    }

    /// Render with the configured mode and charset.
    pub fn render(&mut self) -> Result<GlyphGrid, ConvertError> {
        self.render_as(self.settings.mode, self.settings.charset)
    }

    /// Render with an explicit mode and charset; other settings as configured.
    pub fn render_as(&mut self, mode: Mode, charset: CharSet) -> Result<GlyphGrid, ConvertError> {
        let plan = RenderPlan::resolve(
            mode,
            charset,
            self.settings.reverse_intensity,
            self.settings.braille_levels,
        )?;
        if self.source.is_none() {
            return Err(ConvertError::NoImage);
        }
        log::debug!(
            "Rendering {} ({}) at {}x{}",
            mode,
            charset,
            self.settings.output_width,
            self.settings.output_height
        );

        let grid = match plan {
            RenderPlan::Shaded { ramp, blank } => {
                let width = self.settings.output_width as usize;
                let factor = self.settings.contrast_factor;
                let samples = apply_contrast(self.luminance()?, factor);
                render_shaded(&samples, width, ramp, blank)
            }
            RenderPlan::TrueColor { glyph } => render_true_color(self.pixels()?, glyph),
            RenderPlan::ColorShaded { ramp } => {
                self.ensure(Stage::Luminance)?;
                let (pixels, luminance) = self
                    .cache
                    .pixels
                    .get()
                    .zip(self.cache.luminance.get())
                    .ok_or(ConvertError::NoImage)?;
                render_color_shaded(pixels, luminance, ramp)
            }
            RenderPlan::Edges { glyphs, fill } => {
                let width = self.settings.output_width;
                let height = self.settings.output_height;
                let threshold = self.settings.edge_threshold;
                let blurred = self.blurred_luminance()?;
                render_edges(blurred, width, height, glyphs, fill, threshold)
            }
        };
        Ok(grid)
    }

    /// Resampled RGBA buffer at the output resolution.
    pub fn pixels(&mut self) -> Result<&PixelBuffer, ConvertError> {
        self.ensure(Stage::Pixels)?;
        self.cache.pixels.get().ok_or(ConvertError::NoImage)
    }

    /// Luminance of the resampled buffer.
    pub fn luminance(&mut self) -> Result<&[u8], ConvertError> {
        self.ensure(Stage::Luminance)?;
        self.cache
            .luminance
            .get()
            .map(Vec::as_slice)
            .ok_or(ConvertError::NoImage)
    }

    /// Luminance of the Gaussian-blurred buffer.
    pub fn blurred_luminance(&mut self) -> Result<&[u8], ConvertError> {
        self.ensure(Stage::BlurredLuminance)?;
        self.cache
            .blurred_luminance
            .get()
            .map(Vec::as_slice)
            .ok_or(ConvertError::NoImage)
    }

    /// Compute `stage` and anything it depends on that is stale.
    fn ensure(&mut self, stage: Stage) -> Result<(), ConvertError> {
        let source = self.source.as_ref().ok_or(ConvertError::NoImage)?;
        let cache = &mut self.cache;

        if !cache.pixels.fresh {
            let (width, height) = (self.settings.output_width, self.settings.output_height);
            log::debug!("Resampling source to {}x{}", width, height);
            cache.pixels.store(resample(&source.image, width, height));
        }

        match stage {
            Stage::Pixels => {}
            Stage::Luminance => {
                if !cache.luminance.fresh {
                    to_luminance_into(cache.pixels.value.data(), &mut cache.luminance.value);
                    cache.luminance.fresh = true;
                }
            }
            Stage::Blurred | Stage::BlurredLuminance => {
                if !cache.blurred.fresh {
                    log::debug!("Blurring with radius {}", self.settings.blur_radius);
                    let blurred = gaussian_blur(&cache.pixels.value, self.settings.blur_radius);
                    cache.blurred.store(blurred);
                }
                if stage == Stage::BlurredLuminance && !cache.blurred_luminance.fresh {
                    to_luminance_into(
                        cache.blurred.value.data(),
                        &mut cache.blurred_luminance.value,
                    );
                    cache.blurred_luminance.fresh = true;
                }
            }
        }
        Ok(())
    }
}
