use iced::Size;
use prompter_core::{ContentLayout, LayoutParams, ScriptId};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Inputs that invalidate the measured layout.
#[derive(Debug, Clone, PartialEq)]
pub(in crate::app) struct LayoutKey {
    script_id: ScriptId,
    content_hash: u64,
    font_size: u32,
    width_px: u32,
}

impl LayoutKey {
    pub(in crate::app) fn new(script_id: &str, content: &str, font_size: u32, width: f32) -> Self {
        let mut hasher = DefaultHasher::new();
        content.hash(&mut hasher);
        Self {
            script_id: script_id.to_string(),
            content_hash: hasher.finish(),
            font_size,
            width_px: width.max(0.0).round() as u32,
        }
    }
}

/// Measured script geometry for the prompter canvas.
///
/// The viewport is whatever the canvas last reported; until it does (or after
/// the surrounding chrome changed) an estimate from the window size is used.
#[derive(Debug, Clone, Default)]
pub(in crate::app) struct SurfaceState {
    pub(in crate::app) layout: ContentLayout,
    pub(in crate::app) marker_centers: Vec<f32>,
    pub(in crate::app) viewport: Size,
    estimate: Size,
    reported: Option<Size>,
    layout_key: Option<LayoutKey>,
}

impl SurfaceState {
    pub(in crate::app) fn new(estimate: Size) -> Self {
        Self {
            viewport: estimate,
            estimate,
            ..Self::default()
        }
    }

    pub(in crate::app) fn set_estimate(&mut self, estimate: Size) {
        if estimate != self.estimate {
            self.estimate = estimate;
            self.reported = None;
        }
        self.viewport = self.reported.unwrap_or(self.estimate);
    }

    /// Real canvas bounds. Returns false when they match what we have.
    pub(in crate::app) fn report(&mut self, size: Size) -> bool {
        let unchanged = (self.viewport.width - size.width).abs() < 0.5
            && (self.viewport.height - size.height).abs() < 0.5;
        self.reported = Some(size);
        self.viewport = size;
        !unchanged
    }

    /// Re-measure if any input changed. Returns true when it did.
    pub(in crate::app) fn remeasure(
        &mut self,
        key: LayoutKey,
        content: &str,
        params: &LayoutParams,
    ) -> bool {
        if self.layout_key.as_ref() == Some(&key) {
            return false;
        }
        self.layout = ContentLayout::measure(content, params);
        self.marker_centers = self.layout.marker_centers();
        self.layout_key = Some(key);
        true
    }

    pub(in crate::app) fn max_scroll(&self) -> f32 {
        self.layout.max_scroll(self.viewport.height)
    }
}
