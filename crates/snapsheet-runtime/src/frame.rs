#![forbid(unsafe_code)]

//! Per-frame renderer payload.

use snapsheet_core::{ExpansionState, SheetController, SheetVisuals};

/// Everything a renderer needs to draw one frame of the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    /// Offset of the sheet's top edge from the viewport top, in px.
    pub live_position: f64,
    pub progress: f64,
    pub visuals: SheetVisuals,
    pub state: ExpansionState,
    /// Inner content may scroll.
    pub content_scroll: bool,
}

impl FrameOutput {
    #[must_use]
    pub fn from_controller(controller: &SheetController) -> Self {
        let progress = controller.progress();
        Self {
            live_position: controller.live_position(),
            progress,
            visuals: SheetVisuals::at(progress),
            state: controller.state(),
            content_scroll: controller.content_scroll_enabled(),
        }
    }
}
