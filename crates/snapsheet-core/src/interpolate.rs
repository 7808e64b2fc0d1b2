#![forbid(unsafe_code)]

//! Visual outputs derived from progress.
//!
//! Every renderer-facing value is a [`Ramp`] evaluated at the sheet's
//! progress (0 collapsed, 1 expanded). Ramps hold `from` before their
//! window, hold `to` after it, and ease in between, so each one is monotonic
//! and hits its endpoint values exactly at progress 0 and 1.
//!
//! | Channel | Window | Output |
//! |---------|--------|--------|
//! | `title_offset` | 0.0–1.0 | 0 → 24 px |
//! | `title_scale` | 0.0–1.0 | 0.8 → 1.0 |
//! | `backdrop_opacity` | 0.0–0.1 | 0 → 1 |
//! | `tab_row_opacity` | 0.4–0.8 | 0 → 1 |
//! | `close_button_opacity` | 0.7–1.0 | 0 → 1 |
//! | `handle_opacity` | 0.0–0.3 | 1 → 0 |
//! | `blur_radius` | 0.0–0.5 | 0 → 20 px |

use crate::animation::easing::{EasingFn, ease_in_out, ease_out, linear};

/// Clamped, eased mapping from a progress window to an output range.
#[derive(Debug, Clone, Copy)]
pub struct Ramp {
    /// Progress at which the ramp leaves `from`.
    pub start: f64,
    /// Progress at which the ramp reaches `to`.
    pub end: f64,
    pub from: f64,
    pub to: f64,
    pub easing: EasingFn,
}

impl Ramp {
    #[must_use]
    pub const fn new(start: f64, end: f64, from: f64, to: f64) -> Self {
        Self {
            start,
            end,
            from,
            to,
            easing: linear,
        }
    }

    #[must_use]
    pub const fn with_easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Evaluate at `progress`. NaN reads as 0.
    #[must_use]
    pub fn eval(&self, progress: f64) -> f64 {
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        if p <= self.start {
            return self.from;
        }
        if p >= self.end {
            return self.to;
        }
        let t = (p - self.start) / (self.end - self.start);
        self.from + (self.to - self.from) * (self.easing)(t)
    }

    /// True when the output grows with progress.
    #[inline]
    #[must_use]
    pub fn is_increasing(&self) -> bool {
        self.to >= self.from
    }
}

/// Renderer-facing channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualChannel {
    TitleOffset,
    TitleScale,
    BackdropOpacity,
    TabRowOpacity,
    CloseButtonOpacity,
    HandleOpacity,
    BlurRadius,
}

impl VisualChannel {
    pub const ALL: [Self; 7] = [
        Self::TitleOffset,
        Self::TitleScale,
        Self::BackdropOpacity,
        Self::TabRowOpacity,
        Self::CloseButtonOpacity,
        Self::HandleOpacity,
        Self::BlurRadius,
    ];

    #[must_use]
    pub const fn ramp(self) -> Ramp {
        match self {
            Self::TitleOffset => Ramp::new(0.0, 1.0, 0.0, 24.0).with_easing(ease_in_out),
            Self::TitleScale => Ramp::new(0.0, 1.0, 0.8, 1.0),
            // Sharp fade-in over the first tenth, then hold.
            Self::BackdropOpacity => Ramp::new(0.0, 0.1, 0.0, 1.0),
            Self::TabRowOpacity => Ramp::new(0.4, 0.8, 0.0, 1.0),
            Self::CloseButtonOpacity => Ramp::new(0.7, 1.0, 0.0, 1.0).with_easing(ease_out),
            Self::HandleOpacity => Ramp::new(0.0, 0.3, 1.0, 0.0),
            Self::BlurRadius => Ramp::new(0.0, 0.5, 0.0, 20.0).with_easing(ease_out),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TitleOffset => "title_offset",
            Self::TitleScale => "title_scale",
            Self::BackdropOpacity => "backdrop_opacity",
            Self::TabRowOpacity => "tab_row_opacity",
            Self::CloseButtonOpacity => "close_button_opacity",
            Self::HandleOpacity => "handle_opacity",
            Self::BlurRadius => "blur_radius",
        }
    }

    #[inline]
    #[must_use]
    pub fn at(self, progress: f64) -> f64 {
        self.ramp().eval(progress)
    }
}

/// All visual channels evaluated at one progress value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetVisuals {
    pub progress: f64,
    pub title_offset: f64,
    pub title_scale: f64,
    pub backdrop_opacity: f64,
    pub tab_row_opacity: f64,
    pub close_button_opacity: f64,
    pub handle_opacity: f64,
    pub blur_radius: f64,
}

impl SheetVisuals {
    #[must_use]
    pub fn at(progress: f64) -> Self {
        Self {
            progress,
            title_offset: VisualChannel::TitleOffset.at(progress),
            title_scale: VisualChannel::TitleScale.at(progress),
            backdrop_opacity: VisualChannel::BackdropOpacity.at(progress),
            tab_row_opacity: VisualChannel::TabRowOpacity.at(progress),
            close_button_opacity: VisualChannel::CloseButtonOpacity.at(progress),
            handle_opacity: VisualChannel::HandleOpacity.at(progress),
            blur_radius: VisualChannel::BlurRadius.at(progress),
        }
    }

    #[must_use]
    pub fn get(&self, channel: VisualChannel) -> f64 {
        match channel {
            VisualChannel::TitleOffset => self.title_offset,
            VisualChannel::TitleScale => self.title_scale,
            VisualChannel::BackdropOpacity => self.backdrop_opacity,
            VisualChannel::TabRowOpacity => self.tab_row_opacity,
            VisualChannel::CloseButtonOpacity => self.close_button_opacity,
            VisualChannel::HandleOpacity => self.handle_opacity,
            VisualChannel::BlurRadius => self.blur_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for channel in VisualChannel::ALL {
            let ramp = channel.ramp();
            assert_eq!(channel.at(0.0), ramp.from, "{} at 0", channel.name());
            assert_eq!(channel.at(1.0), ramp.to, "{} at 1", channel.name());
        }
    }

    #[test]
    fn backdrop_ramps_within_first_tenth_then_holds() {
        assert_eq!(VisualChannel::BackdropOpacity.at(0.0), 0.0);
        assert!((VisualChannel::BackdropOpacity.at(0.05) - 0.5).abs() < 1e-12);
        assert_eq!(VisualChannel::BackdropOpacity.at(0.1), 1.0);
        assert_eq!(VisualChannel::BackdropOpacity.at(0.6), 1.0);
    }

    #[test]
    fn tab_row_and_close_button_use_different_windows() {
        assert_eq!(VisualChannel::TabRowOpacity.at(0.4), 0.0);
        assert_eq!(VisualChannel::TabRowOpacity.at(0.8), 1.0);
        assert_eq!(VisualChannel::CloseButtonOpacity.at(0.7), 0.0);
        assert!(VisualChannel::CloseButtonOpacity.at(0.8) < 1.0);
        assert!(VisualChannel::TabRowOpacity.at(0.75) > VisualChannel::CloseButtonOpacity.at(0.75));
    }

    #[test]
    fn handle_fades_out() {
        assert_eq!(VisualChannel::HandleOpacity.at(0.0), 1.0);
        assert_eq!(VisualChannel::HandleOpacity.at(0.3), 0.0);
        assert!(!VisualChannel::HandleOpacity.ramp().is_increasing());
    }

    #[test]
    fn out_of_range_progress_clamps() {
        for channel in VisualChannel::ALL {
            assert_eq!(channel.at(-3.0), channel.at(0.0));
            assert_eq!(channel.at(7.0), channel.at(1.0));
            assert_eq!(channel.at(f64::NAN), channel.at(0.0));
        }
    }

    #[test]
    fn title_offset_and_scale_grow_toward_expanded() {
        let collapsed = SheetVisuals::at(0.0);
        let expanded = SheetVisuals::at(1.0);
        assert!(expanded.title_offset > collapsed.title_offset);
        assert!(expanded.title_scale > collapsed.title_scale);
    }

    #[test]
    fn bundle_matches_channels() {
        let visuals = SheetVisuals::at(0.42);
        for channel in VisualChannel::ALL {
            assert_eq!(visuals.get(channel), channel.at(0.42));
        }
    }

    #[test]
    fn degenerate_window_steps() {
        let step = Ramp::new(0.5, 0.5, 0.0, 1.0);
        assert_eq!(step.eval(0.5), 0.0);
        assert_eq!(step.eval(0.51), 1.0);
    }
}
