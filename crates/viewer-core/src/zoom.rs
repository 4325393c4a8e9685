/// Resolution of the main view at 100% zoom.
pub const BASE_DPI: f32 = 100.0;

pub const ZOOM_IN_STEP: f32 = 1.25;
pub const ZOOM_OUT_STEP: f32 = 0.8;

pub const MIN_ZOOM: f32 = 0.10;
pub const MAX_ZOOM: f32 = 8.00;

/// Multiplicative zoom factor, always inside `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    factor: f32,
    min: f32,
    max: f32,
}

impl Default for Zoom {
    fn default() -> Self {
        Self { factor: 1.0, min: MIN_ZOOM, max: MAX_ZOOM }
    }
}

impl Zoom {
    pub fn with_bounds(min: f32, max: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let min = if min.is_finite() && min > 0.0 { min } else { MIN_ZOOM };
        let max = if max.is_finite() && max >= min { max } else { MAX_ZOOM.max(min) };
        Self { factor: 1.0_f32.clamp(min, max), min, max }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn percent(&self) -> u32 {
        (self.factor * 100.0).round() as u32
    }

    /// Multiplies the factor by `step` and clamps. Returns whether it changed.
    pub fn scale_by(&mut self, step: f32) -> bool {
        if !step.is_finite() || step <= 0.0 {
            return false;
        }

        let next = (self.factor * step).clamp(self.min, self.max);
        let changed = (next - self.factor).abs() > f32::EPSILON;
        self.factor = next;
        changed
    }

    pub fn zoom_in(&mut self) -> bool {
        self.scale_by(ZOOM_IN_STEP)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.scale_by(ZOOM_OUT_STEP)
    }

    pub fn effective_dpi(&self, base_dpi: f32) -> f32 {
        base_dpi * self.factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_accumulates_multiplicatively() {
        let mut zoom = Zoom::default();
        zoom.zoom_in();
        zoom.zoom_in();
        assert!((zoom.factor() - 1.5625).abs() < 1e-6);

        zoom.zoom_out();
        assert!((zoom.factor() - 1.25).abs() < 1e-6);
        assert_eq!(zoom.effective_dpi(BASE_DPI).round(), 125.0);
    }

    #[test]
    fn repeated_zoom_out_stops_at_lower_bound() {
        let mut zoom = Zoom::default();
        for _ in 0..100 {
            zoom.zoom_out();
        }

        assert_eq!(zoom.factor(), MIN_ZOOM);
        assert!(!zoom.zoom_out(), "already at the floor");
        assert!(zoom.effective_dpi(BASE_DPI) > 0.0);
    }

    #[test]
    fn repeated_zoom_in_stops_at_upper_bound() {
        let mut zoom = Zoom::default();
        for _ in 0..100 {
            zoom.zoom_in();
        }

        assert_eq!(zoom.factor(), MAX_ZOOM);
        assert_eq!(zoom.percent(), 800);
    }

    #[test]
    fn degenerate_steps_are_ignored() {
        let mut zoom = Zoom::default();
        assert!(!zoom.scale_by(0.0));
        assert!(!zoom.scale_by(-2.0));
        assert!(!zoom.scale_by(f32::NAN));
        assert_eq!(zoom.factor(), 1.0);
    }

    #[test]
    fn custom_bounds_are_normalized() {
        let zoom = Zoom::with_bounds(4.0, 2.0);
        assert_eq!(zoom.factor(), 2.0);

        let zoom = Zoom::with_bounds(-1.0, 3.0);
        assert_eq!(zoom.factor(), 1.0);
    }
}
