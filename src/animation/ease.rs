/// Easing curves applied to a normalized progress value.
#[derive(Clone, Copy, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    OutQuad,
    OutCubic,
    /// CSS `ease-out` as used by utility-class stylesheets: `cubic-bezier(0, 0, 0.2, 1)`.
    #[default]
    CssEaseOut,
    Bezier(CubicBezier),
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::CssEaseOut => CubicBezier::CSS_EASE_OUT.apply(t),
            Self::Bezier(b) => b.apply(t),
        }
    }
}

/// A CSS-style timing function with fixed endpoints `(0,0)` and `(1,1)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const CSS_EASE_OUT: Self = Self {
        x1: 0.0,
        y1: 0.0,
        x2: 0.2,
        y2: 1.0,
    };

    fn sample(a1: f64, a2: f64, s: f64) -> f64 {
        // B(s) = 3(1-s)^2 s a1 + 3(1-s) s^2 a2 + s^3
        let u = 1.0 - s;
        3.0 * u * u * s * a1 + 3.0 * u * s * s * a2 + s * s * s
    }

    fn sample_dx(&self, s: f64) -> f64 {
        let u = 1.0 - s;
        3.0 * u * u * self.x1 + 6.0 * u * s * (self.x2 - self.x1) + 3.0 * s * s * (1.0 - self.x2)
    }

    /// Curve parameter `s` whose x coordinate equals `x`.
    fn solve_s(&self, x: f64) -> f64 {
        let mut s = x;
        for _ in 0..8 {
            let err = Self::sample(self.x1, self.x2, s) - x;
            if err.abs() < 1e-7 {
                return s;
            }
            let d = self.sample_dx(s);
            if d.abs() < 1e-6 {
                break;
            }
            s -= err / d;
        }

        // Newton stalled near a flat spot; bisect instead.
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        s = x;
        for _ in 0..64 {
            let v = Self::sample(self.x1, self.x2, s);
            if (v - x).abs() < 1e-7 {
                break;
            }
            if v < x {
                lo = s;
            } else {
                hi = s;
            }
            s = 0.5 * (lo + hi);
        }
        s
    }

    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        Self::sample(self.y1, self.y2, self.solve_s(t))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
