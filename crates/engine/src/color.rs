use serde::{Deserialize, Serialize};

/// Square color in HSVA form.
///
/// Hue is in degrees (0-360), saturation and value are percentages (0-100),
/// alpha is 0-1. Serialized as `{"h":..,"s":..,"v":..,"a":..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsva {
    pub h: f64,
    pub s: f64,
    pub v: f64,
    pub a: f64,
}

/// Placeholder color of a square nobody has colored yet.
pub const DEFAULT_SQUARE_COLOR: Hsva = Hsva { h: 0.0, s: 0.0, v: 93.0, a: 1.0 };

impl Default for Hsva {
    fn default() -> Self {
        DEFAULT_SQUARE_COLOR
    }
}

impl Hsva {
    pub const fn new(h: f64, s: f64, v: f64, a: f64) -> Self {
        Self { h, s, v, a }
    }

    pub fn is_default(&self) -> bool {
        *self == DEFAULT_SQUARE_COLOR
    }

    /// Same color with the hue rotated by `degrees`, wrapped into 0-360.
    pub fn with_hue_shift(self, degrees: f64) -> Self {
        Self { h: (self.h + degrees).rem_euclid(360.0), ..self }
    }

    /// Same color with the value moved by `delta`, clamped into 0-100.
    pub fn with_value_shift(self, delta: f64) -> Self {
        Self { v: (self.v + delta).clamp(0.0, 100.0), ..self }
    }

    /// Convert to 8-bit RGB, ignoring alpha.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let h = self.h.rem_euclid(360.0) / 60.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let v = (self.v / 100.0).clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let to_byte = |f: f64| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        (to_byte(r), to_byte(g), to_byte(b))
    }

    /// `#rrggbb` form of `to_rgb`.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_light_gray() {
        let c = Hsva::default();
        assert!(c.is_default());
        assert_eq!(c.to_hex(), "#ededed");
    }

    #[test]
    fn test_primary_hues() {
        assert_eq!(Hsva::new(0.0, 100.0, 100.0, 1.0).to_rgb(), (255, 0, 0));
        assert_eq!(Hsva::new(120.0, 100.0, 100.0, 1.0).to_rgb(), (0, 255, 0));
        assert_eq!(Hsva::new(240.0, 100.0, 100.0, 1.0).to_rgb(), (0, 0, 255));
        assert_eq!(Hsva::new(360.0, 100.0, 100.0, 1.0).to_rgb(), (255, 0, 0));
    }

    #[test]
    fn test_shifts_wrap_and_clamp() {
        let c = Hsva::new(350.0, 40.0, 95.0, 1.0);
        assert_eq!(c.with_hue_shift(20.0).h, 10.0);
        assert_eq!(c.with_hue_shift(-360.0).h, 350.0);
        assert_eq!(c.with_value_shift(10.0).v, 100.0);
        assert_eq!(c.with_value_shift(-200.0).v, 0.0);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&DEFAULT_SQUARE_COLOR).unwrap();
        assert_eq!(json, r#"{"h":0.0,"s":0.0,"v":93.0,"a":1.0}"#);
        let parsed: Hsva = serde_json::from_str(r#"{"h":0,"s":0,"v":93,"a":1}"#).unwrap();
        assert!(parsed.is_default());
    }
}
