//! Hue source for automatic square coloring.
//!
//! When a blank-colored square first gets code, it is tagged with the next
//! hue from a shared counter so freshly filled squares are told apart
//! without picking colors by hand.

use crate::color::Hsva;

/// Store key the board persists the counter under.
pub const GLOBAL_HUE_KEY: &str = "global-hue";

pub const DEFAULT_HUE_STEP: f64 = 47.0;

/// Saturation and value used for auto-assigned colors.
pub const AUTO_SATURATION: f64 = 40.0;
pub const AUTO_VALUE: f64 = 93.0;

pub trait HueSource {
    /// Hand out the current hue and advance the counter.
    fn next(&mut self) -> f64;

    /// The hue the next call to `next` will return.
    fn peek(&self) -> f64;
}

/// Counter that advances by a fixed step, modulo 360.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueCounter {
    hue: f64,
    step: f64,
}

impl HueCounter {
    pub fn new(start: f64, step: f64) -> Self {
        Self { hue: start.rem_euclid(360.0), step }
    }
}

impl Default for HueCounter {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_HUE_STEP)
    }
}

impl HueSource for HueCounter {
    fn next(&mut self) -> f64 {
        let hue = self.hue;
        self.hue = (self.hue + self.step).rem_euclid(360.0);
        hue
    }

    fn peek(&self) -> f64 {
        self.hue
    }
}

/// Color settings for auto-tagged squares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoColor {
    pub saturation: f64,
    pub value: f64,
}

impl Default for AutoColor {
    fn default() -> Self {
        Self { saturation: AUTO_SATURATION, value: AUTO_VALUE }
    }
}

impl AutoColor {
    pub fn with_hue(&self, hue: f64) -> Hsva {
        Hsva::new(hue, self.saturation, self.value, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_wraps() {
        let mut hue = HueCounter::new(340.0, 47.0);
        assert_eq!(hue.next(), 340.0);
        assert_eq!(hue.peek(), 27.0);
        assert_eq!(hue.next(), 27.0);
        assert_eq!(hue.next(), 74.0);
    }

    #[test]
    fn test_start_is_normalized() {
        assert_eq!(HueCounter::new(400.0, 10.0).peek(), 40.0);
        assert_eq!(HueCounter::new(-30.0, 10.0).peek(), 330.0);
    }

    #[test]
    fn test_auto_color() {
        let c = AutoColor::default().with_hue(120.0);
        assert_eq!(c, Hsva::new(120.0, 40.0, 93.0, 1.0));
        assert!(!c.is_default());
    }
}
