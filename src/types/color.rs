//! RGB colours used for the background, grid lines and marks

use rand_core::RngCore;

/// 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Direction of a scroll wheel notch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    Up,
    Down,
}

impl WheelDirection {
    /// Positive deltas scroll up, everything else scrolls down
    pub fn from_delta(delta: i32) -> Self {
        if delta > 0 { WheelDirection::Up } else { WheelDirection::Down }
    }
}

/// Per-channel step applied by one wheel notch
const WHEEL_STEP: u8 = 12;

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Shift the colour by one wheel notch. Red moves by the full step,
    /// green by half and blue by a third; every channel wraps modulo 256.
    pub fn shifted(self, direction: WheelDirection) -> Self {
        let (r, g, b) = (WHEEL_STEP, WHEEL_STEP / 2, WHEEL_STEP / 3);
        match direction {
            WheelDirection::Up => Self {
                r: self.r.wrapping_add(r),
                g: self.g.wrapping_add(g),
                b: self.b.wrapping_add(b),
            },
            WheelDirection::Down => Self {
                r: self.r.wrapping_sub(r),
                g: self.g.wrapping_sub(g),
                b: self.b.wrapping_sub(b),
            },
        }
    }

    /// Uniformly random colour
    pub fn random(rng: &mut impl RngCore) -> Self {
        let [r, g, b, _] = rng.next_u32().to_le_bytes();
        Self { r, g, b }
    }

    /// Channels as stored in the settings file
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}
