//! On/off, level and color control attributes of the light endpoint.

use crate::color::MiredsRange;

pub const LEVEL_MIN: u8 = 0x01;
pub const LEVEL_MAX: u8 = 0xFE;
pub const HUE_MIN: u8 = 0x00;
pub const HUE_MAX: u8 = 0xFE;
pub const SATURATION_MIN: u8 = 0x00;
pub const SATURATION_MAX: u8 = 0xFE;
pub const ENHANCED_HUE_MIN: u16 = 0x0000;
pub const ENHANCED_HUE_MAX: u16 = 0xFFFF;
pub const XY_MIN: u16 = 0x0000;
pub const XY_MAX: u16 = 0xFEFF;

/// `ColorMode` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorMode {
    HueSaturation = 0x00,
    Xy = 0x01,
    ColorTemperature = 0x02,
}

/// `EnhancedColorMode` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EnhancedColorMode {
    HueSaturation = 0x00,
    Xy = 0x01,
    ColorTemperature = 0x02,
    EnhancedHueSaturation = 0x03,
}

impl EnhancedColorMode {
    /// Plain mode reported alongside this one
    ///
    /// Enhanced hue still reads as hue/saturation in `ColorMode`.
    pub const fn color_mode(self) -> ColorMode {
        match self {
            Self::HueSaturation | Self::EnhancedHueSaturation => ColorMode::HueSaturation,
            Self::Xy => ColorMode::Xy,
            Self::ColorTemperature => ColorMode::ColorTemperature,
        }
    }

    pub const fn is_hue_saturation(self) -> bool {
        matches!(self, Self::HueSaturation | Self::EnhancedHueSaturation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorLoopDirection {
    Decrement = 0x00,
    Increment = 0x01,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OnOffAttributes {
    pub on_off: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelAttributes {
    pub current_level: u8,
    /// Ticks left in the running level transition
    pub remaining_time: u16,
}

impl Default for LevelAttributes {
    fn default() -> Self {
        Self {
            current_level: LEVEL_MAX,
            remaining_time: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorAttributes {
    pub color_mode: ColorMode,
    pub enhanced_color_mode: EnhancedColorMode,
    pub current_hue: u8,
    pub current_saturation: u8,
    pub enhanced_current_hue: u16,
    pub current_x: u16,
    pub current_y: u16,
    pub color_temperature_mireds: u16,
    pub color_temp_physical_min_mireds: u16,
    pub color_temp_physical_max_mireds: u16,
    pub color_loop_active: bool,
    pub color_loop_direction: ColorLoopDirection,
    /// Seconds per full loop
    pub color_loop_time: u16,
    pub color_loop_start_enhanced_hue: u16,
    pub color_loop_stored_enhanced_hue: u16,
}

impl ColorAttributes {
    pub const fn physical_mireds(&self) -> MiredsRange {
        MiredsRange {
            min: self.color_temp_physical_min_mireds,
            max: self.color_temp_physical_max_mireds,
        }
    }

    /// Update both color mode attributes at once
    pub const fn set_mode(&mut self, mode: EnhancedColorMode) {
        self.enhanced_color_mode = mode;
        self.color_mode = mode.color_mode();
    }
}

impl Default for ColorAttributes {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::ColorTemperature,
            enhanced_color_mode: EnhancedColorMode::ColorTemperature,
            current_hue: 0x00,
            current_saturation: 0x00,
            enhanced_current_hue: 0x0000,
            current_x: 0x616B,
            current_y: 0x607D,
            color_temperature_mireds: 0x00FA,
            color_temp_physical_min_mireds: 0x009A,
            color_temp_physical_max_mireds: 0x0172,
            color_loop_active: false,
            color_loop_direction: ColorLoopDirection::Decrement,
            color_loop_time: 0x0019,
            color_loop_start_enhanced_hue: 0x2300,
            color_loop_stored_enhanced_hue: 0x0000,
        }
    }
}

/// All attributes the engine reads and writes
///
/// Restoring them from persistent storage is up to the caller; pass the
/// restored set to `LightController::new` and call `adjust`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LightAttributes {
    pub on_off: OnOffAttributes,
    pub level: LevelAttributes,
    pub color: ColorAttributes,
}
