/// Physical color temperature range of the white channels, in mireds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiredsRange {
    /// Coolest supported temperature
    pub min: u16,
    /// Warmest supported temperature
    pub max: u16,
}

/// Intensities of the cool and warm white channels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoolWarm {
    pub cool: u8,
    pub warm: u8,
}

/// Split `level` between the cool and warm channels
///
/// The warm share grows linearly from `range.min` to `range.max`; both
/// channels always add up to `level`. An empty range drives only the cool
/// channel.
#[allow(clippy::cast_possible_truncation)]
pub fn temperature_to_cool_warm(mireds: u16, level: u8, range: MiredsRange) -> CoolWarm {
    let span = u32::from(range.max.saturating_sub(range.min));
    if span == 0 {
        return CoolWarm {
            cool: level,
            warm: 0,
        };
    }

    let offset = u32::from(mireds.max(range.min).min(range.max) - range.min);
    let warm = (offset * u32::from(level) / span) as u8;
    CoolWarm {
        cool: level - warm,
        warm,
    }
}
