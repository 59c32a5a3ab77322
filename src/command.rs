//! Strongly-typed on/off, level and color control commands.
//!
//! [`Command::decode`] parses the little-endian ZCL payload of an incoming
//! cluster command. Trailing bytes (options masks) are ignored.

use crate::attributes::ColorLoopDirection;

pub const ON_OFF_CLUSTER: u16 = 0x0006;
pub const LEVEL_CLUSTER: u16 = 0x0008;
pub const COLOR_CLUSTER: u16 = 0x0300;

/// Addressing context of an incoming command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressInfo {
    /// Destination endpoint
    pub endpoint: u8,
}

/// Status answered to the protocol layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
}

/// Reasons a payload could not be turned into a [`Command`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    UnknownCluster(u16),
    UnknownCommand(u8),
    /// Payload ended before a mandatory field
    Truncated,
    /// An enumerated field carried a reserved value
    InvalidField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HueDirection {
    ShortestDistance,
    LongestDistance,
    Up,
    Down,
}

impl TryFrom<u8> for HueDirection {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::ShortestDistance),
            0x01 => Ok(Self::LongestDistance),
            0x02 => Ok(Self::Up),
            0x03 => Ok(Self::Down),
            _ => Err(DecodeError::InvalidField),
        }
    }
}

/// Move mode of the color control Move commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMode {
    Stop,
    Up,
    Down,
}

impl TryFrom<u8> for MoveMode {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Stop),
            0x01 => Ok(Self::Up),
            0x03 => Ok(Self::Down),
            _ => Err(DecodeError::InvalidField),
        }
    }
}

/// Step mode of the color control Step commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    Up,
    Down,
}

impl TryFrom<u8> for StepMode {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Self::Up),
            0x03 => Ok(Self::Down),
            _ => Err(DecodeError::InvalidField),
        }
    }
}

/// Direction of the level control Move and Step commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelDirection {
    Up,
    Down,
}

impl TryFrom<u8> for LevelDirection {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Up),
            0x01 => Ok(Self::Down),
            _ => Err(DecodeError::InvalidField),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorLoopAction {
    Deactivate,
    ActivateFromStartHue,
    ActivateFromCurrentHue,
}

impl TryFrom<u8> for ColorLoopAction {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Deactivate),
            0x01 => Ok(Self::ActivateFromStartHue),
            0x02 => Ok(Self::ActivateFromCurrentHue),
            _ => Err(DecodeError::InvalidField),
        }
    }
}

/// Update flags of a ColorLoopSet command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorLoopUpdate(pub u8);

impl ColorLoopUpdate {
    pub const ACTION: u8 = 0x01;
    pub const DIRECTION: u8 = 0x02;
    pub const TIME: u8 = 0x04;
    pub const START_HUE: u8 = 0x08;

    pub const fn action(self) -> bool {
        self.0 & Self::ACTION != 0
    }

    pub const fn direction(self) -> bool {
        self.0 & Self::DIRECTION != 0
    }

    pub const fn time(self) -> bool {
        self.0 & Self::TIME != 0
    }

    pub const fn start_hue(self) -> bool {
        self.0 & Self::START_HUE != 0
    }
}

// Transition times are in tenths of a second throughout.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveToHue {
    pub hue: u8,
    pub direction: HueDirection,
    pub transition_time: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveHue {
    pub mode: MoveMode,
    pub rate: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepHue {
    pub mode: StepMode,
    pub step_size: u8,
    pub transition_time: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveToSaturation {
    pub saturation: u8,
    pub transition_time: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSaturation {
    pub mode: MoveMode,
    pub rate: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSaturation {
    pub mode: StepMode,
    pub step_size: u8,
    pub transition_time: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveToHueAndSaturation {
    pub hue: u8,
    pub saturation: u8,
    pub transition_time: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveToColor {
    pub x: u16,
    pub y: u16,
    pub transition_time: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveColor {
    pub rate_x: i16,
    pub rate_y: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepColor {
    pub step_x: i16,
    pub step_y: i16,
    pub transition_time: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveToColorTemperature {
    pub mireds: u16,
    pub transition_time: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnhancedMoveToHue {
    pub enhanced_hue: u16,
    pub direction: HueDirection,
    pub transition_time: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnhancedMoveHue {
    pub mode: MoveMode,
    pub rate: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnhancedStepHue {
    pub mode: StepMode,
    pub step_size: u16,
    pub transition_time: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnhancedMoveToHueAndSaturation {
    pub enhanced_hue: u16,
    pub saturation: u8,
    pub transition_time: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorLoopSet {
    pub update: ColorLoopUpdate,
    pub action: ColorLoopAction,
    pub direction: ColorLoopDirection,
    pub time: u16,
    pub start_hue: u16,
}

/// Move color temperature; zero limits mean the physical limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveColorTemperature {
    pub mode: MoveMode,
    pub rate: u16,
    pub min_mireds: u16,
    pub max_mireds: u16,
}

/// Step color temperature; zero limits mean the physical limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepColorTemperature {
    pub mode: StepMode,
    pub step_size: u16,
    pub transition_time: u16,
    pub min_mireds: u16,
    pub max_mireds: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveToLevel {
    pub level: u8,
    pub transition_time: u16,
    pub with_on_off: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveLevel {
    pub direction: LevelDirection,
    /// Units per second, zero stops the level ramp
    pub rate: u8,
    pub with_on_off: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepLevel {
    pub direction: LevelDirection,
    pub step_size: u8,
    pub transition_time: u16,
    pub with_on_off: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopLevel {
    pub with_on_off: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnOffCommand {
    Off,
    On,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelCommand {
    MoveToLevel(MoveToLevel),
    Move(MoveLevel),
    Step(StepLevel),
    Stop(StopLevel),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCommand {
    MoveToHue(MoveToHue),
    MoveHue(MoveHue),
    StepHue(StepHue),
    MoveToSaturation(MoveToSaturation),
    MoveSaturation(MoveSaturation),
    StepSaturation(StepSaturation),
    MoveToHueAndSaturation(MoveToHueAndSaturation),
    MoveToColor(MoveToColor),
    MoveColor(MoveColor),
    StepColor(StepColor),
    MoveToColorTemperature(MoveToColorTemperature),
    EnhancedMoveToHue(EnhancedMoveToHue),
    EnhancedMoveHue(EnhancedMoveHue),
    EnhancedStepHue(EnhancedStepHue),
    EnhancedMoveToHueAndSaturation(EnhancedMoveToHueAndSaturation),
    ColorLoopSet(ColorLoopSet),
    StopMoveStep,
    MoveColorTemperature(MoveColorTemperature),
    StepColorTemperature(StepColorTemperature),
}

/// Any command the light endpoint understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    OnOff(OnOffCommand),
    Level(LevelCommand),
    Color(ColorCommand),
}

impl Command {
    /// Decode a cluster specific command payload
    pub fn decode(cluster: u16, command_id: u8, payload: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = PayloadReader::new(payload);
        match cluster {
            ON_OFF_CLUSTER => decode_on_off(command_id).map(Self::OnOff),
            LEVEL_CLUSTER => decode_level(command_id, &mut reader).map(Self::Level),
            COLOR_CLUSTER => decode_color(command_id, &mut reader).map(Self::Color),
            _ => Err(DecodeError::UnknownCluster(cluster)),
        }
    }
}

fn decode_on_off(command_id: u8) -> Result<OnOffCommand, DecodeError> {
    match command_id {
        0x00 => Ok(OnOffCommand::Off),
        0x01 => Ok(OnOffCommand::On),
        0x02 => Ok(OnOffCommand::Toggle),
        id => Err(DecodeError::UnknownCommand(id)),
    }
}

fn decode_level(command_id: u8, r: &mut PayloadReader<'_>) -> Result<LevelCommand, DecodeError> {
    // 0x04..=0x07 repeat 0x00..=0x03 with on/off coupling
    let with_on_off = command_id & 0x04 != 0;
    let command = match command_id {
        0x00 | 0x04 => LevelCommand::MoveToLevel(MoveToLevel {
            level: r.u8()?,
            transition_time: r.u16()?,
            with_on_off,
        }),
        0x01 | 0x05 => LevelCommand::Move(MoveLevel {
            direction: r.u8()?.try_into()?,
            rate: r.u8()?,
            with_on_off,
        }),
        0x02 | 0x06 => LevelCommand::Step(StepLevel {
            direction: r.u8()?.try_into()?,
            step_size: r.u8()?,
            transition_time: r.u16()?,
            with_on_off,
        }),
        0x03 | 0x07 => LevelCommand::Stop(StopLevel { with_on_off }),
        id => return Err(DecodeError::UnknownCommand(id)),
    };
    Ok(command)
}

fn decode_color(command_id: u8, r: &mut PayloadReader<'_>) -> Result<ColorCommand, DecodeError> {
    let command = match command_id {
        0x00 => ColorCommand::MoveToHue(MoveToHue {
            hue: r.u8()?,
            direction: r.u8()?.try_into()?,
            transition_time: r.u16()?,
        }),
        0x01 => ColorCommand::MoveHue(MoveHue {
            mode: r.u8()?.try_into()?,
            rate: r.u8()?,
        }),
        0x02 => ColorCommand::StepHue(StepHue {
            mode: r.u8()?.try_into()?,
            step_size: r.u8()?,
            transition_time: u16::from(r.u8()?),
        }),
        0x03 => ColorCommand::MoveToSaturation(MoveToSaturation {
            saturation: r.u8()?,
            transition_time: r.u16()?,
        }),
        0x04 => ColorCommand::MoveSaturation(MoveSaturation {
            mode: r.u8()?.try_into()?,
            rate: r.u8()?,
        }),
        0x05 => ColorCommand::StepSaturation(StepSaturation {
            mode: r.u8()?.try_into()?,
            step_size: r.u8()?,
            transition_time: u16::from(r.u8()?),
        }),
        0x06 => ColorCommand::MoveToHueAndSaturation(MoveToHueAndSaturation {
            hue: r.u8()?,
            saturation: r.u8()?,
            transition_time: r.u16()?,
        }),
        0x07 => ColorCommand::MoveToColor(MoveToColor {
            x: r.u16()?,
            y: r.u16()?,
            transition_time: r.u16()?,
        }),
        0x08 => ColorCommand::MoveColor(MoveColor {
            rate_x: r.i16()?,
            rate_y: r.i16()?,
        }),
        0x09 => ColorCommand::StepColor(StepColor {
            step_x: r.i16()?,
            step_y: r.i16()?,
            transition_time: r.u16()?,
        }),
        0x0A => ColorCommand::MoveToColorTemperature(MoveToColorTemperature {
            mireds: r.u16()?,
            transition_time: r.u16()?,
        }),
        0x40 => ColorCommand::EnhancedMoveToHue(EnhancedMoveToHue {
            enhanced_hue: r.u16()?,
            direction: r.u8()?.try_into()?,
            transition_time: r.u16()?,
        }),
        0x41 => ColorCommand::EnhancedMoveHue(EnhancedMoveHue {
            mode: r.u8()?.try_into()?,
            rate: r.u16()?,
        }),
        0x42 => ColorCommand::EnhancedStepHue(EnhancedStepHue {
            mode: r.u8()?.try_into()?,
            step_size: r.u16()?,
            transition_time: r.u16()?,
        }),
        0x43 => ColorCommand::EnhancedMoveToHueAndSaturation(EnhancedMoveToHueAndSaturation {
            enhanced_hue: r.u16()?,
            saturation: r.u8()?,
            transition_time: r.u16()?,
        }),
        0x44 => ColorCommand::ColorLoopSet(ColorLoopSet {
            update: ColorLoopUpdate(r.u8()?),
            action: r.u8()?.try_into()?,
            direction: loop_direction(r.u8()?)?,
            time: r.u16()?,
            start_hue: r.u16()?,
        }),
        0x47 => ColorCommand::StopMoveStep,
        0x4B => ColorCommand::MoveColorTemperature(MoveColorTemperature {
            mode: r.u8()?.try_into()?,
            rate: r.u16()?,
            min_mireds: r.u16()?,
            max_mireds: r.u16()?,
        }),
        0x4C => ColorCommand::StepColorTemperature(StepColorTemperature {
            mode: r.u8()?.try_into()?,
            step_size: r.u16()?,
            transition_time: r.u16()?,
            min_mireds: r.u16()?,
            max_mireds: r.u16()?,
        }),
        id => return Err(DecodeError::UnknownCommand(id)),
    };
    Ok(command)
}

fn loop_direction(value: u8) -> Result<ColorLoopDirection, DecodeError> {
    match value {
        0x00 => Ok(ColorLoopDirection::Decrement),
        0x01 => Ok(ColorLoopDirection::Increment),
        _ => Err(DecodeError::InvalidField),
    }
}

/// Cursor over a little-endian payload
struct PayloadReader<'a> {
    bytes: &'a [u8],
}

impl<'a> PayloadReader<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let (head, rest) = self
            .bytes
            .split_first_chunk::<N>()
            .ok_or(DecodeError::Truncated)?;
        self.bytes = rest;
        Ok(*head)
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        self.take::<1>().map(|[byte]| byte)
    }

    fn u16(&mut self) -> Result<u16, DecodeError> {
        self.take::<2>().map(u16::from_le_bytes)
    }

    fn i16(&mut self) -> Result<i16, DecodeError> {
        self.take::<2>().map(i16::from_le_bytes)
    }
}
