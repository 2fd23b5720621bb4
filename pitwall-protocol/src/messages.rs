//! Telemetry messages and the decode tables
//!
//! Each recognized frame decodes to one [`Message`]. A message is a state
//! delta: it carries the new value of every field its frame owns and nothing
//! else, so applying the same message twice is the same as applying it once.
//!
//! Byte order differs per sender: the inverters are little-endian, the BMS
//! is big-endian, and the VCU low-voltage reading is little-endian.

use embedded_can::{Frame, Id};

use crate::frame::{RawFrame, PAYLOAD_LEN};
use crate::ids::*;
use crate::status::StatusWord;

/// Inverter temperature reference; the inverter reports its margin below it
pub const INVERTER_CUTOFF_TEMP: i16 = 86;

/// Raw torque counts per N·m
pub const TORQUE_SCALE: f32 = 160.0;

/// Raw capacitor voltage counts per volt
pub const CAPACITOR_VOLTAGE_SCALE: f32 = 16.0;

/// BMS voltage and current resolution
pub const BMS_DECI: f32 = 0.1;

/// LV rail divider calibration: volts per raw ADC count is 12.58 / 2561
pub const LV_VOLTAGE_REFERENCE: f32 = 12.58;
pub const LV_VOLTAGE_COUNTS: f32 = 2561.0;

/// Which of the two inverters a frame belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InverterIndex {
    One,
    Two,
}

impl InverterIndex {
    /// Zero-based slot
    pub const fn slot(self) -> usize {
        match self {
            InverterIndex::One => 0,
            InverterIndex::Two => 1,
        }
    }

    /// One-based number as printed on the car
    pub const fn number(self) -> u8 {
        match self {
            InverterIndex::One => 1,
            InverterIndex::Two => 2,
        }
    }
}

/// HS1: torque, speed and DC current
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InverterDrive {
    pub output_torque: f32,
    pub motor_speed: i16,
    pub battery_current: i16,
}

/// HS2: available torque and control state
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InverterLimits {
    pub available_forward_torque: f32,
    pub available_reverse_torque: f32,
    pub statusword: StatusWord,
}

/// HS3: DC link voltage and temperatures
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InverterThermal {
    pub capacitor_voltage: f32,
    /// Degrees; negative once past the cutoff
    pub temperature: i16,
    pub motor_temp: i16,
}

/// BMS 0x6B1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BmsLimits {
    /// Discharge current limit (A)
    pub pack_dcl: u16,
    pub temperature: u8,
}

/// BMS 0x6B0
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BmsPack {
    /// Percent. Not clamped: a corrupted byte can push this past 100.
    pub pack_soc: u8,
    pub pack_voltage: f32,
    pub pack_current: f32,
}

/// VCU 0x7A4
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VcuStatus {
    pub lv_voltage: f32,
    pub current_limit: u8,
    pub rtd_switch_state: bool,
    pub rtd: bool,
    pub battery_active: bool,
    pub inv1_active: bool,
    pub inv2_active: bool,
    /// 0 means no fault
    pub fault: u8,
}

/// A decoded telemetry frame
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message {
    InverterDrive(InverterIndex, InverterDrive),
    InverterLimits(InverterIndex, InverterLimits),
    InverterThermal(InverterIndex, InverterThermal),
    BmsLimits(BmsLimits),
    BmsPack(BmsPack),
    VcuStatus(VcuStatus),
}

#[inline]
fn le_u16(data: &[u8; PAYLOAD_LEN], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

#[inline]
fn le_i16(data: &[u8; PAYLOAD_LEN], at: usize) -> i16 {
    i16::from_le_bytes([data[at], data[at + 1]])
}

#[inline]
fn be_u16(data: &[u8; PAYLOAD_LEN], at: usize) -> u16 {
    u16::from_be_bytes([data[at], data[at + 1]])
}

#[inline]
fn bit(byte: u8, n: u8) -> bool {
    (byte >> n) & 1 == 1
}

impl InverterDrive {
    pub fn decode(data: &[u8; PAYLOAD_LEN]) -> Self {
        Self {
            output_torque: f32::from(le_u16(data, 0)) / TORQUE_SCALE,
            motor_speed: le_i16(data, 2),
            battery_current: le_i16(data, 4),
        }
    }
}

impl InverterLimits {
    pub fn decode(data: &[u8; PAYLOAD_LEN]) -> Self {
        Self {
            available_forward_torque: f32::from(le_u16(data, 0)) / TORQUE_SCALE,
            available_reverse_torque: f32::from(le_u16(data, 2)) / TORQUE_SCALE,
            statusword: StatusWord::from_byte(data[4]),
        }
    }
}

impl InverterThermal {
    pub fn decode(data: &[u8; PAYLOAD_LEN]) -> Self {
        Self {
            capacitor_voltage: f32::from(le_u16(data, 4)) / CAPACITOR_VOLTAGE_SCALE,
            temperature: INVERTER_CUTOFF_TEMP.wrapping_sub(le_i16(data, 0)),
            motor_temp: le_i16(data, 2),
        }
    }
}

impl BmsLimits {
    pub fn decode(data: &[u8; PAYLOAD_LEN]) -> Self {
        Self {
            pack_dcl: be_u16(data, 0),
            temperature: data[4],
        }
    }
}

impl BmsPack {
    pub fn decode(data: &[u8; PAYLOAD_LEN]) -> Self {
        Self {
            pack_soc: data[4] / 2,
            pack_voltage: f32::from(be_u16(data, 2)) * BMS_DECI,
            pack_current: f32::from(be_u16(data, 0)) * BMS_DECI,
        }
    }
}

impl VcuStatus {
    pub fn decode(data: &[u8; PAYLOAD_LEN]) -> Self {
        let flags = data[6];
        Self {
            lv_voltage: f32::from(le_u16(data, 0)) * LV_VOLTAGE_REFERENCE / LV_VOLTAGE_COUNTS,
            current_limit: data[4],
            rtd_switch_state: bit(flags, 4),
            rtd: bit(flags, 3),
            battery_active: bit(flags, 2),
            inv1_active: bit(flags, 1),
            inv2_active: bit(flags, 0),
            fault: data[7],
        }
    }
}

/// Decode an extended-identifier frame
///
/// The identifier is masked with [`EXTENDED_ID_MASK`] before matching.
pub fn decode_extended(id: u32, data: &[u8; PAYLOAD_LEN]) -> Option<Message> {
    use InverterIndex::{One, Two};

    let msg = match id & EXTENDED_ID_MASK {
        INV1_HS1 => Message::InverterDrive(One, InverterDrive::decode(data)),
        INV2_HS1 => Message::InverterDrive(Two, InverterDrive::decode(data)),
        INV1_HS2 => Message::InverterLimits(One, InverterLimits::decode(data)),
        INV2_HS2 => Message::InverterLimits(Two, InverterLimits::decode(data)),
        INV1_HS3 => Message::InverterThermal(One, InverterThermal::decode(data)),
        INV2_HS3 => Message::InverterThermal(Two, InverterThermal::decode(data)),
        _ => return None,
    };
    Some(msg)
}

/// Decode a standard-identifier frame
pub fn decode_standard(id: u32, data: &[u8; PAYLOAD_LEN]) -> Option<Message> {
    let msg = match id {
        BMS_LIMITS => Message::BmsLimits(BmsLimits::decode(data)),
        BMS_PACK => Message::BmsPack(BmsPack::decode(data)),
        VCU_STATUS => Message::VcuStatus(VcuStatus::decode(data)),
        _ => return None,
    };
    Some(msg)
}

/// Decode from the raw receive-FIFO shape
pub fn decode_raw(id: u32, extended: bool, data: &[u8; PAYLOAD_LEN]) -> Option<Message> {
    if extended {
        decode_extended(id, data)
    } else {
        decode_standard(id, data)
    }
}

/// Decode any `embedded_can` data frame
///
/// Payloads shorter than 8 bytes are zero-padded. Remote frames carry no
/// telemetry and decode to `None`.
pub fn decode<F: Frame>(frame: &F) -> Option<Message> {
    if frame.is_remote_frame() {
        return None;
    }

    let mut data = [0u8; PAYLOAD_LEN];
    let payload = frame.data();
    let len = payload.len().min(PAYLOAD_LEN);
    data[..len].copy_from_slice(&payload[..len]);

    match frame.id() {
        Id::Standard(id) => decode_standard(u32::from(id.as_raw()), &data),
        Id::Extended(id) => decode_extended(id.as_raw(), &data),
    }
}

impl RawFrame {
    /// Decode this frame
    pub fn decode(&self) -> Option<Message> {
        if self.remote {
            return None;
        }
        decode_raw(self.id, self.extended, &self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        let d = a - b;
        d < 1e-3 && d > -1e-3
    }

    #[test]
    fn test_inverter_drive_example() {
        let data = [0x50, 0x00, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00];
        let msg = decode_extended(0x118ff71, &data).unwrap();
        assert_eq!(
            msg,
            Message::InverterDrive(
                InverterIndex::One,
                InverterDrive {
                    output_torque: 0.5,
                    motor_speed: 10,
                    battery_current: 0,
                }
            )
        );
    }

    #[test]
    fn test_inverter_drive_sign_extension() {
        // speed -2, current -32768
        let data = [0xA0, 0x00, 0xFE, 0xFF, 0x00, 0x80, 0, 0];
        let Some(Message::InverterDrive(InverterIndex::Two, drive)) =
            decode_extended(0x118ff72, &data)
        else {
            panic!("expected inverter 2 drive message");
        };
        assert_eq!(drive.output_torque, 1.0);
        assert_eq!(drive.motor_speed, -2);
        assert_eq!(drive.battery_current, i16::MIN);
    }

    #[test]
    fn test_torque_is_unsigned() {
        let data = [0xFF, 0xFF, 0, 0, 0, 0, 0, 0];
        let Some(Message::InverterDrive(_, drive)) = decode_extended(0x118ff71, &data) else {
            panic!("expected drive message");
        };
        assert!(approx(drive.output_torque, 65535.0 / 160.0));
    }

    #[test]
    fn test_extended_id_masked_to_25_bits() {
        let data = [0u8; 8];
        // Node address bits above bit 24 are ignored
        assert!(decode_extended(0x1D18_ff71, &data).is_some());
        assert!(decode_extended(0x0F18_ff72, &data).is_some());
        assert!(decode_extended(0x0118_ff73, &data).is_none());
    }

    #[test]
    fn test_inverter_limits() {
        let data = [0x40, 0x01, 0xA0, 0x00, 0x08, 0, 0, 0];
        let Some(Message::InverterLimits(InverterIndex::One, limits)) =
            decode_extended(0x119ff71, &data)
        else {
            panic!("expected inverter 1 limits");
        };
        assert_eq!(limits.available_forward_torque, 2.0);
        assert_eq!(limits.available_reverse_torque, 1.0);
        assert_eq!(limits.statusword, StatusWord::Enabled);
    }

    #[test]
    fn test_inverter_limits_unknown_statusword() {
        let data = [0, 0, 0, 0, 0x42, 0, 0, 0];
        let Some(Message::InverterLimits(InverterIndex::Two, limits)) =
            decode_extended(0x119ff72, &data)
        else {
            panic!("expected inverter 2 limits");
        };
        assert_eq!(limits.statusword, StatusWord::Unknown(0x42));
    }

    #[test]
    fn test_inverter_thermal() {
        // raw temp 36 -> 86 - 36 = 50, motor 45, cap voltage 0x1900/16 = 400
        let data = [36, 0, 45, 0, 0x00, 0x19, 0, 0];
        let Some(Message::InverterThermal(InverterIndex::One, thermal)) =
            decode_extended(0x11aff71, &data)
        else {
            panic!("expected inverter 1 thermal");
        };
        assert_eq!(thermal.temperature, 50);
        assert_eq!(thermal.motor_temp, 45);
        assert_eq!(thermal.capacitor_voltage, 400.0);
    }

    #[test]
    fn test_inverter_temperature_goes_negative() {
        let data = [100, 0, 0, 0, 0, 0, 0, 0];
        let Some(Message::InverterThermal(_, thermal)) = decode_extended(0x11aff72, &data) else {
            panic!("expected thermal");
        };
        assert_eq!(thermal.temperature, -14);
    }

    #[test]
    fn test_inverter_temperature_wraps_at_extremes() {
        // 86 - (-32768) wraps in 16 bits
        let data = [0x00, 0x80, 0, 0, 0, 0, 0, 0];
        let Some(Message::InverterThermal(_, thermal)) = decode_extended(0x11aff71, &data) else {
            panic!("expected thermal");
        };
        assert_eq!(thermal.temperature, 86i16.wrapping_sub(i16::MIN));
    }

    #[test]
    fn test_bms_limits_big_endian() {
        let data = [0x01, 0x2C, 0, 0, 31, 0, 0, 0];
        let msg = decode_standard(0x6B1, &data).unwrap();
        assert_eq!(
            msg,
            Message::BmsLimits(BmsLimits {
                pack_dcl: 300,
                temperature: 31,
            })
        );
    }

    #[test]
    fn test_bms_pack_soc_example() {
        let data = [0, 0, 0, 0, 160, 0, 0, 7];
        let Some(Message::BmsPack(pack)) = decode_standard(0x6B0, &data) else {
            panic!("expected pack message");
        };
        assert_eq!(pack.pack_soc, 80);
    }

    #[test]
    fn test_bms_pack_soc_not_clamped() {
        let data = [0, 0, 0, 0, 0xFF, 0, 0, 0];
        let Some(Message::BmsPack(pack)) = decode_standard(0x6B0, &data) else {
            panic!("expected pack message");
        };
        assert_eq!(pack.pack_soc, 127);
    }

    #[test]
    fn test_bms_pack_voltage_and_current() {
        // current 0x00C8 = 200 -> 20.0 A, voltage 0x0FA0 = 4000 -> 400.0 V
        let data = [0x00, 0xC8, 0x0F, 0xA0, 0, 0, 0, 0];
        let Some(Message::BmsPack(pack)) = decode_standard(0x6B0, &data) else {
            panic!("expected pack message");
        };
        assert!(approx(pack.pack_current, 20.0));
        assert!(approx(pack.pack_voltage, 400.0));
    }

    #[test]
    fn test_vcu_status_flags_example() {
        let data = [0, 0, 0, 0, 0, 0, 0b0001_0010, 0];
        let Some(Message::VcuStatus(status)) = decode_standard(0x7A4, &data) else {
            panic!("expected vcu status");
        };
        assert!(status.rtd_switch_state);
        assert!(!status.rtd);
        assert!(!status.battery_active);
        assert!(status.inv1_active);
        assert!(!status.inv2_active);
    }

    #[test]
    fn test_vcu_status_fields() {
        // 2561 counts -> 12.58 V
        let data = [0x01, 0x0A, 0, 0, 200, 0, 0b0000_1101, 3];
        let Some(Message::VcuStatus(status)) = decode_standard(0x7A4, &data) else {
            panic!("expected vcu status");
        };
        assert!(approx(status.lv_voltage, 12.58));
        assert_eq!(status.current_limit, 200);
        assert!(status.rtd);
        assert!(status.battery_active);
        assert!(!status.inv1_active);
        assert!(status.inv2_active);
        assert_eq!(status.fault, 3);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let data = [0xFF; 8];
        assert!(decode_standard(0x123, &data).is_none());
        assert!(decode_extended(0x1910_7101, &data).is_none());
        // Same number in the other identifier space
        assert!(decode_raw(0x6B0, true, &data).is_none());
        assert!(decode_raw(0x118ff71, false, &data).is_none());
    }

    #[test]
    fn test_decode_embedded_can_frame() {
        let frame = RawFrame::standard(0x6B0, &[0, 0, 0, 0, 160]).unwrap();
        let Some(Message::BmsPack(pack)) = decode(&frame) else {
            panic!("expected pack message");
        };
        assert_eq!(pack.pack_soc, 80);
    }

    #[test]
    fn test_decode_paths_agree_on_out_of_range_standard_id() {
        // 0xEB0 & 0x7FF == 0x6B0
        let frame = RawFrame::from_parts(0xEB0, false, [0, 0, 0, 0, 160, 0, 0, 7]);
        assert!(frame.decode().is_none());
        assert!(decode(&frame).is_none());

        let frame = RawFrame::from_parts(0x6B0, false, [0, 0, 0, 0, 160, 0, 0, 7]);
        assert_eq!(decode(&frame), frame.decode());
        assert!(decode(&frame).is_some());
    }

    #[test]
    fn test_remote_frame_is_ignored() {
        let id = embedded_can::StandardId::new(0x7A4).unwrap();
        let frame = <RawFrame as Frame>::new_remote(id, 8).unwrap();
        assert!(decode(&frame).is_none());
        assert!(frame.decode().is_none());
    }

    #[test]
    fn test_inverter_index() {
        assert_eq!(InverterIndex::One.slot(), 0);
        assert_eq!(InverterIndex::Two.slot(), 1);
        assert_eq!(InverterIndex::Two.number(), 2);
    }
}
