//! Applying decoded messages to the model
//!
//! Each message overwrites exactly the fields its frame owns. The VCU status
//! frame additionally stamps `last_comm_tick` with the current tick; it never
//! touches `Vcu::active`, which belongs to the scheduler.

use pitwall_protocol::{decode_raw, Message, RawFrame, PAYLOAD_LEN};

use super::model::Telemetry;

impl Telemetry {
    /// Apply one decoded message
    pub fn apply(&mut self, msg: &Message) {
        match *msg {
            Message::InverterDrive(index, drive) => {
                let inv = self.inverter_mut(index);
                inv.output_torque = drive.output_torque;
                inv.motor_speed = drive.motor_speed;
                inv.battery_current = drive.battery_current;
            }
            Message::InverterLimits(index, limits) => {
                let inv = self.inverter_mut(index);
                inv.available_forward_torque = limits.available_forward_torque;
                inv.available_reverse_torque = limits.available_reverse_torque;
                inv.statusword = limits.statusword;
            }
            Message::InverterThermal(index, thermal) => {
                let inv = self.inverter_mut(index);
                inv.capacitor_voltage = thermal.capacitor_voltage;
                inv.temperature = thermal.temperature;
                inv.motor_temp = thermal.motor_temp;
            }
            Message::BmsLimits(limits) => {
                self.battery.pack_dcl = limits.pack_dcl;
                self.battery.temperature = limits.temperature;
            }
            Message::BmsPack(pack) => {
                self.battery.pack_soc = pack.pack_soc;
                self.battery.pack_voltage = pack.pack_voltage;
                self.battery.pack_current = pack.pack_current;
            }
            Message::VcuStatus(status) => {
                self.vcu.lv_voltage = status.lv_voltage;
                self.vcu.current_limit = status.current_limit;
                self.vcu.rtd_switch_state = status.rtd_switch_state;
                self.vcu.rtd = status.rtd;
                self.battery.active = status.battery_active;
                self.inverters[0].active = status.inv1_active;
                self.inverters[1].active = status.inv2_active;
                self.vcu.last_comm_tick = self.tick;
                self.vcu.fault = status.fault;
            }
        }
    }

    /// Decode and apply a frame. Returns false for unrecognized identifiers.
    pub fn apply_frame(&mut self, frame: &RawFrame) -> bool {
        match frame.decode() {
            Some(msg) => {
                self.apply(&msg);
                true
            }
            None => false,
        }
    }

    /// Decode and apply the raw receive-FIFO shape
    pub fn apply_raw(&mut self, id: u32, extended: bool, data: &[u8; PAYLOAD_LEN]) -> bool {
        match decode_raw(id, extended, data) {
            Some(msg) => {
                self.apply(&msg);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitwall_protocol::StatusWord;

    #[test]
    fn test_inverter_frames_select_inverter() {
        let mut telemetry = Telemetry::new();
        telemetry.apply_raw(0x118ff71, true, &[0x50, 0x00, 0x0A, 0x00, 0, 0, 0, 0]);

        assert_eq!(telemetry.inverters[0].output_torque, 0.5);
        assert_eq!(telemetry.inverters[0].motor_speed, 10);
        assert_eq!(telemetry.inverters[0].battery_current, 0);
        assert_eq!(telemetry.inverters[1], Telemetry::new().inverters[1]);

        telemetry.apply_raw(0x119ff72, true, &[0, 0, 0, 0, 0x0B, 0, 0, 0]);
        assert_eq!(telemetry.inverters[1].statusword, StatusWord::FaultReaction);
        assert_eq!(telemetry.inverters[0].statusword, StatusWord::default());
    }

    #[test]
    fn test_frame_only_touches_its_fields() {
        let mut telemetry = Telemetry::new();
        telemetry.apply_raw(0x11aff71, true, &[36, 0, 45, 0, 0x00, 0x19, 0, 0]);
        let before = telemetry;

        // HS1 must not overwrite HS3 fields
        telemetry.apply_raw(0x118ff71, true, &[0xFF; 8]);
        assert_eq!(telemetry.inverters[0].temperature, before.inverters[0].temperature);
        assert_eq!(telemetry.inverters[0].capacitor_voltage, 400.0);
        assert_eq!(telemetry.battery, before.battery);
        assert_eq!(telemetry.vcu, before.vcu);
    }

    #[test]
    fn test_bms_frames() {
        let mut telemetry = Telemetry::new();
        telemetry.apply_raw(0x6B0, false, &[0, 0, 0, 0, 160, 0, 0, 7]);
        assert_eq!(telemetry.battery.pack_soc, 80);

        telemetry.apply_raw(0x6B1, false, &[0x01, 0x2C, 0, 0, 31, 0, 0, 0]);
        assert_eq!(telemetry.battery.pack_dcl, 300);
        assert_eq!(telemetry.battery.temperature, 31);
        assert_eq!(telemetry.battery.pack_soc, 80);
    }

    #[test]
    fn test_vcu_frame_sets_flags_and_stamps_tick() {
        let mut telemetry = Telemetry::new();
        telemetry.tick = 1234;
        telemetry.apply_raw(0x7A4, false, &[0, 0, 0, 0, 150, 0, 0b0001_0010, 9]);

        assert!(telemetry.vcu.rtd_switch_state);
        assert!(!telemetry.vcu.rtd);
        assert!(!telemetry.battery.active);
        assert!(telemetry.inverters[0].active);
        assert!(!telemetry.inverters[1].active);
        assert_eq!(telemetry.vcu.current_limit, 150);
        assert_eq!(telemetry.vcu.fault, 9);
        assert_eq!(telemetry.vcu.last_comm_tick, 1234);
    }

    #[test]
    fn test_vcu_frame_does_not_set_liveness() {
        let mut telemetry = Telemetry::new();
        telemetry.apply_raw(0x7A4, false, &[0xFF; 8]);
        assert!(!telemetry.vcu.active);
    }

    #[test]
    fn test_vcu_frame_keeps_configured_limits() {
        let mut telemetry = Telemetry::new();
        telemetry.vcu.max_rpm = 5500;
        telemetry.vcu.max_torque = 180;
        telemetry.apply_raw(0x7A4, false, &[0xFF; 8]);
        assert_eq!(telemetry.vcu.max_rpm, 5500);
        assert_eq!(telemetry.vcu.max_torque, 180);
    }

    #[test]
    fn test_unknown_frame_is_a_noop() {
        let mut telemetry = Telemetry::new();
        let before = telemetry;
        assert!(!telemetry.apply_raw(0x123, false, &[0xFF; 8]));
        assert!(!telemetry.apply_raw(0x6B0, true, &[0xFF; 8]));
        assert_eq!(telemetry, before);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let frame = RawFrame::from_parts(0x6B0, false, [0x12, 0x34, 0x56, 0x78, 0x9A, 0, 0, 0]);
        let mut once = Telemetry::new();
        once.apply_frame(&frame);
        let mut twice = once;
        twice.apply_frame(&frame);
        assert_eq!(once, twice);
    }
}
