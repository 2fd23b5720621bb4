//! Inverter status word

/// Control state reported by an inverter in its HS2 frame
///
/// Bytes outside the known set decode to [`StatusWord::Unknown`] instead of
/// failing; the raw value is kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusWord {
    NotReady,
    Shutdown,
    Precharge,
    Energised,
    Enabled,
    FaultReaction,
    FaultOff,
    /// Any other raw byte, including the power-on zero
    Unknown(u8),
}

impl Default for StatusWord {
    fn default() -> Self {
        StatusWord::Unknown(0)
    }
}

// Wire format values
const STATUS_NOT_READY: u8 = 0x01;
const STATUS_SHUTDOWN: u8 = 0x02;
const STATUS_PRECHARGE: u8 = 0x04;
const STATUS_ENERGISED: u8 = 0x07;
const STATUS_ENABLED: u8 = 0x08;
const STATUS_FAULT_REACTION: u8 = 0x0B;
const STATUS_FAULT_OFF: u8 = 0x0D;

impl StatusWord {
    /// Decode a status word from its wire byte. Total over `u8`.
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            STATUS_NOT_READY => StatusWord::NotReady,
            STATUS_SHUTDOWN => StatusWord::Shutdown,
            STATUS_PRECHARGE => StatusWord::Precharge,
            STATUS_ENERGISED => StatusWord::Energised,
            STATUS_ENABLED => StatusWord::Enabled,
            STATUS_FAULT_REACTION => StatusWord::FaultReaction,
            STATUS_FAULT_OFF => StatusWord::FaultOff,
            other => StatusWord::Unknown(other),
        }
    }

    /// Convert to wire format byte
    pub const fn to_byte(self) -> u8 {
        match self {
            StatusWord::NotReady => STATUS_NOT_READY,
            StatusWord::Shutdown => STATUS_SHUTDOWN,
            StatusWord::Precharge => STATUS_PRECHARGE,
            StatusWord::Energised => STATUS_ENERGISED,
            StatusWord::Enabled => STATUS_ENABLED,
            StatusWord::FaultReaction => STATUS_FAULT_REACTION,
            StatusWord::FaultOff => STATUS_FAULT_OFF,
            StatusWord::Unknown(raw) => raw,
        }
    }

    /// Text shown on the dashboard. Unknown words render as empty text.
    pub const fn label(&self) -> &'static str {
        match self {
            StatusWord::NotReady => "NOT READY",
            StatusWord::Shutdown => "SHUTDOWN",
            StatusWord::Precharge => "PRECHARGE",
            StatusWord::Energised => "ENERGISED",
            StatusWord::Enabled => "ENABLED",
            StatusWord::FaultReaction => "FAULT REACTION",
            StatusWord::FaultOff => "FAULT OFF",
            StatusWord::Unknown(_) => "",
        }
    }

    /// True for the two fault states
    pub const fn is_fault(&self) -> bool {
        matches!(self, StatusWord::FaultReaction | StatusWord::FaultOff)
    }
}
