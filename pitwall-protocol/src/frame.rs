//! Received CAN frames
//!
//! [`RawFrame`] is the shape the bus driver hands over on every receive
//! interrupt: identifier, identifier space and an 8-byte payload. It also
//! implements [`embedded_can::Frame`] so HAL frame types and this one can be
//! fed to the same decoder.

use embedded_can::{ExtendedId, Id, StandardId};

use crate::ids::{MAX_EXTENDED_ID, MAX_STANDARD_ID};

/// Payload length of every telemetry frame
pub const PAYLOAD_LEN: usize = 8;

/// Errors that can occur when constructing a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds the classic CAN 8 bytes
    PayloadTooLarge,
    /// Identifier does not fit its identifier space
    InvalidId,
}

/// A received classic CAN frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawFrame {
    /// Identifier, unmasked
    pub id: u32,
    /// 29-bit identifier space
    pub extended: bool,
    /// Payload, zero-padded past `dlc`
    pub data: [u8; PAYLOAD_LEN],
    /// Data length code
    pub dlc: u8,
    /// Remote transmission request
    pub remote: bool,
}

impl RawFrame {
    /// Wrap a full 8-byte payload as delivered by the receive FIFO
    ///
    /// The identifier is taken as-is; out-of-range identifiers simply never
    /// match a decode table entry.
    pub const fn from_parts(id: u32, extended: bool, data: [u8; PAYLOAD_LEN]) -> Self {
        Self {
            id,
            extended,
            data,
            dlc: PAYLOAD_LEN as u8,
            remote: false,
        }
    }

    /// Build a data frame from a payload of up to 8 bytes
    pub fn data_frame(id: u32, extended: bool, payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() > PAYLOAD_LEN {
            return Err(FrameError::PayloadTooLarge);
        }

        let max_id = if extended { MAX_EXTENDED_ID } else { MAX_STANDARD_ID };
        if id > max_id {
            return Err(FrameError::InvalidId);
        }

        let mut data = [0u8; PAYLOAD_LEN];
        data[..payload.len()].copy_from_slice(payload);

        Ok(Self {
            id,
            extended,
            data,
            dlc: payload.len() as u8,
            remote: false,
        })
    }

    /// Standard-identifier data frame
    pub fn standard(id: u16, payload: &[u8]) -> Result<Self, FrameError> {
        Self::data_frame(u32::from(id), false, payload)
    }

    /// Extended-identifier data frame
    pub fn extended(id: u32, payload: &[u8]) -> Result<Self, FrameError> {
        Self::data_frame(id, true, payload)
    }

    /// Full 8-byte view of the payload (zero-padded)
    pub fn payload(&self) -> &[u8; PAYLOAD_LEN] {
        &self.data
    }
}

fn split_id(id: Id) -> (u32, bool) {
    match id {
        Id::Standard(id) => (u32::from(id.as_raw()), false),
        Id::Extended(id) => (id.as_raw(), true),
    }
}

impl embedded_can::Frame for RawFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        let (raw, extended) = split_id(id.into());
        Self::data_frame(raw, extended, data).ok()
    }

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        if dlc > PAYLOAD_LEN {
            return None;
        }
        let (raw, extended) = split_id(id.into());
        Some(Self {
            id: raw,
            extended,
            data: [0; PAYLOAD_LEN],
            dlc: dlc as u8,
            remote: true,
        })
    }

    fn is_extended(&self) -> bool {
        self.extended
    }

    fn is_remote_frame(&self) -> bool {
        self.remote
    }

    fn id(&self) -> Id {
        // Ids built through `from_parts` may be out of range. Extended ids
        // keep their low 29 bits, which the decoder masks further anyway; an
        // out-of-range standard id maps to 0x000, which no table matches.
        if self.extended {
            let raw = self.id & MAX_EXTENDED_ID;
            ExtendedId::new(raw).map_or(Id::Extended(ExtendedId::ZERO), Id::Extended)
        } else {
            u16::try_from(self.id)
                .ok()
                .and_then(StandardId::new)
                .map_or(Id::Standard(StandardId::ZERO), Id::Standard)
        }
    }

    fn dlc(&self) -> usize {
        usize::from(self.dlc)
    }

    fn data(&self) -> &[u8] {
        if self.remote {
            &[]
        } else {
            &self.data[..usize::from(self.dlc).min(PAYLOAD_LEN)]
        }
    }
}
