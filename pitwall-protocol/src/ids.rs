//! CAN identifiers of the frames the dashboard consumes
//!
//! Extended identifiers are compared after masking with [`EXTENDED_ID_MASK`];
//! the inverters put their node address in the upper bits.

/// Mask applied to extended identifiers before matching (low 25 bits)
pub const EXTENDED_ID_MASK: u32 = 0x01FF_FFFF;

/// Largest valid standard (11-bit) identifier
pub const MAX_STANDARD_ID: u32 = 0x7FF;

/// Largest valid extended (29-bit) identifier
pub const MAX_EXTENDED_ID: u32 = 0x1FFF_FFFF;

// Inverter high-speed messages (extended)
pub const INV1_HS1: u32 = 0x118_ff71;
pub const INV2_HS1: u32 = 0x118_ff72;
pub const INV1_HS2: u32 = 0x119_ff71;
pub const INV2_HS2: u32 = 0x119_ff72;
pub const INV1_HS3: u32 = 0x11a_ff71;
pub const INV2_HS3: u32 = 0x11a_ff72;

// BMS and VCU broadcasts (standard)
pub const BMS_PACK: u32 = 0x6B0;
pub const BMS_LIMITS: u32 = 0x6B1;
pub const VCU_STATUS: u32 = 0x7A4;
