use crate::current_sensing::PhaseCurrents;

/// Switch state for one inverter leg. The discriminants are the 4-bit patterns the gate driver
/// expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum PhaseGate {
    // Measured current is inside the band; freewheel.
    Hold = 0b1110,
    // Below the band; apply DC bus to raise current.
    ForceLow = 0b1010,
    // Above the band; apply negative bus to drive current down.
    ForceHigh = 0b1111,
}

impl PhaseGate {
    // Compare measured against `[reference - limit, reference + limit]`. There is no memory of the
    // previous state; landing exactly on a band edge holds.
    pub fn compare(reference: f32, measured: f32, limit: f32) -> PhaseGate {
        let lower = reference - limit;
        let upper = reference + limit;
        if measured > lower && measured < upper {
            PhaseGate::Hold
        } else if measured < lower {
            PhaseGate::ForceLow
        } else if measured > upper {
            PhaseGate::ForceHigh
        } else {
            PhaseGate::Hold
        }
    }

    pub fn bits(self) -> u16 {
        self as u16
    }
}

/// Packed gate word for all three legs: `u + v * 16 + w * 256`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateCode(pub u16);

impl GateCode {
    // Every switch off. Written whenever the inverter is disabled.
    pub const ALL_OFF: GateCode = GateCode(0xFFF);

    pub fn pack(u: PhaseGate, v: PhaseGate, w: PhaseGate) -> GateCode {
        GateCode(u.bits() + v.bits() * 16 + w.bits() * 256)
    }

    pub fn from_currents(reference: &PhaseCurrents, measured: &PhaseCurrents, limit: f32) -> GateCode {
        GateCode::pack(
            PhaseGate::compare(reference.u, measured.u, limit),
            PhaseGate::compare(reference.v, measured.v, limit),
            PhaseGate::compare(reference.w, measured.w, limit),
        )
    }

    pub fn bits(self) -> u16 {
        self.0
    }
}
