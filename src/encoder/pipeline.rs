//! Encoding passes and their order.

use std::fmt;

/// One stage of the encoding pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Job start/end span the job's present tasks.
    JobSpans,
    /// Each present task selects exactly one mode.
    ModeSelection,
    /// Modes on the same machine never overlap.
    MachineNoOverlap,
    /// Renewable capacity at every instant.
    RenewableCapacity,
    /// Non-renewable capacity over the whole schedule.
    NonRenewableCapacity,
    /// Start/end relations between task pairs.
    Timing,
    /// Identical and different resource requirements.
    ResourceCoupling,
    /// Machines with setup times get a sequence.
    SetupActivation,
    /// Direct succession on shared machines.
    Consecutive,
    /// Flow conservation over end-before-start arcs.
    FlowConservation,
    /// Circuit and arc semantics of active sequences.
    Circuit,
}

impl Pass {
    /// The passes in execution order.
    pub const PIPELINE: [Pass; 11] = [
        Pass::JobSpans,
        Pass::ModeSelection,
        Pass::MachineNoOverlap,
        Pass::RenewableCapacity,
        Pass::NonRenewableCapacity,
        Pass::Timing,
        Pass::ResourceCoupling,
        Pass::SetupActivation,
        Pass::Consecutive,
        Pass::FlowConservation,
        Pass::Circuit,
    ];

    /// Passes that must have run before this one.
    ///
    /// The circuit pass only covers sequences activated so far.
    pub fn depends_on(self) -> &'static [Pass] {
        match self {
            Pass::Circuit => &[Pass::SetupActivation, Pass::Consecutive],
            _ => &[],
        }
    }

    /// Short name for logs.
    pub fn name(self) -> &'static str {
        match self {
            Pass::JobSpans => "job_spans",
            Pass::ModeSelection => "mode_selection",
            Pass::MachineNoOverlap => "machine_no_overlap",
            Pass::RenewableCapacity => "renewable_capacity",
            Pass::NonRenewableCapacity => "non_renewable_capacity",
            Pass::Timing => "timing",
            Pass::ResourceCoupling => "resource_coupling",
            Pass::SetupActivation => "setup_activation",
            Pass::Consecutive => "consecutive",
            Pass::FlowConservation => "flow_conservation",
            Pass::Circuit => "circuit",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
