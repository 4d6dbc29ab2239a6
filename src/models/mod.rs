//! Scheduling domain models.
//!
//! Provides the data types describing a flexible job-shop instance:
//! jobs, tasks, execution modes, resources and side constraints.
//! All cross references are indices, which keeps the model trivially
//! serializable and cheap to index from the encoder.
//!
//! # Domain Mappings
//!
//! | u-schedule-cp | Manufacturing | Healthcare | Logistics |
//! |---------------|--------------|------------|-----------|
//! | Job | Order | Patient Case | Shipment |
//! | Task | Operation | Procedure | Transport Leg |
//! | Mode | Routing alternative | Staffing option | Vehicle choice |
//! | Resource | Machine/Crew/Material | Room/Staff/Budget | Truck/Driver/Fuel |

mod constraint;
mod job;
mod mode;
mod problem;
mod resource;
mod task;

pub use constraint::{
    Constraints, FlowRole, PrecedenceId, SetupMatrix, SetupTimes, TimePoint, TimingConstraint,
    TimingKind,
};
pub use job::Job;
pub use mode::Mode;
pub use problem::ProblemData;
pub use resource::{Machine, NonRenewable, Renewable, Resource, ResourceKind};
pub use task::Task;
