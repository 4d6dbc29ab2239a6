//! Constraint-programming encoder for flexible job-shop scheduling.
//!
//! Translates a scheduling problem (jobs, tasks, execution modes,
//! resources, precedence and sequencing constraints) into the linear,
//! reified and global constraints of a CP model. Search is left to the
//! solver engine behind [`cp::ModelSink`].
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProblemData`, `Job`, `Task`, `Mode`,
//!   `Resource`, `Constraints`, `SetupTimes`, `FlowRole`
//! - **`validation`**: Input integrity checks (index ranges, ownership, empty tasks)
//! - **`lookup`**: Derived mode indexes (per task, per resource, compatible pairs)
//! - **`cp`**: CP modelling layer: variables, linear expressions, constraints,
//!   the `ModelSink` trait, the recording `CpModel` and its assignment checker
//! - **`variables`**: Decision variables of a problem, machine sequences, flow literals
//! - **`encoder`**: The constraint encoding pipeline
//! - **`config`**: Encoder configuration (TOML)
//! - **`builder`**: Validate, create variables and encode in one call
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Brucker (2007), "Scheduling Algorithms"
//! - Laborie et al. (2018), "IBM ILOG CP optimizer for scheduling"

pub mod builder;
pub mod config;
pub mod cp;
pub mod encoder;
pub mod lookup;
pub mod models;
pub mod validation;
pub mod variables;

#[cfg(test)]
mod testing;
