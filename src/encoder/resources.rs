//! Resource capacity and resource coupling constraints.

use tracing::trace;

use crate::cp::{Constraint, LinearExpr, ModelSink};
use crate::lookup;
use crate::models::Resource;

use super::ConstraintEncoder;

impl<S: ModelSink> ConstraintEncoder<'_, S> {
    /// One no-overlap constraint per machine with two or more modes.
    pub(super) fn machine_no_overlap(&mut self) {
        for seq in self.vars.sequences.iter().flatten() {
            if seq.modes.len() < 2 {
                trace!(event = "no_overlap_skipped", resource = seq.resource);
                continue;
            }

            let intervals = seq
                .modes
                .iter()
                .map(|&m| self.vars.modes[m].interval)
                .collect();
            self.sink.add(Constraint::NoOverlap { intervals });
        }
    }

    /// One cumulative constraint per renewable resource.
    pub(super) fn renewable_capacity(&mut self) {
        let users = lookup::resource_modes(self.data);

        for (r, resource) in self.data.resources.iter().enumerate() {
            let Resource::Renewable(renewable) = resource else {
                continue;
            };

            let intervals = users[r]
                .modes
                .iter()
                .map(|&m| self.vars.modes[m].interval)
                .collect();
            self.sink.add(Constraint::Cumulative {
                intervals,
                demands: users[r].demands.clone(),
                capacity: renewable.capacity,
            });
        }
    }

    /// `sum(demand * present) <= capacity` per non-renewable resource.
    pub(super) fn non_renewable_capacity(&mut self) {
        let users = lookup::resource_modes(self.data);

        for (r, resource) in self.data.resources.iter().enumerate() {
            let Resource::NonRenewable(non_renewable) = resource else {
                continue;
            };

            let usage = LinearExpr::weighted_sum(
                users[r]
                    .modes
                    .iter()
                    .zip(&users[r].demands)
                    .map(|(&m, &demand)| (self.vars.modes[m].present.as_int(), demand)),
            );
            self.sink
                .add(Constraint::le(usage, non_renewable.capacity));
        }
    }

    /// A mode of the first task may only be selected if the second task
    /// selects a compatible mode: one with the same resources (identical)
    /// or with no resource in common (different).
    pub(super) fn resource_coupling(&mut self) {
        let constraints = &self.data.constraints;
        let identical = constraints
            .identical_resources
            .iter()
            .flat_map(|&(t1, t2)| lookup::identical_modes(self.data, t1, t2));
        let different = constraints
            .different_resources
            .iter()
            .flat_map(|&(t1, t2)| lookup::different_modes(self.data, t1, t2));

        for (mode1, modes2) in identical.chain(different) {
            let selected = self.vars.modes[mode1].present;
            let compatible = LinearExpr::sum(modes2.iter().map(|&m| self.vars.modes[m].present));
            self.sink.add(Constraint::le(selected, compatible));
        }
    }
}
