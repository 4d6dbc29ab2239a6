//! Machine sequencing: setup activation, consecutive constraints and
//! circuits.
//!
//! A machine's sequence is a circuit over its modes plus a dummy node.
//! Present modes are visited in processing order; absent modes take
//! their self-loop. The dummy self-loop is only selected when no mode
//! of the machine is present.

use tracing::trace;

use crate::cp::{CircuitArc, Constraint, ModelSink};
use crate::lookup;

use super::ConstraintEncoder;

impl<S: ModelSink> ConstraintEncoder<'_, S> {
    /// Activates the sequence of every machine with a non-zero setup time.
    pub(super) fn setup_activation(&mut self) {
        let setup_times = &self.data.constraints.setup_times;

        for (r, matrix) in setup_times.iter() {
            if !matrix.has_nonzero() {
                continue;
            }
            if let Some(seq) = self.vars.sequence_mut(r) {
                seq.activate(&mut *self.sink);
            }
        }
    }

    /// For each consecutive pair, the second task's mode directly follows
    /// the first task's mode on every machine both use, if both are
    /// selected.
    pub(super) fn consecutive(&mut self) {
        for &(t1, t2) in &self.data.constraints.consecutive {
            for shared in lookup::intersecting_modes(self.data, t1, t2) {
                let both = [
                    self.vars.modes[shared.mode1].present,
                    self.vars.modes[shared.mode2].present,
                ];

                for &r in &shared.resources {
                    let Some(seq) = self.vars.sequence_mut(r) else {
                        continue;
                    };
                    seq.activate(&mut *self.sink);

                    let arc = seq
                        .position(shared.mode1)
                        .zip(seq.position(shared.mode2))
                        .and_then(|(i, j)| seq.arc(i, j));
                    if let Some(arc) = arc {
                        self.sink.add_if(Constraint::eq(arc, 1_i64), both);
                    }
                }
            }
        }
    }

    /// Circuit constraints for every active sequence.
    ///
    /// Besides the circuit itself: a mode's self-loop implies it is
    /// absent, the dummy self-loop implies every mode is absent, an arc
    /// between two modes implies both are present, and a selected arc
    /// `i -> j` puts `j` at least the setup time after the end of `i`.
    pub(super) fn circuit(&mut self) {
        for seq in self.vars.sequences.iter().flatten() {
            if !seq.is_active() {
                trace!(event = "circuit_skipped", resource = seq.resource);
                continue;
            }

            let arcs = seq
                .arcs()
                .map(|(tail, head, arc)| CircuitArc {
                    tail,
                    head,
                    literal: arc.literal(),
                })
                .collect();
            self.sink.add(Constraint::Circuit { arcs });

            let dummy = seq.dummy();
            for (i, j, arc) in seq.arcs() {
                if i == dummy && j == dummy {
                    for &m in &seq.modes {
                        let present = self.vars.modes[m].present;
                        self.sink.add(Constraint::le(arc, !present));
                    }
                } else if i == j {
                    let present = self.vars.modes[seq.modes[i]].present;
                    self.sink.add(Constraint::le(arc, !present));
                } else if i != dummy && j != dummy {
                    let from = self.vars.modes[seq.modes[i]];
                    let to = self.vars.modes[seq.modes[j]];
                    let setup = self.data.setup_time(seq.resource, from.task, to.task);

                    self.sink.add(Constraint::le(arc, from.present));
                    self.sink.add(Constraint::le(arc, to.present));
                    self.sink
                        .add_if(Constraint::le(from.end + setup, to.start), [arc]);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cp::{ConstraintKind, CpModel, ModelError, ModelSink};
    use crate::encoder::{ConstraintEncoder, Pass};
    use crate::models::{Job, Mode, ProblemData, Resource, Task};
    use crate::testing::{encode, plan_solution, test_config};
    use crate::variables::VariableSet;

    fn violated_kind(err: ModelError) -> Option<ConstraintKind> {
        match err {
            ModelError::Violated { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Two single-mode tasks of length 3 on one machine.
    fn shared_machine() -> ProblemData {
        let mut data = ProblemData::new();
        let m = data.add_resource(Resource::machine("M0"));
        let job = data.add_job(Job::new());
        for _ in 0..2 {
            let t = data.add_task(Task::new(job).optional());
            data.add_mode(Mode::new(t, 3).with_resource(m, 1));
        }
        data
    }

    #[test]
    fn test_inactive_sequence_gets_no_circuit() {
        let data = shared_machine();
        let (model, vars) = encode(&data);

        assert!(!vars.sequence(0).unwrap().is_active());
        assert_eq!(model.count_kind(ConstraintKind::Circuit), 0);
    }

    #[test]
    fn test_zero_setup_matrix_does_not_activate() {
        let mut data = shared_machine();
        data.set_setup_time(0, 0, 1, 0);
        let (_, vars) = encode(&data);

        assert!(!vars.sequence(0).unwrap().is_active());
    }

    #[test]
    fn test_setup_time_enforced() {
        let mut data = shared_machine();
        data.set_setup_time(0, 0, 1, 5);
        let (model, vars) = encode(&data);
        assert!(vars.sequence(0).unwrap().is_active());
        assert_eq!(model.count_kind(ConstraintKind::Circuit), 1);

        // 0 then 1 needs a gap of 5.
        let ok = plan_solution(&model, &vars, &data, &[Some((0, 0)), Some((1, 8))]);
        assert!(model.check(&ok).is_ok());

        let tight = plan_solution(&model, &vars, &data, &[Some((0, 0)), Some((1, 7))]);
        assert_eq!(
            model.check(&tight).err().and_then(violated_kind),
            Some(ConstraintKind::Linear)
        );

        // 1 then 0 has no setup.
        let reversed = plan_solution(&model, &vars, &data, &[Some((0, 3)), Some((1, 0))]);
        assert!(model.check(&reversed).is_ok());
    }

    #[test]
    fn test_circuit_with_absent_modes() {
        let mut data = shared_machine();
        data.set_setup_time(0, 0, 1, 5);
        let (model, vars) = encode(&data);

        let one = plan_solution(&model, &vars, &data, &[None, Some((1, 0))]);
        assert!(model.check(&one).is_ok());

        let none = plan_solution(&model, &vars, &data, &[None, None]);
        assert!(model.check(&none).is_ok());

        // The dummy self-loop cannot be taken while a mode is present.
        let mut skip = one.clone();
        let seq = vars.sequence(0).unwrap();
        skip.set_bool(seq.arc(2, 1).unwrap(), false);
        skip.set_bool(seq.arc(1, 2).unwrap(), false);
        skip.set_bool(seq.arc(1, 1).unwrap(), true);
        skip.set_bool(seq.arc(2, 2).unwrap(), true);
        assert!(model.check(&skip).is_err());
    }

    #[test]
    fn test_circuit_constraint_count() {
        let mut data = shared_machine();
        data.set_setup_time(0, 1, 0, 2);
        let (model, _) = encode(&data);

        // Two modes: 2 self-loop + 2 dummy-loop + 3 per ordered pair.
        let circuit_linear = 2 + 2 + 3 * 2;
        let circuit_index = model
            .constraints()
            .iter()
            .position(|c| c.constraint.kind() == ConstraintKind::Circuit)
            .unwrap();
        assert_eq!(model.constraints().len() - circuit_index - 1, circuit_linear);
    }

    #[test]
    fn test_consecutive_forces_adjacency() {
        let mut data = shared_machine();
        let t = data.add_task(Task::new(0).optional());
        data.add_mode(Mode::new(t, 3).with_resource(0, 1));
        data.add_consecutive(0, 1);
        let (model, vars) = encode(&data);
        assert!(vars.sequence(0).unwrap().is_active());

        let adjacent = plan_solution(
            &model,
            &vars,
            &data,
            &[Some((0, 0)), Some((1, 3)), Some((2, 6))],
        );
        assert!(model.check(&adjacent).is_ok());

        let interleaved = plan_solution(
            &model,
            &vars,
            &data,
            &[Some((0, 0)), Some((1, 6)), Some((2, 3))],
        );
        assert!(model.check(&interleaved).is_err());

        // Not binding when the first task is absent.
        let partial = plan_solution(&model, &vars, &data, &[None, Some((1, 6)), Some((2, 0))]);
        assert!(model.check(&partial).is_ok());
    }

    #[test]
    fn test_consecutive_ignores_non_machines() {
        let mut data = ProblemData::new();
        let crew = data.add_resource(Resource::renewable("crew", 2));
        let job = data.add_job(Job::new());
        for _ in 0..2 {
            let t = data.add_task(Task::new(job));
            data.add_mode(Mode::new(t, 1).with_resource(crew, 1));
        }
        data.add_consecutive(0, 1);
        let (model, _) = encode(&data);

        assert_eq!(model.count_kind(ConstraintKind::Circuit), 0);
    }

    #[test]
    fn test_activation_shared_by_setup_and_consecutive() {
        let mut data = shared_machine();
        data.set_setup_time(0, 0, 1, 5);
        data.add_consecutive(0, 1);
        let (model, vars) = encode(&data);

        // One arc table, one circuit.
        assert_eq!(vars.sequence(0).unwrap().arcs().count(), 9);
        assert_eq!(model.count_kind(ConstraintKind::Circuit), 1);
    }

    #[test]
    fn test_circuit_before_activation_misses_sequence() {
        let mut data = shared_machine();
        data.set_setup_time(0, 0, 1, 5);

        let mut model = CpModel::new("early");
        let mut vars = VariableSet::build(&mut model, &data, &test_config());
        let mut encoder = ConstraintEncoder::new(&data, &mut vars, &mut model);
        encoder.run(Pass::Circuit);
        encoder.run(Pass::SetupActivation);

        assert_eq!(model.count_kind(ConstraintKind::Circuit), 0);
        assert!(vars.sequence(0).unwrap().is_active());
        assert_eq!(model.constraint_count(), 0);
    }
}
