//! Flow conservation over end-before-start arcs.

use std::collections::BTreeMap;

use crate::cp::{BoolVar, Constraint, LinearExpr, ModelSink};
use crate::models::FlowRole;

use super::ConstraintEncoder;

impl<S: ModelSink> ConstraintEncoder<'_, S> {
    /// Per job, every end-before-start constraint between two of its
    /// tasks is a flow arc. Sources send one unit, sinks receive one, and
    /// intermediates pass on whatever their presence says.
    ///
    /// Does nothing when no task has a flow role.
    ///
    /// # Panics
    ///
    /// Panics if an end-before-start constraint has no flow literal.
    pub(super) fn flow_conservation(&mut self) {
        if self.data.flows.is_empty() {
            return;
        }

        for job in &self.data.jobs {
            let mut inflow: BTreeMap<usize, Vec<BoolVar>> = BTreeMap::new();
            let mut outflow: BTreeMap<usize, Vec<BoolVar>> = BTreeMap::new();

            for c in &self.data.constraints.end_before_start {
                if job.contains(c.task1) && job.contains(c.task2) {
                    let arc = self.vars.flows[c.id];
                    outflow.entry(c.task1).or_default().push(arc);
                    inflow.entry(c.task2).or_default().push(arc);
                }
            }

            for &t in &job.tasks {
                let Some(&role) = self.data.flows.get(&t) else {
                    continue;
                };
                let flow_in = LinearExpr::sum(inflow.remove(&t).unwrap_or_default());
                let flow_out = LinearExpr::sum(outflow.remove(&t).unwrap_or_default());

                match role {
                    FlowRole::Source => self.sink.add(Constraint::eq(flow_out, 1_i64)),
                    FlowRole::Sink => self.sink.add(Constraint::eq(flow_in, 1_i64)),
                    FlowRole::Intermediate => {
                        let present = self.vars.tasks[t].present;
                        self.sink.add(Constraint::eq(flow_in, present));
                        self.sink.add(Constraint::eq(flow_out, present));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cp::{ConstraintKind, CpModel};
    use crate::encoder::{ConstraintEncoder, Pass};
    use crate::models::{FlowRole, Job, Mode, PrecedenceId, ProblemData, Task};
    use crate::testing::{encode, plan_solution, test_config};
    use crate::variables::VariableSet;

    /// Source 0 branches to optional tasks 1 and 2, which both feed sink 3.
    fn diamond() -> (ProblemData, [PrecedenceId; 4]) {
        let mut data = ProblemData::new();
        let job = data.add_job(Job::new());
        let source = data.add_task(Task::new(job));
        let left = data.add_task(Task::new(job).optional());
        let right = data.add_task(Task::new(job).optional());
        let sink = data.add_task(Task::new(job));
        for t in [source, left, right, sink] {
            data.add_mode(Mode::new(t, 2));
        }
        let ids = [
            data.add_end_before_start(source, left, 0),
            data.add_end_before_start(source, right, 0),
            data.add_end_before_start(left, sink, 0),
            data.add_end_before_start(right, sink, 0),
        ];
        data.set_flow_role(source, FlowRole::Source);
        data.set_flow_role(left, FlowRole::Intermediate);
        data.set_flow_role(right, FlowRole::Intermediate);
        data.set_flow_role(sink, FlowRole::Sink);
        (data, ids)
    }

    #[test]
    fn test_flow_through_one_branch() {
        let (data, ids) = diamond();
        let (model, vars) = encode(&data);

        let mut solution = plan_solution(
            &model,
            &vars,
            &data,
            &[Some((0, 0)), Some((1, 2)), None, Some((3, 4))],
        );
        solution.set_bool(vars.flows[ids[0]], true);
        solution.set_bool(vars.flows[ids[2]], true);
        assert!(model.check(&solution).is_ok());

        // Flow into an absent task.
        let mut wrong = solution.clone();
        wrong.set_bool(vars.flows[ids[0]], false);
        wrong.set_bool(vars.flows[ids[1]], true);
        assert!(model.check(&wrong).is_err());
    }

    #[test]
    fn test_source_must_send_flow() {
        let (data, _) = diamond();
        let (model, vars) = encode(&data);

        // All flow literals default to false.
        let solution = plan_solution(
            &model,
            &vars,
            &data,
            &[Some((0, 0)), Some((1, 2)), None, Some((3, 4))],
        );
        assert!(model.check(&solution).is_err());
    }

    #[test]
    fn test_no_roles_is_noop() {
        let (mut data, _) = diamond();
        data.flows.clear();

        let mut model = CpModel::new("flow");
        let mut vars = VariableSet::build(&mut model, &data, &test_config());
        let before = model.constraints().len();
        ConstraintEncoder::new(&data, &mut vars, &mut model).run(Pass::FlowConservation);

        assert_eq!(model.constraints().len(), before);
    }

    #[test]
    fn test_constraint_count() {
        let (data, _) = diamond();

        let mut model = CpModel::new("flow");
        let mut vars = VariableSet::build(&mut model, &data, &test_config());
        let before = model.constraints().len();
        ConstraintEncoder::new(&data, &mut vars, &mut model).run(Pass::FlowConservation);

        // Source 1 + sink 1 + two intermediates with 2 each.
        assert_eq!(model.constraints().len() - before, 6);
        assert_eq!(model.count_kind(ConstraintKind::Linear), before + 6);
    }

    #[test]
    fn test_arcs_across_jobs_ignored() {
        let mut data = ProblemData::new();
        let a = data.add_job(Job::new());
        let b = data.add_job(Job::new());
        let t0 = data.add_task(Task::new(a));
        let t1 = data.add_task(Task::new(b));
        data.add_mode(Mode::new(t0, 1));
        data.add_mode(Mode::new(t1, 1));
        data.add_end_before_start(t0, t1, 0);
        data.set_flow_role(t0, FlowRole::Source);
        let (model, vars) = encode(&data);

        // The cross-job arc does not count, so the source has no out-flow.
        let mut solution = plan_solution(&model, &vars, &data, &[Some((0, 0)), Some((1, 1))]);
        solution.set_bool(vars.flows[PrecedenceId(0)], true);
        assert!(model.check(&solution).is_err());
    }
}
