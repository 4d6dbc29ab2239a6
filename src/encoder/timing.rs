//! Timing (precedence) constraints.

use crate::cp::{Constraint, IntVar, ModelSink};
use crate::models::TimePoint;

use super::ConstraintEncoder;

impl<S: ModelSink> ConstraintEncoder<'_, S> {
    /// `time(task1) + delay <= time(task2)` for every timing constraint,
    /// enforced while both tasks are present.
    pub(super) fn timing(&mut self) {
        for (kind, c) in self.data.constraints.all_timing() {
            let (point1, point2) = kind.points();
            let lhs = self.time_point(c.task1, point1);
            let rhs = self.time_point(c.task2, point2);
            let both = [self.vars.tasks[c.task1].present, self.vars.tasks[c.task2].present];

            self.sink.add_if(Constraint::le(lhs + c.delay, rhs), both);
        }
    }

    fn time_point(&self, task: usize, point: TimePoint) -> IntVar {
        let var = &self.vars.tasks[task];
        match point {
            TimePoint::Start => var.start,
            TimePoint::End => var.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cp::{ConstraintKind, ModelError};
    use crate::models::{Job, Mode, ProblemData, Task};
    use crate::testing::{encode, plan_solution};

    /// Two single-mode tasks of length 3 in separate jobs.
    fn pair() -> ProblemData {
        let mut data = ProblemData::new();
        for _ in 0..2 {
            let job = data.add_job(Job::new());
            let t = data.add_task(Task::new(job).optional());
            data.add_mode(Mode::new(t, 3));
        }
        data
    }

    #[test]
    fn test_end_before_start_with_delay() {
        let mut data = pair();
        data.add_end_before_start(0, 1, 2);
        let (model, vars) = encode(&data);

        let ok = plan_solution(&model, &vars, &data, &[Some((0, 0)), Some((1, 5))]);
        assert!(model.check(&ok).is_ok());

        let early = plan_solution(&model, &vars, &data, &[Some((0, 0)), Some((1, 4))]);
        assert!(matches!(
            model.check(&early),
            Err(ModelError::Violated {
                kind: ConstraintKind::Linear,
                ..
            })
        ));
    }

    #[test]
    fn test_precedence_ignored_when_task_absent() {
        let mut data = pair();
        data.add_end_before_start(0, 1, 0);
        let (model, vars) = encode(&data);

        // Task 1 starts before task 0 ends, but task 0 is absent.
        let solution = plan_solution(&model, &vars, &data, &[None, Some((1, 0))]);
        assert!(model.check(&solution).is_ok());
    }

    #[test]
    fn test_all_kinds() {
        let mut data = pair();
        data.add_start_before_start(0, 1, 1);
        data.add_start_before_end(0, 1, 4);
        data.add_end_before_end(0, 1, 0);
        let (model, vars) = encode(&data);

        // s0 = 0, s1 = 1: s0 + 1 <= s1, s0 + 4 <= e1 = 4, e0 = 3 <= e1.
        let ok = plan_solution(&model, &vars, &data, &[Some((0, 0)), Some((1, 1))]);
        assert!(model.check(&ok).is_ok());

        // s1 = 0 breaks start-before-start.
        let bad = plan_solution(&model, &vars, &data, &[Some((0, 0)), Some((1, 0))]);
        assert!(model.check(&bad).is_err());
    }

    #[test]
    fn test_negative_delay_allows_overlap() {
        let mut data = pair();
        data.add_end_before_start(0, 1, -2);
        let (model, vars) = encode(&data);

        let solution = plan_solution(&model, &vars, &data, &[Some((0, 0)), Some((1, 1))]);
        assert!(model.check(&solution).is_ok());
    }
}
