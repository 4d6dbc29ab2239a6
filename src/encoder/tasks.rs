//! Job spans and mode selection.

use crate::cp::{Constraint, LinearExpr, ModelSink};
use crate::lookup;

use super::{span_var_names, ConstraintEncoder};

impl<S: ModelSink> ConstraintEncoder<'_, S> {
    /// `job.start == min(starts)` and `job.end == max(ends)` over the
    /// job's tasks.
    ///
    /// Optional tasks enter through an auxiliary pair that copies the
    /// task's times while it is present and collapses onto the job's
    /// own span while it is absent, so absent tasks never stretch the job.
    pub(super) fn job_spans(&mut self) {
        for (j, job) in self.data.jobs.iter().enumerate() {
            if job.tasks.is_empty() {
                continue;
            }

            let job_var = self.vars.jobs[j];
            let mut starts = Vec::with_capacity(job.tasks.len());
            let mut ends = Vec::with_capacity(job.tasks.len());

            for &t in &job.tasks {
                let task_var = self.vars.tasks[t];
                if !self.data.tasks[t].optional {
                    starts.push(task_var.start);
                    ends.push(task_var.end);
                    continue;
                }

                let (start_name, end_name) = span_var_names(j, t);
                let aux_start = self.sink.new_int_var(0, self.horizon, start_name);
                let aux_end = self.sink.new_int_var(0, self.horizon, end_name);
                let present = task_var.present.literal();

                self.sink
                    .add_if(Constraint::eq(aux_start, task_var.start), [present]);
                self.sink
                    .add_if(Constraint::eq(aux_end, task_var.end), [present]);
                self.sink
                    .add_if(Constraint::eq(aux_start, job_var.end), [!present]);
                self.sink
                    .add_if(Constraint::eq(aux_end, job_var.start), [!present]);

                starts.push(aux_start);
                ends.push(aux_end);
            }

            self.sink.add(Constraint::MinEquality {
                target: job_var.start,
                vars: starts,
            });
            self.sink.add(Constraint::MaxEquality {
                target: job_var.end,
                vars: ends,
            });
        }
    }

    /// Exactly one mode per present task, none per absent task, and the
    /// selected mode's times are the task's times.
    pub(super) fn mode_selection(&mut self) {
        for (t, modes) in lookup::task_modes(self.data).iter().enumerate() {
            let task_var = self.vars.tasks[t];
            let presences = modes.iter().map(|&m| self.vars.modes[m].present);
            self.sink
                .add(Constraint::eq(LinearExpr::sum(presences), task_var.present));

            for &m in modes {
                let mode_var = self.vars.modes[m];
                let both = [task_var.present, mode_var.present];

                self.sink
                    .add_if(Constraint::eq(task_var.start, mode_var.start), both);
                self.sink
                    .add_if(Constraint::eq(task_var.duration, mode_var.duration), both);
                self.sink
                    .add_if(Constraint::eq(task_var.end, mode_var.end), both);
            }
        }
    }
}
