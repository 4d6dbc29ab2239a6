//! Test fixtures: encode an instance and turn a concrete schedule into a
//! full variable assignment.

use crate::config::EncoderConfig;
use crate::cp::{CpModel, IntVar, Solution};
use crate::encoder::{span_var_names, ConstraintEncoder};
use crate::lookup;
use crate::models::ProblemData;
use crate::variables::VariableSet;

pub fn test_config() -> EncoderConfig {
    EncoderConfig::new().with_model_name("test").with_horizon(1_000)
}

/// Builds variables and runs the whole pipeline.
pub fn encode(data: &ProblemData) -> (CpModel, VariableSet) {
    let config = test_config();
    let mut model = CpModel::new(config.model_name.clone());
    let mut vars = VariableSet::build(&mut model, data, &config);
    ConstraintEncoder::new(data, &mut vars, &mut model)
        .with_horizon(config.horizon)
        .encode();
    (model, vars)
}

/// Assignment for a schedule given as `(mode, start)` per task, `None`
/// for absent tasks.
///
/// Unselected modes and absent tasks sit at their domain lower bounds,
/// job spans are the hull of their present tasks, active sequences visit
/// present modes by start time and flow literals are false.
pub fn plan_solution(
    model: &CpModel,
    vars: &VariableSet,
    data: &ProblemData,
    plan: &[Option<(usize, i64)>],
) -> Solution {
    let mut solution = Solution::new(model);
    let lower = |var: IntVar| model.domain(var).map(|d| d.lb).unwrap_or(0);
    let task_modes = lookup::task_modes(data);

    for (t, task_var) in vars.tasks.iter().enumerate() {
        let chosen = plan.get(t).copied().flatten();

        match chosen {
            Some((mode, start)) => {
                let duration = data.modes[mode].duration;
                solution.set(task_var.start, start);
                solution.set(task_var.end, start + duration);
                solution.set(task_var.duration, duration);
                solution.set_bool(task_var.present, true);
            }
            None => {
                solution.set(task_var.start, lower(task_var.start));
                solution.set(task_var.end, lower(task_var.end));
                solution.set(task_var.duration, lower(task_var.duration));
                solution.set_bool(task_var.present, false);
            }
        }

        for &m in &task_modes[t] {
            let mode_var = &vars.modes[m];
            let duration = data.modes[m].duration;
            solution.set(mode_var.duration, duration);
            match chosen {
                Some((mode, start)) if mode == m => {
                    solution.set(mode_var.start, start);
                    solution.set(mode_var.end, start + duration);
                    solution.set_bool(mode_var.present, true);
                }
                _ => {
                    solution.set(mode_var.start, lower(mode_var.start));
                    solution.set(mode_var.end, lower(mode_var.end));
                    solution.set_bool(mode_var.present, false);
                }
            }
        }
    }

    for (j, job) in data.jobs.iter().enumerate() {
        let spans: Vec<(i64, i64)> = job
            .tasks
            .iter()
            .filter_map(|&t| plan.get(t).copied().flatten())
            .map(|(mode, start)| (start, start + data.modes[mode].duration))
            .collect();
        let job_start = spans.iter().map(|s| s.0).min().unwrap_or(0);
        let job_end = spans.iter().map(|s| s.1).max().unwrap_or(0);
        solution.set(vars.jobs[j].start, job_start);
        solution.set(vars.jobs[j].end, job_end);

        for &t in &job.tasks {
            let (start_name, end_name) = span_var_names(j, t);
            let (Some(aux_start), Some(aux_end)) =
                (model.find_var(&start_name), model.find_var(&end_name))
            else {
                continue;
            };
            match plan.get(t).copied().flatten() {
                Some((mode, start)) => {
                    solution.set(aux_start, start);
                    solution.set(aux_end, start + data.modes[mode].duration);
                }
                None => {
                    solution.set(aux_start, job_end);
                    solution.set(aux_end, job_start);
                }
            }
        }
    }

    for seq in vars.sequences.iter().flatten() {
        for (_, _, arc) in seq.arcs() {
            solution.set_bool(arc, false);
        }
        if !seq.is_active() {
            continue;
        }

        let mut present: Vec<(i64, usize)> = Vec::new();
        for (node, &m) in seq.modes.iter().enumerate() {
            match plan.get(data.modes[m].task).copied().flatten() {
                Some((mode, start)) if mode == m => present.push((start, node)),
                _ => {
                    if let Some(arc) = seq.arc(node, node) {
                        solution.set_bool(arc, true);
                    }
                }
            }
        }
        present.sort_unstable();

        let dummy = seq.dummy();
        let mut order = vec![dummy];
        order.extend(present.iter().map(|&(_, node)| node));
        for (k, &from) in order.iter().enumerate() {
            let to = order[(k + 1) % order.len()];
            if let Some(arc) = seq.arc(from, to) {
                solution.set_bool(arc, true);
            }
        }
    }

    for (_, flow) in vars.flows.iter() {
        solution.set_bool(flow, false);
    }

    solution
}
