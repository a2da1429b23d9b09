// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Flowchart transpiler.
//!
//! Turns a [`FlowchartProgram`] into a Java method body and wraps it in a
//! service class.
//!
//! # Modes
//!
//! | Mode | Branch indices | Output |
//! |------|----------------|--------|
//! | [`FlowchartMode::Linear`] | ignored | one comment (+ code) per step, array order |
//! | [`FlowchartMode::Structured`] | followed | `if`/`else`, `while`, `do`/`while` |
//!
//! # Structured Recovery
//!
//! Successors are `trueNext`/`falseNext` for a DECISION (absent means the
//! next index), the next index for START and PROCESS, and nothing for END.
//! Indices outside the step list end the path.
//!
//! - A START/PROCESS step that a later DECISION jumps back to opens a
//!   `do { ... } while (cond);` closed by that DECISION.
//! - A DECISION with exactly one branch leading back to itself becomes
//!   `while (cond)` (or `while (!(cond))`) and continues on the other branch.
//! - Any other DECISION becomes `if`/`else`; both branches run up to their
//!   nearest common successor, where emission continues.
//! - A jump to a step already emitted on the current path becomes
//!   `// continue at step N`.

use std::{collections::VecDeque, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::java::{javadoc, package_decl, string_literal};
use crate::model::{FlowchartProgram, Step, StepKind};

/// Nesting depth after which structured recovery stops descending.
const MAX_DEPTH: usize = 32;

/// How branch indices are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowchartMode {
    /// Steps in array order; branch indices ignored.
    #[default]
    Linear,
    /// Control flow recovered from branch indices.
    Structured
}

impl FromStr for FlowchartMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "structured" => Ok(Self::Structured),
            other => Err(format!("unknown flowchart mode: {other}"))
        }
    }
}

impl fmt::Display for FlowchartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Linear => "linear",
            Self::Structured => "structured"
        })
    }
}

/// Transpile a flowchart into a method body.
///
/// Lines carry no base indentation; nested blocks are indented by four
/// spaces.
///
/// # Examples
///
/// ```
/// use blueprint_forge::{
///     generator::{FlowchartMode, transpile},
///     model::{FlowchartProgram, Step, StepKind}
/// };
///
/// let mut init = Step::new(StepKind::Process, "Init");
/// init.code = Some("x = 0;".into());
/// let program = FlowchartProgram {
///     steps: vec![Step::new(StepKind::Start, "Begin"), init],
///     ..FlowchartProgram::default()
/// };
///
/// assert_eq!(
///     transpile(&program, FlowchartMode::Linear),
///     "// Begin\n// Init\nx = 0;\n"
/// );
/// ```
#[must_use]
pub fn transpile(program: &FlowchartProgram, mode: FlowchartMode) -> String {
    match mode {
        FlowchartMode::Linear => linear(&program.steps),
        FlowchartMode::Structured => {
            let mut structurer = Structurer::new(&program.steps);
            if !program.steps.is_empty() {
                structurer.walk(Some(0), &[], 0);
            }
            structurer.out
        }
    }
}

/// Generate the flowchart service class.
#[must_use]
pub fn generate_service(base_package: &str, program: &FlowchartProgram, mode: FlowchartMode) -> String {
    let description = program
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(&program.method_name);
    let message = string_literal(description);

    let mut out = package_decl(base_package, "service");
    out.push_str("import lombok.extern.slf4j.Slf4j;\n");
    out.push_str("import org.springframework.stereotype.Service;\n\n");
    javadoc(
        &mut out,
        "",
        &format!("{description}\nGenerated from flowchart diagram")
    );
    out.push_str("@Slf4j\n@Service\n");
    out.push_str(&format!("public class {} {{\n\n", program.service_name));
    javadoc(&mut out, "    ", "Execute the flowchart logic");
    out.push_str(&format!("    public void {}() {{\n", program.method_name));
    out.push_str(&format!("        log.info(\"Starting: {message}\");\n\n"));

    for line in transpile(program, mode).lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str(&format!("        {line}\n"));
        }
    }

    out.push_str(&format!("\n        log.info(\"Completed: {message}\");\n"));
    out.push_str("    }\n}\n");
    out
}

fn linear(steps: &[Step]) -> String {
    let mut out = String::new();
    for step in steps {
        push_comment(&mut out, "", step);
        push_code(&mut out, "", step);
    }
    out
}

fn push_comment(out: &mut String, indent: &str, step: &Step) {
    for line in step.label().lines() {
        out.push_str(&format!("{indent}// {}\n", line.trim()));
    }
}

fn push_code(out: &mut String, indent: &str, step: &Step) {
    if let Some(code) = &step.code {
        for line in code.lines().map(str::trim_end).filter(|l| !l.trim().is_empty()) {
            out.push_str(&format!("{indent}{}\n", line.trim_start()));
        }
    }
}

fn condition(step: &Step) -> &str {
    step.condition
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("true")
}

struct Structurer<'a> {
    steps:   &'a [Step],
    out:     String,
    /// Steps emitted on the current path.
    path:    Vec<usize>,
    /// Steps currently open as `do` loop headers.
    headers: Vec<usize>
}

impl<'a> Structurer<'a> {
    fn new(steps: &'a [Step]) -> Self {
        Self {
            steps,
            out: String::new(),
            path: Vec::new(),
            headers: Vec::new()
        }
    }

    fn in_range(&self, index: usize) -> Option<usize> {
        (index < self.steps.len()).then_some(index)
    }

    fn next(&self, index: usize) -> Option<usize> {
        self.in_range(index + 1)
    }

    fn branch(&self, target: Option<usize>, index: usize) -> Option<usize> {
        match target {
            Some(target) => self.in_range(target),
            None => self.next(index)
        }
    }

    fn branches(&self, index: usize) -> (Option<usize>, Option<usize>) {
        let step = &self.steps[index];
        (
            self.branch(step.true_next, index),
            self.branch(step.false_next, index)
        )
    }

    fn successors(&self, index: usize) -> Vec<usize> {
        match self.steps[index].kind {
            StepKind::Start | StepKind::Process => self.next(index).into_iter().collect(),
            StepKind::End => Vec::new(),
            StepKind::Decision => {
                let (t, f) = self.branches(index);
                t.into_iter().chain(f).collect()
            }
        }
    }

    /// Steps reachable from `from` in breadth-first order, never entering a
    /// step in `stops`.
    fn reachable(&self, from: impl IntoIterator<Item = usize>, stops: &[usize]) -> Vec<usize> {
        let mut order = Vec::new();
        let mut queue: VecDeque<usize> = from.into_iter().collect();
        while let Some(index) = queue.pop_front() {
            if stops.contains(&index) || order.contains(&index) {
                continue;
            }
            order.push(index);
            queue.extend(self.successors(index));
        }
        order
    }

    fn reaches(&self, from: Option<usize>, target: usize, stops: &[usize]) -> bool {
        self.reachable(from, stops).contains(&target)
    }

    fn common_successor(&self, a: Option<usize>, b: Option<usize>, stops: &[usize]) -> Option<usize> {
        if a == b {
            return a;
        }
        let from_b = self.reachable(b, stops);
        self.reachable(a, stops)
            .into_iter()
            .find(|index| from_b.contains(index))
    }

    /// A later DECISION with exactly one branch back to `header`.
    fn latch(&self, header: usize, stops: &[usize]) -> Option<usize> {
        self.reachable(self.successors(header), stops)
            .into_iter()
            .filter(|&index| index != header && !self.path.contains(&index))
            .find(|&index| {
                if self.steps[index].kind != StepKind::Decision {
                    return false;
                }
                let (t, f) = self.branches(index);
                (t == Some(header)) != (f == Some(header))
            })
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str("    ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn walk(&mut self, start: Option<usize>, stops: &[usize], depth: usize) {
        let mark = self.path.len();
        let mut current = start;

        while let Some(index) = current {
            if stops.contains(&index) {
                break;
            }
            if self.path.contains(&index) {
                self.line(depth, &format!("// continue at step {index}"));
                break;
            }
            if depth > MAX_DEPTH {
                self.line(depth, &format!("// nesting limit reached at step {index}"));
                break;
            }

            let steps = self.steps;
            let step = &steps[index];
            if step.kind != StepKind::Decision
                && !self.headers.contains(&index)
                && let Some(latch) = self.latch(index, stops)
            {
                current = self.do_while(index, latch, stops, depth);
                continue;
            }

            self.path.push(index);
            let indent = "    ".repeat(depth);
            push_comment(&mut self.out, &indent, step);
            current = match step.kind {
                StepKind::Start | StepKind::Process => {
                    push_code(&mut self.out, &indent, step);
                    self.next(index)
                }
                StepKind::End => {
                    push_code(&mut self.out, &indent, step);
                    None
                }
                StepKind::Decision => self.decision(index, stops, depth)
            };
        }

        self.path.truncate(mark);
    }

    fn do_while(&mut self, header: usize, latch: usize, stops: &[usize], depth: usize) -> Option<usize> {
        let mut inner = stops.to_vec();
        inner.push(latch);

        self.line(depth, "do {");
        self.headers.push(header);
        self.walk(Some(header), &inner, depth + 1);
        self.headers.pop();

        let steps = self.steps;
        let step = &steps[latch];
        push_comment(&mut self.out, &"    ".repeat(depth + 1), step);
        let cond = condition(step);
        let (t, f) = self.branches(latch);
        let (test, exit) = if t == Some(header) {
            (cond.to_string(), f)
        } else {
            (format!("!({cond})"), t)
        };
        self.line(depth, &format!("}} while ({test});"));

        self.path.push(header);
        self.path.push(latch);
        exit
    }

    fn decision(&mut self, index: usize, stops: &[usize], depth: usize) -> Option<usize> {
        let cond = condition(&self.steps[index]).to_string();
        let (t, f) = self.branches(index);
        let true_loops = self.reaches(t, index, stops);
        let false_loops = self.reaches(f, index, stops);

        let mut inner = stops.to_vec();
        inner.push(index);

        match (true_loops, false_loops) {
            (true, false) => {
                self.line(depth, &format!("while ({cond}) {{"));
                self.walk(t, &inner, depth + 1);
                self.line(depth, "}");
                f
            }
            (false, true) => {
                self.line(depth, &format!("while (!({cond})) {{"));
                self.walk(f, &inner, depth + 1);
                self.line(depth, "}");
                t
            }
            _ => {
                let join = self.common_successor(t, f, stops);
                let mut inner = stops.to_vec();
                inner.extend(join);

                let empty = |branch: Option<usize>| {
                    branch.is_none_or(|b| Some(b) == join || stops.contains(&b))
                };
                let true_empty = empty(t);
                let false_empty = empty(f);
                match (true_empty, false_empty) {
                    (false, false) => {
                        self.line(depth, &format!("if ({cond}) {{"));
                        self.walk(t, &inner, depth + 1);
                        self.line(depth, "} else {");
                        self.walk(f, &inner, depth + 1);
                        self.line(depth, "}");
                    }
                    (false, true) => {
                        self.line(depth, &format!("if ({cond}) {{"));
                        self.walk(t, &inner, depth + 1);
                        self.line(depth, "}");
                    }
                    (true, false) => {
                        self.line(depth, &format!("if (!({cond})) {{"));
                        self.walk(f, &inner, depth + 1);
                        self.line(depth, "}");
                    }
                    (true, true) => {}
                }
                join
            }
        }
    }
}
