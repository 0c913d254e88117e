//! Scripted runner for tests
//!
//! Rules match on an argv prefix. Each rule holds a queue of responses;
//! the last response repeats once the queue is down to one entry. Commands
//! that match no rule behave like a program missing from the host.

use crate::error::{Error, Result};
use crate::runner::CommandRunner;
use crate::types::{CommandOutput, CommandSpec};
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug)]
struct Rule {
    prefix: Vec<String>,
    responses: VecDeque<CommandOutput>,
}

impl Rule {
    fn matches(&self, cmd: &CommandSpec) -> bool {
        let prefix: Vec<&str> = self.prefix.iter().map(String::as_str).collect();
        cmd.starts_with(&prefix)
    }

    fn next(&mut self) -> CommandOutput {
        if self.responses.len() > 1 {
            self.responses.pop_front().unwrap_or_default()
        } else {
            self.responses.front().cloned().unwrap_or_default()
        }
    }
}

/// Mock runner with scripted responses and a call log.
#[derive(Debug, Default)]
pub struct MockRunner {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl MockRunner {
    /// Create a runner with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every command starting with `prefix` with `output`.
    ///
    /// Rules are tried in insertion order; the first match wins.
    pub fn on(&self, prefix: &[&str], output: CommandOutput) -> &Self {
        self.on_seq(prefix, vec![output])
    }

    /// Answer successive matching commands with `outputs` in order.
    pub fn on_seq(&self, prefix: &[&str], outputs: Vec<CommandOutput>) -> &Self {
        lock(&self.rules).push(Rule {
            prefix: prefix.iter().map(|s| (*s).to_string()).collect(),
            responses: outputs.into(),
        });
        self
    }

    /// Every command run so far.
    pub fn calls(&self) -> Vec<CommandSpec> {
        lock(&self.calls).clone()
    }

    /// Every command run so far, rendered as command lines.
    pub fn call_lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }

    /// Number of commands run whose argv starts with `prefix`.
    pub fn count(&self, prefix: &[&str]) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    /// Forget the call log, keeping the rules.
    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput> {
        lock(&self.calls).push(cmd.clone());

        let mut rules = lock(&self.rules);
        match rules.iter_mut().find(|r| r.matches(cmd)) {
            Some(rule) => Ok(rule.next()),
            None => Err(Error::NotFound {
                program: cmd.program.clone(),
            }),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
