use std::collections::VecDeque;
use std::fmt::Display;
use std::io::Write;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use wrapdeque::CircularBuffer;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Step {
    PushFront { value: i64 },
    PushBack { value: i64 },
    PopFront,
    PopBack,
    Get { index: usize },
    Clear,
}

impl Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::PushFront { value } => write!(f, "push-front {}", value),
            Step::PushBack { value } => write!(f, "push-back {}", value),
            Step::PopFront => write!(f, "pop-front"),
            Step::PopBack => write!(f, "pop-back"),
            Step::Get { index } => write!(f, "get {}", index),
            Step::Clear => write!(f, "clear"),
        }
    }
}

/// Runs script steps against a buffer and optionally mirrors them on a VecDeque
pub struct Replay {
    buffer: CircularBuffer<i64>,
    reference: Option<VecDeque<i64>>,
    physical: bool,
}

impl Replay {
    pub fn new(cfg: &Config) -> Self {
        Self {
            buffer: CircularBuffer::new(),
            reference: cfg.check.then(VecDeque::new),
            physical: cfg.physical,
        }
    }

    pub fn buffer(&self) -> &CircularBuffer<i64> {
        &self.buffer
    }

    /// Apply a single step. Returns the value the step read or removed.
    pub fn apply(&mut self, step: Step) -> Result<Option<i64>> {
        let produced = match step {
            Step::PushFront { value } => {
                self.buffer.push_front(value);
                None
            }
            Step::PushBack { value } => {
                self.buffer.push_back(value);
                None
            }
            Step::PopFront => Some(self.buffer.try_pop_front()?),
            Step::PopBack => Some(self.buffer.try_pop_back()?),
            Step::Get { index } => Some(*self.buffer.try_get(index)?),
            Step::Clear => {
                self.buffer.clear();
                None
            }
        };
        if let Some(reference) = &mut self.reference {
            Self::mirror(reference, step, produced)?;
            if !self.buffer.iter().eq(reference.iter()) {
                return Err(anyhow!(
                    "contents diverged: buffer [{}], reference {:?}",
                    self.buffer.logical(),
                    reference
                ));
            }
        }
        Ok(produced)
    }

    /// Apply a step to the reference deque and compare the produced value
    fn mirror(reference: &mut VecDeque<i64>, step: Step, produced: Option<i64>) -> Result<()> {
        let expected = match step {
            Step::PushFront { value } => {
                reference.push_front(value);
                None
            }
            Step::PushBack { value } => {
                reference.push_back(value);
                None
            }
            Step::PopFront => reference.pop_front(),
            Step::PopBack => reference.pop_back(),
            Step::Get { index } => reference.get(index).copied(),
            Step::Clear => {
                reference.clear();
                None
            }
        };
        if expected != produced {
            return Err(anyhow!(
                "produced {:?}, reference produced {:?}",
                produced,
                expected
            ));
        }
        Ok(())
    }

    /// Apply all steps, writing one line per step to `out`
    pub fn run(&mut self, steps: &[Step], out: &mut impl Write) -> Result<()> {
        for (n, step) in steps.iter().enumerate() {
            let produced = self
                .apply(*step)
                .with_context(|| format!("step {} ({}) failed", n, step))?;
            self.buffer.trace_state();
            write!(
                out,
                "{:>4}  {:<16} len {:<3} cap {:<3} | {}",
                n,
                step.to_string(),
                self.buffer.len(),
                self.buffer.capacity(),
                self.buffer.logical()
            )?;
            if self.physical {
                write!(out, " | {}", self.buffer.physical())?;
            }
            if let Some(v) = produced {
                write!(out, " -> {}", v)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
