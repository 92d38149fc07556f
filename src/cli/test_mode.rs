//! Scripted prompt answers for non-interactive runs.
//!
//! When `SAFARI_KYC_TEST_INPUTS` is set, every prompt pops the next answer
//! from a `|`-separated queue instead of reading the terminal. Tokens:
//! `<BLANK>` answers with an empty string, `<KEEP>` accepts the default.

use once_cell::sync::Lazy;
use std::{collections::VecDeque, env, sync::Mutex};

pub const TEST_INPUTS_ENV: &str = "SAFARI_KYC_TEST_INPUTS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedInput {
    Value(String),
    Keep,
}

struct InputQueue {
    enabled: bool,
    inputs: VecDeque<ScriptedInput>,
}

impl InputQueue {
    fn from_env() -> Self {
        match env::var(TEST_INPUTS_ENV) {
            Ok(raw) => Self {
                enabled: true,
                inputs: parse_inputs(&raw),
            },
            Err(_) => Self {
                enabled: false,
                inputs: VecDeque::new(),
            },
        }
    }
}

static INPUTS: Lazy<Mutex<InputQueue>> = Lazy::new(|| Mutex::new(InputQueue::from_env()));

pub fn is_enabled() -> bool {
    INPUTS.lock().map(|queue| queue.enabled).unwrap_or(false)
}

/// Next scripted answer. `None` when scripting is off or the queue is empty.
pub fn next_input(label: &str) -> Option<ScriptedInput> {
    let mut queue = INPUTS.lock().ok()?;
    if !queue.enabled {
        return None;
    }
    let next = queue.inputs.pop_front();
    if next.is_none() {
        tracing::warn!(prompt = label, "Scripted inputs exhausted");
    }
    next
}

pub(crate) fn parse_input(token: &str) -> ScriptedInput {
    match token.trim().to_ascii_uppercase().as_str() {
        "<KEEP>" => ScriptedInput::Keep,
        "<BLANK>" | "<EMPTY>" => ScriptedInput::Value(String::new()),
        _ => ScriptedInput::Value(token.trim().to_string()),
    }
}

fn parse_inputs(raw: &str) -> VecDeque<ScriptedInput> {
    raw.split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_input)
        .collect()
}
