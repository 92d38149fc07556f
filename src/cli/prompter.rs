//! Prompt abstraction used by the step views.
//!
//! Views talk to a [`Prompter`]; the terminal implementation drives
//! `dialoguer` widgets, or replays scripted answers when test mode is on.

use std::ops::{Bound, RangeBounds};

use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};

use crate::cli::test_mode::{self, ScriptedInput};
use crate::errors::AppError;

pub trait Prompter {
    /// Free text. An empty answer falls back to `default` when given.
    fn text(&mut self, label: &str, default: Option<&str>) -> Result<String, AppError>;
    fn confirm(&mut self, label: &str, default: bool) -> Result<bool, AppError>;
    /// Index of the chosen item.
    fn select(&mut self, label: &str, items: &[String], default: usize)
        -> Result<usize, AppError>;
    /// Indexes of the checked items, in item order.
    fn multi_select(
        &mut self,
        label: &str,
        items: &[String],
        checked: &[bool],
    ) -> Result<Vec<usize>, AppError>;
}

/// Whole number prompt that re-asks until the answer parses and falls in `range`.
pub fn number(
    prompter: &mut dyn Prompter,
    label: &str,
    default: u32,
    range: impl RangeBounds<u32>,
) -> Result<u32, AppError> {
    let (low, high) = bounds(&range);
    loop {
        let raw = prompter.text(label, Some(&default.to_string()))?;
        match raw.trim().parse::<u32>() {
            Ok(value) if range.contains(&value) => return Ok(value),
            Ok(_) if high == u32::MAX => {
                crate::cli::output::warning(format!("Enter a number of at least {low}"))
            }
            Ok(_) => crate::cli::output::warning(format!("Enter a number from {low} to {high}")),
            Err(_) => crate::cli::output::warning("Enter a whole number"),
        }
        if test_mode::is_enabled() {
            return Ok(default.clamp(low, high));
        }
    }
}

fn bounds(range: &impl RangeBounds<u32>) -> (u32, u32) {
    let low = match range.start_bound() {
        Bound::Included(value) => *value,
        Bound::Excluded(value) => value.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let high = match range.end_bound() {
        Bound::Included(value) => *value,
        Bound::Excluded(value) => value.saturating_sub(1),
        Bound::Unbounded => u32::MAX,
    };
    (low, high)
}

/// Dialoguer-backed prompter with scripted-input support.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn scripted(&self, label: &str) -> Result<Option<ScriptedInput>, AppError> {
        if !test_mode::is_enabled() {
            return Ok(None);
        }
        match test_mode::next_input(label) {
            Some(input) => {
                println!("{label}: {}", describe(&input));
                Ok(Some(input))
            }
            None => Err(AppError::Prompt(format!(
                "scripted inputs exhausted before `{label}`"
            ))),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn text(&mut self, label: &str, default: Option<&str>) -> Result<String, AppError> {
        if let Some(input) = self.scripted(label)? {
            return Ok(resolve_text(input, default));
        }
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty(true);
        if let Some(default) = default.filter(|value| !value.is_empty()) {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn confirm(&mut self, label: &str, default: bool) -> Result<bool, AppError> {
        if let Some(input) = self.scripted(label)? {
            return resolve_confirm(input, default)
                .ok_or_else(|| AppError::Prompt(format!("`{label}` expects yes or no")));
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(label)
            .default(default)
            .interact()?)
    }

    fn select(
        &mut self,
        label: &str,
        items: &[String],
        default: usize,
    ) -> Result<usize, AppError> {
        if let Some(input) = self.scripted(label)? {
            return resolve_choice(input, items, default)
                .ok_or_else(|| AppError::Prompt(format!("no option of `{label}` matches")));
        }
        Ok(Select::with_theme(&self.theme)
            .with_prompt(label)
            .items(items)
            .default(default)
            .interact()?)
    }

    fn multi_select(
        &mut self,
        label: &str,
        items: &[String],
        checked: &[bool],
    ) -> Result<Vec<usize>, AppError> {
        if let Some(input) = self.scripted(label)? {
            return resolve_many(input, items, checked)
                .ok_or_else(|| AppError::Prompt(format!("no option of `{label}` matches")));
        }
        Ok(MultiSelect::with_theme(&self.theme)
            .with_prompt(label)
            .items(items)
            .defaults(checked)
            .interact()?)
    }
}

fn describe(input: &ScriptedInput) -> &str {
    match input {
        ScriptedInput::Value(value) => value,
        ScriptedInput::Keep => "<keep>",
    }
}

pub(crate) fn resolve_text(input: ScriptedInput, default: Option<&str>) -> String {
    match input {
        ScriptedInput::Value(value) if !value.is_empty() => value,
        _ => default.unwrap_or_default().to_string(),
    }
}

pub(crate) fn resolve_confirm(input: ScriptedInput, default: bool) -> Option<bool> {
    match input {
        ScriptedInput::Keep => Some(default),
        ScriptedInput::Value(value) => match value.to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" => Some(true),
            "n" | "no" | "false" => Some(false),
            "" => Some(default),
            _ => None,
        },
    }
}

/// Matches a token against items: 1-based index, exact label, then prefix.
fn match_item(token: &str, items: &[String]) -> Option<usize> {
    let token = token.trim();
    if let Ok(position) = token.parse::<usize>() {
        return (1..=items.len()).contains(&position).then(|| position - 1);
    }
    let lowered = token.to_lowercase();
    items
        .iter()
        .position(|item| item.to_lowercase() == lowered)
        .or_else(|| {
            items
                .iter()
                .position(|item| item.to_lowercase().starts_with(&lowered))
        })
}

pub(crate) fn resolve_choice(
    input: ScriptedInput,
    items: &[String],
    default: usize,
) -> Option<usize> {
    match input {
        ScriptedInput::Keep => Some(default),
        ScriptedInput::Value(value) if value.is_empty() => Some(default),
        ScriptedInput::Value(value) => match_item(&value, items),
    }
}

/// Comma-separated tokens; `<NONE>` clears every item.
pub(crate) fn resolve_many(
    input: ScriptedInput,
    items: &[String],
    checked: &[bool],
) -> Option<Vec<usize>> {
    let value = match input {
        ScriptedInput::Keep => {
            return Some(
                checked
                    .iter()
                    .enumerate()
                    .filter_map(|(index, on)| on.then_some(index))
                    .collect(),
            )
        }
        ScriptedInput::Value(value) => value,
    };
    if value.is_empty() || value.eq_ignore_ascii_case("<none>") {
        return Some(Vec::new());
    }
    let mut picked = value
        .split(',')
        .map(|token| match_item(token, items))
        .collect::<Option<Vec<_>>>()?;
    picked.sort_unstable();
    picked.dedup();
    Some(picked)
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::VecDeque;

    use super::*;

    /// Prompter fed from a fixed list of tokens, using the scripted rules.
    pub struct MockPrompter {
        inputs: VecDeque<String>,
        pub asked: Vec<String>,
    }

    impl MockPrompter {
        pub fn new(inputs: &[&str]) -> Self {
            Self {
                inputs: inputs.iter().map(|s| s.to_string()).collect(),
                asked: Vec::new(),
            }
        }

        pub fn remaining(&self) -> usize {
            self.inputs.len()
        }

        fn next(&mut self, label: &str) -> Result<ScriptedInput, AppError> {
            self.asked.push(label.to_string());
            let raw = self
                .inputs
                .pop_front()
                .ok_or_else(|| AppError::Prompt(format!("no input left for `{label}`")))?;
            Ok(test_mode::parse_input(&raw))
        }
    }

    impl Prompter for MockPrompter {
        fn text(&mut self, label: &str, default: Option<&str>) -> Result<String, AppError> {
            let input = self.next(label)?;
            Ok(resolve_text(input, default))
        }

        fn confirm(&mut self, label: &str, default: bool) -> Result<bool, AppError> {
            let input = self.next(label)?;
            resolve_confirm(input, default).ok_or_else(|| AppError::Prompt(label.to_string()))
        }

        fn select(
            &mut self,
            label: &str,
            items: &[String],
            default: usize,
        ) -> Result<usize, AppError> {
            let input = self.next(label)?;
            resolve_choice(input, items, default).ok_or_else(|| AppError::Prompt(label.to_string()))
        }

        fn multi_select(
            &mut self,
            label: &str,
            items: &[String],
            checked: &[bool],
        ) -> Result<Vec<usize>, AppError> {
            let input = self.next(label)?;
            resolve_many(input, items, checked).ok_or_else(|| AppError::Prompt(label.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<String> {
        vec!["Next".into(), "Back".into(), "Save and exit".into()]
    }

    #[test]
    fn choice_matches_index_label_and_prefix() {
        let items = items();
        assert_eq!(resolve_choice(ScriptedInput::Value("2".into()), &items, 0), Some(1));
        assert_eq!(resolve_choice(ScriptedInput::Value("back".into()), &items, 0), Some(1));
        assert_eq!(resolve_choice(ScriptedInput::Value("save".into()), &items, 0), Some(2));
        assert_eq!(resolve_choice(ScriptedInput::Value("9".into()), &items, 0), None);
        assert_eq!(resolve_choice(ScriptedInput::Keep, &items, 2), Some(2));
    }

    #[test]
    fn many_accepts_lists_and_none() {
        let items = items();
        assert_eq!(
            resolve_many(ScriptedInput::Value("Back, 1".into()), &items, &[false; 3]),
            Some(vec![0, 1])
        );
        assert_eq!(
            resolve_many(ScriptedInput::Value("<NONE>".into()), &items, &[true; 3]),
            Some(vec![])
        );
        assert_eq!(
            resolve_many(ScriptedInput::Keep, &items, &[true, false, true]),
            Some(vec![0, 2])
        );
    }

    #[test]
    fn number_rejects_values_outside_the_range() {
        let mut prompter = mock::MockPrompter::new(&["4000000000", "abc", "3"]);
        let value = number(&mut prompter, "Number of children", 0, 0..=20).expect("number");
        assert_eq!(value, 3);
        assert_eq!(prompter.asked.len(), 3);

        let mut prompter = mock::MockPrompter::new(&["0", "<KEEP>"]);
        assert_eq!(number(&mut prompter, "Number of nights", 3, 1..).expect("number"), 3);
    }

    #[test]
    fn bounds_cover_open_and_closed_ranges() {
        assert_eq!(bounds(&(1..)), (1, u32::MAX));
        assert_eq!(bounds(&(0..=20)), (0, 20));
        assert_eq!(bounds(&(2..5)), (2, 4));
    }

    #[test]
    fn text_and_confirm_fall_back_to_defaults() {
        assert_eq!(resolve_text(ScriptedInput::Keep, Some("Jane")), "Jane");
        assert_eq!(resolve_text(ScriptedInput::Value(String::new()), None), "");
        assert_eq!(resolve_confirm(ScriptedInput::Value("Y".into()), false), Some(true));
        assert_eq!(resolve_confirm(ScriptedInput::Value("maybe".into()), false), None);
    }
}
