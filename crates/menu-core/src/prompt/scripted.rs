//! Prompter that replays canned answers, for tests.

use std::collections::VecDeque;

use super::{filter_options, Notice, PromptError, Prompter, SelectOption};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Confirm(bool),
    /// Index into the offered options.
    Select(usize),
    /// Types `query`, then picks the `pick`-th remaining option.
    Search { query: String, pick: usize },
    /// Operator pressed Esc / Ctrl-C.
    Interrupt,
}

impl Answer {
    pub fn text(value: &str) -> Self {
        Answer::Text(value.to_string())
    }

    pub fn search(query: &str, pick: usize) -> Self {
        Answer::Search { query: query.to_string(), pick }
    }
}

#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    /// Every notice shown, in order.
    pub notices: Vec<(Notice, String)>,
    /// Labels of the options that remained after each search query.
    pub searches: Vec<Vec<String>>,
    /// Labels offered by each select prompt.
    pub selects: Vec<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self { answers: answers.into(), ..Self::default() }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn messages(&self, notice: Notice) -> Vec<&str> {
        self.notices
            .iter()
            .filter(|(kind, _)| *kind == notice)
            .map(|(_, message)| message.as_str())
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.messages(Notice::Error)
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.messages(Notice::Warning)
    }

    fn next(&mut self, label: &str) -> Result<Answer, PromptError> {
        match self.answers.pop_front() {
            Some(Answer::Interrupt) => Err(PromptError::Interrupted),
            Some(answer) => Ok(answer),
            None => panic!("script exhausted at prompt '{}'", label),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&mut self, label: &str, default: Option<&str>) -> Result<String, PromptError> {
        match self.next(label)? {
            Answer::Text(value) if value.is_empty() => Ok(default.unwrap_or_default().to_string()),
            Answer::Text(value) => Ok(value),
            other => panic!("prompt '{}' expected text, script has {:?}", label, other),
        }
    }

    fn confirm(&mut self, label: &str, default: bool) -> Result<bool, PromptError> {
        match self.next(label)? {
            Answer::Confirm(value) => Ok(value),
            Answer::Text(value) if value.is_empty() => Ok(default),
            other => panic!("prompt '{}' expected confirm, script has {:?}", label, other),
        }
    }

    fn select(&mut self, label: &str, options: &[SelectOption]) -> Result<usize, PromptError> {
        self.selects.push(options.iter().map(|o| o.label.clone()).collect());
        match self.next(label)? {
            Answer::Select(index) if index < options.len() => Ok(index),
            other => panic!("prompt '{}' cannot answer {:?} from {} options", label, other, options.len()),
        }
    }

    fn search(
        &mut self,
        label: &str,
        options: &[SelectOption],
        _scroll: usize,
    ) -> Result<usize, PromptError> {
        match self.next(label)? {
            Answer::Search { query, pick } => {
                let hits = filter_options(options, &query);
                self.searches.push(hits.iter().map(|(_, o)| o.label.clone()).collect());
                match hits.get(pick) {
                    Some((index, _)) => Ok(*index),
                    None => panic!("prompt '{}' has no result {} for query '{}'", label, pick, query),
                }
            }
            other => panic!("prompt '{}' expected search, script has {:?}", label, other),
        }
    }

    fn notify(&mut self, notice: Notice, message: &str) {
        self.notices.push((notice, message.to_string()));
    }
}
