//! Inline terminal prompts on crossterm key events.
//!
//! Prompts render below the cursor instead of taking over the screen, so the
//! wizard's transcript stays in the scrollback.

use std::fmt::Display;
use std::io::{self, Stdout, Write};

use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};

use menu_core::prompt::{filter_options, Notice, PromptError, Prompter, SelectOption};

use crate::theme::Theme;
use crate::widgets::ListCursor;

/// Raw mode for the lifetime of the guard.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Next key press. Esc and Ctrl-C interrupt the prompt.
fn next_key() -> Result<KeyEvent, PromptError> {
    loop {
        if let Event::Key(key) = event::read()? {
            // Only handle key press events (not release)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
            if key.code == KeyCode::Esc || ctrl_c {
                return Err(PromptError::Interrupted);
            }
            return Ok(key);
        }
    }
}

fn is_plain_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => Some(c),
        _ => None,
    }
}

pub struct TerminalPrompter {
    out: Stdout,
    theme: Theme,
    /// Lines of the frame currently being redrawn.
    drawn: u16,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            theme: Theme::default(),
            drawn: 0,
        }
    }

    /// Replaces the current frame with `lines`.
    fn redraw(&mut self, lines: &[String]) -> io::Result<()> {
        if self.drawn > 0 {
            queue!(self.out, MoveUp(self.drawn))?;
        }
        queue!(self.out, MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
        for line in lines {
            queue!(self.out, Print(line), Print("\r\n"))?;
        }
        self.drawn = lines.len() as u16;
        self.out.flush()
    }

    /// Collapses the frame into a single answered line.
    fn settle(&mut self, label: &str, answer: impl Display) -> io::Result<()> {
        let line = format!(
            "{} {} {}",
            self.theme.success.apply("✔"),
            self.theme.title.apply(label),
            self.theme.muted.apply(answer)
        );
        self.redraw(&[line])?;
        self.drawn = 0;
        Ok(())
    }

    fn question(&self, label: &str) -> String {
        format!("{} {}", self.theme.key_hint.apply("?"), self.theme.title.apply(label))
    }

    fn option_lines(
        &self,
        options: &[(usize, &SelectOption)],
        cursor: &ListCursor,
    ) -> Vec<String> {
        let range = cursor.visible(options.len());
        let mut lines = Vec::with_capacity(range.len() + 1);
        for position in range {
            let (_, option) = options[position];
            if position == cursor.index() {
                lines.push(format!("  {}", self.theme.selected.apply(format!("› {}", option.label))));
            } else {
                lines.push(format!("    {}", self.theme.normal.apply(&option.label)));
            }
        }
        if options.len() > lines.len() {
            lines.push(format!(
                "  {}",
                self.theme.muted.apply(format!("({} of {})", cursor.index() + 1, options.len()))
            ));
        }
        lines
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn text(&mut self, label: &str, default: Option<&str>) -> Result<String, PromptError> {
        let _raw = RawMode::enable()?;
        let hint = match default {
            Some(value) if !value.is_empty() => format!(" {}", self.theme.muted.apply(format!("[{}]", value))),
            _ => String::new(),
        };
        let mut input = String::new();

        loop {
            let line = format!("{}{} {}", self.question(label), hint, input);
            self.redraw(&[line])?;

            let key = next_key()?;
            match key.code {
                KeyCode::Enter => break,
                KeyCode::Backspace => {
                    input.pop();
                }
                _ => {
                    if let Some(c) = is_plain_char(&key) {
                        input.push(c);
                    }
                }
            }
        }

        let answer = if input.is_empty() {
            default.unwrap_or_default().to_string()
        } else {
            input
        };
        self.settle(label, &answer)?;
        Ok(answer)
    }

    fn confirm(&mut self, label: &str, default: bool) -> Result<bool, PromptError> {
        let _raw = RawMode::enable()?;
        let hint = if default { "(Y/n)" } else { "(y/N)" };
        let line = format!("{} {}", self.question(label), self.theme.muted.apply(hint));
        self.redraw(&[line])?;

        let answer = loop {
            match next_key()?.code {
                KeyCode::Enter => break default,
                KeyCode::Char('y') | KeyCode::Char('Y') => break true,
                KeyCode::Char('n') | KeyCode::Char('N') => break false,
                _ => {}
            }
        };

        self.settle(label, if answer { "Yes" } else { "No" })?;
        Ok(answer)
    }

    fn select(&mut self, label: &str, options: &[SelectOption]) -> Result<usize, PromptError> {
        let _raw = RawMode::enable()?;
        let all: Vec<(usize, &SelectOption)> = options.iter().enumerate().collect();
        let mut cursor = ListCursor::new(all.len());

        loop {
            let mut lines = vec![self.question(label)];
            lines.extend(self.option_lines(&all, &cursor));
            self.redraw(&lines)?;

            match next_key()?.code {
                KeyCode::Up | KeyCode::Char('k') => cursor.up(),
                KeyCode::Down | KeyCode::Char('j') => cursor.down(all.len()),
                KeyCode::Enter if !all.is_empty() => break,
                _ => {}
            }
        }

        let index = cursor.index();
        self.settle(label, &options[index].label)?;
        Ok(index)
    }

    fn search(
        &mut self,
        label: &str,
        options: &[SelectOption],
        scroll: usize,
    ) -> Result<usize, PromptError> {
        let _raw = RawMode::enable()?;
        let mut query = String::new();
        let mut cursor = ListCursor::new(scroll);

        let chosen = loop {
            let hits = filter_options(options, &query);
            cursor.clamp(hits.len());

            let mut lines = vec![format!("{} {}", self.question(label), query)];
            if hits.is_empty() {
                lines.push(format!("  {}", self.theme.muted.apply("No results.")));
            } else {
                lines.extend(self.option_lines(&hits, &cursor));
            }
            self.redraw(&lines)?;

            let key = next_key()?;
            match key.code {
                KeyCode::Up => cursor.up(),
                KeyCode::Down => cursor.down(hits.len()),
                KeyCode::Enter => {
                    if let Some((index, _)) = hits.get(cursor.index()) {
                        break *index;
                    }
                }
                KeyCode::Backspace => {
                    query.pop();
                    cursor.reset();
                }
                _ => {
                    if let Some(c) = is_plain_char(&key) {
                        query.push(c);
                        cursor.reset();
                    }
                }
            }
        };

        self.settle(label, &options[chosen].label)?;
        Ok(chosen)
    }

    fn notify(&mut self, notice: Notice, message: &str) {
        let line = match notice {
            Notice::Info => format!("{}", self.theme.success.apply(message)),
            Notice::Line => message.to_string(),
            Notice::Warning => format!("{}", self.theme.warning.apply(message)),
            Notice::Error => format!("{}", self.theme.danger.apply(message)),
        };
        let _ = execute!(self.out, MoveToColumn(0), Print(line), Print("\r\n"));
        self.drawn = 0;
    }
}
