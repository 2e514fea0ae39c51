//! Interactive session.
//!
//! The shell keeps one [`PagesApi`] session alive across inputs, so it exercises
//! the full state machine: the active page, the search keyword, the results
//! cursor. Plain lines are appended to the active page; `:`-prefixed lines are
//! commands.

use super::print::{print_editor, print_messages, print_pages, print_results};
use pagepad::api::{CmdMessage, CmdResult, PagesApi};
use pagepad::error::{PageError, Result};
use pagepad::store::StorageBackend;
use std::io::{BufRead, Write};

const HELP: &str = "\
Lines without a leading ':' are appended to the active page.

  :add            add a page and open it
  :delete         delete the active page (asks first)
  :open <id>      open a page, e.g. :open page-2
  :search <kw>    filter pages by keyword (empty clears)
  :up / :down     move the result cursor
  :enter          open the highlighted result, or search again
  :set <text>     replace the active page's body
  :list           show the page list
  :show           show the active page
  :help           this text
  :quit           leave";

#[derive(Debug, PartialEq, Eq)]
enum ShellInput {
    Append(String),
    Add,
    Delete,
    Open(String),
    Search(String),
    Up,
    Down,
    Enter,
    Set(String),
    List,
    Show,
    Help,
    Quit,
    Unknown(String),
}

fn parse_line(line: &str) -> ShellInput {
    let Some(command) = line.strip_prefix(':') else {
        return ShellInput::Append(line.to_string());
    };
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };
    match name {
        "add" | "a" => ShellInput::Add,
        "delete" | "rm" => ShellInput::Delete,
        "open" | "o" => ShellInput::Open(arg.to_string()),
        "search" | "s" => ShellInput::Search(arg.to_string()),
        "up" | "k" => ShellInput::Up,
        "down" | "j" => ShellInput::Down,
        "enter" | "e" => ShellInput::Enter,
        "set" => ShellInput::Set(arg.to_string()),
        "list" | "ls" => ShellInput::List,
        "show" => ShellInput::Show,
        "help" | "h" | "?" => ShellInput::Help,
        "quit" | "q" | "exit" => ShellInput::Quit,
        other => ShellInput::Unknown(other.to_string()),
    }
}

pub(super) struct Shell<'a, B: StorageBackend> {
    api: &'a mut PagesApi<B>,
    confirm_delete: bool,
    /// What the search box holds; cleared whenever a page is opened.
    keyword: String,
}

impl<'a, B: StorageBackend> Shell<'a, B> {
    pub(super) fn new(api: &'a mut PagesApi<B>, confirm_delete: bool) -> Self {
        Self {
            api,
            confirm_delete,
            keyword: String::new(),
        }
    }

    pub(super) fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        let mut lines = input.lines();
        let first = self.api.refresh()?;
        render(out, &first)?;
        writeln!(out, "Type :help for commands.")?;

        loop {
            write!(out, "[{}]> ", self.api.session().active())?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                return Ok(());
            };
            let line = line?;

            let result = match parse_line(&line) {
                ShellInput::Quit => return Ok(()),
                ShellInput::Help => {
                    writeln!(out, "{}", HELP)?;
                    continue;
                }
                ShellInput::Unknown(name) => {
                    print_messages(out, &[CmdMessage::warning(format!("Unknown command: :{}", name))])?;
                    continue;
                }
                ShellInput::Delete => {
                    let confirmed = if self.confirm_delete {
                        write!(out, "Delete \"{}\"? [y/N] ", self.api.active_title()?)?;
                        out.flush()?;
                        let answer = lines.next().transpose()?.unwrap_or_default();
                        matches!(answer.trim(), "y" | "Y" | "yes")
                    } else {
                        true
                    };
                    self.dispatch(ShellInput::Delete, confirmed)
                }
                other => self.dispatch(other, true),
            };

            match result {
                Ok(result) => render(out, &result)?,
                Err(PageError::ReadOnly) => print_messages(
                    out,
                    &[CmdMessage::warning(
                        "Nothing to edit: the search matched no pages. Clear it with :search",
                    )],
                )?,
                Err(e @ (PageError::InvalidPageId(_) | PageError::PageNotFound(_))) => {
                    print_messages(out, &[CmdMessage::error(e.to_string())])?
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn dispatch(&mut self, input: ShellInput, confirmed: bool) -> Result<CmdResult> {
        match input {
            ShellInput::Append(line) => {
                let buffer = self.api.session().buffer();
                let text = if buffer.is_empty() {
                    line
                } else if buffer.ends_with('\n') {
                    format!("{}{}", buffer, line)
                } else {
                    format!("{}\n{}", buffer, line)
                };
                self.api.edit(text)
            }
            ShellInput::Set(text) => self.api.edit(text),
            ShellInput::Add => {
                self.keyword.clear();
                self.api.add_page()
            }
            ShellInput::Delete => {
                if confirmed {
                    self.keyword.clear();
                }
                self.api.delete_page(confirmed)
            }
            ShellInput::Open(id) => {
                let result = self.api.switch_page(&id)?;
                self.keyword.clear();
                Ok(result)
            }
            ShellInput::Search(keyword) => {
                self.keyword = keyword;
                self.api.search(&self.keyword)
            }
            ShellInput::Up => self.api.move_selection(-1),
            ShellInput::Down => self.api.move_selection(1),
            ShellInput::Enter => {
                let result = self.api.activate_selection(&self.keyword)?;
                if self.api.session().search().is_idle() {
                    self.keyword.clear();
                }
                Ok(result)
            }
            ShellInput::List => {
                let mut result = self.api.refresh()?;
                result.editor = None;
                Ok(result)
            }
            ShellInput::Show => {
                let mut result = self.api.refresh()?;
                result.pages.clear();
                result.results = None;
                Ok(result)
            }
            ShellInput::Help | ShellInput::Quit | ShellInput::Unknown(_) => Ok(CmdResult::default()),
        }
    }
}

fn render<W: Write>(out: &mut W, result: &CmdResult) -> Result<()> {
    if !result.pages.is_empty() || result.results.is_some() {
        print_pages(out, &result.pages, result.active.as_ref())?;
    }
    if let Some(results) = &result.results {
        print_results(out, results)?;
    }
    if let Some(editor) = &result.editor {
        print_editor(out, editor)?;
    }
    print_messages(out, &result.messages)?;
    Ok(())
}
