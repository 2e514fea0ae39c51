use colored::Colorize;
use pagepad::api::{CmdMessage, EditorView, MessageLevel, PageEntry, ResultsView};
use pagepad::model::PageId;
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ID_WIDTH: usize = 9;
const TITLE_WIDTH: usize = 32;
const ACTIVE_MARKER: &str = "●";
const SELECTED_MARKER: &str = "›";

pub(super) fn print_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// The page selector: one line per visible page, the active one marked.
pub(super) fn print_pages<W: Write>(
    out: &mut W,
    pages: &[PageEntry],
    active: Option<&PageId>,
) -> io::Result<()> {
    if pages.is_empty() {
        writeln!(out, "{}", "No matching pages.".dimmed())?;
        return Ok(());
    }

    for entry in pages {
        let is_active = active == Some(&entry.id);
        let marker = if is_active { ACTIVE_MARKER } else { " " };
        let id = format!("{:<width$}", entry.id.to_string(), width = ID_WIDTH);
        let id = if is_active { id.yellow() } else { id.normal() };
        let title = if is_active {
            entry.title.bold()
        } else {
            entry.title.normal()
        };
        writeln!(out, " {} {} {}", marker, id, title)?;
    }
    Ok(())
}

/// The results panel: matched titles, the cursor row highlighted.
pub(super) fn print_results<W: Write>(out: &mut W, results: &ResultsView) -> io::Result<()> {
    for (i, entry) in results.entries.iter().enumerate() {
        let selected = results.selected == Some(i);
        let marker = if selected { SELECTED_MARKER } else { " " };
        let title = pad_to_width(&entry.title, TITLE_WIDTH);
        let row = format!("{} {} {}", marker, title, entry.id);
        if selected {
            writeln!(out, "{}", row.reversed())?;
        } else {
            writeln!(out, "{}", row)?;
        }
    }
    Ok(())
}

pub(super) fn print_editor<W: Write>(out: &mut W, editor: &EditorView) -> io::Result<()> {
    if editor.read_only {
        writeln!(out, "{}", "(read-only: select a page to edit)".dimmed())?;
        return Ok(());
    }
    writeln!(out, "{}", "--------------------------------".dimmed())?;
    if !editor.text.is_empty() {
        writeln!(out, "{}", editor.text.trim_end_matches('\n'))?;
    }
    writeln!(out, "{}", "--------------------------------".dimmed())?;
    Ok(())
}

/// Pad (or cut, with an ellipsis) to a display width, so wide characters line up.
fn pad_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return format!("{}{}", s, " ".repeat(width - s.width()));
    }

    let mut result = String::new();
    let mut current = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if current + w > width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current += w;
    }
    result.push('…');
    current += 1;
    result.push_str(&" ".repeat(width.saturating_sub(current)));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_ascii_to_width() {
        assert_eq!(pad_to_width("abc", 6), "abc   ");
    }

    #[test]
    fn accounts_for_wide_characters() {
        let padded = pad_to_width("日本", 6);
        assert_eq!(padded, "日本  ");
        assert_eq!(padded.width(), 6);
    }

    #[test]
    fn cuts_with_ellipsis() {
        let cut = pad_to_width("abcdefgh", 5);
        assert_eq!(cut, "abcd…");
    }

    #[test]
    fn prints_selected_result_marker() {
        colored::control::set_override(false);
        let results = ResultsView {
            entries: vec![
                PageEntry {
                    id: "page-1".parse().unwrap(),
                    title: "one".into(),
                },
                PageEntry {
                    id: "page-2".parse().unwrap(),
                    title: "two".into(),
                },
            ],
            selected: Some(1),
        };
        let mut out = Vec::new();
        print_results(&mut out, &results).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("  one"));
        assert!(lines[1].starts_with("› two"));
        assert!(lines[1].ends_with("page-2"));
    }
}
