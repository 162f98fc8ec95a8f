//! Answer sheets for the quiz host.
//!
//! Rendering only reads the board. Row labels use the standard tiers
//! (`100`, `200`, ...) regardless of edited point values, matching the
//! printed sheets hosts are used to.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{QuizError, Result};

const UNTITLED: &str = "Untitled Game";
const TIER_STEP: usize = 100;

/// Output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerSheetFormat {
    Markdown,
    #[default]
    Text,
    Csv,
}

impl AnswerSheetFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            AnswerSheetFormat::Markdown => "md",
            AnswerSheetFormat::Text => "txt",
            AnswerSheetFormat::Csv => "csv",
        }
    }
}

/// A rendered sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerSheet {
    pub content: String,
    pub file_name: String,
}

/// Render `board` as an answer sheet titled `name`.
pub fn render(board: &Board, name: &str, format: AnswerSheetFormat) -> Result<AnswerSheet> {
    let title = if name.is_empty() { UNTITLED } else { name };
    let content = match format {
        AnswerSheetFormat::Markdown => markdown(board, title),
        AnswerSheetFormat::Text => text(board, title),
        AnswerSheetFormat::Csv => csv(board)?,
    };
    Ok(AnswerSheet {
        content,
        file_name: file_name(name, format),
    })
}

/// Download name: each whitespace run becomes one `_`. Leading and trailing
/// runs are kept, so `" Quiz "` gives `_Quiz__answers.csv`.
#[must_use]
pub fn file_name(name: &str, format: AnswerSheetFormat) -> String {
    let title = if name.is_empty() { UNTITLED } else { name };
    let mut stem = String::with_capacity(title.len());
    let mut in_run = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_run {
                stem.push('_');
            }
            in_run = true;
        } else {
            stem.push(c);
            in_run = false;
        }
    }
    format!("{}_answers.{}", stem, format.extension())
}

fn markdown(board: &Board, title: &str) -> String {
    let mut out = format!("# {} - Answer Sheet\n\n", title);

    out.push_str("| Points |");
    for cat in board.categories() {
        let heading = if cat.name.is_empty() { "Category" } else { cat.name.as_str() };
        out.push_str(&format!(" {} |", heading));
    }
    out.push('\n');

    out.push_str("|---------|");
    out.push_str(&"---------|".repeat(board.category_count()));
    out.push('\n');

    for row in 0..board.row_count() {
        out.push_str(&format!("| {} |", (row + 1) * TIER_STEP));
        for cat in board.categories() {
            out.push_str(&format!(" Q: {} |", markdown_cell(&cat.questions[row].prompt)));
        }
        out.push('\n');

        out.push_str("| *Answers* |");
        for cat in board.categories() {
            out.push_str(&format!(" A: {} |", markdown_cell(&cat.questions[row].response)));
        }
        out.push('\n');
    }
    out
}

/// Keep a cell on one table line: newlines become `<br>`, list markers keep
/// their item on the same line, pipes are escaped.
fn markdown_cell(text: &str) -> String {
    let text = text.replace('\n', "<br>");
    let mut out = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '|' {
            out.push_str("\\|");
            i += 1;
            continue;
        }
        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            out.extend(&chars[start..i]);
            if i + 1 < chars.len() && matches!(chars[i], ')' | '.') && chars[i + 1] == ' ' {
                out.push(chars[i]);
                out.push_str("&nbsp;");
                i += 2;
            }
            continue;
        }
        out.push(c);
        i += 1;
    }
    out
}

fn text(board: &Board, title: &str) -> String {
    let mut out = format!("{} - Answer Sheet\n\n", title);
    for (index, cat) in board.categories().iter().enumerate() {
        if cat.name.is_empty() {
            out.push_str(&format!("Category {}\n", index + 1));
        } else {
            out.push_str(&format!("{}\n", cat.name));
        }
        out.push_str(&"-".repeat(40));
        out.push('\n');
        for q in &cat.questions {
            out.push_str(&format!("{} points:\n", q.points));
            out.push_str(&format!("Question: {}\n", q.prompt));
            out.push_str(&format!("Answer: {}\n\n", q.response));
        }
        out.push('\n');
    }
    out
}

/// Every cell quoted, `\n` between records, no newline after the last one.
fn csv(board: &Board) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut header = vec!["Points".to_string()];
    header.extend(board.category_names());
    writer.write_record(&header).map_err(csv_error)?;

    for row in 0..board.row_count() {
        let tier = (row + 1) * TIER_STEP;
        let question_label = format!("{} - Question", tier);
        let answer_label = format!("{} - Answer", tier);
        let prompts = std::iter::once(question_label.as_str())
            .chain(board.categories().iter().map(|cat| cat.questions[row].prompt.as_str()));
        writer.write_record(prompts).map_err(csv_error)?;
        let responses = std::iter::once(answer_label.as_str())
            .chain(board.categories().iter().map(|cat| cat.questions[row].response.as_str()));
        writer.write_record(responses).map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| QuizError::Codec(e.error().to_string()))?;
    let mut content = String::from_utf8(bytes).map_err(|e| QuizError::Codec(e.to_string()))?;
    if content.ends_with('\n') {
        content.pop();
    }
    Ok(content)
}

fn csv_error(err: csv::Error) -> QuizError {
    QuizError::Codec(err.to_string())
}
