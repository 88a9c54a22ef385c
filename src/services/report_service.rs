//! Plain-text and HTML renderings of quiz results.

use std::fmt::{self, Write};

use askama::Template;

use crate::{
    errors::AppResult,
    models::domain::{Question, QuestionKind, QuizResult},
    repositories::ResultLogEntry,
};

const DOUBLE_RULE: &str = "════════════════════════════════════════════════════════════";
const SINGLE_RULE: &str = "────────────────────────────────────────────────────────────";
const NO_ANSWER: &str = "(no answer)";
const REPORT_FILE_STAMP: &str = "%Y%m%d_%H%M%S";

pub fn grade(accuracy: f64) -> &'static str {
    match accuracy {
        a if a >= 90.0 => "A+ (Excellent)",
        a if a >= 80.0 => "A (Very Good)",
        a if a >= 70.0 => "B (Good)",
        a if a >= 60.0 => "C (Satisfactory)",
        a if a >= 50.0 => "D (Pass)",
        _ => "F (Fail)",
    }
}

pub fn report_file_name(result: &QuizResult) -> String {
    let user: String = result
        .username
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    format!(
        "Quiz_Report_{}_{}.html",
        user,
        result.completed_at.format(REPORT_FILE_STAMP)
    )
}

fn status(question: &Question) -> &'static str {
    if question.is_correct {
        "✓ CORRECT"
    } else {
        "✗ INCORRECT"
    }
}

fn shows_options(question: &Question) -> bool {
    matches!(
        question.kind,
        QuestionKind::MultipleChoice | QuestionKind::TrueFalse
    )
}

mod filters {
    use std::fmt::Display;

    /// Turns newlines into `<br/>`. Apply after escaping.
    pub fn nl2br<T: Display>(text: T) -> ::askama::Result<String> {
        Ok(text.to_string().replace('\n', "<br/>"))
    }
}

struct ReportRow<'a> {
    number: usize,
    kind: &'static str,
    status: &'static str,
    correct: bool,
    prompt: &'a str,
    options: Vec<&'a str>,
    your_answer: &'a str,
    correct_answer: &'a str,
}

impl<'a> ReportRow<'a> {
    fn new(index: usize, question: &'a Question) -> Self {
        let options = if shows_options(question) {
            question.options.iter().map(String::as_str).collect()
        } else {
            Vec::new()
        };
        ReportRow {
            number: index + 1,
            kind: question.kind.label(),
            status: status(question),
            correct: question.is_correct,
            prompt: &question.prompt,
            options,
            your_answer: question.user_answer.as_deref().unwrap_or(NO_ANSWER),
            correct_answer: question.correct_answer(),
        }
    }
}

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate<'a> {
    result: &'a QuizResult,
    timestamp: String,
    accuracy: String,
    grade: &'static str,
    rows: Vec<ReportRow<'a>>,
}

impl<'a> ReportTemplate<'a> {
    fn new(result: &'a QuizResult) -> Self {
        let accuracy = result.accuracy();
        ReportTemplate {
            result,
            timestamp: result.timestamp(),
            accuracy: format!("{:.2}", accuracy),
            grade: grade(accuracy),
            rows: result
                .questions
                .iter()
                .enumerate()
                .map(|(i, question)| ReportRow::new(i, question))
                .collect(),
        }
    }
}

/// Standalone HTML report for a finished quiz.
pub fn render_report(result: &QuizResult) -> AppResult<String> {
    Ok(ReportTemplate::new(result).render()?)
}

pub fn render_summary(result: &QuizResult) -> String {
    let mut text = String::new();
    let _ = write_summary(&mut text, result);
    text
}

fn write_summary(text: &mut String, result: &QuizResult) -> fmt::Result {
    writeln!(text, "{}", DOUBLE_RULE)?;
    writeln!(text, "{:^60}", "QUIZ SUMMARY")?;
    writeln!(text, "{}\n", DOUBLE_RULE)?;

    writeln!(text, "User: {}", result.username)?;
    writeln!(text, "Category: {}", result.category)?;
    writeln!(text, "Difficulty: {}", result.difficulty)?;
    writeln!(text, "Date & Time: {}\n", result.timestamp())?;

    writeln!(text, "{}", SINGLE_RULE)?;
    writeln!(text, "Score: {} / {}", result.score, result.total)?;
    writeln!(text, "Accuracy: {:.2}%", result.accuracy())?;
    writeln!(text, "Grade: {}", grade(result.accuracy()))?;
    writeln!(text, "{}\n", SINGLE_RULE)?;

    writeln!(text, "DETAILED RESULTS:\n")?;
    for (i, question) in result.questions.iter().enumerate() {
        writeln!(text, "Question {}: {}", i + 1, status(question))?;
        writeln!(text, "Q: {}", question.prompt)?;
        writeln!(
            text,
            "Your Answer: {}",
            question.user_answer.as_deref().unwrap_or(NO_ANSWER)
        )?;
        if !question.is_correct {
            writeln!(text, "Correct Answer: {}", question.correct_answer())?;
        }
        writeln!(text)?;
    }

    writeln!(text, "{}", DOUBLE_RULE)
}

fn dashboard_row(text: &mut String, columns: [&str; 7]) -> fmt::Result {
    writeln!(
        text,
        "{:<15} {:<12} {:<12} {:<10} {:<8} {:<12} {}",
        columns[0], columns[1], columns[2], columns[3], columns[4], columns[5], columns[6]
    )
}

/// Fixed-width table of every logged result.
pub fn render_results_table(entries: &[ResultLogEntry]) -> String {
    let mut text = String::new();
    let _ = write_results_table(&mut text, entries);
    text
}

fn write_results_table(text: &mut String, entries: &[ResultLogEntry]) -> fmt::Result {
    let rule = DOUBLE_RULE.repeat(2);
    writeln!(text, "{}", rule)?;
    writeln!(text, "{:^120}", "QUIZ RESULTS DASHBOARD")?;
    writeln!(text, "{}\n", rule)?;

    if entries.is_empty() {
        return writeln!(
            text,
            "No results yet. Take a quiz and finish it to generate results."
        );
    }

    dashboard_row(
        text,
        [
            "USERNAME",
            "CATEGORY",
            "DIFFICULTY",
            "SCORE",
            "TOTAL",
            "ACCURACY",
            "TIMESTAMP",
        ],
    )?;
    writeln!(text, "{}", SINGLE_RULE.repeat(2))?;
    for entry in entries {
        let score = format!("{}/{}", entry.score, entry.total);
        let total = entry.total.to_string();
        let accuracy = format!("{:.2}%", entry.accuracy_percent);
        dashboard_row(
            text,
            [
                entry.username.as_str(),
                entry.category.as_str(),
                entry.difficulty.as_str(),
                score.as_str(),
                total.as_str(),
                accuracy.as_str(),
                entry.timestamp.as_str(),
            ],
        )?;
    }
    write!(text, "\n{}\n", rule)
}
