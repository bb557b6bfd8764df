//! Rule-based plan extraction used when no model is available.
//!
//! The extractor never fails: text without recognizable structure simply
//! yields a record with no tasks. Recognized markers and keywords live in
//! the tables at the top of this module; extending a language means adding
//! entries there, not touching the extraction passes.
//!
//! Tasks come from the first strategy that produces any:
//!
//! 1. numbered blocks (`1. Title`, `2) Title`, `3、标题`) spanning to the next
//!    numbered marker,
//! 2. bullet lines (`-`, `*`, `•`, `+`),
//! 3. lines containing an imperative or obligation keyword.

use std::{ops::Range, panic::AssertUnwindSafe, sync::LazyLock};

use async_trait::async_trait;
use log::debug;
use regex::Regex;

use super::{
    record::{ParsedPlanRecord, ParsedTaskRecord, UNTITLED_TASK},
    ParseStrategy,
};
use crate::{error::ParseError, models::TaskStatus};

/// Labels introducing a notes section. Must be followed by `:` or `：`.
pub const NOTE_MARKERS: &[&str] = &[
    "notes",
    "note",
    "attention",
    "important",
    "caveats",
    "注意事项",
    "注意",
    "备注",
    "提示",
];

/// Labels introducing a dependency list anywhere inside a numbered block.
pub const DEPENDENCY_MARKERS: &[&str] = &["depends on", "depends", "dependencies", "依赖"];

/// Status keyword stems, checked in table order. A stem matches at the
/// start of a word, so inflected forms count too.
pub const STATUS_KEYWORDS: &[(TaskStatus, &[&str])] = &[
    (TaskStatus::Complete, &["done", "complet", "finished", "已完成"]),
    (
        TaskStatus::Working,
        &["in progress", "in-progress", "working", "进行中"],
    ),
    (TaskStatus::PendingForReview, &["review", "审核", "评审"]),
    (TaskStatus::NeedFixed, &["fix", "修复"]),
];

/// Keywords marking a sentence as implied work.
pub const IMPLICIT_TASK_KEYWORDS: &[&str] = &[
    "need to",
    "needs to",
    "should",
    "must",
    "implement",
    "build",
    "create",
    "design",
    "test",
    "需要",
    "应该",
    "必须",
    "实现",
    "构建",
    "创建",
    "设计",
    "测试",
];

/// Lines of the description taken from the top of the text.
const DESCRIPTION_LINES: usize = 3;

static NUMBERED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)(?:[.)]\s+|、\s*)(.*)$").expect("numbered marker regex should compile")
});

static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*•+]\s+(.+)$").expect("bullet regex should compile"));

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s)>\]]+").expect("url regex should compile"));

static NOTES_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^(?:{})\**\s*[:：]\s*(.*)$", markers(NOTE_MARKERS)))
        .expect("notes marker regex should compile")
});

static DEPENDENCY_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)[(（]?\s*(?:{})\s*[:：]\s*([^)）]*)[)）]?",
        markers(DEPENDENCY_MARKERS)
    ))
    .expect("dependency marker regex should compile")
});

static STATUS_RULES: LazyLock<Vec<(TaskStatus, Regex)>> = LazyLock::new(|| {
    STATUS_KEYWORDS
        .iter()
        .map(|(status, words)| {
            let regex = Regex::new(&format!("(?i){}", stems(words)))
                .expect("status keyword regex should compile");
            (*status, regex)
        })
        .collect()
});

static IMPLICIT_TASK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?i){}", keywords(IMPLICIT_TASK_KEYWORDS)))
        .expect("implicit task regex should compile")
});

fn markers(words: &[&str]) -> String {
    words
        .iter()
        .map(|word| regex::escape(word))
        .collect::<Vec<_>>()
        .join("|")
}

/// Alternation of keywords; ASCII words only match on word boundaries.
fn keywords(words: &[&str]) -> String {
    words
        .iter()
        .map(|word| {
            let escaped = regex::escape(word);
            if word.is_ascii() {
                format!(r"\b{escaped}\b")
            } else {
                escaped
            }
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Alternation of keyword stems; ASCII stems only need to start a word.
fn stems(words: &[&str]) -> String {
    words
        .iter()
        .map(|word| {
            let escaped = regex::escape(word);
            if word.is_ascii() {
                format!(r"\b{escaped}")
            } else {
                escaped
            }
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// A labeled notes section and the notes it yielded.
#[derive(Debug)]
struct NoteSection {
    lines: Range<usize>,
    notes: Vec<String>,
}

/// Pattern-based plan extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts a plan record from `text`. Total: never fails or panics on
    /// any input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waypoint_core::parser::heuristic::HeuristicExtractor;
    ///
    /// let record = HeuristicExtractor::new().extract("1. Design API\n2. Build backend\ndepends: 1", None);
    /// assert_eq!(record.tasks[1].dependencies, vec!["Design API"]);
    /// assert_eq!(record.tasks[1].order, Some(2));
    /// ```
    pub fn extract(&self, text: &str, name: Option<&str>) -> ParsedPlanRecord {
        let lines: Vec<&str> = text.lines().collect();

        let (plan_name, name_line) = match name.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => (name.to_string(), None),
            None => detect_name(&lines),
        };

        let sections = note_sections(&lines);
        let notes: Vec<String> = sections
            .iter()
            .flat_map(|section| section.notes.iter().cloned())
            .collect();

        let mut tasks = numbered_tasks(&lines, &sections);
        if tasks.is_empty() {
            tasks = bulleted_tasks(&lines, name_line, &sections, &notes);
        }
        if tasks.is_empty() {
            tasks = implicit_tasks(&lines, name_line, &sections, &notes);
        }
        debug!(
            "Heuristic extraction found {} tasks and {} notes",
            tasks.len(),
            notes.len()
        );

        ParsedPlanRecord {
            name: plan_name,
            description: describe(&lines, name_line),
            notes,
            tasks,
        }
    }
}

#[async_trait]
impl ParseStrategy for HeuristicExtractor {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    async fn parse(&self, text: &str, name: Option<&str>) -> Result<ParsedPlanRecord, ParseError> {
        std::panic::catch_unwind(AssertUnwindSafe(|| self.extract(text, name))).map_err(|panic| {
            let message = panic
                .downcast_ref::<&str>()
                .map(|message| message.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "heuristic extraction panicked".to_string());
            ParseError::MalformedInput { message }
        })
    }
}

/// Strips heading, quote and bullet decoration from the start of a line.
fn strip_decoration(line: &str) -> &str {
    line.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '#' | '>' | '*' | '-' | '•' | '+'))
        .trim_end()
}

fn is_heading(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

fn is_list_item(line: &str) -> bool {
    BULLET.is_match(line) || NUMBERED.is_match(line)
}

fn bullet_text(line: &str) -> Option<String> {
    BULLET
        .captures(line)
        .and_then(|captures| captures.get(1))
        .map(|text| text.as_str().trim().to_string())
        .filter(|text| !text.is_empty())
}

fn notes_marker(line: &str) -> Option<&str> {
    NOTES_MARKER
        .captures(strip_decoration(line))
        .and_then(|captures| captures.get(1))
        .map(|rest| rest.as_str())
}

/// Cuts a dependency marker and its list out of `line`, wherever it sits.
/// Returns the remaining text (empty when nothing but decoration is left)
/// and the raw list, if a marker was found.
fn split_dependency_marker(line: &str) -> (String, Option<&str>) {
    let Some(captures) = DEPENDENCY_MARKER.captures(line) else {
        return (line.trim().to_string(), None);
    };
    let marker = captures.get(0).map_or(0..0, |whole| whole.range());
    let list = captures.get(1).map_or("", |list| list.as_str());

    let rest = format!(
        "{} {}",
        line[..marker.start].trim_end(),
        line[marker.end..].trim_start()
    );
    let rest = if strip_decoration(&rest).is_empty() {
        String::new()
    } else {
        rest.trim().to_string()
    };
    (rest, Some(list))
}

fn infer_status(text: &str) -> TaskStatus {
    STATUS_RULES
        .iter()
        .find(|(_, regex)| regex.is_match(text))
        .map(|(status, _)| *status)
        .unwrap_or_default()
}

fn links(text: &str) -> Vec<String> {
    URL.find_iter(text)
        .map(|link| link.as_str().to_string())
        .collect()
}

/// Plan name from the first non-blank line, if it looks like a heading.
fn detect_name(lines: &[&str]) -> (String, Option<usize>) {
    let Some((index, line)) = lines
        .iter()
        .enumerate()
        .find(|(_, line)| !line.trim().is_empty())
    else {
        return (String::new(), None);
    };

    let line = line.trim();
    if notes_marker(line).is_some() {
        return (String::new(), None);
    }
    if line.starts_with('#') {
        let name = line.trim_start_matches('#').trim();
        if !name.is_empty() {
            return (name.to_string(), Some(index));
        }
    } else if !is_list_item(line)
        && line.chars().any(char::is_uppercase)
        && !line.chars().any(char::is_lowercase)
    {
        return (line.to_string(), Some(index));
    }
    (String::new(), None)
}

fn describe(lines: &[&str], name_line: Option<usize>) -> String {
    lines
        .iter()
        .enumerate()
        .take(DESCRIPTION_LINES)
        .filter(|(index, line)| {
            Some(*index) != name_line
                && !line.trim().is_empty()
                && !is_list_item(line)
                && notes_marker(line).is_none()
                && !DEPENDENCY_MARKER.is_match(line)
        })
        .map(|(_, line)| line.trim().trim_start_matches('#').trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn note_sections(lines: &[&str]) -> Vec<NoteSection> {
    let mut sections = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let Some(inline) = notes_marker(lines[index]) else {
            index += 1;
            continue;
        };

        let start = index;
        let mut span = Vec::new();
        if !inline.trim().is_empty() {
            span.push(inline);
        }
        index += 1;
        while index < lines.len() && !lines[index].trim().is_empty() && !is_heading(lines[index]) {
            span.push(lines[index]);
            index += 1;
        }

        sections.push(NoteSection {
            lines: start..index,
            notes: collect_notes(&span),
        });
    }

    sections
}

fn collect_notes(span: &[&str]) -> Vec<String> {
    let bullets: Vec<String> = span.iter().filter_map(|line| bullet_text(line)).collect();
    if !bullets.is_empty() {
        return bullets;
    }

    let joined = span
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        Vec::new()
    } else {
        vec![joined]
    }
}

fn in_notes(sections: &[NoteSection], index: usize) -> bool {
    sections.iter().any(|section| section.lines.contains(&index))
}

/// Tasks from numbered blocks, each running to the next numbered marker.
///
/// Blocks whose marker sits inside a notes section are skipped. A block
/// whose body runs into a notes section keeps its title and is cut at the
/// section start, so the task survives and the notes stay notes.
fn numbered_tasks(lines: &[&str], sections: &[NoteSection]) -> Vec<ParsedTaskRecord> {
    let markers: Vec<(usize, i64, &str)> = lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let captures = NUMBERED.captures(line)?;
            let numeral = captures.get(1)?.as_str().parse().ok()?;
            let rest = captures.get(2).map_or("", |rest| rest.as_str());
            Some((index, numeral, rest))
        })
        .collect();

    let mut tasks: Vec<ParsedTaskRecord> = Vec::new();
    for (position, &(start, numeral, first_line)) in markers.iter().enumerate() {
        if in_notes(sections, start) {
            continue;
        }

        let next_marker = markers
            .get(position + 1)
            .map_or(lines.len(), |(index, _, _)| *index);
        let end = sections
            .iter()
            .map(|section| section.lines.start)
            .filter(|section_start| *section_start > start && *section_start < next_marker)
            .min()
            .unwrap_or(next_marker);

        let (title, title_dependencies) = split_dependency_marker(first_line);
        let mut dependencies = Vec::new();
        if let Some(list) = title_dependencies {
            dependencies.extend(resolve_dependencies(list, &tasks));
        }
        let mut description = Vec::new();
        for line in lines.get(start + 1..end).unwrap_or_default() {
            let (text, list) = split_dependency_marker(line);
            if let Some(list) = list {
                dependencies.extend(resolve_dependencies(list, &tasks));
            }
            if !text.is_empty() {
                description.push(text);
            }
        }

        let description = description.join(" ");
        let body = format!("{title} {description}");
        tasks.push(ParsedTaskRecord {
            title: if title.is_empty() {
                UNTITLED_TASK.to_string()
            } else {
                title
            },
            status: infer_status(&body).as_str().to_string(),
            comments: links(&body),
            description,
            order: Some(numeral),
            dependencies,
        });
    }

    tasks
}

/// Splits a dependency list; numeric tokens point back at tasks extracted
/// so far (1-based) and forward references stay as written.
fn resolve_dependencies(list: &str, earlier: &[ParsedTaskRecord]) -> Vec<String> {
    list.split([',', '，', '、'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<usize>()
                .ok()
                .and_then(|ordinal| ordinal.checked_sub(1))
                .and_then(|index| earlier.get(index))
                .map_or_else(|| token.to_string(), |task| task.title.clone())
        })
        .collect()
}

fn bulleted_tasks(
    lines: &[&str],
    name_line: Option<usize>,
    sections: &[NoteSection],
    notes: &[String],
) -> Vec<ParsedTaskRecord> {
    let mut tasks = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        if Some(index) == name_line || in_notes(sections, index) {
            continue;
        }
        let Some(title) = bullet_text(line) else {
            continue;
        };
        if notes.contains(&title) {
            continue;
        }

        tasks.push(ParsedTaskRecord {
            status: infer_status(&title).as_str().to_string(),
            comments: links(&title),
            order: Some(tasks.len() as i64 + 1),
            title,
            ..Default::default()
        });
    }
    tasks
}

fn implicit_tasks(
    lines: &[&str],
    name_line: Option<usize>,
    sections: &[NoteSection],
    notes: &[String],
) -> Vec<ParsedTaskRecord> {
    let mut tasks = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        if Some(index) == name_line || in_notes(sections, index) {
            continue;
        }
        let text = strip_decoration(line);
        if text.is_empty()
            || !IMPLICIT_TASK.is_match(text)
            || notes.iter().any(|note| note == text)
        {
            continue;
        }

        tasks.push(ParsedTaskRecord {
            title: text.to_string(),
            status: TaskStatus::Pending.as_str().to_string(),
            comments: links(text),
            order: Some(tasks.len() as i64 + 1),
            ..Default::default()
        });
    }
    tasks
}
