use pulse_core::task::TaskStatus;

use crate::{ReportData, REPORT_TITLE};

const LONG_DATE: &str = "%A, %B %-d, %Y";

/// Render the report as Markdown.
pub fn render(data: &ReportData) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {REPORT_TITLE}\n\n"));
    out.push_str(&format!("_Generated {}_\n\n", data.week_of.format(LONG_DATE)));

    out.push_str("## Active Projects\n\n");
    if data.projects.is_empty() {
        out.push_str("_Nothing to report._\n\n");
    }
    for ranked in &data.projects {
        let project = &ranked.project;
        let name = escape_markdown(&project.name);
        if project.url.is_empty() {
            out.push_str(&format!("### {name}\n\n"));
        } else {
            out.push_str(&format!("### [{name}]({})\n\n", escape_url(&project.url)));
        }
        if !project.description.is_empty() {
            out.push_str(&format!("{}\n\n", project.description));
        }
        match project.target_date {
            Some(date) => {
                out.push_str(&format!("- Target date: {}\n", date.format(LONG_DATE)));
            }
            None => out.push_str("- No target date\n"),
        }
        match ranked.remaining_work_days {
            Some(days) => out.push_str(&format!("- Work days remaining: {days}\n\n")),
            None => out.push_str("- Work days remaining: n/a\n\n"),
        }
    }

    append_tasks(&mut out, data, TaskStatus::Completed, "Completed this week");
    append_tasks(&mut out, data, TaskStatus::Upcoming, "Upcoming next week");
    out
}

fn append_tasks(out: &mut String, data: &ReportData, status: TaskStatus, heading: &str) {
    out.push_str(&format!("## {heading}\n\n"));
    let mut any = false;
    for (key, by_status) in data.tasks.iter() {
        let Some(tasks) = by_status.get(&status) else {
            continue;
        };
        any = true;
        out.push_str(&format!("### {}\n\n", escape_markdown(key.label())));
        for task in tasks {
            out.push_str(&format!(
                "- [{}]({}) {}\n",
                escape_markdown(&task.id),
                escape_url(&task.url),
                escape_markdown(&task.title)
            ));
        }
        out.push('\n');
    }
    if !any {
        out.push_str("_Nothing to report._\n\n");
    }
}

/// Backslash-escape characters that open or close inline Markdown, and fold
/// line breaks into spaces so a value never leaves its line.
fn escape_markdown(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' | '[' | ']' | '*' | '_' | '`' | '<' | '>' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            '\r' | '\n' => escaped.push(' '),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Percent-encode what would end a link destination early.
fn escape_url(raw: &str) -> String {
    raw.replace(' ', "%20")
        .replace('(', "%28")
        .replace(')', "%29")
        .replace(['\r', '\n'], "")
}
