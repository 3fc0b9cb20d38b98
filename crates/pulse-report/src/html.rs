use pulse_core::task::TaskStatus;

use crate::{ReportData, REPORT_TITLE};

const STYLE: &str = "\
body { font-family: -apple-system, BlinkMacSystemFont, \"Segoe UI\", Helvetica, Arial, sans-serif; \
max-width: 760px; margin: 2rem auto; padding: 0 1rem; color: #1f2328; line-height: 1.5; }
h1 { border-bottom: 1px solid #d0d7de; padding-bottom: .3rem; }
h2 { margin-top: 2rem; color: #57606a; }
h3 { margin-bottom: .25rem; }
a { color: #0969da; text-decoration: none; }
a:hover { text-decoration: underline; }
.generated, .empty { color: #57606a; font-style: italic; }
.project { margin-bottom: 1.25rem; }
.project p { margin: .2rem 0; }
.deadline { font-weight: 600; }
ul.tasks { padding-left: 1.25rem; }
ul.tasks li a { font-family: ui-monospace, SFMono-Regular, Menlo, monospace; margin-right: .4rem; }
";

/// Render the report as a standalone HTML document with inline styling.
pub fn render(data: &ReportData) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{REPORT_TITLE}</title>\n"));
    html.push_str(&format!("<style>\n{STYLE}</style>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{REPORT_TITLE}</h1>\n"));
    html.push_str(&format!(
        "<p class=\"generated\">Generated {}</p>\n",
        data.week_of.format("%A, %B %-d, %Y")
    ));

    html.push_str("<section>\n<h2>Active Projects</h2>\n");
    if data.projects.is_empty() {
        html.push_str("<p class=\"empty\">Nothing to report.</p>\n");
    }
    for ranked in &data.projects {
        let project = &ranked.project;
        html.push_str("<div class=\"project\">\n");
        let name = escape_html(&project.name);
        if project.url.is_empty() {
            html.push_str(&format!("<h3>{name}</h3>\n"));
        } else {
            html.push_str(&format!(
                "<h3><a href=\"{}\">{name}</a></h3>\n",
                escape_html(&project.url)
            ));
        }
        if !project.description.is_empty() {
            html.push_str(&format!(
                "<p class=\"description\">{}</p>\n",
                escape_html(&project.description)
            ));
        }
        match project.target_date {
            Some(date) => html.push_str(&format!(
                "<p class=\"deadline\">Target date: {}</p>\n",
                date.format("%A, %B %-d, %Y")
            )),
            None => html.push_str("<p class=\"deadline\">No target date</p>\n"),
        }
        let remaining = match ranked.remaining_work_days {
            Some(days) => days.to_string(),
            None => "n/a".to_string(),
        };
        html.push_str(&format!("<p>Work days remaining: {remaining}</p>\n"));
        html.push_str("</div>\n");
    }
    html.push_str("</section>\n");

    for (status, heading) in [
        (TaskStatus::Completed, "Completed this week"),
        (TaskStatus::Upcoming, "Upcoming next week"),
    ] {
        html.push_str(&format!("<section>\n<h2>{heading}</h2>\n"));
        let mut any = false;
        for (key, tasks) in data.tasks.keys_with(status) {
            any = true;
            html.push_str(&format!(
                "<h3>{}</h3>\n<ul class=\"tasks\">\n",
                escape_html(key.label())
            ));
            for task in tasks {
                html.push_str(&format!(
                    "<li><a href=\"{}\">{}</a> {}</li>\n",
                    escape_html(&task.url),
                    escape_html(&task.id),
                    escape_html(&task.title)
                ));
            }
            html.push_str("</ul>\n");
        }
        if !any {
            html.push_str("<p class=\"empty\">Nothing to report.</p>\n");
        }
        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
