use chrono::{DateTime, Local, NaiveDate, Utc};
use pulse_core::grouping::group_tasks;
use pulse_core::ranking::rank_projects;
use pulse_report::{html, markdown, ReportData, ReportSummary};
use pulse_service::{collect_activity, Activity, ActivityWindow, TrackerService};
use tracing::{error, info, warn};

use crate::config::PulseConfig;
use crate::output::{write_reports, OutputError, Written};

#[derive(Debug)]
pub struct RunOutcome {
    pub summary: ReportSummary,
    /// False when the tracker could not be read and an empty report was
    /// written instead.
    pub fetched: bool,
    pub written: Result<Written, OutputError>,
}

impl RunOutcome {
    pub fn is_complete(&self) -> bool {
        self.fetched && matches!(&self.written, Ok(w) if w.all_ok())
    }
}

/// Fetch, rank and group. A fetch failure is logged and replaced by an
/// empty activity so a report is always produced.
pub async fn build_report(
    service: &dyn TrackerService,
    now: DateTime<Utc>,
    today: NaiveDate,
    window: &ActivityWindow,
) -> (ReportData, bool) {
    let (activity, fetched) = match collect_activity(service, now, window).await {
        Ok(activity) => (activity, true),
        Err(e) => {
            warn!("failed to fetch activity, writing an empty report: {e}");
            (Activity::default(), false)
        }
    };

    let projects = rank_projects(activity.projects, today);
    let tasks = group_tasks(activity.completed, activity.upcoming);
    (ReportData::new(today, projects, tasks), fetched)
}

/// Build both documents and write them to the configured directory.
///
/// With `--today` set, the run is evaluated as of that date at `now`'s time
/// of day, so the completed-task window ends on the same day the deadlines
/// are counted from.
pub async fn run(
    config: &PulseConfig,
    service: &dyn TrackerService,
    now: DateTime<Utc>,
) -> RunOutcome {
    let (now, today) = evaluation_point(config.today, now);

    let (data, fetched) = build_report(service, now, today, &config.window()).await;
    let summary = data.summary();
    info!(
        "report for {}: {} active projects, {} tasks across {} projects",
        summary.week_of, summary.active_projects, summary.tasks, summary.project_keys
    );

    let markdown = markdown::render(&data);
    let html = html::render(&data);

    let written = match config.report_dir() {
        Ok(dir) => write_reports(&dir, &markdown, &html).await,
        Err(e) => Err(e.into()),
    };
    match &written {
        Ok(files) => files.log(),
        Err(e) => error!("reports not written: {e}"),
    }

    RunOutcome {
        summary,
        fetched,
        written,
    }
}

fn evaluation_point(
    today: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> (DateTime<Utc>, NaiveDate) {
    match today {
        Some(date) => (date.and_time(now.time()).and_utc(), date),
        None => (now, now.with_timezone(&Local).date_naive()),
    }
}
