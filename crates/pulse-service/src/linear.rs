use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use pulse_core::issue::{Issue, IssueFilter, ProjectRef, StateType};
use pulse_core::project::{Project, ProjectState};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::{ServiceError, TrackerService};

const PAGE_SIZE: u32 = 50;

/// `PaginationOrderBy` value; most recently updated first.
const ORDER_BY: &str = "updatedAt";

const VIEWER_QUERY: &str = "query Viewer { viewer { id name } }";

const ASSIGNED_ISSUES_QUERY: &str = r#"
query AssignedIssues($filter: IssueFilter, $orderBy: PaginationOrderBy, $first: Int!, $after: String) {
  viewer {
    assignedIssues(filter: $filter, orderBy: $orderBy, first: $first, after: $after) {
      nodes {
        identifier
        title
        url
        priority
        createdAt
        updatedAt
        state { type }
        project { id name }
      }
      pageInfo { hasNextPage endCursor }
    }
  }
}
"#;

const PROJECT_QUERY: &str = r#"
query Project($id: String!) {
  project(id: $id) {
    id
    name
    description
    url
    startDate
    targetDate
    state
  }
}
"#;

// -- Wire types --

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(default)]
    extensions: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ViewerData {
    viewer: Viewer,
}

#[derive(Debug, Deserialize)]
pub struct Viewer {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct AssignedIssuesData {
    viewer: AssignedIssuesViewer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssignedIssuesViewer {
    assigned_issues: IssueConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueConnection {
    nodes: Vec<IssueNode>,
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueNode {
    identifier: String,
    title: String,
    url: String,
    #[serde(default)]
    priority: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    state: StateNode,
    project: Option<ProjectRefNode>,
}

#[derive(Debug, Deserialize)]
struct StateNode {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ProjectRefNode {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ProjectData {
    project: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectNode {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: String,
    start_date: Option<NaiveDate>,
    target_date: Option<NaiveDate>,
    state: String,
}

impl TryFrom<IssueNode> for Issue {
    type Error = ServiceError;

    fn try_from(node: IssueNode) -> Result<Self, Self::Error> {
        let state_type = StateType::parse_str(&node.state.kind).ok_or_else(|| {
            ServiceError::InvalidInput(format!(
                "issue {} has unknown state type '{}'",
                node.identifier, node.state.kind
            ))
        })?;
        Ok(Issue {
            identifier: node.identifier,
            title: node.title,
            url: node.url,
            state_type,
            priority: node.priority.clamp(0.0, u8::MAX as f64) as u8,
            created_at: node.created_at,
            updated_at: node.updated_at,
            project: node.project.map(|p| ProjectRef {
                id: p.id,
                name: p.name,
            }),
        })
    }
}

impl TryFrom<ProjectNode> for Project {
    type Error = ServiceError;

    fn try_from(node: ProjectNode) -> Result<Self, Self::Error> {
        let state = ProjectState::parse_str(&node.state).ok_or_else(|| {
            ServiceError::InvalidInput(format!(
                "project {} has unknown state '{}'",
                node.name, node.state
            ))
        })?;
        Ok(Project {
            id: node.id,
            name: node.name,
            description: node.description.unwrap_or_default(),
            url: node.url,
            start_date: node.start_date,
            target_date: node.target_date,
            state,
        })
    }
}

/// Build the `IssueFilter` GraphQL input object for a query.
fn filter_variables(filter: &IssueFilter) -> Value {
    let mut obj = Map::new();
    if let Some(after) = filter.updated_after {
        obj.insert("updatedAt".into(), json!({ "gt": after.to_rfc3339() }));
    }
    if !filter.state_types.is_empty() {
        let types: Vec<&str> = filter.state_types.iter().map(|t| t.as_str()).collect();
        obj.insert("state".into(), json!({ "type": { "in": types } }));
    }
    if let Some(ceiling) = filter.max_priority {
        obj.insert("priority".into(), json!({ "gte": 1, "lte": ceiling }));
    }
    Value::Object(obj)
}

/// Async GraphQL client for the Linear API.
pub struct LinearService {
    api_url: String,
    client: Client,
    api_key: String,
}

impl LinearService {
    pub const DEFAULT_URL: &'static str = "https://api.linear.app/graphql";

    pub fn new(api_url: &str, api_key: String) -> Self {
        let api_url = api_url.trim_end_matches('/').to_string();
        Self {
            api_url,
            client: Client::new(),
            api_key,
        }
    }

    /// Check that the API is reachable and the key is accepted.
    pub async fn health_check(&self) -> Result<Viewer, ServiceError> {
        let data: ViewerData = self.query(VIEWER_QUERY, json!({})).await?;
        Ok(data.viewer)
    }

    async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, ServiceError> {
        let resp = self
            .client
            .post(&self.api_url)
            .header("Authorization", self.api_key.as_str())
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| ServiceError::Internal(format!("connection failed: {e}")))?;
        handle_response(resp).await
    }
}

async fn handle_response<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ServiceError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| ServiceError::Internal(format!("read body: {e}")))?;

    let parsed = match serde_json::from_str::<GraphQlResponse<T>>(&body) {
        Ok(parsed) => parsed,
        Err(e) if status.is_success() => {
            return Err(ServiceError::Internal(format!("json decode: {e}")));
        }
        Err(_) => return Err(status_error(status, body)),
    };

    if let Some(err) = parsed.errors.into_iter().next() {
        return Err(graphql_error(status, err));
    }
    if !status.is_success() {
        return Err(status_error(status, body));
    }
    parsed
        .data
        .ok_or_else(|| ServiceError::Internal("response has no data".into()))
}

fn status_error(status: StatusCode, body: String) -> ServiceError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ServiceError::Unauthorized(body),
        StatusCode::NOT_FOUND => ServiceError::NotFound(body),
        StatusCode::BAD_REQUEST => ServiceError::InvalidInput(body),
        _ => ServiceError::Internal(format!("{status}: {body}")),
    }
}

fn graphql_error(status: StatusCode, err: GraphQlError) -> ServiceError {
    let code = err
        .extensions
        .as_ref()
        .and_then(|ext| ext["code"].as_str())
        .unwrap_or_default();
    if code == "AUTHENTICATION_ERROR"
        || status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
    {
        ServiceError::Unauthorized(err.message)
    } else if err.message.to_lowercase().contains("not found") {
        ServiceError::NotFound(err.message)
    } else if status == StatusCode::BAD_REQUEST {
        ServiceError::InvalidInput(err.message)
    } else {
        ServiceError::Internal(err.message)
    }
}

#[async_trait]
impl TrackerService for LinearService {
    async fn assigned_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>, ServiceError> {
        let mut issues = Vec::new();
        let mut after: Option<String> = None;
        loop {
            let variables = json!({
                "filter": filter_variables(filter),
                "orderBy": ORDER_BY,
                "first": PAGE_SIZE,
                "after": after,
            });
            let data: AssignedIssuesData = self.query(ASSIGNED_ISSUES_QUERY, variables).await?;
            let connection = data.viewer.assigned_issues;
            debug!(
                "fetched page of {} assigned issues (more: {})",
                connection.nodes.len(),
                connection.page_info.has_next_page
            );
            for node in connection.nodes {
                issues.push(Issue::try_from(node)?);
            }
            match connection.page_info.end_cursor {
                Some(cursor) if connection.page_info.has_next_page => after = Some(cursor),
                _ => break,
            }
        }
        Ok(issues)
    }

    async fn get_project(&self, id: &str) -> Result<Project, ServiceError> {
        let data: ProjectData = self.query(PROJECT_QUERY, json!({ "id": id })).await?;
        let node = data
            .project
            .ok_or_else(|| ServiceError::NotFound(format!("project {id}")))?;
        Project::try_from(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn empty_filter_serializes_to_empty_object() {
        assert_eq!(filter_variables(&IssueFilter::default()), json!({}));
    }

    #[test]
    fn full_filter_variables() {
        let filter = IssueFilter {
            updated_after: Some(Utc.with_ymd_and_hms(2026, 10, 9, 0, 0, 0).unwrap()),
            state_types: vec![StateType::Unstarted, StateType::Started],
            max_priority: Some(2),
        };
        let vars = filter_variables(&filter);
        assert_eq!(vars["updatedAt"]["gt"], "2026-10-09T00:00:00+00:00");
        assert_eq!(vars["state"]["type"]["in"], json!(["unstarted", "started"]));
        assert_eq!(vars["priority"], json!({ "gte": 1, "lte": 2 }));
    }

    #[test]
    fn issue_node_with_unknown_state_is_rejected() {
        let node: IssueNode = serde_json::from_value(json!({
            "identifier": "ENG-1",
            "title": "t",
            "url": "u",
            "priority": 1.0,
            "createdAt": "2026-10-01T00:00:00Z",
            "updatedAt": "2026-10-02T00:00:00Z",
            "state": { "type": "archived" },
            "project": null
        }))
        .unwrap();
        assert!(matches!(
            Issue::try_from(node),
            Err(ServiceError::InvalidInput(_))
        ));
    }

    #[test]
    fn project_node_parses_timeless_dates() {
        let node: ProjectNode = serde_json::from_value(json!({
            "id": "p1",
            "name": "Alpha",
            "description": null,
            "url": "https://linear.app/acme/project/alpha",
            "startDate": "2026-09-01",
            "targetDate": null,
            "state": "started"
        }))
        .unwrap();
        let project = Project::try_from(node).unwrap();
        assert_eq!(project.start_date, NaiveDate::from_ymd_opt(2026, 9, 1));
        assert_eq!(project.target_date, None);
        assert_eq!(project.state, ProjectState::Started);
        assert!(project.description.is_empty());
    }

    #[test]
    fn authentication_extension_maps_to_unauthorized() {
        let err = GraphQlError {
            message: "Authentication required".into(),
            extensions: Some(json!({ "code": "AUTHENTICATION_ERROR" })),
        };
        assert!(matches!(
            graphql_error(StatusCode::BAD_REQUEST, err),
            ServiceError::Unauthorized(_)
        ));
    }
}
