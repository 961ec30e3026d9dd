use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Activity, DayPlan, Job, JobId};
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusParams {
    pub job_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    pub job_id: String,
    pub status: String,
    pub destination: String,
    pub duration_days: u32,
    pub created_at: String,
    pub completed_at: Option<String>,
    pub itinerary: Vec<DayResponse>,
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct DayResponse {
    pub day: u32,
    pub theme: String,
    pub activities: Vec<ActivityResponse>,
}

#[derive(Serialize)]
pub struct ActivityResponse {
    pub time: String,
    pub description: String,
    pub location: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<Job> for JobStatusResponse {
    fn from(job: Job) -> Self {
        Self {
            job_id: job.id.to_string(),
            status: job.status.as_str().to_string(),
            destination: job.destination,
            duration_days: job.duration_days,
            created_at: job.created_at.to_rfc3339(),
            completed_at: job.completed_at.map(|t| t.to_rfc3339()),
            itinerary: job.itinerary.into_iter().map(DayResponse::from).collect(),
            error: job.error_message,
        }
    }
}

impl From<DayPlan> for DayResponse {
    fn from(day: DayPlan) -> Self {
        Self {
            day: day.day,
            theme: day.theme,
            activities: day
                .activities
                .into_iter()
                .map(ActivityResponse::from)
                .collect(),
        }
    }
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        Self {
            time: activity.time.as_str().to_string(),
            description: activity.description,
            location: activity.location,
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn status_handler(
    State(state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> impl IntoResponse {
    let Some(raw_id) = params.job_id else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "jobId query parameter is required".to_string(),
            }),
        )
            .into_response();
    };

    // Every issued id is a UUID, so anything else was never submitted.
    let Ok(uuid) = Uuid::parse_str(&raw_id) else {
        return not_found(&raw_id);
    };

    match state.job_service.status(JobId::from_uuid(uuid)).await {
        Ok(Some(job)) => (StatusCode::OK, Json(JobStatusResponse::from(job))).into_response(),
        Ok(None) => not_found(&raw_id),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch job status");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("failed to fetch job: {}", e),
                }),
            )
                .into_response()
        }
    }
}

fn not_found(job_id: &str) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Job not found: {}", job_id),
        }),
    )
        .into_response()
}
