//! Abuse reports.

use crate::error::{ApiError, ApiResult};
use crate::models::requests::{CommentReportBody, PlaylistReportBody};
use crate::models::ReportReason;
use crate::traits::{HttpClient, SecureStore};

use super::client::{ApiClient, Method};

impl<H: HttpClient, S: SecureStore> ApiClient<H, S> {
    pub async fn report_playlist(&self, post_id: i64, reason: &ReportReason) -> ApiResult<()> {
        check_reason(reason)?;
        let (session, auth) = self.bearer().await?;
        let body = PlaylistReportBody {
            reporter_id: session.user_id,
            post_id,
            reason,
        };
        self.send_json::<_, serde_json::Value>(Method::Post, "/api/reports/playlist", &body, &auth)
            .await?;
        tracing::info!("Reported post {}", post_id);
        Ok(())
    }

    pub async fn report_comment(&self, comment_id: i64, reason: &ReportReason) -> ApiResult<()> {
        check_reason(reason)?;
        let (session, auth) = self.bearer().await?;
        let body = CommentReportBody {
            reporter_id: session.user_id,
            comment_id,
            reason,
        };
        self.send_json::<_, serde_json::Value>(Method::Post, "/api/reports/comment", &body, &auth)
            .await?;
        tracing::info!("Reported comment {}", comment_id);
        Ok(())
    }
}

fn check_reason(reason: &ReportReason) -> ApiResult<()> {
    if reason.reason.trim().is_empty() {
        return Err(ApiError::validation("Please choose a reason"));
    }
    Ok(())
}
