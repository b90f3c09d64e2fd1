use super::ApiClient;
use crate::error::ApiResult;
use crate::models::notification::Notification;

impl ApiClient {
    pub async fn list_notifications(&self) -> ApiResult<Vec<Notification>> {
        self.get_json("/api/notifications/").await
    }

    pub async fn mark_notification_read(&self, id: i64) -> ApiResult<Notification> {
        self.post_empty(&format!("/api/notifications/{}/read/", id))
            .await
    }
}
