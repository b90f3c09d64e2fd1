use serde::de::DeserializeOwned;
use serde::Serialize;

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::announcement::{Announcement, AnnouncementPayload};
use crate::models::chitfund::{ChitFundEntry, ChitFundPayload};
use crate::models::expenditure::{Expenditure, ExpenditurePayload};
use crate::models::game::{Game, GamePayload};
use crate::models::member::{
    JuniorMember, JuniorMemberPayload, PermanentMember, PermanentMemberPayload, TemporaryMember,
    TemporaryMemberPayload,
};
use crate::models::memory::{Memory, MemoryPayload};
use crate::models::sponsor::{Sponsor, SponsorPayload};

/// A resource family following the uniform CRUD verb table:
/// `GET {base}/` list, `POST {base}/` create, `PUT {base}/{id}/` update,
/// `DELETE {base}/{id}/` remove.
pub trait Resource: DeserializeOwned + Send + Sync {
    /// Path segment under `/api/`, e.g. `members/permanent`.
    const ENDPOINT: &'static str;

    /// Create/update body for this resource.
    type Payload: Serialize + Send + Sync;

    fn id(&self) -> i64;
}

impl ApiClient {
    pub async fn list_resources<R: Resource>(&self) -> ApiResult<Vec<R>> {
        self.get_json(&format!("/api/{}/", R::ENDPOINT)).await
    }

    pub async fn create_resource<R: Resource>(&self, payload: &R::Payload) -> ApiResult<R> {
        self.post_json(&format!("/api/{}/", R::ENDPOINT), payload)
            .await
    }

    pub async fn update_resource<R: Resource>(
        &self,
        id: i64,
        payload: &R::Payload,
    ) -> ApiResult<R> {
        self.put_json(&format!("/api/{}/{}/", R::ENDPOINT, id), payload)
            .await
    }

    pub async fn delete_resource<R: Resource>(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("/api/{}/{}/", R::ENDPOINT, id)).await
    }
}

macro_rules! resource {
    ($model:ty, $payload:ty, $endpoint:literal) => {
        impl Resource for $model {
            const ENDPOINT: &'static str = $endpoint;
            type Payload = $payload;

            fn id(&self) -> i64 {
                self.id
            }
        }
    };
}

resource!(PermanentMember, PermanentMemberPayload, "members/permanent");
resource!(TemporaryMember, TemporaryMemberPayload, "members/temporary");
resource!(JuniorMember, JuniorMemberPayload, "members/junior");
resource!(Sponsor, SponsorPayload, "sponsors");
resource!(Game, GamePayload, "games");
resource!(ChitFundEntry, ChitFundPayload, "chitfund");
resource!(Expenditure, ExpenditurePayload, "expenditure");
resource!(Memory, MemoryPayload, "memories");
resource!(Announcement, AnnouncementPayload, "dashboard/announcements");
