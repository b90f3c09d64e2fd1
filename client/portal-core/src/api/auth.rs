use validator::Validate;

use super::ApiClient;
use crate::error::{field_errors_from_validator, ApiError, ApiResult};
use crate::models::auth::{
    Acknowledgement, AuthResponse, LoginRequest, PasswordReset, PasswordResetRequest,
    PasswordResetVerify, SignupRequest,
};
use crate::models::session::Session;
use crate::services::auth_gate::AuthorizationGate;

/// Auth endpoints. Field validation runs client-side first, producing the
/// same `Validation` shape the backend reports, so forms render both paths
/// identically.
impl ApiClient {
    pub async fn login(&self, req: &LoginRequest) -> ApiResult<Session> {
        validate(req)?;
        let resp: AuthResponse = self.post_json("/api/login/", req).await?;
        tracing::debug!(email = %resp.user.email, role = ?resp.user.role, "login succeeded");
        Ok(resp.user)
    }

    pub async fn signup(&self, req: &SignupRequest) -> ApiResult<Session> {
        validate(req)?;
        let resp: AuthResponse = self.post_json("/api/signup/", req).await?;
        Ok(resp.user)
    }

    pub async fn request_password_reset(
        &self,
        req: &PasswordResetRequest,
    ) -> ApiResult<Acknowledgement> {
        validate(req)?;
        self.post_json("/api/password-reset/request/", req).await
    }

    pub async fn verify_password_reset(
        &self,
        req: &PasswordResetVerify,
    ) -> ApiResult<Acknowledgement> {
        validate(req)?;
        self.post_json("/api/password-reset/verify/", req).await
    }

    pub async fn reset_password(&self, req: &PasswordReset) -> ApiResult<Acknowledgement> {
        validate(req)?;
        self.post_json("/api/password-reset/reset/", req).await
    }
}

fn validate<T: Validate>(req: &T) -> ApiResult<()> {
    req.validate()
        .map_err(|e| ApiError::Validation(field_errors_from_validator(&e)))
}

/// Logs in and persists the session into the gate's storage slots. The gate
/// is the sole writer of those slots besides logout.
pub async fn login_and_persist(
    client: &ApiClient,
    gate: &AuthorizationGate,
    req: &LoginRequest,
) -> ApiResult<Session> {
    let session = client.login(req).await?;
    if let Err(e) = gate.persist_session(&session) {
        // The backend accepted the login; a failed local write only means the
        // session will not survive this process.
        tracing::error!(error = %e, "failed to persist session");
    }
    Ok(session)
}
