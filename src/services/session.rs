use log::{debug, error, info};

use crate::client::{ApiError, HealthApi};
use crate::models::user::{LoginRequest, RegisterForm, RegisterRequest, User};
use crate::utils::jwt;
use crate::utils::validation::validate_payload;

/// Bearer token plus the cached profile of the signed-in user.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Session::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Session {
            token: Some(token.into()),
            user: None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_expired(&self) -> bool {
        match &self.token {
            Some(token) => jwt::is_expired(token),
            None => true,
        }
    }

    pub fn current_bmi(&self) -> Option<f64> {
        self.user.as_ref().and_then(|user| user.current_bmi)
    }

    /// Returns `false` when no profile is cached and nothing was updated.
    pub fn set_current_bmi(&mut self, bmi: f64) -> bool {
        match self.user.as_mut() {
            Some(user) => {
                user.current_bmi = Some(bmi);
                true
            }
            None => {
                debug!("No cached profile to update with BMI {}", bmi);
                false
            }
        }
    }

    pub fn replace_profile(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }

    /// Drops the session when a call reports it expired. Callers decide where
    /// to send the user next.
    pub fn observe<T>(&mut self, result: &Result<T, ApiError>) {
        if matches!(result, Err(ApiError::SessionExpired)) {
            info!("Session expired, clearing cached credentials");
            self.clear();
        }
    }

    pub async fn register(&mut self, api: &dyn HealthApi, form: RegisterForm) -> Result<&User, ApiError> {
        validate_payload(&form)?;

        let response = api.register(&RegisterRequest::from(form)).await.map_err(|e| {
            error!("Registration failed: {}", e);
            e
        })?;
        info!("Registered {}", response.user.email);
        self.token = Some(response.token);
        Ok(self.user.insert(response.user))
    }

    pub async fn login(&mut self, api: &dyn HealthApi, credentials: LoginRequest) -> Result<&User, ApiError> {
        validate_payload(&credentials)?;

        let response = api.login(&credentials).await.map_err(|e| {
            error!("Login failed: {}", e);
            e
        })?;
        self.token = Some(response.token);
        Ok(self.user.insert(response.user))
    }
}
