use std::sync::Arc;

use crate::api::{LoginRequest, MoosementApi, RegisterRequest};
use crate::error::{ClientError, ClientResult};
use crate::models::AccountReceipt;

use super::session::SharedSession;

pub(crate) fn require(value: &str, field: &str) -> ClientResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Sign-in and sign-up forms.
pub struct AccountService {
    api: Arc<dyn MoosementApi>,
    session: SharedSession,
}

impl AccountService {
    pub fn new(api: Arc<dyn MoosementApi>, session: SharedSession) -> Self {
        Self { api, session }
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AccountReceipt> {
        let request = LoginRequest {
            email: require(email, "Email")?,
            password: require(password, "Password")?,
        };
        let receipt = self.api.login(&request).await?;
        tracing::info!("Login successful, user id {:?}", receipt.user_id);
        self.session.lock().await.authenticated = Some(true);
        Ok(receipt)
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<AccountReceipt> {
        let request = RegisterRequest {
            name: require(name, "Full name")?,
            email: require(email, "Email")?,
            password: require(password, "Password")?,
        };
        let receipt = self.api.register(&request).await?;
        tracing::info!("Registered user {:?}", receipt.user_id);
        self.session.lock().await.authenticated = Some(true);
        Ok(receipt)
    }
}
