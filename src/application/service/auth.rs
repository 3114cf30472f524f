//! Login, registration and logout.

use secrecy::ExposeSecret;
use tracing::debug;

use super::{MenfessService, MessageResult, RegistrationMode, TokenResult};
use crate::application::requests::{
    CredentialRegisterRequest, LoginRequest, LogoutRequest, RegisterRequest, Validate,
};
use crate::application::ServiceError;
use crate::domain::foundation::ErrorCode;
use crate::domain::user::{Account, NewUser, User};

impl MenfessService {
    /// Authenticates by email and password, registers the device's push
    /// token, and issues an auth token.
    pub async fn login(&self, req: LoginRequest) -> Result<TokenResult, ServiceError> {
        let cmd = req.validate()?;

        let user = self
            .users
            .find_by_email(&cmd.email)
            .await
            .map_err(|e| self.classify(e, &cmd, "[Login] failed find user from repo"))?;

        let hash = user
            .account
            .as_ref()
            .map(|account| account.password_hash.as_str())
            .ok_or(ServiceError::WrongPassword)?;
        let matches = self
            .auth
            .verify_password(hash, cmd.password.expose_secret())
            .await
            .map_err(|e| self.internal(e, &cmd, "[Login] failed compare password"))?;
        if !matches {
            return Err(ServiceError::WrongPassword);
        }

        self.notifier
            .add_push_token(&user.id, &cmd.push_token)
            .await
            .map_err(|e| self.internal(e, &cmd, "[Login] failed add notification push token"))?;

        let token = self
            .auth
            .generate_token(&user)
            .await
            .map_err(|e| self.internal(e, &cmd, "[Login] failed generate token"))?;

        Ok(TokenResult { token })
    }

    /// Creates a user with no credentials bound to the calling device.
    pub async fn register(&self, req: RegisterRequest) -> Result<TokenResult, ServiceError> {
        if self.registration_mode != RegistrationMode::Anonymous {
            return Err(ServiceError::RegistrationDisabled);
        }
        let cmd = req.validate()?;

        let new_user = NewUser::anonymous();
        let id = self
            .users
            .insert(new_user.clone())
            .await
            .map_err(|e| self.internal(e, &cmd, "[Register] failed insert user"))?;
        let user = User::new(id, new_user.account, new_user.profile, new_user.kind);
        debug!(user_id = %user.id, "registered anonymous user");

        self.issue_for_new_user(&user, &cmd.push_token, &cmd).await
    }

    /// Creates a user with email and password.
    pub async fn register_with_credentials(
        &self,
        req: CredentialRegisterRequest,
    ) -> Result<TokenResult, ServiceError> {
        if self.registration_mode != RegistrationMode::Credentials {
            return Err(ServiceError::RegistrationDisabled);
        }
        let cmd = req.validate()?;

        match self.users.find_by_email(&cmd.email).await {
            Ok(_) => return Err(ServiceError::EmailAlreadyRegistered),
            Err(e) if e.is(ErrorCode::UserNotFound) => {}
            Err(e) => return Err(self.internal(e, &cmd, "[Register] failed find user from repo")),
        }

        let hash = self
            .auth
            .hash_password(cmd.password.expose_secret())
            .await
            .map_err(|e| self.internal(e, &cmd, "[Register] failed hash password"))?;

        let new_user = NewUser::with_account(Account::new(cmd.email.clone(), hash));
        let id = self
            .users
            .insert(new_user.clone())
            .await
            .map_err(|e| self.internal(e, &cmd, "[Register] failed insert user"))?;
        let user = User::new(id, new_user.account, new_user.profile, new_user.kind);
        debug!(user_id = %user.id, "registered user with credentials");

        self.issue_for_new_user(&user, &cmd.push_token, &cmd).await
    }

    /// Unregisters the device's push token.
    pub async fn logout(&self, req: LogoutRequest) -> Result<MessageResult, ServiceError> {
        let cmd = req.validate()?;

        self.notifier
            .remove_push_token(&cmd.user_id, &cmd.push_token)
            .await
            .map_err(|e| self.classify(e, &cmd, "[Logout] failed remove push token"))?;

        Ok(MessageResult::success())
    }

    async fn issue_for_new_user(
        &self,
        user: &User,
        push_token: &str,
        payload: &(dyn std::fmt::Debug + Sync),
    ) -> Result<TokenResult, ServiceError> {
        self.notifier
            .add_push_token(&user.id, push_token)
            .await
            .map_err(|e| self.internal(e, payload, "[Register] failed add notification push token"))?;

        let token = self
            .auth
            .generate_token(user)
            .await
            .map_err(|e| self.internal(e, payload, "[Register] failed generate token"))?;

        Ok(TokenResult { token })
    }
}
