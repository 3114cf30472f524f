//! Login, registration and logout requests.

use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::UserId;

use super::{normalize_email, required, user_id, Validate};
use crate::application::ServiceError;

#[derive(Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
    pub push_token: String,
}

#[derive(Debug)]
pub struct LoginCommand {
    /// Lowercased.
    pub email: String,
    pub password: SecretString,
    pub push_token: String,
}

impl Validate for LoginRequest {
    type Command = LoginCommand;

    fn validate(self) -> Result<LoginCommand, ServiceError> {
        let email = normalize_email(&self.email)?;
        if self.password.expose_secret().is_empty() {
            return Err(ServiceError::InvalidPassword);
        }
        let push_token = required(self.push_token, ServiceError::InvalidPushToken)?;
        Ok(LoginCommand {
            email,
            password: self.password,
            push_token,
        })
    }
}

/// Anonymous registration: a device token and nothing else.
#[derive(Debug, Clone, Default)]
pub struct RegisterRequest {
    pub push_token: String,
}

#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub push_token: String,
}

impl Validate for RegisterRequest {
    type Command = RegisterCommand;

    fn validate(self) -> Result<RegisterCommand, ServiceError> {
        Ok(RegisterCommand {
            push_token: required(self.push_token, ServiceError::InvalidPushToken)?,
        })
    }
}

/// Email/password registration.
#[derive(Debug)]
pub struct CredentialRegisterRequest {
    pub email: String,
    pub password: SecretString,
    pub push_token: String,
}

#[derive(Debug)]
pub struct CredentialRegisterCommand {
    pub email: String,
    pub password: SecretString,
    pub push_token: String,
}

impl Validate for CredentialRegisterRequest {
    type Command = CredentialRegisterCommand;

    fn validate(self) -> Result<CredentialRegisterCommand, ServiceError> {
        let email = normalize_email(&self.email)?;
        if self.password.expose_secret().is_empty() {
            return Err(ServiceError::InvalidPassword);
        }
        let push_token = required(self.push_token, ServiceError::InvalidPushToken)?;
        Ok(CredentialRegisterCommand {
            email,
            password: self.password,
            push_token,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogoutRequest {
    pub user_id: String,
    pub push_token: String,
}

#[derive(Debug, Clone)]
pub struct LogoutCommand {
    pub user_id: UserId,
    pub push_token: String,
}

impl Validate for LogoutRequest {
    type Command = LogoutCommand;

    fn validate(self) -> Result<LogoutCommand, ServiceError> {
        Ok(LogoutCommand {
            user_id: user_id(self.user_id, ServiceError::InvalidUserId)?,
            push_token: required(self.push_token, ServiceError::InvalidPushToken)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(email: &str, password: &str, push_token: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: SecretString::new(password.to_string()),
            push_token: push_token.to_string(),
        }
    }

    #[test]
    fn login_normalizes_email() {
        let cmd = login(" Sulam3010@Gmail.com", "password", "sadf1234fas")
            .validate()
            .unwrap();
        assert_eq!(cmd.email, "sulam3010@gmail.com");
        assert_eq!(cmd.push_token, "sadf1234fas");
    }

    #[test]
    fn login_checks_fields_in_order() {
        assert_eq!(
            login("not-an-email", "", "").validate().unwrap_err(),
            ServiceError::InvalidEmail
        );
        assert_eq!(
            login("a@b.com", "", "").validate().unwrap_err(),
            ServiceError::InvalidPassword
        );
        assert_eq!(
            login("a@b.com", "pw", "").validate().unwrap_err(),
            ServiceError::InvalidPushToken
        );
    }

    #[test]
    fn login_debug_redacts_password() {
        let rendered = format!("{:?}", login("a@b.com", "hunter22", "tok"));
        assert!(!rendered.contains("hunter22"));
    }

    #[test]
    fn register_requires_push_token() {
        let err = RegisterRequest::default().validate().unwrap_err();
        assert_eq!(err, ServiceError::InvalidPushToken);

        let cmd = RegisterRequest {
            push_token: "tok".to_string(),
        }
        .validate()
        .unwrap();
        assert_eq!(cmd.push_token, "tok");
    }

    #[test]
    fn credential_register_validates_like_login() {
        let req = CredentialRegisterRequest {
            email: "NEW@mail.com".to_string(),
            password: SecretString::new(String::new()),
            push_token: "tok".to_string(),
        };
        assert_eq!(req.validate().unwrap_err(), ServiceError::InvalidPassword);
    }

    #[test]
    fn logout_requires_user_then_token() {
        assert_eq!(
            LogoutRequest::default().validate().unwrap_err(),
            ServiceError::InvalidUserId
        );
        let req = LogoutRequest {
            user_id: "u1".to_string(),
            push_token: String::new(),
        };
        assert_eq!(req.validate().unwrap_err(), ServiceError::InvalidPushToken);
    }
}
