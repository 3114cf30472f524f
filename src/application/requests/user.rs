//! Profile, user lookup and follow requests.

use crate::domain::foundation::UserId;

use super::{user_id, Validate};
use crate::application::ServiceError;

#[derive(Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    pub user_id: String,
    pub name: String,
    pub avatar: String,
    pub bio: String,
}

#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    /// Trimmed, non-empty.
    pub name: String,
    /// Trimmed, non-empty.
    pub avatar: String,
    pub bio: String,
}

impl Validate for UpdateProfileRequest {
    type Command = UpdateProfileCommand;

    fn validate(self) -> Result<UpdateProfileCommand, ServiceError> {
        let user_id = user_id(self.user_id, ServiceError::InvalidUserId)?;
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ServiceError::InvalidName);
        }
        let avatar = self.avatar.trim();
        if avatar.is_empty() {
            return Err(ServiceError::InvalidAvatar);
        }
        Ok(UpdateProfileCommand {
            user_id,
            name: name.to_string(),
            avatar: avatar.to_string(),
            bio: self.bio,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetUserRequest {
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct GetUserCommand {
    pub id: UserId,
}

impl Validate for GetUserRequest {
    type Command = GetUserCommand;

    fn validate(self) -> Result<GetUserCommand, ServiceError> {
        Ok(GetUserCommand {
            id: user_id(self.id, ServiceError::InvalidId)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetMenfessListRequest {
    pub user_id: String,
}

#[derive(Debug, Clone)]
pub struct GetMenfessListCommand {
    pub user_id: UserId,
}

impl Validate for GetMenfessListRequest {
    type Command = GetMenfessListCommand;

    fn validate(self) -> Result<GetMenfessListCommand, ServiceError> {
        Ok(GetMenfessListCommand {
            user_id: user_id(self.user_id, ServiceError::InvalidUserId)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct FollowUserRequest {
    pub user_id: String,
    pub followed_id: String,
}

#[derive(Debug, Clone)]
pub struct FollowUserCommand {
    pub user_id: UserId,
    pub followed_id: UserId,
}

impl Validate for FollowUserRequest {
    type Command = FollowUserCommand;

    fn validate(self) -> Result<FollowUserCommand, ServiceError> {
        Ok(FollowUserCommand {
            user_id: user_id(self.user_id, ServiceError::InvalidUserId)?,
            followed_id: user_id(self.followed_id, ServiceError::InvalidFollowedId)?,
        })
    }
}
