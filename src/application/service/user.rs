//! Profile, user lookup, menfess list and follow toggle.

use super::{GetMenfessListResult, MenfessService, MessageResult};
use crate::application::requests::{
    FollowUserRequest, GetMenfessListRequest, GetUserRequest, UpdateProfileRequest, Validate,
};
use crate::application::ServiceError;
use crate::domain::user::{FollowStatus, Profile, User};

impl MenfessService {
    /// Overwrites the caller's profile. Fails with `UserNotFound` before
    /// saving anything if the user does not exist.
    pub async fn update_profile(
        &self,
        req: UpdateProfileRequest,
    ) -> Result<MessageResult, ServiceError> {
        let cmd = req.validate()?;

        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await
            .map_err(|e| self.classify(e, &cmd, "[UpdateProfile] failed get user"))?;

        user.profile = Profile::new(cmd.name.clone(), cmd.avatar.clone(), cmd.bio.clone());

        self.users
            .save_profile(&user)
            .await
            .map_err(|e| self.classify(e, &cmd, "[UpdateProfile] failed save profile"))?;

        Ok(MessageResult::success())
    }

    pub async fn get_user(&self, req: GetUserRequest) -> Result<User, ServiceError> {
        let cmd = req.validate()?;

        self.users
            .find_by_id(&cmd.id)
            .await
            .map_err(|e| self.classify(e, &cmd, "[GetUser] failed get user"))
    }

    /// Menfess accounts plus the IDs the caller already follows.
    pub async fn get_menfess_list(
        &self,
        req: GetMenfessListRequest,
    ) -> Result<GetMenfessListResult, ServiceError> {
        let cmd = req.validate()?;

        let menfess_list = self
            .users
            .find_menfess_list()
            .await
            .map_err(|e| self.internal(e, &cmd, "[GetMenfessList] failed get menfess list"))?;

        let followed_ids = self
            .users
            .get_followed_ids(&cmd.user_id)
            .await
            .map_err(|e| self.internal(e, &cmd, "[GetMenfessList] failed get followed user"))?;

        Ok(GetMenfessListResult {
            menfess_list,
            followed_ids,
        })
    }

    /// Follows `followed_id`, or unfollows it if already followed.
    pub async fn follow_user(&self, req: FollowUserRequest) -> Result<MessageResult, ServiceError> {
        let cmd = req.validate()?;

        let followed = self
            .users
            .get_followed_ids(&cmd.user_id)
            .await
            .map_err(|e| self.internal(e, &cmd, "[FollowUser] failed get followed user"))?;

        let status = FollowStatus::toggled_from(followed.contains(&cmd.followed_id));

        self.users
            .update_follow_status(&cmd.user_id, &cmd.followed_id, status)
            .await
            .map_err(|e| self.internal(e, &cmd, "[FollowUser] failed update follow status"))?;

        Ok(MessageResult::success())
    }
}
