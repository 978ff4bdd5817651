use crate::{
    config::FeatureConfig,
    course_creators::views::load_course_creator,
    database::error::RepositoryError,
    models::{Account, CreatorStatus},
    utils::state::AppState,
};

use super::errors::AuthorizationError;

/// Guard for every operation that changes someone's creator status.
pub fn require_staff(caller: &Account) -> Result<(), AuthorizationError> {
    if caller.is_staff {
        Ok(())
    } else {
        tracing::warn!(caller = %caller.username, "Rejected creator status change from non-staff user");
        Err(AuthorizationError::PermissionDenied(caller.username.clone()))
    }
}

/// Returns whether `user` may create courses.
///
/// The stored status only counts when the creator group feature is enabled;
/// with the flag off nobody is in the group. A user without a record is not
/// in the group either.
pub async fn is_user_in_creator_group(
    state: &AppState,
    features: FeatureConfig,
    user: &Account,
) -> Result<bool, RepositoryError> {
    if !features.enable_creator_group {
        return Ok(false);
    }

    let record = load_course_creator(state, &user.username).await?;
    Ok(matches!(
        record.map(|r| r.status),
        Some(CreatorStatus::Granted)
    ))
}
