use crate::{
    auth::require_staff,
    database::error::RepositoryError,
    models::{Account, CourseCreatorRecord, CreatorStatus},
    utils::state::AppState,
};

use super::error::CourseCreatorError;

/// Adds `user` to the course creator table with status `unrequested`.
///
/// Only staff may call this. If the user already has an entry, whatever its
/// status, nothing changes.
pub async fn add_user_with_status_unrequested(
    state: &AppState,
    caller: &Account,
    user: &Account,
) -> Result<(), CourseCreatorError> {
    add_user_with_status(state, caller, user, CreatorStatus::Unrequested).await
}

/// Adds `user` to the course creator table with status `granted`.
///
/// Same rules as [`add_user_with_status_unrequested`]: an existing entry is
/// never overwritten.
pub async fn add_user_with_status_granted(
    state: &AppState,
    caller: &Account,
    user: &Account,
) -> Result<(), CourseCreatorError> {
    add_user_with_status(state, caller, user, CreatorStatus::Granted).await
}

/// Returns the creator status recorded for `user`.
///
/// A user with no entry yields [`CourseCreatorError::StatusUnset`], which is
/// distinct from every stored status.
pub async fn get_course_creator_status(
    state: &AppState,
    user: &Account,
) -> Result<CreatorStatus, CourseCreatorError> {
    load_course_creator(state, &user.username)
        .await?
        .map(|record| record.status)
        .ok_or_else(|| CourseCreatorError::StatusUnset(user.username.clone()))
}

/// Loads the entry for `username`, dropping it if its account is gone.
///
/// Entries are keyed by username, so they can outlive a deleted account.
/// Every read goes through here and removes such entries before anyone
/// observes them.
pub async fn load_course_creator(
    state: &AppState,
    username: &str,
) -> Result<Option<CourseCreatorRecord>, RepositoryError> {
    let Some(record) = state
        .course_creator_repo
        .find_one_by(username.to_owned())
        .await?
    else {
        return Ok(None);
    };

    if state
        .account_repo
        .find_one_by(username.to_owned())
        .await?
        .is_some()
    {
        return Ok(Some(record));
    }

    state
        .course_creator_repo
        .delete_by(username.to_owned())
        .await?;
    tracing::info!(%username, "Removed course creator entry for deleted user");
    Ok(None)
}

async fn add_user_with_status(
    state: &AppState,
    caller: &Account,
    user: &Account,
    status: CreatorStatus,
) -> Result<(), CourseCreatorError> {
    require_staff(caller)?;

    if let Some(existing) = load_course_creator(state, &user.username).await? {
        tracing::debug!(
            username = %user.username,
            current = %existing.status,
            requested = %status,
            "Course creator entry already exists; leaving it unchanged"
        );
        return Ok(());
    }

    state
        .course_creator_repo
        .insert_one(CourseCreatorRecord::new(user.username.clone(), status))
        .await?;
    tracing::info!(
        username = %user.username,
        %status,
        caller = %caller.username,
        "Added user to course creator table"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::*;
    use crate::{
        auth::{errors::AuthorizationError, is_user_in_creator_group},
        config::FeatureConfig,
        models::{course_creators, users},
        test_utils::{create_user, test_app_state, test_db},
    };

    struct Fixture {
        state: AppState,
        user: Account,
        admin: Account,
    }

    async fn setup() -> Fixture {
        let state = test_app_state(test_db().await);
        let user = create_user(&state, "test_user", "test_user+courses@edx.org").await;
        // Staff only in memory, like an admin whose flag was never saved
        let admin = create_user(&state, "Mark", "admin+courses@edx.org")
            .await
            .with_staff(true);
        Fixture { state, user, admin }
    }

    #[tokio::test]
    async fn test_staff_permission_required() {
        let Fixture { state, user, .. } = setup().await;

        let result = add_user_with_status_granted(&state, &user, &user).await;
        assert!(matches!(
            result,
            Err(CourseCreatorError::PermissionDenied(
                AuthorizationError::PermissionDenied(_)
            ))
        ));

        let result = add_user_with_status_unrequested(&state, &user, &user).await;
        assert!(matches!(
            result,
            Err(CourseCreatorError::PermissionDenied(_))
        ));

        // Nothing was written
        let stored = state
            .course_creator_repo
            .find_one_by(user.username.clone())
            .await
            .unwrap();
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn test_table_initially_empty() {
        let Fixture { state, user, .. } = setup().await;

        let result = get_course_creator_status(&state, &user).await;
        assert!(matches!(result, Err(CourseCreatorError::StatusUnset(name)) if name == "test_user"));
    }

    #[tokio::test]
    async fn test_add_unrequested() {
        let Fixture { state, user, admin } = setup().await;

        add_user_with_status_unrequested(&state, &admin, &user)
            .await
            .unwrap();
        let status = get_course_creator_status(&state, &user).await.unwrap();
        assert_eq!(status, CreatorStatus::Unrequested);
        assert_eq!(status.code(), 'u');

        // Adding again is a no-op, even with a different status
        add_user_with_status_granted(&state, &admin, &user)
            .await
            .unwrap();
        assert_eq!(
            get_course_creator_status(&state, &user).await.unwrap(),
            CreatorStatus::Unrequested
        );
    }

    #[tokio::test]
    async fn test_add_granted() {
        let Fixture { state, user, admin } = setup().await;
        let features = FeatureConfig {
            enable_creator_group: true,
        };

        assert!(!is_user_in_creator_group(&state, features, &user)
            .await
            .unwrap());

        add_user_with_status_granted(&state, &admin, &user)
            .await
            .unwrap();
        assert_eq!(
            get_course_creator_status(&state, &user).await.unwrap(),
            CreatorStatus::Granted
        );

        // Adding again is a no-op, even with a different status
        add_user_with_status_unrequested(&state, &admin, &user)
            .await
            .unwrap();
        assert_eq!(
            get_course_creator_status(&state, &user).await.unwrap(),
            CreatorStatus::Granted
        );

        assert!(is_user_in_creator_group(&state, features, &user)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_delete_bad_user() {
        let Fixture { state, user, admin } = setup().await;

        add_user_with_status_unrequested(&state, &admin, &user)
            .await
            .unwrap();
        assert!(state
            .account_repo
            .delete_by(user.username.clone())
            .await
            .unwrap());

        // The row is still there until something loads it
        assert!(state
            .course_creator_repo
            .find_one_by(user.username.clone())
            .await
            .unwrap()
            .is_some());

        let result = get_course_creator_status(&state, &user).await;
        assert!(matches!(result, Err(CourseCreatorError::StatusUnset(_))));

        let stored = state
            .course_creator_repo
            .find_one_by(user.username.clone())
            .await
            .unwrap();
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn test_readd_after_orphan_cleanup() {
        let Fixture { state, user, admin } = setup().await;

        add_user_with_status_unrequested(&state, &admin, &user)
            .await
            .unwrap();
        state
            .account_repo
            .delete_by(user.username.clone())
            .await
            .unwrap();

        assert!(matches!(
            get_course_creator_status(&state, &user).await,
            Err(CourseCreatorError::StatusUnset(_))
        ));

        // The stale entry is gone, so a recreated account starts from scratch
        let user = create_user(&state, "test_user", "test_user+courses@edx.org").await;
        add_user_with_status_granted(&state, &admin, &user)
            .await
            .unwrap();
        assert_eq!(
            get_course_creator_status(&state, &user).await.unwrap(),
            CreatorStatus::Granted
        );
    }

    #[tokio::test]
    async fn test_load_keeps_entry_of_live_user() {
        let record = CourseCreatorRecord::new("test_user", CreatorStatus::Pending);
        let account = Account::new("test_user", "test_user+courses@edx.org");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results::<course_creators::Model, Vec<_>, _>([vec![record.clone()]])
                .append_query_results::<users::Model, Vec<_>, _>([vec![account]])
                .into_connection(),
        );
        let state = test_app_state(db);

        let loaded = load_course_creator(&state, "test_user").await.unwrap();
        assert_eq!(loaded, Some(record));
    }

    #[tokio::test]
    async fn test_load_deletes_orphaned_entry() {
        let record = CourseCreatorRecord::new("test_user", CreatorStatus::Granted);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results::<course_creators::Model, Vec<_>, _>([vec![record]])
                .append_query_results::<users::Model, Vec<_>, _>([vec![]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let state = test_app_state(db.clone());

        let loaded = load_course_creator(&state, "test_user").await.unwrap();
        assert!(loaded.is_none());
        drop(state);

        // select entry, select account, delete entry
        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        assert_eq!(log.len(), 3);
    }
}
