use color_eyre::eyre::{Context, Result};
use course_creators::{
    auth::is_user_in_creator_group,
    config::Config,
    course_creators::{get_course_creator_status, CourseCreatorError},
    state::setup,
};
use dotenvy::dotenv;

/// Applies the schema and, given a username, reports that user's creator status.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();
    config_tracing();

    let config = Config::load().wrap_err("Failed to load configuration")?;
    let state = setup(&config).await?;

    let Some(username) = std::env::args().nth(1) else {
        tracing::info!("Course creator tables are up to date");
        return Ok(());
    };

    let Some(user) = state.account_repo.find_one_by(username.clone()).await? else {
        tracing::warn!(%username, "No such user");
        return Ok(());
    };

    match get_course_creator_status(&state, &user).await {
        Ok(status) => tracing::info!(%username, %status, "Course creator status"),
        Err(CourseCreatorError::StatusUnset(_)) => {
            tracing::info!(%username, "No course creator status recorded")
        }
        Err(e) => return Err(e).wrap_err("Failed to read course creator status"),
    }

    let in_group = is_user_in_creator_group(&state, config.features, &user).await?;
    tracing::info!(
        %username,
        in_group,
        enable_creator_group = config.features.enable_creator_group,
        "Course creator group membership"
    );
    Ok(())
}

fn config_tracing() {
    use tracing::Level;
    use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

    let tracing_layer = tracing_subscriber::fmt::layer();
    let filter = filter::Targets::new()
        .with_target("sqlx::query", Level::WARN)
        .with_target("sea_orm_migration", Level::INFO)
        .with_default(Level::DEBUG);

    tracing_subscriber::registry()
        .with(tracing_layer)
        .with(filter)
        .init();
}
