use std::{fmt, str::FromStr};

use chrono::Utc;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Approval state of a user's request to author courses.
///
/// Stored as a single character so the column stays compatible with the
/// legacy table layout.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum CreatorStatus {
    #[sea_orm(string_value = "u")]
    #[serde(rename = "u")]
    Unrequested,
    #[sea_orm(string_value = "p")]
    #[serde(rename = "p")]
    Pending,
    #[sea_orm(string_value = "g")]
    #[serde(rename = "g")]
    Granted,
    #[sea_orm(string_value = "d")]
    #[serde(rename = "d")]
    Denied,
}

impl CreatorStatus {
    /// The one-character code persisted in the `status` column.
    pub fn code(self) -> char {
        match self {
            CreatorStatus::Unrequested => 'u',
            CreatorStatus::Pending => 'p',
            CreatorStatus::Granted => 'g',
            CreatorStatus::Denied => 'd',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CreatorStatus::Unrequested => "unrequested",
            CreatorStatus::Pending => "pending",
            CreatorStatus::Granted => "granted",
            CreatorStatus::Denied => "denied",
        }
    }
}

impl fmt::Display for CreatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CreatorStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "u" | "unrequested" => Ok(CreatorStatus::Unrequested),
            "p" | "pending" => Ok(CreatorStatus::Pending),
            "g" | "granted" => Ok(CreatorStatus::Granted),
            "d" | "denied" => Ok(CreatorStatus::Denied),
            _ => Err(format!("Unknown creator status: {s}")),
        }
    }
}

// User accounts
pub mod users {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub username: String,
        pub email: String,
        pub is_staff: bool,
        pub is_active: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub type Account = users::Model;

impl Account {
    /// A regular, active, non-staff account.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            is_staff: false,
            is_active: true,
        }
    }

    pub fn with_staff(mut self, is_staff: bool) -> Self {
        self.is_staff = is_staff;
        self
    }
}

// Course creator entries, keyed by username rather than by a foreign key
pub mod course_creators {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "course_creators")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub username: String,
        pub status: CreatorStatus,
        pub state_changed: DateTimeUtc,
        pub note: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub type CourseCreatorRecord = course_creators::Model;

impl CourseCreatorRecord {
    pub fn new(username: impl Into<String>, status: CreatorStatus) -> Self {
        Self {
            username: username.into(),
            status,
            state_changed: Utc::now(),
            note: String::new(),
        }
    }
}
