pub mod error;
pub mod queries;

pub use migrations::Migrator;

/// Database migrations module
pub mod migrations {
    use sea_orm_migration::prelude::*;

    /// Main migrator struct for database migrations
    pub struct Migrator;

    #[async_trait::async_trait]
    impl MigratorTrait for Migrator {
        fn migrations() -> Vec<Box<dyn MigrationTrait>> {
            vec![Box::new(tables::Migration)]
        }
    }

    /// Database tables module containing table creation migrations
    pub mod tables {
        use super::*;

        #[derive(DeriveMigrationName)]
        pub struct Migration;

        #[async_trait::async_trait]
        impl MigrationTrait for Migration {
            async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
                // Minimal account table, only what the creator workflow reads
                manager
                    .create_table(
                        Table::create()
                            .table(Users::Table)
                            .if_not_exists()
                            .col(
                                ColumnDef::new(Users::Username)
                                    .string()
                                    .not_null()
                                    .primary_key(),
                            )
                            .col(ColumnDef::new(Users::Email).string().not_null())
                            .col(
                                ColumnDef::new(Users::IsStaff)
                                    .boolean()
                                    .not_null()
                                    .default(false),
                            )
                            .col(
                                ColumnDef::new(Users::IsActive)
                                    .boolean()
                                    .not_null()
                                    .default(true),
                            )
                            .to_owned(),
                    )
                    .await?;

                // No foreign key to users: rows may outlive the account until reconciled
                manager
                    .create_table(
                        Table::create()
                            .table(CourseCreators::Table)
                            .if_not_exists()
                            .col(
                                ColumnDef::new(CourseCreators::Username)
                                    .string()
                                    .not_null()
                                    .primary_key(),
                            )
                            .col(
                                ColumnDef::new(CourseCreators::Status)
                                    .string_len(1)
                                    .not_null(),
                            )
                            .col(
                                ColumnDef::new(CourseCreators::StateChanged)
                                    .timestamp_with_time_zone()
                                    .not_null(),
                            )
                            .col(
                                ColumnDef::new(CourseCreators::Note)
                                    .string_len(512)
                                    .not_null()
                                    .default(""),
                            )
                            .to_owned(),
                    )
                    .await?;

                Ok(())
            }

            async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
                manager
                    .drop_table(Table::drop().table(CourseCreators::Table).to_owned())
                    .await?;
                manager
                    .drop_table(Table::drop().table(Users::Table).to_owned())
                    .await?;
                Ok(())
            }
        }

        #[derive(Iden)]
        enum Users {
            Table,
            Username,
            Email,
            IsStaff,
            IsActive,
        }

        #[derive(Iden)]
        enum CourseCreators {
            Table,
            Username,
            Status,
            StateChanged,
            Note,
        }
    }
}
