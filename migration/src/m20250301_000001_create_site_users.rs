use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SiteUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SiteUsers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SiteUsers::Username)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SiteUsers::PasswordHash)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SiteUsers::Enabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SiteUsers::AccountNonExpired)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SiteUsers::CredentialsNonExpired)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SiteUsers::AccountNonLocked)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SiteUsers::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SiteUsers::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookups are by username only, so the index doubles as the uniqueness guard
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_site_users_username")
                    .table(SiteUsers::Table)
                    .col(SiteUsers::Username)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SiteUsers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum SiteUsers {
    Table,
    Id,
    Username,
    PasswordHash,
    Enabled,
    AccountNonExpired,
    CredentialsNonExpired,
    AccountNonLocked,
    CreatedAt,
    UpdatedAt,
}
