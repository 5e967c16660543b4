use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_profiles_table::Profiles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // admin_roles
        // permissions: {"version": 1, "grants": ["manage_users", ...]}
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(AdminRoles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminRoles::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(
                        ColumnDef::new(AdminRoles::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(AdminRoles::Permissions)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminRoles::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(AdminRoles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // administrators
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Administrators::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Administrators::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Administrators::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Administrators::RoleId).uuid().not_null())
                    .col(
                        ColumnDef::new(Administrators::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Administrators::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_administrators_user_id")
                            .from(Administrators::Table, Administrators::UserId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_administrators_role_id")
                            .from(Administrators::Table, Administrators::RoleId)
                            .to(AdminRoles::Table, AdminRoles::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // admin_logs (append-only)
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(AdminLogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AdminLogs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(AdminLogs::AdminId).uuid().not_null())
                    .col(
                        ColumnDef::new(AdminLogs::ActionType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminLogs::TargetType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AdminLogs::TargetId).uuid())
                    .col(
                        ColumnDef::new(AdminLogs::Details)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(AdminLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_admin_logs_created_at
                ON admin_logs (created_at DESC);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                INSERT INTO admin_roles (name, permissions)
                VALUES (
                    'super_admin',
                    '{"version": 1, "grants": ["view_dashboard", "manage_users", "manage_companies", "manage_jobs", "manage_payments", "manage_subscriptions", "manage_settings", "manage_admins", "view_logs"]}'
                )
                ON CONFLICT (name) DO NOTHING;
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Administrators::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminRoles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminRoles {
    Table,
    Id,
    Name,
    Permissions,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Administrators {
    Table,
    Id,
    UserId,
    RoleId,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AdminLogs {
    Table,
    Id,
    AdminId,
    ActionType,
    TargetType,
    TargetId,
    Details,
    CreatedAt,
}
