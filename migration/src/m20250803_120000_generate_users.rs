use sea_orm_migration::prelude::*;
use sha2::Digest as _;

use crate::m20250802_091500_init::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

const ADMIN_UUID: u128 = 0xad314;
const RECRUITER_UUID: u128 = 0x5caff;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let time = Expr::val("2025-08-03T12:00:00.000Z").cast_as("timestamptz");

        let hashed_password = &sha2::Sha256::digest("admin:admin")[..];

        manager
            .exec_stmt(Query::insert()
                .into_table(User::Table)
                .columns(["id", "created_at", "updated_at", "username", "password", "role"])
                .values_panic([Expr::val(format!("{ADMIN_UUID:032x}")).cast_as("uuid"), time.clone(), time.clone(), "admin".into(), hashed_password.into(), Expr::val("admin").cast_as("role_type")])
                .to_owned()
        ).await?;

        let hashed_password = &sha2::Sha256::digest("recruiter:recruiter")[..];

        manager
            .exec_stmt(Query::insert()
                .into_table(User::Table)
                .columns(["id", "created_at", "updated_at", "username", "password", "role"])
                .values_panic([Expr::val(format!("{RECRUITER_UUID:032x}")).cast_as("uuid"), time.clone(), time.clone(), "recruiter".into(), hashed_password.into(), Expr::val("recruiter").cast_as("role_type")])
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for uuid in [ADMIN_UUID, RECRUITER_UUID] {
            manager
                .exec_stmt(Query::delete()
                    .from_table(User::Table)
                    .and_where(Expr::col("id").eq(Expr::val(format!("{uuid:032x}")).cast_as("uuid")))
                    .to_owned()
            ).await?;
        }

        Ok(())
    }
}
