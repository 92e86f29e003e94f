//! PostgreSQL-backed customer and administrator account repositories.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountRepositoryError, AdminRepository, UserAccountRepository};
use crate::domain::{AdminAccount, NewUser, UserAccount, UserId};

use super::diesel_helpers::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{AdminRow, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{admins, users};

fn pool_error(error: PoolError) -> AccountRepositoryError {
    map_pool_error(error, AccountRepositoryError::connection)
}

fn diesel_error(operation: &'static str) -> impl FnOnce(DieselError) -> AccountRepositoryError {
    move |error| {
        if is_unique_violation(&error) {
            return AccountRepositoryError::duplicate(error.to_string());
        }
        map_diesel_error(
            error,
            operation,
            AccountRepositoryError::query,
            AccountRepositoryError::connection,
        )
    }
}

/// Diesel-backed implementation of [`UserAccountRepository`].
#[derive(Clone)]
pub struct DieselUserAccountRepository {
    pool: DbPool,
}

impl DieselUserAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserAccountRepository for DieselUserAccountRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error("find_by_email"))?;
        Ok(row.map(UserAccount::from))
    }

    async fn exists_with_email_or_mobile(
        &self,
        email: &str,
        mobile: &str,
    ) -> Result<bool, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::select(diesel::dsl::exists(
            users::table.filter(users::email.eq(email).or(users::mobile.eq(mobile))),
        ))
        .get_result(&mut conn)
        .await
        .map_err(diesel_error("exists_with_email_or_mobile"))
    }

    async fn insert(&self, user: &NewUser) -> Result<UserId, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let id: i64 = diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(diesel_error("insert_user"))?;
        Ok(UserId::new(id))
    }
}

/// Diesel-backed implementation of [`AdminRepository`].
#[derive(Clone)]
pub struct DieselAdminRepository {
    pool: DbPool,
}

impl DieselAdminRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for DieselAdminRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminAccount>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<AdminRow> = admins::table
            .filter(admins::username.eq(username))
            .select(AdminRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error("find_by_username"))?;
        Ok(row.map(AdminAccount::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind};
    use rstest::rstest;

    struct Info(&'static str);

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[rstest]
    fn unique_violations_map_to_duplicate() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(Info("duplicate key value violates unique constraint")),
        );
        let mapped = diesel_error("insert_user")(error);
        assert!(matches!(mapped, AccountRepositoryError::Duplicate { .. }));
    }

    #[rstest]
    fn other_failures_map_to_query() {
        let mapped = diesel_error("find_by_email")(DieselError::NotFound);
        assert!(matches!(mapped, AccountRepositoryError::Query { .. }));
    }
}
