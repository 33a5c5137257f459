use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Flight, User};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Flight)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements generated from entities, executed in insertion order.
    tables: Vec<TableCreateStatement>,
    /// Raw SQL executed after all tables exist.
    statements: Vec<String>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            statements: Vec::new(),
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Tables with foreign keys should be added after the tables they reference.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds a raw SQL statement to run once the tables are created.
    pub fn with_statement(mut self, sql: impl Into<String>) -> Self {
        self.statements.push(sql.into());
        self
    }

    /// Adds every table used by subscription operations.
    ///
    /// Creates User, Flight, FlightSubscription and FlightViewHistory in dependency order,
    /// plus the partial unique index guarding one ACTIVE subscription per (flight, user)
    /// and the unique (user, flight) index on view history.
    pub fn with_subscription_tables(self) -> Self {
        self.with_table(User)
            .with_table(Flight)
            .with_table(FlightSubscription)
            .with_table(FlightViewHistory)
            .with_statement(migration::CREATE_ACTIVE_SUBSCRIPTION_INDEX)
            .with_statement(migration::CREATE_FLIGHT_VIEW_HISTORY_INDEX)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;
        setup.with_statements(self.statements).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
