use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

/// Connect and make sure the schema exists.
///
/// Every store call borrows a pooled connection for its own duration and hands it
/// back when the call completes or is dropped, so no handle outlives a request.
pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);

    // Each SQLite in-memory connection is its own database: keep exactly one.
    if database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }

    let db = Database::connect(options).await?;

    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            date_of_birth TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_customers_name ON customers (last_name, first_name)"
            .to_owned(),
    ))
    .await?;

    Ok(())
}
