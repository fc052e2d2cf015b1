use migration::{Migrator, MigratorTrait};
use sea_orm_migration::sea_orm::{ConnectOptions, ConnectionTrait, Database, Statement};

#[test]
fn migrator_lists_schema_then_seed() {
    let migrations = Migrator::migrations();
    let names: Vec<&str> = migrations.iter().map(|m| m.name()).collect();
    assert_eq!(names, ["m0001_create_tables", "m0002_seed_reference_data"]);
}

#[tokio::test]
async fn up_and_down_run_on_sqlite() {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1);
    let db = Database::connect(opts).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(
            backend,
            "SELECT COUNT(*) AS n FROM relic_set".to_owned(),
        ))
        .await
        .unwrap()
        .unwrap();
    let sets: i64 = row.try_get("", "n").unwrap();
    assert_eq!(sets, 5);

    Migrator::down(&db, None).await.unwrap();
    assert!(
        db.query_one(Statement::from_string(
            backend,
            "SELECT COUNT(*) FROM character_build".to_owned(),
        ))
        .await
        .is_err()
    );
}
