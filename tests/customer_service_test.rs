use std::sync::Arc;

use chrono::{Months, NaiveDate, NaiveDateTime, Utc};
use customers_api::db;
use customers_api::domain::{Customer, CustomerDto, CustomerInput, CustomerRepository, DomainError};
use customers_api::infrastructure::SeaOrmCustomerRepository;
use customers_api::models::customer;
use customers_api::seed;
use customers_api::services::CustomerService;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    // In-memory SQLite for testing
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

fn years_ago(years: u32) -> NaiveDateTime {
    Utc::now()
        .naive_utc()
        .checked_sub_months(Months::new(years * 12))
        .expect("date in range")
}

// Helper to insert customers directly through the entity, bypassing the service
async fn insert_customers(db: &DatabaseConnection, rows: &[(&str, &str, u32)]) {
    let models = rows.iter().map(|(first, last, age)| customer::ActiveModel {
        first_name: Set(first.to_string()),
        last_name: Set(last.to_string()),
        date_of_birth: Set(years_ago(*age)),
        ..Default::default()
    });
    customer::Entity::insert_many(models)
        .exec(db)
        .await
        .expect("Failed to seed customers");
}

async fn setup_seeded_service() -> CustomerService {
    let db = setup_test_db().await;
    insert_customers(
        &db,
        &[("Salman", "Rasheed", 15), ("Raheem", "Khan", 21), ("Baba", "Ganouj", 63)],
    )
    .await;
    CustomerService::new(Arc::new(SeaOrmCustomerRepository::new(db)))
}

fn input(first: &str, last: &str, dob: &str) -> CustomerInput {
    CustomerDto::new(first, last, dob)
        .validate()
        .expect("test input should be valid")
}

fn mathew_dob() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1984, 12, 20)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn test_list_customers_returns_three() {
    let service = setup_seeded_service().await;

    let customers = service.list_customers().await.expect("list failed");

    assert_eq!(customers.len(), 3);
    let ids: Vec<i32> = customers.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_get_customer_by_id_two() {
    let service = setup_seeded_service().await;

    let customer = service
        .get_customer(2)
        .await
        .expect("get failed")
        .expect("customer 2 should exist");

    assert_eq!(customer.first_name, "Raheem");
    assert_eq!(customer.last_name, "Khan");
}

#[tokio::test]
async fn test_get_missing_customer_is_none() {
    let service = setup_seeded_service().await;

    let customer = service.get_customer(999).await.expect("get failed");

    assert!(customer.is_none());
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let service = setup_seeded_service().await;

    let created = service
        .create_customer(input("Mathew", "Martin", "1984-12-20"))
        .await
        .expect("create failed");

    assert_eq!(created.first_name, "Mathew");
    assert_eq!(created.last_name, "Martin");
    assert_eq!(created.date_of_birth, mathew_dob());
    assert_eq!(created.id, 4);

    let fetched = service
        .get_customer(created.id)
        .await
        .expect("get failed")
        .expect("created customer should exist");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_customer_exists_ignores_case() {
    let service = setup_seeded_service().await;

    assert!(
        service
            .customer_exists(&input("raheem", "khan", "1990-01-01"))
            .await
            .unwrap()
    );
    assert!(
        service
            .customer_exists(&input("RAHEEM", "Khan", "1990-01-01"))
            .await
            .unwrap()
    );
    // Both names must match
    assert!(
        !service
            .customer_exists(&input("Salman", "Khan", "1990-01-01"))
            .await
            .unwrap()
    );
    assert!(
        !service
            .customer_exists(&input("Mathew", "Martin", "1990-01-01"))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_create_does_not_reject_duplicates() {
    let service = setup_seeded_service().await;

    service
        .create_customer(input("Raheem", "Khan", "1990-01-01"))
        .await
        .expect("store permits duplicates");

    assert_eq!(service.list_customers().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_update_customer_with_id_one() {
    let service = setup_seeded_service().await;

    let updated = service
        .update_customer(1, input("Mathew", "Martin", "1984/12/20"))
        .await
        .expect("update failed");
    assert_eq!(updated.id, 1);

    let customer = service.get_customer(1).await.unwrap().unwrap();
    assert_eq!(customer.id, 1);
    assert_eq!(customer.first_name, "Mathew");
    assert_eq!(customer.last_name, "Martin");
    assert_eq!(customer.date_of_birth, mathew_dob());
    assert_eq!(service.list_customers().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_update_missing_customer_is_not_found() {
    let service = setup_seeded_service().await;

    let result = service
        .update_customer(42, input("Mathew", "Martin", "1984-12-20"))
        .await;

    assert!(matches!(result, Err(DomainError::NotFound)));
    assert_eq!(service.list_customers().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_delete_customer_by_id_two() {
    let service = setup_seeded_service().await;

    service.delete_customer(2).await.expect("delete failed");

    assert!(service.get_customer(2).await.unwrap().is_none());
    let remaining = service.list_customers().await.unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|c| c.id != 2));
}

#[tokio::test]
async fn test_delete_missing_customer_is_not_found() {
    let service = setup_seeded_service().await;

    let result = service.delete_customer(2_000).await;

    assert!(matches!(result, Err(DomainError::NotFound)));
    assert_eq!(service.list_customers().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_deleted_id_is_not_reused() {
    let service = setup_seeded_service().await;

    service.delete_customer(3).await.unwrap();
    let created = service
        .create_customer(input("Mathew", "Martin", "1984-12-20"))
        .await
        .unwrap();

    assert_eq!(created.id, 4);
}

#[tokio::test]
async fn test_search_customer_by_khan() {
    let db = setup_test_db().await;
    insert_customers(
        &db,
        &[("Salman", "Khan", 15), ("Raheem", "Khan", 21), ("Baba", "Ganouj", 63)],
    )
    .await;
    let service = CustomerService::new(Arc::new(SeaOrmCustomerRepository::new(db)));

    let customers = service.find_customers_by_name("Khan").await.unwrap();

    assert_eq!(customers.len(), 2);
    let mut first_names: Vec<&str> = customers.iter().map(|c| c.first_name.as_str()).collect();
    first_names.sort();
    assert_eq!(first_names, vec!["Raheem", "Salman"]);
}

#[tokio::test]
async fn test_search_matches_substrings_of_either_name_ignoring_case() {
    let service = setup_seeded_service().await;

    let by_first = service.find_customers_by_name("alm").await.unwrap();
    assert_eq!(by_first.len(), 1);
    assert_eq!(by_first[0].first_name, "Salman");

    let by_last = service.find_customers_by_name("GANO").await.unwrap();
    assert_eq!(by_last.len(), 1);
    assert_eq!(by_last[0].last_name, "Ganouj");

    // "ra" is in Rasheed and Raheem
    assert_eq!(service.find_customers_by_name("ra").await.unwrap().len(), 2);
    assert!(service.find_customers_by_name("zzz").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let service = setup_seeded_service().await;

    assert!(service.find_customers_by_name("%").await.unwrap().is_empty());
    assert!(service.find_customers_by_name("_").await.unwrap().is_empty());
    assert!(service.find_customers_by_name("R%d").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_seed_scenario() {
    let service = setup_seeded_service().await;

    assert_eq!(service.list_customers().await.unwrap().len(), 3);

    let raheem = service.get_customer(2).await.unwrap().unwrap();
    assert_eq!((raheem.first_name.as_str(), raheem.last_name.as_str()), ("Raheem", "Khan"));

    let created = service
        .create_customer(input("Mathew", "Martin", "1984-12-20"))
        .await
        .unwrap();
    assert_eq!(created.first_name, "Mathew");
    assert_eq!(created.last_name, "Martin");
    assert_eq!(created.date_of_birth, mathew_dob());
    assert!(created.id > 3);

    service
        .update_customer(1, input("Mathew", "Martin", "1984-12-20"))
        .await
        .unwrap();
    let first = service.get_customer(1).await.unwrap().unwrap();
    assert_eq!((first.first_name.as_str(), first.last_name.as_str()), ("Mathew", "Martin"));

    service.delete_customer(2).await.unwrap();
    // Three seeded plus one created, minus one deleted
    assert_eq!(service.list_customers().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_seed_demo_data_only_fills_empty_table() {
    let db = setup_test_db().await;

    let inserted = seed::seed_demo_data(&db).await.expect("seed failed");
    assert_eq!(inserted, 5);

    let again = seed::seed_demo_data(&db).await.expect("second seed failed");
    assert_eq!(again, 0);

    let service = CustomerService::new(Arc::new(SeaOrmCustomerRepository::new(db)));
    let customers = service.list_customers().await.unwrap();
    assert_eq!(customers.len(), 5);
    assert_eq!(customers[0].first_name, "Atira");
    assert_eq!(customers[4].last_name, "Watson");
}

#[tokio::test]
async fn test_repository_update_and_delete_of_missing_row_are_not_found() {
    let db = setup_test_db().await;
    insert_customers(&db, &[("Raheem", "Khan", 21)]).await;
    let repo = SeaOrmCustomerRepository::new(db);

    let ghost = Customer {
        id: 77,
        first_name: "Mathew".to_string(),
        last_name: "Martin".to_string(),
        date_of_birth: mathew_dob(),
    };
    assert!(matches!(repo.update(ghost).await, Err(DomainError::NotFound)));
    assert!(matches!(repo.delete(77).await, Err(DomainError::NotFound)));

    // The existing row is untouched
    let remaining = repo.find_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].first_name, "Raheem");
}
