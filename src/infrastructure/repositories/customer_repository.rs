//! SeaORM implementation of CustomerRepository

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{Customer, CustomerInput, CustomerRepository, DomainError, NamePredicate};
use crate::models::customer::{ActiveModel, Column, Entity as CustomerEntity};

const LIKE_ESCAPE: char = '!';

/// SeaORM-based implementation of CustomerRepository
pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// `LOWER(column)`, so comparisons ignore case on every backend
fn lower(column: Column) -> Expr {
    Expr::expr(Func::lower(Expr::col(column)))
}

/// Escape LIKE wildcards so the filter only ever matches literally
fn contains_pattern(text: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.to_lowercase().chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape(LIKE_ESCAPE)
}

fn condition_for(predicate: &NamePredicate) -> Condition {
    match predicate {
        NamePredicate::SameName {
            first_name,
            last_name,
        } => Condition::all()
            .add(lower(Column::FirstName).eq(first_name.to_lowercase()))
            .add(lower(Column::LastName).eq(last_name.to_lowercase())),
        NamePredicate::NameContains(text) => Condition::any()
            .add(lower(Column::FirstName).like(contains_pattern(text)))
            .add(lower(Column::LastName).like(contains_pattern(text))),
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, DomainError> {
        let customers = CustomerEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(customers.into_iter().map(Customer::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        let customer = CustomerEntity::find_by_id(id).one(&self.db).await?;

        Ok(customer.map(Customer::from))
    }

    async fn insert(&self, input: CustomerInput) -> Result<Customer, DomainError> {
        let customer = ActiveModel {
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            date_of_birth: Set(input.date_of_birth),
            ..Default::default()
        };

        let result = customer.insert(&self.db).await?;

        Ok(Customer::from(result))
    }

    async fn update(&self, customer: Customer) -> Result<Customer, DomainError> {
        let active = ActiveModel {
            id: Set(customer.id),
            first_name: Set(customer.first_name),
            last_name: Set(customer.last_name),
            date_of_birth: Set(customer.date_of_birth),
        };

        // RecordNotUpdated (no row with this id) maps to DomainError::NotFound
        let result = active.update(&self.db).await?;

        Ok(Customer::from(result))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = CustomerEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn scan(&self, predicate: &NamePredicate) -> Result<Vec<Customer>, DomainError> {
        let customers = CustomerEntity::find()
            .filter(condition_for(predicate))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(customers.into_iter().map(Customer::from).collect())
    }
}
