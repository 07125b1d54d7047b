use chrono::{Months, NaiveDateTime, Utc};
use sea_orm::*;

use crate::models::customer;

const DEMO_CUSTOMERS: [(&str, &str, u32); 5] = [
    ("Atira", "Mukadam", 19),
    ("Azhar", "Wangde", 17),
    ("Kumar", "Sangakkar", 33),
    ("Arvinda", "DeSilva", 41),
    ("Shane", "Watson", 63),
];

fn years_ago(now: NaiveDateTime, years: u32) -> NaiveDateTime {
    now.checked_sub_months(Months::new(years * 12)).unwrap_or(now)
}

/// Insert the demo customers when the table is empty. Returns how many were inserted.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<usize, DbErr> {
    if customer::Entity::find().count(db).await? > 0 {
        return Ok(0);
    }

    let now = Utc::now().naive_utc();
    let customers = DEMO_CUSTOMERS.iter().map(|(first, last, age)| customer::ActiveModel {
        first_name: Set((*first).to_owned()),
        last_name: Set((*last).to_owned()),
        date_of_birth: Set(years_ago(now, *age)),
        ..Default::default()
    });

    customer::Entity::insert_many(customers).exec(db).await?;

    Ok(DEMO_CUSTOMERS.len())
}
