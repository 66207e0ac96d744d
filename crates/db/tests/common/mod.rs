#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use sqlx::PgPool;
use timeslot_db::models::item::CreateTimeslotItem;
use timeslot_db::models::list::CreateTimeslotList;
use timeslot_db::models::user::CreateUser;
use timeslot_db::repositories::{CredentialStore, UserRepo};

/// Insert a user with a placeholder hash and return its id.
pub async fn create_user(pool: &PgPool, username: &str) -> i64 {
    UserRepo::new(pool.clone())
        .create_user(&CreateUser {
            name: username.to_string(),
            color: "#336699".to_string(),
            username: username.to_string(),
            password_hash: format!("hash-of-{username}"),
        })
        .await
        .expect("user creation should succeed")
}

pub fn new_list(title: &str) -> CreateTimeslotList {
    CreateTimeslotList {
        title: title.to_string(),
        description: format!("{title} description"),
    }
}

/// Fixed instant on 2024-03-04 at `hour`:00 UTC.
pub fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, hour, 0, 0).unwrap()
}

pub fn new_item(title: &str, start_hour: u32, end_hour: u32) -> CreateTimeslotItem {
    CreateTimeslotItem {
        title: title.to_string(),
        description: String::new(),
        start: at(start_hour),
        end: at(end_hour),
    }
}

pub async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
