use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub product_name: String,
    pub status: String, // free text, no fixed state set
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct CustomerContact {
    pub id: i64,
    pub order_id: i64, // one contact per order
    pub email: String, // doubles as the login credential
    pub phone_no: String,
}

/// Row produced by joining orders with customer_info.
#[derive(Debug, Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct CustomerOrder {
    pub id: i64,
    pub customer_name: String,
    pub product_name: String,
    pub status: String,
    pub updated_at: NaiveDateTime,
    pub email: String,
    pub phone_no: String,
}

impl CustomerOrder {
    pub fn updated_at_display(&self) -> String {
        self.updated_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Admin add form.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewOrder {
    pub customer_name: String,
    pub product_name: String,
    pub status: String,
    pub email: String,
    pub phone_no: String,
}

/// Admin edit form: the add fields plus the target order id.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrderUpdate {
    pub order_id: i64,
    pub customer_name: String,
    pub product_name: String,
    pub status: String,
    pub email: String,
    pub phone_no: String,
}
