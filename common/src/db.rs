use anyhow::Result;
use chrono::Utc;
use sqlx::{Pool, Sqlite, SqlitePool};
use tracing::info;

use crate::models::{CustomerContact, CustomerOrder, NewOrder, Order, OrderUpdate};

pub async fn establish_connection(db_url: &str) -> Pool<Sqlite> {
    SqlitePool::connect(db_url)
        .await
        .expect("Failed to create pool")
}

pub async fn init_schema(pool: &Pool<Sqlite>) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_name TEXT NOT NULL,
            product_name TEXT NOT NULL,
            status TEXT NOT NULL,
            updated_at TIMESTAMP NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS customer_info (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id INTEGER NOT NULL REFERENCES orders(id),
            email TEXT NOT NULL,
            phone_no TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Inserts the two sample orders on a fresh database. Returns whether
/// anything was inserted; a non-empty store is left alone.
pub async fn seed_if_empty(pool: &Pool<Sqlite>) -> Result<bool> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        return Ok(false);
    }

    let samples = [
        NewOrder {
            customer_name: "Mohammad Ali".to_string(),
            product_name: "S25 Ultra".to_string(),
            status: "pending".to_string(),
            email: "toastedcheese146@gmail.com".to_string(),
            phone_no: "9869019221".to_string(),
        },
        NewOrder {
            customer_name: "Ali Ansari".to_string(),
            product_name: "PS5".to_string(),
            status: "shipped".to_string(),
            email: "ali.221204.co@mhssce.ac.in".to_string(),
            phone_no: "9930896262".to_string(),
        },
    ];

    for sample in &samples {
        create_order_with_contact(pool, sample).await?;
    }

    info!("Sample data inserted");
    Ok(true)
}

pub async fn contact_by_email(
    pool: &Pool<Sqlite>,
    email: &str,
) -> Result<Option<CustomerContact>> {
    let contact: Option<CustomerContact> =
        sqlx::query_as("SELECT * FROM customer_info WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await?;

    Ok(contact)
}

pub async fn contact_for_order(
    pool: &Pool<Sqlite>,
    order_id: i64,
) -> Result<Option<CustomerContact>> {
    let contact: Option<CustomerContact> =
        sqlx::query_as("SELECT * FROM customer_info WHERE order_id = ?")
            .bind(order_id)
            .fetch_optional(pool)
            .await?;

    Ok(contact)
}

pub async fn order_by_id(pool: &Pool<Sqlite>, order_id: i64) -> Result<Option<Order>> {
    let order: Option<Order> = sqlx::query_as("SELECT * FROM orders WHERE id = ?")
        .bind(order_id)
        .fetch_optional(pool)
        .await?;

    Ok(order)
}

/// Orders visible to one customer: inner join filtered by contact email.
pub async fn orders_for_email(pool: &Pool<Sqlite>, email: &str) -> Result<Vec<CustomerOrder>> {
    let orders: Vec<CustomerOrder> = sqlx::query_as(
        "SELECT o.id, o.customer_name, o.product_name, o.status, o.updated_at,
                c.email, c.phone_no
         FROM orders o
         JOIN customer_info c ON c.order_id = o.id
         WHERE c.email = ?
         ORDER BY o.id",
    )
    .bind(email)
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

/// Every order, for the admin edit list. Unpaginated, and a left join so
/// an order without a contact row still shows up (with empty contact
/// fields, as in update_order).
pub async fn all_orders(pool: &Pool<Sqlite>) -> Result<Vec<CustomerOrder>> {
    let orders: Vec<CustomerOrder> = sqlx::query_as(
        "SELECT o.id, o.customer_name, o.product_name, o.status, o.updated_at,
                COALESCE(c.email, '') AS email, COALESCE(c.phone_no, '') AS phone_no
         FROM orders o
         LEFT JOIN customer_info c ON c.order_id = o.id
         ORDER BY o.id",
    )
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

/// Creates the order row and its contact row in one transaction, so a
/// failure between the two writes can never leave an orphaned order.
pub async fn create_order_with_contact(pool: &Pool<Sqlite>, new: &NewOrder) -> Result<Order> {
    let mut tx = pool.begin().await?;

    let order: Order = sqlx::query_as(
        "INSERT INTO orders (customer_name, product_name, status, updated_at)
         VALUES (?, ?, ?, ?) RETURNING *",
    )
    .bind(&new.customer_name)
    .bind(&new.product_name)
    .bind(&new.status)
    .bind(Utc::now().naive_utc())
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO customer_info (order_id, email, phone_no) VALUES (?, ?, ?)")
        .bind(order.id)
        .bind(&new.email)
        .bind(&new.phone_no)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(order)
}

/// Overwrites the order's editable fields and refreshes its timestamp; the
/// linked contact's email and phone are overwritten too when a contact row
/// exists. Returns the updated record, or None when the id is unknown (in
/// which case nothing is touched).
pub async fn update_order(
    pool: &Pool<Sqlite>,
    update: &OrderUpdate,
) -> Result<Option<CustomerOrder>> {
    let mut tx = pool.begin().await?;

    let order: Option<Order> = sqlx::query_as("SELECT * FROM orders WHERE id = ?")
        .bind(update.order_id)
        .fetch_optional(&mut *tx)
        .await?;

    if order.is_none() {
        return Ok(None);
    }

    let updated_at = Utc::now().naive_utc();

    sqlx::query(
        "UPDATE orders SET customer_name = ?, product_name = ?, status = ?, updated_at = ?
         WHERE id = ?",
    )
    .bind(&update.customer_name)
    .bind(&update.product_name)
    .bind(&update.status)
    .bind(updated_at)
    .bind(update.order_id)
    .execute(&mut *tx)
    .await?;

    let contact: Option<CustomerContact> =
        sqlx::query_as("SELECT * FROM customer_info WHERE order_id = ?")
            .bind(update.order_id)
            .fetch_optional(&mut *tx)
            .await?;

    if contact.is_some() {
        sqlx::query("UPDATE customer_info SET email = ?, phone_no = ? WHERE order_id = ?")
            .bind(&update.email)
            .bind(&update.phone_no)
            .bind(update.order_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    // An order without a contact renders with empty contact fields rather
    // than failing the whole edit.
    let (email, phone_no) = match contact {
        Some(_) => (update.email.clone(), update.phone_no.clone()),
        None => (String::new(), String::new()),
    };

    Ok(Some(CustomerOrder {
        id: update.order_id,
        customer_name: update.customer_name.clone(),
        product_name: update.product_name.clone(),
        status: update.status.clone(),
        updated_at,
        email,
        phone_no,
    }))
}
