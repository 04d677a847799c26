use actix_web::{
    cookie::Cookie,
    http::header::{self, ContentType},
    web, HttpRequest, HttpResponse, Responder,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::{Pool, Sqlite};
use tokio::sync::broadcast;
use tracing::info;

use common::{
    db,
    models::{NewOrder, OrderUpdate},
};

use crate::{
    notify::OrderEvent,
    pages,
    session::{SessionStore, SESSION_COOKIE},
};

pub struct AppState {
    pub pool: Pool<Sqlite>,
    pub sessions: SessionStore,
    pub events: broadcast::Sender<OrderEvent>,
    pub notify_port: u16,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

async fn session_email(req: &HttpRequest, sessions: &SessionStore) -> Option<String> {
    let cookie = req.cookie(SESSION_COOKIE)?;
    sessions.email_for(cookie.value()).await
}

#[actix_web::get("/")]
pub async fn home() -> impl Responder {
    html(pages::home())
}

#[actix_web::get("/login")]
pub async fn login_page() -> impl Responder {
    html(pages::login(None))
}

#[actix_web::post("/login")]
pub async fn login(form: web::Form<LoginForm>, app_state: web::Data<AppState>) -> impl Responder {
    let AppState { pool, sessions, .. } = &**app_state;

    let contact = db::contact_by_email(pool, &form.email)
        .await
        .expect("Error fetching contact");

    match contact {
        Some(_) => {
            let session_id = sessions.create(&form.email).await;
            info!("Customer {} logged in", form.email);

            let cookie = Cookie::build(SESSION_COOKIE, session_id)
                .path("/")
                .http_only(true)
                .finish();

            HttpResponse::Found()
                .cookie(cookie)
                .insert_header((header::LOCATION, "/customer"))
                .finish()
        }
        None => html(pages::login(Some("Email not found."))),
    }
}

#[actix_web::get("/logout")]
pub async fn logout(req: HttpRequest, app_state: web::Data<AppState>) -> impl Responder {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        app_state.sessions.remove(cookie.value()).await;
    }

    let mut response = redirect("/login");
    let mut cleared = Cookie::new(SESSION_COOKIE, "");
    cleared.set_path("/");
    let _ = response.add_removal_cookie(&cleared);
    response
}

#[actix_web::get("/customer")]
pub async fn customer_dashboard(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> impl Responder {
    let AppState {
        pool,
        sessions,
        notify_port,
        ..
    } = &**app_state;

    let email = match session_email(&req, sessions).await {
        Some(email) => email,
        None => return redirect("/login"),
    };

    let orders = db::orders_for_email(pool, &email)
        .await
        .expect("Error fetching orders");

    html(pages::customer(&email, &orders, *notify_port))
}

#[actix_web::get("/add")]
pub async fn add_page() -> impl Responder {
    html(pages::add())
}

#[actix_web::post("/add")]
pub async fn add_order(form: web::Form<NewOrder>, app_state: web::Data<AppState>) -> impl Responder {
    let AppState { pool, events, .. } = &**app_state;

    let order = db::create_order_with_contact(pool, &form)
        .await
        .expect("Error creating order");
    info!("Order {} created", order.id);

    // Fire-and-forget: no connected viewers is not an error.
    let _ = events.send(OrderEvent::added());

    redirect("/edit")
}

#[actix_web::get("/edit")]
pub async fn edit_page(app_state: web::Data<AppState>) -> impl Responder {
    let AppState {
        pool, notify_port, ..
    } = &**app_state;

    let orders = db::all_orders(pool).await.expect("Error fetching orders");

    html(pages::edit(&orders, *notify_port))
}

#[actix_web::post("/edit")]
pub async fn edit_order(
    form: web::Form<OrderUpdate>,
    app_state: web::Data<AppState>,
) -> impl Responder {
    let AppState { pool, events, .. } = &**app_state;

    match db::update_order(pool, &form)
        .await
        .expect("Error updating order")
    {
        Some(updated) => {
            info!("Order {} updated", updated.id);
            let _ = events.send(OrderEvent::updated(&updated));
        }
        // Unknown id: nothing to surface, the edit list re-renders as-is.
        None => info!("Edit for unknown order id {} ignored", form.order_id),
    }

    redirect("/edit")
}

#[actix_web::get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({"status": "ok"}))
}
