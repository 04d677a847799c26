//! Inline HTML rendering. The pages are deliberately plain: forms for the
//! admin, a read-only table for the customer, and a small script that
//! reloads the order lists whenever the notify socket pushes an event.

use common::models::CustomerOrder;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

fn live_reload_script(notify_port: u16) -> String {
    format!(
        "<script>\n\
         const ws = new WebSocket(`ws://${{location.hostname}}:{notify_port}`);\n\
         ws.onmessage = () => location.reload();\n\
         </script>"
    )
}

pub fn home() -> String {
    layout(
        "Order Tracker",
        "<h1>Order Tracker</h1>\n\
         <p><a href=\"/login\">Customer login</a></p>\n\
         <p><a href=\"/add\">Admin: add order</a></p>\n\
         <p><a href=\"/edit\">Admin: edit orders</a></p>",
    )
}

pub fn login(error: Option<&str>) -> String {
    let error_line = match error {
        Some(message) => format!("<p style=\"color:red\">{}</p>\n", escape(message)),
        None => String::new(),
    };

    layout(
        "Login",
        &format!(
            "<h1>Customer Login</h1>\n{error_line}\
             <form method=\"post\" action=\"/login\">\n\
             <input type=\"email\" name=\"email\" placeholder=\"Email\" required>\n\
             <button type=\"submit\">Login</button>\n\
             </form>"
        ),
    )
}

fn order_rows(orders: &[CustomerOrder]) -> String {
    orders
        .iter()
        .map(|order| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                order.id,
                escape(&order.customer_name),
                escape(&order.product_name),
                escape(&order.status),
                order.updated_at_display(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn customer(email: &str, orders: &[CustomerOrder], notify_port: u16) -> String {
    layout(
        "Your Orders",
        &format!(
            "<h1>Orders for {}</h1>\n\
             <table border=\"1\">\n\
             <tr><th>Id</th><th>Customer</th><th>Product</th><th>Status</th><th>Updated</th></tr>\n\
             {}\n\
             </table>\n\
             <p><a href=\"/logout\">Logout</a></p>\n\
             {}",
            escape(email),
            order_rows(orders),
            live_reload_script(notify_port),
        ),
    )
}

fn order_fields(order: Option<&CustomerOrder>) -> String {
    let value = |field: &str| -> String {
        match field {
            "" => String::new(),
            _ => format!(" value=\"{}\"", escape(field)),
        }
    };
    let (customer_name, product_name, status, email, phone_no) = match order {
        Some(o) => (
            o.customer_name.as_str(),
            o.product_name.as_str(),
            o.status.as_str(),
            o.email.as_str(),
            o.phone_no.as_str(),
        ),
        None => ("", "", "", "", ""),
    };

    format!(
        "<input name=\"customer_name\" placeholder=\"Customer name\"{}>\n\
         <input name=\"product_name\" placeholder=\"Product name\"{}>\n\
         <input name=\"status\" placeholder=\"Status\"{}>\n\
         <input name=\"email\" placeholder=\"Email\"{}>\n\
         <input name=\"phone_no\" placeholder=\"Phone\"{}>",
        value(customer_name),
        value(product_name),
        value(status),
        value(email),
        value(phone_no),
    )
}

pub fn add() -> String {
    layout(
        "Add Order",
        &format!(
            "<h1>Add Order</h1>\n\
             <form method=\"post\" action=\"/add\">\n\
             {}\n\
             <button type=\"submit\">Add</button>\n\
             </form>\n\
             <p><a href=\"/edit\">Back to orders</a></p>",
            order_fields(None)
        ),
    )
}

pub fn edit(orders: &[CustomerOrder], notify_port: u16) -> String {
    let forms = orders
        .iter()
        .map(|order| {
            format!(
                "<form method=\"post\" action=\"/edit\">\n\
                 <input type=\"hidden\" name=\"order_id\" value=\"{}\">\n\
                 {}\n\
                 <span>updated {}</span>\n\
                 <button type=\"submit\">Save</button>\n\
                 </form>",
                order.id,
                order_fields(Some(order)),
                order.updated_at_display(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    layout(
        "Edit Orders",
        &format!(
            "<h1>All Orders</h1>\n{forms}\n\
             <p><a href=\"/add\">Add another order</a></p>\n\
             {}",
            live_reload_script(notify_port)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_order() -> CustomerOrder {
        CustomerOrder {
            id: 1,
            customer_name: "Mohammad Ali".to_string(),
            product_name: "S25 Ultra".to_string(),
            status: "pending".to_string(),
            updated_at: NaiveDate::from_ymd_opt(2026, 8, 26)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            email: "toastedcheese146@gmail.com".to_string(),
            phone_no: "9869019221".to_string(),
        }
    }

    #[test]
    fn login_page_only_shows_error_when_present() {
        assert!(!login(None).contains("Email not found."));
        assert!(login(Some("Email not found.")).contains("Email not found."));
    }

    #[test]
    fn customer_page_lists_orders_with_formatted_timestamp() {
        let page = customer("toastedcheese146@gmail.com", &[sample_order()], 3000);
        assert!(page.contains("S25 Ultra"));
        assert!(page.contains("2026-08-26 09:00:00"));
        assert!(page.contains("ws://${location.hostname}:3000"));
    }

    #[test]
    fn edit_page_prefills_one_form_per_order() {
        let page = edit(&[sample_order()], 3000);
        assert!(page.contains("name=\"order_id\" value=\"1\""));
        assert!(page.contains("value=\"Mohammad Ali\""));
        assert!(page.contains("value=\"toastedcheese146@gmail.com\""));
    }

    #[test]
    fn free_text_fields_are_escaped() {
        let mut order = sample_order();
        order.status = "<script>alert(1)</script>".to_string();
        let page = edit(&[order], 3000);
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }
}
