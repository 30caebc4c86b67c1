//! Order Desk Console
//!
//! Minimal line-based front end over the order-desk library: look up a
//! customer by name, show their order history or offer registration, and
//! walk through recording a new order.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p order-desk
//! ```
//!
//! # Environment Variables
//!
//! - `MADANG_DB`: store file path (default: `./madang.db`)
//! - `MADANG_SEED`: set to `false` to skip schema/seed on open
//! - `RUST_LOG`: log level (default: info)

use std::io::{self, BufRead, Write};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use order_desk::{
    list_books, record_order, resolve, telemetry, CustomerRef, NewCustomerDraft,
    OrderConfirmation, OrderDetail, OrderForm, Resolution, SalePrice, Settings, Store,
    WorkflowError,
};

fn main() -> anyhow::Result<()> {
    telemetry::init_telemetry();

    let settings = Settings::from_env();
    let mut store = Store::open(&settings.db_path)
        .with_context(|| format!("opening store at {}", settings.db_path))?;
    if settings.seed_on_open {
        order_desk::store::schema::ensure_schema(&store)?;
        order_desk::store::schema::seed_books(&store)?;
    }

    println!("Madang order desk. Enter a customer name, or a blank line to quit.");
    loop {
        let name = prompt("customer name> ")?;
        if name.is_empty() {
            break;
        }

        match resolve(&store, &name)? {
            Resolution::Found { customer, orders } => {
                println!("Orders for {} (customer {}):", customer.name, customer.id);
                print_history(&orders);
                maybe_enter_order(&mut store, CustomerRef::Existing(customer.id))?;
            }
            Resolution::FoundNoOrders { customer } => {
                println!(
                    "{} (customer {}) is registered but has no orders yet.",
                    customer.name, customer.id
                );
                maybe_enter_order(&mut store, CustomerRef::Existing(customer.id))?;
            }
            Resolution::NotFound => {
                println!("'{name}' is not registered.");
                if confirm("register as a new customer? [y/N] ")? {
                    let draft = NewCustomerDraft {
                        name: name.clone(),
                        address: prompt("address> ")?,
                        phone: prompt("phone> ")?,
                    };
                    enter_order(&mut store, CustomerRef::New(draft))?;
                }
            }
        }
    }

    Ok(())
}

/// Offer order entry for an already-resolved customer.
fn maybe_enter_order(store: &mut Store, customer: CustomerRef) -> anyhow::Result<()> {
    if confirm("record a new order? [y/N] ")? {
        enter_order(store, customer)?;
    }
    Ok(())
}

/// Walk through book selection, price and date, then record.
fn enter_order(store: &mut Store, customer: CustomerRef) -> anyhow::Result<()> {
    let books = list_books(store)?;
    if books.is_empty() {
        println!("The book catalog is empty; seed it before recording orders.");
        return Ok(());
    }

    println!("Catalog:");
    for book in &books {
        println!("  {:>3}  {}  (list price {})", book.id, book.name, book.list_price);
    }

    let book_id: i64 = match prompt("book id> ")?.parse() {
        Ok(id) => id,
        Err(_) => {
            println!("Not a number; order cancelled.");
            return Ok(());
        }
    };
    let default_price = books
        .iter()
        .find(|b| b.id == book_id)
        .map_or(0, |b| b.list_price);

    let price_input = prompt(&format!("sale price [{default_price}]> "))?;
    let sale_price = if price_input.is_empty() {
        SalePrice::new(default_price).map_err(WorkflowError::Validation)
    } else {
        SalePrice::parse(&price_input).map_err(WorkflowError::Validation)
    };
    let sale_price = match sale_price {
        Ok(price) => price,
        Err(err) => {
            println!("{err}; order cancelled.");
            return Ok(());
        }
    };

    let today = Local::now().date_naive();
    let date_input = prompt(&format!("order date [{today}]> "))?;
    let order_date: NaiveDate = if date_input.is_empty() {
        today
    } else {
        match date_input.parse() {
            Ok(date) => date,
            Err(_) => {
                println!("Expected YYYY-MM-DD; order cancelled.");
                return Ok(());
            }
        }
    };

    let form = OrderForm {
        customer,
        book_id,
        sale_price,
        order_date,
    };
    match record_order(store, &form) {
        Ok(confirmation) => print_confirmation(&confirmation),
        // validation problems are the user's to fix; storage problems too,
        // by retrying the submission, so neither ends the session
        Err(err) => println!("Order not recorded: {err}"),
    }
    Ok(())
}

fn print_history(orders: &[OrderDetail]) {
    println!("  {:>5}  {:<24}  {:>9}  {}", "order", "book", "price", "date");
    for order in orders {
        println!(
            "  {:>5}  {:<24}  {:>9}  {}",
            order.order_id, order.book_name, order.sale_price, order.order_date
        );
    }
}

fn print_confirmation(confirmation: &OrderConfirmation) {
    println!(
        "Recorded order {}: {} / {} / {} won / {}",
        confirmation.order_id,
        confirmation.customer_name,
        confirmation.book_name,
        confirmation.sale_price,
        confirmation.order_date
    );
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn confirm(label: &str) -> anyhow::Result<bool> {
    let answer = prompt(label)?;
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
