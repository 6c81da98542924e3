//! # Operator Command Loop
//!
//! A line-oriented console for the till. Every command maps onto one
//! session operation; errors are printed and never end the loop.
//!
//! ```text
//! pos> add 12
//! Added Basmati Rice 5kg (₹100.00)
//! pos> cart
//!  12  Basmati Rice 5kg        2 x ₹100.00 = ₹236.00
//! TOTAL ₹236.00
//! pos> mode cash
//! pos> name Asha
//! pos> phone 9876543210
//! pos> tender 300
//! pos> checkout
//! ```

use std::io::{self, BufRead, Write};

use kirana_core::{PaymentMode, PaymentState};

use crate::receipt;
use crate::session::PosSession;

const STORE_NAME: &str = "KIRANA STORE";

/// Runs the command loop until `quit` or end of input.
pub async fn run(mut session: PosSession) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Kirana POS ready. Type 'help' for commands.");

    loop {
        print!("pos> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // end of input
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "list" => list_catalog(&session).await,
            "find" => find(&session, rest).await,
            "add" => add(&mut session, rest).await,
            "rm" => remove(&mut session, rest),
            "qty" => quantity(&mut session, rest),
            "cart" => show_cart(&session),
            "mode" => set_mode(&mut session, rest),
            "name" => session.set_customer_name(rest),
            "phone" => session.set_customer_phone(rest),
            "tender" => tender(&mut session, rest),
            "status" => show_status(&session),
            "recent" => recent(&session).await,
            "checkout" => checkout(&mut session).await,
            "cancel" => {
                session.cancel_sale();
                println!("Sale cancelled.");
            }
            _ => println!("Unknown command '{}'. Type 'help'.", cmd),
        }
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  list              Show the catalog");
    println!("  find <query>      Search by name or code");
    println!("  add <code>        Add a product to the cart");
    println!("  rm <code>         Remove a cart line");
    println!("  qty <code> <n>    Set a line's quantity");
    println!("  cart              Show the cart and totals");
    println!("  mode <upi|cash|card>");
    println!("  name <customer>   Set customer name");
    println!("  phone <number>    Set customer phone");
    println!("  tender <rupees>   Cash handed over (CASH only)");
    println!("  status            Show payment entry status");
    println!("  recent            Show the latest recorded sales");
    println!("  checkout          Complete the sale");
    println!("  cancel            Abandon the sale");
    println!("  quit              Exit");
}

async fn list_catalog(session: &PosSession) {
    match session.list_catalog().await {
        Ok(items) => {
            for item in items {
                println!(
                    " {:>3}  {:<30} {}",
                    item.code,
                    item.name,
                    item.unit_price()
                );
            }
        }
        Err(e) => println!("Error: {}", e),
    }
}

async fn find(session: &PosSession, query: &str) {
    if query.is_empty() {
        println!("Usage: find <query>");
        return;
    }
    match session.search_catalog(query, 20).await {
        Ok(items) if items.is_empty() => println!("No matches."),
        Ok(items) => {
            for item in items {
                println!(
                    " {:>3}  {:<30} {}",
                    item.code,
                    item.name,
                    item.unit_price()
                );
            }
        }
        Err(e) => println!("Error: {}", e),
    }
}

async fn add(session: &mut PosSession, arg: &str) {
    let Ok(code) = arg.parse::<i64>() else {
        println!("Usage: add <code>");
        return;
    };
    match session.add_by_code(code).await {
        Ok(item) => println!("Added {} ({})", item.name, item.unit_price()),
        Err(e) => println!("Error: {}", e),
    }
}

fn remove(session: &mut PosSession, arg: &str) {
    let Ok(code) = arg.parse::<i64>() else {
        println!("Usage: rm <code>");
        return;
    };
    match line_id_by_code(session, code) {
        Some(id) => {
            session.remove_from_cart(&id);
            println!("Removed.");
        }
        None => println!("Code {} is not in the cart.", code),
    }
}

fn quantity(session: &mut PosSession, args: &str) {
    let mut parts = args.split_whitespace();
    let (Some(code), Some(qty)) = (
        parts.next().and_then(|s| s.parse::<i64>().ok()),
        parts.next().and_then(|s| s.parse::<i64>().ok()),
    ) else {
        println!("Usage: qty <code> <n>");
        return;
    };
    let qty = if qty > kirana_core::MAX_LINE_QUANTITY {
        println!("Quantity capped at {}.", kirana_core::MAX_LINE_QUANTITY);
        kirana_core::MAX_LINE_QUANTITY
    } else {
        qty
    };
    match line_id_by_code(session, code) {
        Some(id) => session.set_quantity(&id, qty),
        None => println!("Code {} is not in the cart.", code),
    }
}

fn line_id_by_code(session: &PosSession, code: i64) -> Option<String> {
    session
        .cart_lines()
        .iter()
        .find(|l| l.code == code)
        .map(|l| l.product_id.clone())
}

fn show_cart(session: &PosSession) {
    if session.cart_is_empty() {
        println!("Cart is empty.");
        return;
    }
    for line in session.cart_lines() {
        println!(
            " {:>3}  {:<25} {} x {} = {}",
            line.code,
            line.name,
            line.quantity,
            kirana_core::Money::from_paise(line.unit_price_paise),
            line.total()
        );
    }
    println!("Subtotal {}", session.cart_subtotal());
    println!("Tax      {}", session.cart_tax());
    println!("TOTAL    {}", session.cart_total());
}

fn set_mode(session: &mut PosSession, arg: &str) {
    match PaymentMode::parse(arg) {
        Some(mode) => session.set_payment_mode(mode),
        None => println!("Usage: mode <upi|cash|card>"),
    }
}

fn tender(session: &mut PosSession, arg: &str) {
    match arg.parse::<f64>() {
        Ok(rupees) if rupees >= 0.0 => {
            session.set_tendered((rupees * 100.0).round() as i64);
        }
        _ => println!("Usage: tender <rupees>"),
    }
}

fn show_status(session: &PosSession) {
    match session.payment_state() {
        PaymentState::Incomplete { missing } => {
            println!("Missing: {}", missing.join(", "));
        }
        PaymentState::AwaitingTender => println!("CASH selected, waiting for tender amount."),
        PaymentState::ReadyCash | PaymentState::ReadyNonCash => println!("Ready to checkout."),
    }
}

async fn recent(session: &PosSession) {
    match session.recent_transactions(10).await {
        Ok(txns) if txns.is_empty() => println!("No sales recorded yet."),
        Ok(txns) => {
            for txn in txns {
                let short_id: String = txn.id.chars().take(8).collect();
                println!(
                    " {}  {}  {:<20} {:<4} {}",
                    short_id,
                    txn.created_at.format("%H:%M"),
                    txn.customer_name,
                    txn.payment_mode.as_str(),
                    txn.total()
                );
            }
        }
        Err(e) => println!("Error: {}", e),
    }
}

async fn checkout(session: &mut PosSession) {
    match session.checkout().await {
        Ok(txn) => {
            println!("{}", receipt::render(&txn, STORE_NAME));
        }
        Err(e) => println!("Checkout failed: {}", e),
    }
}
