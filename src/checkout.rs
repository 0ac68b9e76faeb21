use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::Rng;

use crate::cart::CartLine;
use crate::error::{AppError, AppResult};

pub const DISCOUNT_CODE: &str = "FINITE2025";
pub const DISCOUNT_AMOUNT: i64 = 2000;
pub const AUTO_DISCOUNT_THRESHOLD: i64 = 50000;

/// Characters kept verbatim by JavaScript's encodeURIComponent.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Human-readable order token embedded in the outbound message. Random per
/// checkout attempt, never persisted, no uniqueness guarantee.
pub fn generate_order_ref() -> String {
    let num = rand::thread_rng().gen_range(10_000..=99_999);
    format!("FL-{num}")
}

/// Renders whole-Naira amounts the way the storefront does: currency symbol,
/// thousands separators, no decimals.
pub fn format_naira(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-₦{grouped}")
    } else {
        format!("₦{grouped}")
    }
}

/// Which discount, if any, applies to a checkout. At most one
/// `DISCOUNT_AMOUNT` is ever subtracted, no matter how many conditions hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discount {
    None,
    /// Subtotal met the automatic threshold.
    OrderAbove,
    /// A valid code was supplied (wins over the threshold for attribution).
    Code,
}

impl Discount {
    pub fn amount(&self) -> i64 {
        match self {
            Discount::None => 0,
            Discount::OrderAbove | Discount::Code => DISCOUNT_AMOUNT,
        }
    }
}

/// Decides the discount for a subtotal and an optional user-supplied code.
/// Codes match case-insensitively; an unknown code is an error and applies
/// nothing. An absent or blank code falls back to the threshold check, so
/// clearing a code restores the subtotal or the automatic discount.
pub fn resolve_discount(subtotal: i64, code: Option<&str>) -> AppResult<Discount> {
    if let Some(raw) = code {
        let normalized = raw.trim().to_uppercase();
        if !normalized.is_empty() {
            if normalized != DISCOUNT_CODE {
                return Err(AppError::BadRequest("Invalid discount code".to_string()));
            }
            return Ok(Discount::Code);
        }
    }
    if subtotal >= AUTO_DISCOUNT_THRESHOLD {
        Ok(Discount::OrderAbove)
    } else {
        Ok(Discount::None)
    }
}

/// Formats the outbound order message handed to the messaging channel.
/// Deterministic for a given cart and discount, except for the embedded
/// order reference.
pub fn build_order_message(
    lines: &[CartLine],
    subtotal: i64,
    discount: &Discount,
    order_ref: &str,
) -> String {
    let mut message = String::from("Hello 👋\nI'd like to place an order from Finite Luxury.\n\n");
    message.push_str(&format!("Order Ref: {order_ref}\n\nItems:\n"));

    for line in lines {
        let line_total = format_naira(i64::from(line.quantity) * line.product.price);
        message.push_str(&format!(
            "• {} (Size {}) × {} – {}\n",
            line.product.name, line.size, line.quantity, line_total
        ));
    }

    message.push_str(&format!("\nSubtotal: {}", format_naira(subtotal)));

    match discount {
        Discount::None => {}
        Discount::OrderAbove => {
            message.push_str(&format!(
                "\nDiscount: -{} (Order above {})",
                format_naira(DISCOUNT_AMOUNT),
                format_naira(AUTO_DISCOUNT_THRESHOLD)
            ));
        }
        Discount::Code => {
            message.push_str(&format!(
                "\nDiscount: -{} (Code: {DISCOUNT_CODE})",
                format_naira(DISCOUNT_AMOUNT)
            ));
        }
    }

    message.push_str(&format!(
        "\n\nTotal: {}",
        format_naira(subtotal - discount.amount())
    ));
    message
}

/// wa.me deep link carrying the order message as its one text parameter.
/// Dispatch is fire-and-forget; nothing is read back.
pub fn whatsapp_url(number: &str, message: &str) -> String {
    let encoded = utf8_percent_encode(message, URI_COMPONENT);
    format!("https://wa.me/{number}?text={encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::models::Product;
    use chrono::Utc;
    use uuid::Uuid;

    fn product(name: &str, price: i64) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price,
            category_id: Uuid::new_v4(),
            images: vec![],
            sizes: vec!["M".to_string()],
            colors: None,
            description: None,
            is_active: true,
            is_new_arrival: false,
            is_best_seller: false,
            is_on_sale: false,
            sale_price: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn order_ref_is_fl_plus_five_digits() {
        for _ in 0..100 {
            let order_ref = generate_order_ref();
            let digits = order_ref.strip_prefix("FL-").expect("FL- prefix");
            assert_eq!(digits.len(), 5);
            let value: u32 = digits.parse().expect("numeric reference");
            assert!((10_000..=99_999).contains(&value));
        }
    }

    #[test]
    fn naira_formatting_groups_thousands() {
        assert_eq!(format_naira(0), "₦0");
        assert_eq!(format_naira(950), "₦950");
        assert_eq!(format_naira(25000), "₦25,000");
        assert_eq!(format_naira(1234567), "₦1,234,567");
        assert_eq!(format_naira(-2000), "-₦2,000");
    }

    #[test]
    fn discount_applies_once_even_when_both_conditions_hold() {
        let discount = resolve_discount(AUTO_DISCOUNT_THRESHOLD, Some("finite2025")).unwrap();
        assert_eq!(discount, Discount::Code);
        assert_eq!(discount.amount(), DISCOUNT_AMOUNT);
    }

    #[test]
    fn discount_code_matches_case_insensitively() {
        assert_eq!(
            resolve_discount(1000, Some("  Finite2025 ")).unwrap(),
            Discount::Code
        );
    }

    #[test]
    fn unknown_code_is_rejected_without_discount() {
        let err = resolve_discount(100_000, Some("SAVE50")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn threshold_discount_applies_without_code() {
        assert_eq!(resolve_discount(50_000, None).unwrap(), Discount::OrderAbove);
        assert_eq!(resolve_discount(49_999, None).unwrap(), Discount::None);
        // A cleared (blank) code behaves like no code at all.
        assert_eq!(
            resolve_discount(50_000, Some("  ")).unwrap(),
            Discount::OrderAbove
        );
        assert_eq!(resolve_discount(100, Some("")).unwrap(), Discount::None);
    }

    #[test]
    fn message_lists_items_in_cart_order_with_totals() {
        let mut cart = Cart::new();
        cart.add_item(product("Black Oxford Shirt", 25000), "M");
        cart.add_item(product("White Sneakers", 45000), "42");
        let shirt_id = cart.lines()[0].product.id;
        cart.update_quantity(shirt_id, "M", 2);

        let subtotal = cart.total_price();
        let discount = resolve_discount(subtotal, None).unwrap();
        let message = build_order_message(cart.lines(), subtotal, &discount, "FL-12345");

        assert!(message.starts_with("Hello 👋\nI'd like to place an order from Finite Luxury."));
        assert!(message.contains("Order Ref: FL-12345"));
        assert!(message.contains("• Black Oxford Shirt (Size M) × 2 – ₦50,000"));
        assert!(message.contains("• White Sneakers (Size 42) × 1 – ₦45,000"));
        assert!(message.contains("Subtotal: ₦95,000"));
        assert!(message.contains("Discount: -₦2,000 (Order above ₦50,000)"));
        assert!(message.ends_with("Total: ₦93,000"));
    }

    #[test]
    fn message_is_deterministic_modulo_order_ref() {
        let mut cart = Cart::new();
        cart.add_item(product("Black Oxford Shirt", 25000), "M");

        let subtotal = cart.total_price();
        let first = build_order_message(cart.lines(), subtotal, &Discount::None, "FL-11111");
        let second = build_order_message(cart.lines(), subtotal, &Discount::None, "FL-99999");

        assert_eq!(
            first.replace("FL-11111", "FL-99999"),
            second,
            "messages must differ only in the order reference"
        );
    }

    #[test]
    fn code_discount_is_attributed_to_the_code() {
        let mut cart = Cart::new();
        cart.add_item(product("Oversized Tee", 15000), "L");
        let message =
            build_order_message(cart.lines(), cart.total_price(), &Discount::Code, "FL-10000");
        assert!(message.contains("Discount: -₦2,000 (Code: FINITE2025)"));
        assert!(message.ends_with("Total: ₦13,000"));
    }

    #[test]
    fn whatsapp_url_encodes_the_message_like_encode_uri_component() {
        let url = whatsapp_url("2349033120032", "Total: ₦2,000\nDone (yes)!");
        assert!(url.starts_with("https://wa.me/2349033120032?text="));
        assert!(url.contains("%E2%82%A6")); // ₦
        assert!(url.contains("%0A")); // newline
        assert!(url.contains("%2C")); // comma
        assert!(url.contains("(yes)!")); // kept verbatim by encodeURIComponent
        assert!(!url.contains(' '));
    }
}
