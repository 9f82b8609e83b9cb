//! # Shared Utility Functions
//!
//! Money display and wire formatting shared by the client library and the CLI.
//!
//! ## Currency Display
//!
//! - [`currency_symbol`] - Symbol for an ISO 4217 code, falling back to the code itself
//! - [`format_currency`] - German-locale display format (`1.234,56 €`)
//! - [`currency_decimals`] - Minor-unit digits shown for a currency
//!
//! ## Wire Format
//!
//! - [`format_amount`] - Two-decimal string the API expects for amount fields
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{format_amount, format_currency};
//!
//! assert_eq!(format_currency(1234.5, "EUR"), "1.234,50 €");
//! assert_eq!(format_amount(10.0), "10.00");
//! ```

/// Display symbols keyed by ISO 4217 code (plus a few crypto and metal codes).
pub const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    // Major currencies
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("CNY", "¥"),
    ("CHF", "CHF"),
    ("CAD", "C$"),
    ("AUD", "A$"),
    ("NZD", "NZ$"),
    // European currencies
    ("SEK", "kr"),
    ("NOK", "kr"),
    ("DKK", "kr"),
    ("PLN", "zł"),
    ("CZK", "Kč"),
    ("HUF", "Ft"),
    ("RON", "lei"),
    ("BGN", "лв"),
    ("HRK", "kn"),
    ("RUB", "₽"),
    ("UAH", "₴"),
    ("TRY", "₺"),
    // Asian currencies
    ("INR", "₹"),
    ("KRW", "₩"),
    ("SGD", "S$"),
    ("HKD", "HK$"),
    ("TWD", "NT$"),
    ("THB", "฿"),
    ("MYR", "RM"),
    ("IDR", "Rp"),
    ("PHP", "₱"),
    ("VND", "₫"),
    ("PKR", "₨"),
    ("BDT", "৳"),
    ("LKR", "Rs"),
    ("NPR", "Rs"),
    ("MMK", "K"),
    ("KHR", "៛"),
    ("LAK", "₭"),
    // Middle Eastern currencies
    ("SAR", "﷼"),
    ("AED", "د.إ"),
    ("QAR", "ر.ق"),
    ("KWD", "د.ك"),
    ("BHD", "د.ب"),
    ("OMR", "ر.ع."),
    ("JOD", "د.ا"),
    ("ILS", "₪"),
    ("IQD", "ع.د"),
    ("IRR", "﷼"),
    ("LBP", "ل.ل"),
    ("SYP", "£"),
    // African currencies
    ("ZAR", "R"),
    ("EGP", "£"),
    ("NGN", "₦"),
    ("KES", "KSh"),
    ("GHS", "₵"),
    ("TZS", "TSh"),
    ("UGX", "USh"),
    ("MAD", "د.م."),
    ("TND", "د.ت"),
    ("DZD", "د.ج"),
    ("ETB", "Br"),
    ("XOF", "CFA"),
    ("XAF", "FCFA"),
    // American currencies
    ("BRL", "R$"),
    ("MXN", "$"),
    ("ARS", "$"),
    ("CLP", "$"),
    ("COP", "$"),
    ("PEN", "S/"),
    ("VES", "Bs."),
    ("UYU", "$U"),
    ("PYG", "₲"),
    ("BOB", "Bs."),
    ("DOP", "RD$"),
    ("CRC", "₡"),
    ("GTQ", "Q"),
    ("HNL", "L"),
    ("NIO", "C$"),
    ("PAB", "B/."),
    ("JMD", "J$"),
    ("TTD", "TT$"),
    ("BBD", "Bds$"),
    // Oceania currencies
    ("FJD", "FJ$"),
    ("PGK", "K"),
    ("WST", "WS$"),
    ("TOP", "T$"),
    ("VUV", "VT"),
    // Crypto
    ("BTC", "₿"),
    ("ETH", "Ξ"),
    // Precious metals (troy ounce)
    ("XAU", "Au"),
    ("XAG", "Ag"),
    ("XPT", "Pt"),
    ("XPD", "Pd"),
];

/// Look up the display symbol for a currency code.
///
/// The lookup is case-insensitive. Unknown codes are returned unchanged.
///
/// # Examples
///
/// ```rust
/// use shared::utils::currency_symbol;
///
/// assert_eq!(currency_symbol("eur"), "€");
/// assert_eq!(currency_symbol("XYZ"), "XYZ");
/// ```
pub fn currency_symbol(currency_code: &str) -> String {
    let code = currency_code.trim().to_ascii_uppercase();
    CURRENCY_SYMBOLS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, symbol)| symbol.to_string())
        .unwrap_or_else(|| currency_code.to_string())
}

/// ISO 4217 codes displayed without minor units.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &[
    "BIF", "CLP", "DJF", "GNF", "ISK", "JPY", "KMF", "KRW", "PYG", "RWF", "UGX", "VND", "VUV",
    "XAF", "XOF", "XPF",
];

/// ISO 4217 codes displayed with three minor-unit digits.
const THREE_DECIMAL_CURRENCIES: &[&str] = &["BHD", "IQD", "JOD", "KWD", "LYD", "OMR", "TND"];

/// Number of decimals shown for a currency (2 unless listed otherwise).
pub fn currency_decimals(currency_code: &str) -> usize {
    let code = currency_code.to_uppercase();
    if ZERO_DECIMAL_CURRENCIES.contains(&code.as_str()) {
        0
    } else if THREE_DECIMAL_CURRENCIES.contains(&code.as_str()) {
        3
    } else {
        2
    }
}

/// Format an amount for display using German grouping (`.` thousands, `,` decimals)
/// followed by the currency symbol. The number of decimals follows the
/// currency's minor units (`1.235 ¥` for JPY).
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_currency;
///
/// assert_eq!(format_currency(-45.5, "EUR"), "-45,50 €");
/// assert_eq!(format_currency(1_000_000.0, "USD"), "1.000.000,00 $");
/// assert_eq!(format_currency(1234.5, "JPY"), "1.235 ¥");
/// ```
pub fn format_currency(amount: f64, currency_code: &str) -> String {
    let decimals = currency_decimals(currency_code);
    let scale = 10u64.pow(decimals as u32);
    let minor = (amount.abs() * scale as f64).round() as u64;
    let negative = amount < 0.0 && minor > 0;
    let whole = (minor / scale).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let fraction = if decimals == 0 {
        String::new()
    } else {
        format!(",{:0width$}", minor % scale, width = decimals)
    };

    format!(
        "{}{}{} {}",
        if negative { "-" } else { "" },
        grouped,
        fraction,
        currency_symbol(currency_code)
    )
}

/// Format an amount the way the API expects it in request bodies.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}
