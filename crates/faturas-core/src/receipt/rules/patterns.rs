//! Regex patterns for Continente receipt text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // DD/MM/YYYY or DD-MM-YYYY; the two separators may differ.
    pub static ref DATE_DMY: Regex = Regex::new(
        r"[0-9]{2}[/-][0-9]{2}[/-][0-9]{4}"
    ).unwrap();

    // Amount shape: digits, `.` or `,`, exactly two digits.
    pub static ref AMOUNT: Regex = Regex::new(
        r"[0-9]+[.,][0-9]{2}"
    ).unwrap();

    // Labeled totals. Each captures the figure in `amount`.
    pub static ref TOTAL_A_PAGAR: Regex = Regex::new(
        r"(?i)Total a pagar\s*[:\-]?\s*(?P<amount>[0-9]+[.,][0-9]{2})"
    ).unwrap();

    pub static ref TOTAL_EURO: Regex = Regex::new(
        r"(?i)TOTAL\s*[:\-]?\s*(?P<amount>[0-9]+[.,][0-9]{2})\s*€"
    ).unwrap();

    pub static ref TOTAL_PLAIN: Regex = Regex::new(
        r"(?i)TOTAL\s*[:\-]?\s*(?P<amount>[0-9]+[.,][0-9]{2})"
    ).unwrap();

    pub static ref TOTAL_A_PAGAR_UPPER: Regex = Regex::new(
        r"(?i)TOTAL A PAGAR\s*[:\-]?\s*(?P<amount>[0-9]+[.,][0-9]{2})"
    ).unwrap();

    pub static ref VALOR_TOTAL: Regex = Regex::new(
        r"(?i)Valor total\s*[:\-]?\s*(?P<amount>[0-9]+[.,][0-9]{2})"
    ).unwrap();

    pub static ref TOTAL_WORD: Regex = Regex::new(
        r"(?i)Total\s*[:\-]?\s*(?P<amount>[0-9]+[.,][0-9]{2})"
    ).unwrap();
}
