//! Receipt field resolver: text in, `(date, total)` out.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::rules::{amounts::TotalSource, resolve_total, DateExtractor, FieldExtractor};
use crate::models::amount::MonetaryAmount;

/// Result of resolving one receipt's text.
///
/// An absent field means the heuristics could not determine it. Results
/// are best-effort and should be shown to a person either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    /// Purchase date.
    pub date: Option<NaiveDate>,
    /// Amount paid.
    pub total: Option<MonetaryAmount>,
    /// Heuristic that produced `total`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_source: Option<TotalSource>,
}

impl ExtractionResult {
    /// Both fields were resolved.
    pub fn is_complete(&self) -> bool {
        self.date.is_some() && self.total.is_some()
    }

    /// Names of the fields that could not be resolved.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.date.is_none() {
            missing.push("date");
        }
        if self.total.is_none() {
            missing.push("total");
        }
        missing
    }
}

/// Heuristic resolver for receipt date and total.
#[derive(Debug, Clone, Default)]
pub struct FieldResolver;

impl FieldResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve date and total from receipt text. Never fails.
    pub fn resolve(&self, text: &str) -> ExtractionResult {
        let date = DateExtractor::new().extract(text).map(|m| m.value);
        let (total, total_source) = match resolve_total(text) {
            Some((amount, source)) => (Some(amount), Some(source)),
            None => (None, None),
        };

        let result = ExtractionResult {
            date,
            total,
            total_source,
        };

        debug!(
            date = ?result.date,
            total = ?result.total.map(|t| t.to_string()),
            "Resolved receipt fields"
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use pretty_assertions::assert_eq;

    const CONTINENTE_RECEIPT: &str = r#"
        MODELO CONTINENTE HIPERMERCADOS SA
        NIF 502011475
        Fatura Simplificada FS 0431/118274
        Data: 14/03/2024 18:42

        LEITE MIMOSA UHT       0,89
        PAO DE FORMA           1,49
        QUEIJO FLAMENGO        3,29
        TOTAL A PAGAR          5,67
        MULTIBANCO             5,67
        IVA 6%                 0,32
        Cartao Continente: saldo 12,40
    "#;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_continente_receipt() {
        let result = FieldResolver::new().resolve(CONTINENTE_RECEIPT);

        assert_eq!(result.date, Some(ymd(2024, 3, 14)));
        assert_eq!(result.total, Some("5.67".parse().unwrap()));
        assert_eq!(
            result.total_source,
            Some(TotalSource::Labeled { label: "Total a pagar" })
        );
        assert!(result.is_complete());
        assert!(result.missing_fields().is_empty());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let resolver = FieldResolver::new();
        assert_eq!(
            resolver.resolve(CONTINENTE_RECEIPT),
            resolver.resolve(CONTINENTE_RECEIPT)
        );
    }

    #[test]
    fn test_dates_round_trip_through_surrounding_text() {
        let resolver = FieldResolver::new();
        let mut date = ymd(1999, 12, 31);

        for _ in 0..200 {
            let text = format!(
                "Loja 0042 Operador 7\nEmitido em {}\nObrigado",
                date.format("%d/%m/%Y")
            );
            assert_eq!(resolver.resolve(&text).date, Some(date), "text: {text}");
            date = date.checked_add_days(Days::new(53)).unwrap();
        }
    }

    #[test]
    fn test_dash_date() {
        let result = FieldResolver::new().resolve("14-03-2024 Total 2,00");
        assert_eq!(result.date, Some(ymd(2024, 3, 14)));
    }

    #[test]
    fn test_malformed_date() {
        let result = FieldResolver::new().resolve("32/13/2024\nTotal a pagar 4,00");
        assert_eq!(result.date, None);
        assert_eq!(result.total, Some("4.00".parse().unwrap()));
        assert_eq!(result.missing_fields(), vec!["date"]);
    }

    #[test]
    fn test_fallback_total() {
        let result = FieldResolver::new().resolve("01/02/2024\n3,50\n1,20\n9,99\n");
        assert_eq!(result.total, Some("9.99".parse().unwrap()));
        assert_eq!(result.total_source, Some(TotalSource::TrailingAmount));
    }

    #[test]
    fn test_unresolvable_total() {
        let result = FieldResolver::new().resolve("01/02/2024 sem valores");
        assert_eq!(result.total, None);
        assert_eq!(result.total_source, None);
        assert!(!result.is_complete());
        assert_eq!(result.missing_fields(), vec!["total"]);
    }

    #[test]
    fn test_empty_text() {
        let result = FieldResolver::new().resolve("");
        assert_eq!(result.missing_fields(), vec!["date", "total"]);
    }

    #[test]
    fn test_serialize() {
        let result = FieldResolver::new().resolve("01/02/2024 Total: 3,10");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["date"], "2024-02-01");
        assert_eq!(json["total"], "3.10");
        assert_eq!(json["total_source"]["kind"], "labeled");
        assert_eq!(json["total_source"]["label"], "TOTAL");
    }
}
