//! Credit card payments.

use super::{reject_amount, transaction_id, PaymentProcessor};
use crate::model::{Money, OrderId, PaymentMethod, PaymentResult};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

/// Why card details were refused.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("Card number must be between 13-19 digits")]
    InvalidNumber,
    #[error("Expiry must be in MM/YY format")]
    InvalidExpiry,
    #[error("CVC must be 3 digits")]
    InvalidCvc,
}

/// Card details as typed into the checkout form.
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub number: String,
    pub expiry: String,
    pub cvc: String,
}

// Never print the full number or the CVC.
impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("last_four", &self.last_four())
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl CardDetails {
    pub fn new(number: impl Into<String>, expiry: impl Into<String>, cvc: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            expiry: expiry.into(),
            cvc: cvc.into(),
        }
    }

    /// The number without spaces or dashes.
    fn digits(&self) -> String {
        self.number
            .chars()
            .filter(|c| !matches!(c, ' ' | '-'))
            .collect()
    }

    pub fn validate(&self) -> Result<(), CardError> {
        let digits = self.digits();
        if !(13..=19).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CardError::InvalidNumber);
        }
        if !valid_expiry(&self.expiry) {
            return Err(CardError::InvalidExpiry);
        }
        if self.cvc.len() != 3 || !self.cvc.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CardError::InvalidCvc);
        }
        Ok(())
    }

    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self.digits().chars().collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

/// `MM/YY` with `MM` in `01..=12`.
fn valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    let two_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
    two_digits(month) && two_digits(year) && matches!(month.parse::<u8>(), Ok(1..=12))
}

#[derive(Debug, Clone)]
pub struct CardPayment {
    card: CardDetails,
}

impl CardPayment {
    pub fn new(card: CardDetails) -> Self {
        Self { card }
    }
}

#[async_trait]
impl PaymentProcessor for CardPayment {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::CreditCard
    }

    async fn process(&self, amount: Money, order_id: Option<OrderId>) -> PaymentResult {
        info!(%amount, card = %self.card.last_four(), "Processing card payment");
        if let Some(refused) = reject_amount(amount) {
            return refused;
        }
        if let Err(e) = self.card.validate() {
            warn!(error = %e, "Card refused");
            return PaymentResult::declined(e.to_string());
        }
        PaymentResult::approved(transaction_id("CC"), order_id)
    }

    fn card_last_four(&self) -> Option<String> {
        Some(self.card.last_four())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn card(number: &str, expiry: &str, cvc: &str) -> CardDetails {
        CardDetails::new(number, expiry, cvc)
    }

    #[test]
    fn accepts_well_formed_card() {
        assert_eq!(card("4111 1111 1111 1111", "09/27", "123").validate(), Ok(()));
        assert_eq!(card("4111111111111", "12/30", "000").validate(), Ok(()));
    }

    #[test]
    fn number_length_and_digits() {
        assert_eq!(card("411111111111", "09/27", "123").validate(), Err(CardError::InvalidNumber));
        assert_eq!(card("41111111111111111111", "09/27", "123").validate(), Err(CardError::InvalidNumber));
        assert_eq!(card("4111x11111111111", "09/27", "123").validate(), Err(CardError::InvalidNumber));
    }

    #[test]
    fn expiry_format() {
        for bad in ["13/27", "00/27", "9/27", "09-27", "09/2027", ""] {
            assert_eq!(card("4111111111111111", bad, "123").validate(), Err(CardError::InvalidExpiry), "{bad}");
        }
    }

    #[test]
    fn cvc_is_three_digits() {
        assert_eq!(card("4111111111111111", "09/27", "12").validate(), Err(CardError::InvalidCvc));
        assert_eq!(card("4111111111111111", "09/27", "12a").validate(), Err(CardError::InvalidCvc));
    }

    #[test]
    fn debug_hides_number() {
        let shown = format!("{:?}", card("4111111111111234", "09/27", "987"));
        assert!(shown.contains("1234"));
        assert!(!shown.contains("4111111111111234"));
        assert!(!shown.contains("987"));
    }

    #[tokio::test]
    async fn approved_payment_keeps_last_four() {
        let payment = CardPayment::new(card("4111111111111234", "09/27", "123"));
        let result = payment.process(Decimal::new(1399, 2), Some(OrderId(3))).await;
        assert!(result.success);
        assert!(result.transaction_id.unwrap().starts_with("CC-"));
        assert_eq!(result.order_id, Some(OrderId(3)));
        assert_eq!(payment.card_last_four().as_deref(), Some("1234"));
    }

    #[tokio::test]
    async fn invalid_card_is_declined_not_raised() {
        let payment = CardPayment::new(card("123", "09/27", "123"));
        let result = payment.process(Decimal::new(1399, 2), None).await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Card number must be between 13-19 digits"));
        assert_eq!(result.transaction_id, None);
    }
}
