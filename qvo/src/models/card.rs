//! Cards and card inscriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Card brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardType {
    /// Visa.
    #[serde(rename = "VISA")]
    Visa,
    /// Mastercard.
    #[serde(rename = "MASTERCARD")]
    Mastercard,
    /// Any brand this client does not know yet.
    #[serde(untagged)]
    Other(String),
}

/// Whether a card is credit or debit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardPaymentType {
    /// Credit card (`CD`).
    #[serde(rename = "CD")]
    Credit,
    /// Debit card (`DB`).
    #[serde(rename = "DB")]
    Debit,
    /// Unrecognised value, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

/// A card stored for a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Card identifier.
    pub id: String,
    /// Last four digits of the card number.
    pub last_4_digits: String,
    /// Card brand.
    pub card_type: CardType,
    /// Credit or debit.
    pub payment_type: CardPaymentType,
    /// Consecutive failed charges.
    #[serde(default)]
    pub failure_count: i32,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// State of a card inscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InscriptionStatus {
    /// The customer has not finished the inscription flow.
    WaitingResponse,
    /// The card was inscribed.
    Succeeded,
    /// The inscription failed.
    Failed,
    /// Unrecognised value, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

/// A card inscription as returned by `GET .../cards/inscriptions/{uid}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardInscription {
    /// Inscription identifier.
    pub uid: String,
    /// Current state.
    pub status: InscriptionStatus,
    /// The inscribed card, once the inscription succeeds.
    #[serde(default)]
    pub card: Option<Card>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Response to starting a card inscription.
///
/// The customer must be sent to `redirect_url` before `expiration_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInscriptionRequest {
    /// Identifier to poll with [`get_card_inscription`](crate::Client::get_card_inscription).
    pub inscription_uid: String,
    /// Page where the customer enters the card.
    pub redirect_url: String,
    /// When the redirect stops being valid.
    pub expiration_date: DateTime<Utc>,
}
