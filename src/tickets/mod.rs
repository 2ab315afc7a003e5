//! Ticket pricing cards for the home page

use serde::Serialize;

use crate::config::{TicketConfig, TicketsConfig};
use crate::i18n::I18n;

/// Translation namespace of ticket labels
const LABEL_NAMESPACE: &str = "pages.home.tickets";

/// A ticket ready for display in one locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketCard {
    pub label: String,
    /// Price in euros, excluding VAT
    pub price: u32,
    pub quantity: u32,
    pub disabled: bool,
    pub date: String,
    /// Where the card links to
    pub href: String,
    /// `active` or `disabled`
    pub state: &'static str,
}

impl TicketCard {
    fn new(ticket: &TicketConfig, label: String, href: &str) -> Self {
        Self {
            label,
            price: ticket.price,
            quantity: ticket.quantity,
            disabled: ticket.disabled,
            date: ticket.date.clone(),
            href: href.to_string(),
            state: if ticket.disabled { "disabled" } else { "active" },
        }
    }
}

/// Build the cards for a locale, in configured order
pub fn ticket_cards(config: &TicketsConfig, i18n: &I18n, locale: &str) -> Vec<TicketCard> {
    config
        .items
        .iter()
        .map(|ticket| {
            let label = i18n.get(locale, &format!("{}.{}", LABEL_NAMESPACE, ticket.label));
            TicketCard::new(ticket, label, &config.url)
        })
        .collect()
}

/// Whether any ticket can currently be bought
pub fn on_sale(config: &TicketsConfig) -> bool {
    config.items.iter().any(|t| !t.disabled)
}
