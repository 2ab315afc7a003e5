//! Configuration module

mod site;

pub use site::SiteConfig;
pub use site::TicketConfig;
pub use site::TicketsConfig;
