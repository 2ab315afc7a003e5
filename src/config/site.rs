//! Site configuration (_config.yml)

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub blog_dir: String,
    pub assets_dir: String,
    pub public_dir: String,
    pub i18n_dir: String,

    // Languages
    pub default_locale: String,
    pub locales: Vec<String>,

    // Blog
    pub excerpt_length: usize,
    pub home_posts: usize,
    pub date_format: String,
    /// Extra image keys merged over the built-in table (key -> file name)
    #[serde(default)]
    pub blog_images: IndexMap<String, String>,

    // Home page
    #[serde(default)]
    pub tickets: TicketsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "DevFest Nantes".to_string(),
            description: String::new(),

            url: "http://localhost:3000".to_string(),
            root: "/".to_string(),

            blog_dir: "data/blog".to_string(),
            assets_dir: "assets".to_string(),
            public_dir: "public".to_string(),
            i18n_dir: "i18n".to_string(),

            default_locale: "fr".to_string(),
            locales: vec!["fr".to_string(), "en".to_string()],

            excerpt_length: 200,
            home_posts: 3,
            date_format: "DD/MM/YYYY".to_string(),
            blog_images: IndexMap::new(),

            tickets: TicketsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Locales to render, always including the default one
    pub fn site_locales(&self) -> Vec<String> {
        let mut locales = self.locales.clone();
        if !locales.iter().any(|l| l == &self.default_locale) {
            locales.insert(0, self.default_locale.clone());
        }
        locales
    }
}

/// Ticketing configuration for the home page cards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketsConfig {
    /// Where every card links to
    pub url: String,
    pub items: Vec<TicketConfig>,
}

impl Default for TicketsConfig {
    fn default() -> Self {
        Self {
            url: "https://www.billetweb.fr/billet-devfest-nantes-2025".to_string(),
            items: vec![
                TicketConfig::new("2days-1st", 110, 1200, false, "05/06/2024 11h"),
                TicketConfig::new("2days-2nd", 110, 900, true, "???"),
                TicketConfig::new("1day", 70, 500, true, "???"),
            ],
        }
    }
}

/// A single ticket offer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketConfig {
    /// Translation key under `pages.home.tickets`
    pub label: String,
    /// Price in euros, excluding VAT
    pub price: u32,
    pub quantity: u32,
    #[serde(default)]
    pub disabled: bool,
    /// Free-form opening date shown on the card
    #[serde(default)]
    pub date: String,
}

impl TicketConfig {
    pub fn new(label: &str, price: u32, quantity: u32, disabled: bool, date: &str) -> Self {
        Self {
            label: label.to_string(),
            price,
            quantity,
            disabled,
            date: date.to_string(),
        }
    }
}
