//! Internationalization (i18n) support

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

type Dictionary = HashMap<String, serde_yaml::Value>;

/// Dictionaries compiled into the binary
const EMBEDDED: &[(&str, &str)] = &[
    ("fr", include_str!("fr.yml")),
    ("en", include_str!("en.yml")),
];

/// Translation lookup by locale
#[derive(Debug, Clone)]
pub struct I18n {
    /// Locale used when a key is missing everywhere else
    default_locale: String,
    /// Language data: lang -> key -> translation
    translations: HashMap<String, Dictionary>,
}

impl I18n {
    /// Create a handler with the embedded dictionaries loaded
    pub fn new(default_locale: &str) -> Self {
        let mut i18n = Self {
            default_locale: default_locale.to_string(),
            translations: HashMap::new(),
        };

        for (lang, source) in EMBEDDED {
            match serde_yaml::from_str::<Dictionary>(source) {
                Ok(data) => i18n.merge(lang, data),
                Err(e) => tracing::warn!("Embedded dictionary {} is invalid: {}", lang, e),
            }
        }

        i18n
    }

    /// Load language files from a directory, overriding embedded entries
    pub fn load_languages<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str());
            if !matches!(ext, Some("yml") | Some("yaml") | Some("json")) {
                continue;
            }

            let Some(lang) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let lang = lang.to_string();

            let content = fs::read_to_string(&path)?;
            // serde_yaml reads JSON documents as well
            match serde_yaml::from_str::<Dictionary>(&content) {
                Ok(data) => {
                    self.merge(&lang, data);
                    tracing::debug!("Loaded language file: {:?}", path);
                }
                Err(e) => {
                    tracing::warn!("Failed to parse language file {:?}: {}", path, e);
                }
            }
        }

        Ok(())
    }

    /// Merge `data` into a locale, keeping keys the override does not name
    fn merge(&mut self, lang: &str, data: Dictionary) {
        let dictionary = self.translations.entry(lang.to_string()).or_default();
        for (key, value) in data {
            match dictionary.get_mut(&key) {
                Some(existing) => merge_value(existing, value),
                None => {
                    dictionary.insert(key, value);
                }
            }
        }
    }

    /// Locales that have a dictionary
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<_> = self.translations.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }

    /// Get a translation by dotted key (e.g. "pages.blog.title").
    ///
    /// Looks in `locale`, then its primary language (`en-US` -> `en`), then
    /// the default locale. Returns the key itself when nothing matches.
    pub fn get(&self, locale: &str, key: &str) -> String {
        self.lookup_chain(locale)
            .into_iter()
            .filter_map(|lang| self.translations.get(&lang))
            .find_map(|data| get_nested_value(data, key))
            .map(yaml_value_to_string)
            .unwrap_or_else(|| key.to_string())
    }

    /// All translations for a locale, flattened to dotted keys, with
    /// fallback entries filled in
    pub fn get_all_translations(&self, locale: &str) -> HashMap<String, String> {
        let mut result = HashMap::new();

        for lang in self.lookup_chain(locale) {
            if let Some(data) = self.translations.get(&lang) {
                let mut flat = HashMap::new();
                flatten_translations(data, "", &mut flat);
                for (k, v) in flat {
                    result.entry(k).or_insert(v);
                }
            }
        }

        result
    }

    fn lookup_chain(&self, locale: &str) -> Vec<String> {
        let mut chain = vec![locale.to_string()];
        if let Some((primary, _)) = locale.split_once(['-', '_']) {
            chain.push(primary.to_string());
        }
        chain.push(self.default_locale.clone());
        chain.dedup();
        chain
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new("fr")
    }
}

/// Get a nested value from a YAML map using dot notation
fn get_nested_value<'a>(data: &'a Dictionary, key: &str) -> Option<&'a serde_yaml::Value> {
    let mut parts = key.split('.');
    let mut current = data.get(parts.next()?)?;

    for part in parts {
        current = current.as_mapping()?.get(part)?;
    }

    Some(current)
}

/// Deep-merge two YAML values; mappings merge key by key, anything else is replaced
fn merge_value(target: &mut serde_yaml::Value, source: serde_yaml::Value) {
    match (target, source) {
        (serde_yaml::Value::Mapping(target), serde_yaml::Value::Mapping(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, source) => *target = source,
    }
}

/// Convert a YAML value to a string
fn yaml_value_to_string(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => String::new(),
        _ => format!("{:?}", value),
    }
}

/// Flatten translations into a HashMap with dot-notation keys
fn flatten_translations(data: &Dictionary, prefix: &str, result: &mut HashMap<String, String>) {
    for (key, value) in data {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            serde_yaml::Value::Mapping(map) => {
                let nested: Dictionary = map
                    .iter()
                    .filter_map(|(k, v)| Some((k.as_str()?.to_string(), v.clone())))
                    .collect();
                flatten_translations(&nested, &full_key, result);
            }
            serde_yaml::Value::Sequence(_) | serde_yaml::Value::Tagged(_) => {}
            scalar => {
                result.insert(full_key, yaml_value_to_string(scalar));
            }
        }
    }
}
