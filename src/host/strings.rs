//! Localized strings for prompts

#[cfg(test)]
use mockall::automock;

pub const UPDATE_TITLE: &str = "update.title";
pub const UPDATE_BODY: &str = "update.body";
pub const BUTTON_UPDATE: &str = "button.update";
pub const BUTTON_LATER: &str = "button.later";
pub const BUTTON_OK: &str = "button.ok";

const EN: &[(&str, &str)] = &[
    (UPDATE_TITLE, "Update Available"),
    (
        UPDATE_BODY,
        "A new version is available. Please update to the latest version.",
    ),
    (BUTTON_UPDATE, "Update"),
    (BUTTON_LATER, "Later"),
    (BUTTON_OK, "OK"),
];

const JA: &[(&str, &str)] = &[
    (UPDATE_TITLE, "アップデートのお知らせ"),
    (
        UPDATE_BODY,
        "新しいバージョンが利用可能です。最新バージョンにアップデートしてください。",
    ),
    (BUTTON_UPDATE, "アップデート"),
    (BUTTON_LATER, "あとで"),
    (BUTTON_OK, "OK"),
];

/// Trait for looking up localized strings by key
#[cfg_attr(test, automock)]
pub trait StringLookup: Send + Sync {
    fn string(&self, key: &str) -> String;
}

/// String tables shipped with the crate
#[derive(Debug, Clone)]
pub struct BundledStrings {
    table: &'static [(&'static str, &'static str)],
}

impl BundledStrings {
    /// Tables for `locale` ("ja", "ja-JP", "en_US", ...); unknown locales use English
    pub fn for_locale(locale: &str) -> Self {
        let language = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        let table = match language.as_str() {
            "ja" => JA,
            _ => EN,
        };

        Self { table }
    }

    fn find(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
        table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

impl Default for BundledStrings {
    fn default() -> Self {
        Self { table: EN }
    }
}

impl StringLookup for BundledStrings {
    fn string(&self, key: &str) -> String {
        Self::find(self.table, key)
            .or_else(|| Self::find(EN, key))
            .unwrap_or(key)
            .to_string()
    }
}

/// Use `custom` when non-empty, otherwise the localized string for `key`
pub fn resolve(custom: &str, key: &str, strings: &dyn StringLookup) -> String {
    if custom.is_empty() {
        strings.string(key)
    } else {
        custom.to_string()
    }
}
