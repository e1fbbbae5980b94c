//! Response normalizer - reshapes a raw IntelBase lookup result into the
//! UI-friendly structure (account cards plus a breach summary list).
//!
//! This is a pure transform over `serde_json::Value`. Upstream data is not
//! trusted: every field access goes through typed accessors that treat a
//! missing or wrong-typed value as absent, so partial or malformed responses
//! degrade to omitted fields instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Breach descriptions are clipped to this many characters.
const MAX_BREACH_DESCRIPTION_CHARS: usize = 240;

/// UI-shaped view of one raw lookup result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub email: Option<String>,
    pub breach_count: usize,
    pub breaches: Vec<BreachSummary>,
    pub cards: Vec<Card>,
    /// Untouched upstream payload, kept for the "view raw" UI affordance.
    pub raw: Value,
    /// Sorted top-level key names of the upstream payload.
    pub raw_keys: Vec<String>,
}

/// Summary of one discovered account/module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub module: String,
    pub title: String,
    pub subtitle: String,
    pub avatar: String,
    pub fields: Vec<CardField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardField {
    pub label: String,
    pub value: Value,
}

/// Summary of one historical data-breach record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreachSummary {
    pub name: Option<String>,
    pub date: Option<String>,
    pub verified: Option<bool>,
    pub description: String,
}

/// Normalize a raw lookup result. Never fails; anything that does not match
/// the expected shape is simply left out of the output.
pub fn normalize(raw: &Value) -> NormalizedResult {
    let mut out = NormalizedResult {
        email: None,
        breach_count: 0,
        breaches: Vec::new(),
        cards: Vec::new(),
        raw: raw.clone(),
        raw_keys: sorted_keys(raw),
    };

    if let Some(identifier) = raw.get("identifier").and_then(Value::as_object) {
        out.email = non_empty_str(identifier, "email").map(str::to_owned);

        if let Some(accounts) = identifier.get("accounts").and_then(Value::as_array) {
            for entry in accounts {
                if let Some(entry) = entry.as_object() {
                    out.cards.push(account_card(entry));
                }
            }
        }
    }

    if let Some(breaches) = raw.get("data_breaches").and_then(Value::as_array) {
        out.breach_count = breaches.len();
        for entry in breaches {
            if let Some(entry) = entry.as_object() {
                out.breaches.push(breach_summary(entry));
            }
        }
    }

    out
}

fn sorted_keys(raw: &Value) -> Vec<String> {
    let mut keys: Vec<String> = raw
        .as_object()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default();
    keys.sort();
    keys
}

/// String-typed field, with the empty string treated as absent.
fn non_empty_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn account_card(entry: &Map<String, Value>) -> Card {
    let empty = Map::new();
    let module = entry
        .get("module")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let data = entry
        .get("data")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let module_key = non_empty_str(module, "name")
        .or_else(|| non_empty_str(module, "id"))
        .unwrap_or("")
        .to_lowercase();

    let title = non_empty_str(module, "name_formatted")
        .or_else(|| non_empty_str(module, "name"))
        .unwrap_or("Module")
        .to_string();

    let subtitle = non_empty_str(module, "domain").unwrap_or("").to_string();

    let avatar = non_empty_str(data, "avatar_url")
        .or_else(|| non_empty_str(data, "profile_image"))
        .or_else(|| non_empty_str(data, "image"))
        .unwrap_or("")
        .to_string();

    let fields = extractor_for(&module_key)(data);

    Card {
        module: module_key,
        title,
        subtitle,
        avatar,
        fields,
    }
}

type FieldExtractor = fn(&Map<String, Value>) -> Vec<CardField>;

/// Field-selection policy keyed by module; unknown modules fall back to the
/// generic extractor.
fn extractor_for(module_key: &str) -> FieldExtractor {
    match module_key {
        "github" => github_fields,
        "google" => google_fields,
        "domain" => domain_fields,
        _ => generic_fields,
    }
}

fn github_fields(data: &Map<String, Value>) -> Vec<CardField> {
    let mut fields = Vec::new();
    push_field(&mut fields, "Username", data.get("username"));
    push_field(&mut fields, "Profile", data.get("profile_url"));
    push_field(&mut fields, "ID", data.get("id"));
    fields
}

fn google_fields(data: &Map<String, Value>) -> Vec<CardField> {
    let mut fields = Vec::new();
    push_field(&mut fields, "Profile", data.get("profile_url"));
    push_field(&mut fields, "Last seen", data.get("last_seen_date"));
    push_field(&mut fields, "Enterprise user", data.get("enterprise_user"));
    push_field(&mut fields, "Active apps", data.get("active_google_apps"));
    fields
}

fn domain_fields(data: &Map<String, Value>) -> Vec<CardField> {
    let mut fields = Vec::new();
    push_field(&mut fields, "Provider", data.get("email_provider"));
    push_field(&mut fields, "Can receive email", data.get("can_receive_email"));
    push_field(&mut fields, "MX hosts", data.get("mx_hosts"));
    fields
}

fn generic_fields(data: &Map<String, Value>) -> Vec<CardField> {
    let mut fields = Vec::new();
    for key in ["username", "profile_url", "id"] {
        push_field(&mut fields, &humanize_label(key), data.get(key));
    }
    fields
}

/// Append a field unless the value is null, an empty string, an empty array
/// or an empty object. `0` and `false` are kept.
fn push_field(fields: &mut Vec<CardField>, label: &str, value: Option<&Value>) {
    let Some(value) = value else { return };
    let empty = match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(m) => m.is_empty(),
        _ => false,
    };
    if !empty {
        fields.push(CardField {
            label: label.to_string(),
            value: value.clone(),
        });
    }
}

/// "active_google_apps" -> "Active Google Apps"
fn humanize_label(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn breach_summary(entry: &Map<String, Value>) -> BreachSummary {
    let name = non_empty_str(entry, "name")
        .or_else(|| non_empty_str(entry, "title"))
        .or_else(|| non_empty_str(entry, "source"))
        .map(str::to_owned);

    let date = non_empty_str(entry, "breach_date")
        .or_else(|| non_empty_str(entry, "date"))
        .map(str::to_owned);

    let verified = entry.get("verified").and_then(Value::as_bool);

    // Character truncation, not byte truncation - descriptions can carry
    // multi-byte text and must never split a code point.
    let description = entry
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("")
        .chars()
        .take(MAX_BREACH_DESCRIPTION_CHARS)
        .collect();

    BreachSummary {
        name,
        date,
        verified,
        description,
    }
}
