// Credential file loader
use crate::models::{Account, AccountSet};
use crate::{o_error, o_success};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

// Both patterns match inside the percent-encoded user JSON
static TELEGRAM_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%22id%22%3A(\d+)%2C").expect("valid id pattern"));
static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%22username%22%3A%22([^%]+)%22").expect("valid username pattern"));

pub fn extract_telegram_id(raw_token: &str) -> Option<String> {
    TELEGRAM_ID.captures(raw_token).map(|c| c[1].to_string())
}

pub fn extract_username(raw_token: &str) -> Option<String> {
    USERNAME.captures(raw_token).map(|c| c[1].to_string())
}

/// One account per non-blank line; lines without an id are dropped
pub fn parse_accounts(content: &str) -> AccountSet {
    AccountSet::from_accounts(content.lines().filter_map(|line| {
        let raw_token = line.trim();
        if raw_token.is_empty() {
            return None;
        }
        let telegram_id = extract_telegram_id(raw_token)?;
        Some(Account {
            raw_token: raw_token.to_string(),
            telegram_id,
            username: extract_username(raw_token),
        })
    }))
}

pub fn load_accounts(path: &Path) -> Result<AccountSet, std::io::Error> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_accounts(&content))
}

/// Loads a fresh snapshot; an unreadable file is logged and yields no accounts
pub fn load_account_snapshot(path: &Path) -> AccountSet {
    match load_accounts(path) {
        Ok(accounts) => {
            o_success!("Loaded {} accounts successfully", accounts.len());
            accounts
        }
        Err(e) => {
            o_error!("Error loading accounts from {}: {}", path.display(), e);
            AccountSet::default()
        }
    }
}
