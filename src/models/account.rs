use std::collections::HashMap;

/// One credential line from the data file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// The raw line, sent verbatim as the mini-app auth header
    pub raw_token: String,
    pub telegram_id: String,
    pub username: Option<String>,
}

impl Account {
    /// Username when the credential carries one, otherwise the telegram id
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.telegram_id)
    }
}

/// Immutable snapshot of the accounts loaded for one cycle
///
/// Keeps first-seen order; a later line with the same telegram id replaces
/// the earlier entry in its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountSet {
    accounts: Vec<Account>,
}

impl AccountSet {
    pub fn from_accounts<I: IntoIterator<Item = Account>>(accounts: I) -> Self {
        let mut ordered: Vec<Account> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for account in accounts {
            match positions.get(&account.telegram_id) {
                Some(&index) => ordered[index] = account,
                None => {
                    positions.insert(account.telegram_id.clone(), ordered.len());
                    ordered.push(account);
                }
            }
        }

        Self { accounts: ordered }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    /// The account processed last in a cycle
    pub fn last(&self) -> Option<&Account> {
        self.accounts.last()
    }

    pub fn get(&self, telegram_id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.telegram_id == telegram_id)
    }
}
