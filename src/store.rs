use std::io::BufRead;

use log::{debug, warn};

use crate::{account::Account, error::Error, SplayTree};

/// The identifier after which [`AccountStore::open_account()`] starts
/// allocating, unless configured otherwise.
pub const DEFAULT_FIRST_ID: u32 = 15_815_690;

/// A store of [`Account`] records indexed by a [`SplayTree`].
///
/// Lookups splay the accessed account to the root of the index, so
/// repeatedly accessed accounts stay cheap to reach.
#[derive(Debug)]
pub struct AccountStore {
    accounts: SplayTree<Account>,

    /// The last identifier handed out by [`AccountStore::open_account()`].
    last_id: u32,
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::with_first_id(DEFAULT_FIRST_ID)
    }
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an empty store that allocates identifiers strictly greater
    /// than `last_id`.
    pub fn with_first_id(last_id: u32) -> Self {
        Self {
            accounts: SplayTree::new(),
            last_id,
        }
    }

    /// Load comma-delimited account records from `reader`.
    ///
    /// The first line is a header and is skipped, as are blank lines. Lines
    /// that fail to parse are logged and skipped. Records whose identifier is
    /// already stored are discarded.
    ///
    /// Returns the number of records inserted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading any line (including the header)
    /// fails. Records read before the failing line remain stored.
    pub fn load_csv<R>(&mut self, reader: R) -> Result<usize, Error>
    where
        R: BufRead,
    {
        let mut inserted = 0;

        for (i, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(v) => v,
                Err(e) => {
                    warn!(
                        "account load aborted at line {} after inserting {inserted} records",
                        i + 1
                    );
                    return Err(e.into());
                }
            };

            // Skip the header and blank lines.
            if i == 0 || line.trim().is_empty() {
                continue;
            }

            let account = match line.parse::<Account>() {
                Ok(v) => v,
                Err(source) => {
                    // Lines are 1-indexed.
                    let err = Error::Parse { line: i + 1, source };
                    warn!("skipping account record: {err}");
                    continue;
                }
            };

            if self.accounts.insert(account)? {
                inserted += 1;
            }
        }

        debug!(
            "loaded {inserted} account records, {} accounts stored",
            self.accounts.len()
        );

        Ok(inserted)
    }

    /// Open a new account with a freshly allocated identifier, returning the
    /// identifier.
    ///
    /// Identifiers already taken by stored accounts (such as ones loaded from
    /// a file) are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdExhausted`] if no free identifier above the last one
    /// handed out remains, or [`Error::Alloc`] if the account cannot be
    /// stored.
    pub fn open_account(
        &mut self,
        credit_score: i32,
        age: u16,
        tenure: u16,
        balance: f64,
        active: bool,
    ) -> Result<u32, Error> {
        loop {
            let id = self.last_id.checked_add(1).ok_or(Error::IdExhausted)?;

            let inserted = self.accounts.insert(Account {
                id,
                credit_score,
                age,
                tenure,
                balance,
                active,
            })?;
            self.last_id = id;

            if inserted {
                debug!("opened account {id}");
                return Ok(id);
            }
            debug!("account id {id} already taken, skipping");
        }
    }

    /// Insert `account`, returning false if an account with the same
    /// identifier is already stored (the stored account is kept).
    pub fn insert(&mut self, account: Account) -> Result<bool, Error> {
        self.accounts.insert(account)
    }

    /// Look up the account with identifier `id`.
    pub fn get(&mut self, id: u32) -> Option<&Account> {
        self.accounts.search_by_key(&id).map(|v| v.value())
    }

    /// Overwrite the stored account with the same identifier as `account`.
    ///
    /// Returns false if no such account exists.
    pub fn update(&mut self, account: Account) -> bool {
        let id = account.id;
        let updated = self.accounts.replace(account).is_some();
        debug!("update account {id}: updated={updated}");
        updated
    }

    /// Remove and return the account with identifier `id`.
    ///
    /// A miss leaves the index untouched.
    pub fn remove(&mut self, id: u32) -> Option<Account> {
        let removed = self.accounts.take_by_key(&id)?;
        debug!("removed account {id}");
        Some(removed)
    }

    /// All stored accounts in ascending identifier order.
    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.collect_ordered()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Read access to the underlying index.
    pub fn tree(&self) -> &SplayTree<Account> {
        &self.accounts
    }
}
