//! Book model
//!
//! The whole ledger: an arena of accounts forming a tree under one ROOT
//! account, plus an arena of transactions. Accounts refer to their splits
//! through [`SplitRef`] so a split is stored once, inside its transaction.

use chrono::NaiveDate;
use std::collections::VecDeque;
use uuid::Uuid;

use super::account::{Account, AccountType};
use super::ids::{AccountId, Guid, TransactionId};
use super::transaction::{Split, SplitRef, Transaction};
use crate::error::{ReportError, ReportResult};

/// Name GnuCash gives the root of the account tree
pub const ROOT_ACCOUNT_NAME: &str = "Root Account";

/// An in-memory GnuCash book
#[derive(Debug, Clone)]
pub struct Book {
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    root: AccountId,
}

impl Book {
    /// Create an empty book holding only a root account
    pub fn new() -> Self {
        Self::with_root(synthetic_guid(0), ROOT_ACCOUNT_NAME)
    }

    /// Create an empty book whose root has the given identity
    pub fn with_root(guid: Guid, name: impl Into<String>) -> Self {
        let root = AccountId::from_index(0);
        Self {
            accounts: vec![Account::new(root, guid, name, AccountType::Root)],
            transactions: Vec::new(),
            root,
        }
    }

    /// Add a detached account; link it with [`Book::set_parent`]
    pub fn insert_account(
        &mut self,
        guid: Guid,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> AccountId {
        let id = AccountId::from_index(self.accounts.len());
        self.accounts.push(Account::new(id, guid, name, account_type));
        id
    }

    /// Add an account under `parent`, generating a GUID from its position
    pub fn add_account(
        &mut self,
        parent: AccountId,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> AccountId {
        let guid = synthetic_guid(self.accounts.len() as u128);
        let id = self.insert_account(guid, name, account_type);
        self.accounts[id.index()].parent = Some(parent);
        self.accounts[parent.index()].children.push(id);
        id
    }

    /// Attach `child` under `parent`, appending to the parent's child list
    pub fn set_parent(&mut self, child: AccountId, parent: AccountId) -> ReportResult<()> {
        if child == self.root {
            return Err(ReportError::Book("The root account cannot have a parent".into()));
        }
        if child == parent {
            return Err(ReportError::Book(format!(
                "Account '{}' cannot be its own parent",
                self.account(child).name
            )));
        }
        if let Some(old) = self.accounts[child.index()].parent {
            self.accounts[old.index()].children.retain(|c| *c != child);
        }
        self.accounts[child.index()].parent = Some(parent);
        self.accounts[parent.index()].children.push(child);
        Ok(())
    }

    /// Mutable access for attributes the loader fills in after creation
    pub fn account_mut(&mut self, id: AccountId) -> &mut Account {
        &mut self.accounts[id.index()]
    }

    /// Record a transaction and index its splits on their accounts
    pub fn add_transaction(
        &mut self,
        guid: Guid,
        date_posted: NaiveDate,
        num: Option<String>,
        description: Option<String>,
        splits: Vec<Split>,
    ) -> ReportResult<TransactionId> {
        let id = TransactionId::from_index(self.transactions.len());
        for (index, split) in splits.iter().enumerate() {
            let account = self
                .accounts
                .get_mut(split.account.index())
                .ok_or_else(|| ReportError::account_not_found(split.account.to_string()))?;
            account.splits.push(SplitRef {
                transaction: id,
                index,
            });
        }
        let mut txn = Transaction::new(id, guid, date_posted);
        txn.num = num;
        txn.description = description;
        txn.splits = splits;
        self.transactions.push(txn);
        Ok(id)
    }

    /// Convenience for building books in code: one transaction with
    /// synthetic identity
    pub fn post(
        &mut self,
        date_posted: NaiveDate,
        description: &str,
        splits: Vec<Split>,
    ) -> ReportResult<TransactionId> {
        let guid = synthetic_guid((1u128 << 64) + self.transactions.len() as u128);
        let description = Some(description.to_string()).filter(|d| !d.is_empty());
        self.add_transaction(guid, date_posted, None, description, splits)
    }

    /// The root account id
    pub fn root(&self) -> AccountId {
        self.root
    }

    /// Look up an account
    pub fn account(&self, id: AccountId) -> &Account {
        &self.accounts[id.index()]
    }

    /// Look up a transaction
    pub fn transaction(&self, id: TransactionId) -> &Transaction {
        &self.transactions[id.index()]
    }

    /// All accounts in arena order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    /// All transactions in file order
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// Number of accounts including the root
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Number of transactions
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Splits posted to an account, each paired with its transaction
    pub fn splits(&self, id: AccountId) -> impl Iterator<Item = (&Transaction, &Split)> {
        self.account(id).splits.iter().map(move |r| {
            let txn = self.transaction(r.transaction);
            (txn, &txn.splits[r.index])
        })
    }

    /// Parent account, if any
    pub fn parent(&self, id: AccountId) -> Option<&Account> {
        self.account(id).parent.map(|p| self.account(p))
    }

    /// Breadth-first walk of the account tree starting at the root
    pub fn walk(&self) -> Walk<'_> {
        self.walk_from(self.root)
    }

    /// Breadth-first walk of the subtree rooted at `start`
    pub fn walk_from(&self, start: AccountId) -> Walk<'_> {
        Walk {
            book: self,
            queue: VecDeque::from([start]),
        }
    }

    /// Every account with exactly this name, in walk order
    pub fn find_accounts_by_name(&self, name: &str) -> Vec<AccountId> {
        self.walk().filter(|a| a.name == name).map(|a| a.id).collect()
    }

    /// Colon-separated path from the top-level account down, root excluded
    pub fn full_name(&self, id: AccountId) -> String {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == self.root {
                break;
            }
            let account = self.account(cur);
            parts.push(account.name.as_str());
            current = account.parent;
        }
        parts.reverse();
        parts.join(":")
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

/// Breadth-first account iterator returned by [`Book::walk`]
pub struct Walk<'a> {
    book: &'a Book,
    queue: VecDeque<AccountId>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Account;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        let account = self.book.account(id);
        self.queue.extend(account.children.iter().copied());
        Some(account)
    }
}

fn synthetic_guid(n: u128) -> Guid {
    Guid::from(Uuid::from_u128(n + 1))
}
