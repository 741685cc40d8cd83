//! GnuCash XML book loader
//!
//! Streams the `gnc-v2` document with quick-xml and builds a [`Book`].
//! Only the parts the reports read are kept: accounts (name, type,
//! commodity, description, parent) and transactions (date posted, number,
//! description, splits). Prices, scheduled transactions, budgets and
//! business objects are skipped.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use flate2::read::GzDecoder;
use quick_xml::events::Event;
use quick_xml::Reader;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ReportError, ReportResult};
use crate::models::{AccountId, AccountType, Book, Guid, Money, Split};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Load a book from disk, gunzipping when the file is compressed
pub fn load_book(path: impl AsRef<Path>) -> ReportResult<Book> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        ReportError::Io(format!("Failed to read book file {}: {}", path.display(), e))
    })?;

    let book = if bytes.starts_with(&GZIP_MAGIC) {
        debug!(path = %path.display(), "book file is gzip-compressed");
        parse_book(BufReader::new(GzDecoder::new(bytes.as_slice())))
    } else {
        parse_book(bytes.as_slice())
    }
    .map_err(|e| match e {
        ReportError::Book(msg) => ReportError::Book(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;

    info!(
        path = %path.display(),
        accounts = book.account_count(),
        transactions = book.transaction_count(),
        "loaded book"
    );
    Ok(book)
}

#[derive(Debug, Default)]
struct RawAccount {
    name: Option<String>,
    guid: Option<String>,
    account_type: Option<String>,
    parent: Option<String>,
    commodity: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default)]
struct RawSplit {
    value: Option<String>,
    quantity: Option<String>,
    account: Option<String>,
    memo: Option<String>,
}

#[derive(Debug, Default)]
struct RawTransaction {
    guid: Option<String>,
    num: Option<String>,
    date_posted: Option<String>,
    description: Option<String>,
    splits: Vec<RawSplit>,
}

/// Parse an uncompressed `gnc-v2` document
pub fn parse_book<R: BufRead>(input: R) -> ReportResult<Book> {
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();

    let mut stack: Vec<String> = Vec::new();
    let mut text = String::new();
    // >0 while inside <gnc:template-transactions>
    let mut template_depth = 0usize;

    let mut accounts: Vec<RawAccount> = Vec::new();
    let mut transactions: Vec<RawTransaction> = Vec::new();
    let mut account: Option<RawAccount> = None;
    let mut transaction: Option<RawTransaction> = None;
    let mut split: Option<RawSplit> = None;

    loop {
        buf.clear();
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            ReportError::Book(format!(
                "Malformed XML at byte {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if template_depth > 0 || name == "gnc:template-transactions" {
                    template_depth += 1;
                } else {
                    match name.as_str() {
                        "gnc:account" => account = Some(RawAccount::default()),
                        "gnc:transaction" => transaction = Some(RawTransaction::default()),
                        "trn:split" => split = Some(RawSplit::default()),
                        _ => {}
                    }
                }
                stack.push(name);
                text.clear();
            }
            Event::Text(t) => {
                let unescaped = t.unescape().map_err(|e| {
                    ReportError::Book(format!(
                        "Bad text at byte {}: {}",
                        reader.buffer_position(),
                        e
                    ))
                })?;
                text.push_str(&unescaped);
            }
            Event::CData(c) => {
                text.push_str(&String::from_utf8_lossy(&c.into_inner()));
            }
            Event::End(_) => {
                let name = stack.pop().unwrap_or_default();
                let value = std::mem::take(&mut text);
                if template_depth > 0 {
                    template_depth -= 1;
                    continue;
                }
                let parent = stack.last().map(String::as_str).unwrap_or("");

                if let Some(acc) = account.as_mut() {
                    match (name.as_str(), parent) {
                        ("act:name", _) => acc.name = Some(value),
                        ("act:id", _) => acc.guid = Some(value),
                        ("act:type", _) => acc.account_type = Some(value),
                        ("act:parent", _) => acc.parent = Some(value),
                        ("act:description", _) => acc.description = Some(value),
                        ("cmdty:id", "act:commodity") => acc.commodity = Some(value),
                        ("gnc:account", _) => {
                            if let Some(done) = account.take() {
                                accounts.push(done);
                            }
                        }
                        _ => {}
                    }
                } else if let Some(sp) = split.as_mut() {
                    match name.as_str() {
                        "split:value" => sp.value = Some(value),
                        "split:quantity" => sp.quantity = Some(value),
                        "split:account" => sp.account = Some(value),
                        "split:memo" => sp.memo = Some(value),
                        "trn:split" => {
                            if let (Some(done), Some(txn)) = (split.take(), transaction.as_mut()) {
                                txn.splits.push(done);
                            }
                        }
                        _ => {}
                    }
                } else if let Some(txn) = transaction.as_mut() {
                    match (name.as_str(), parent) {
                        ("trn:id", _) => txn.guid = Some(value),
                        ("trn:num", _) => txn.num = Some(value),
                        ("trn:description", _) => txn.description = Some(value),
                        ("ts:date", "trn:date-posted") => txn.date_posted = Some(value),
                        ("gnc:transaction", _) => {
                            if let Some(done) = transaction.take() {
                                transactions.push(done);
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    assemble(accounts, transactions)
}

fn assemble(accounts: Vec<RawAccount>, transactions: Vec<RawTransaction>) -> ReportResult<Book> {
    let mut roots = accounts
        .iter()
        .filter(|a| a.account_type.as_deref() == Some("ROOT"));
    let root = roots
        .next()
        .ok_or_else(|| ReportError::Book("No ROOT account found".into()))?;
    if roots.next().is_some() {
        return Err(ReportError::Book("More than one ROOT account found".into()));
    }

    let root_guid = parse_guid(root.guid.as_deref(), "root account")?;
    let mut book = Book::with_root(
        root_guid,
        root.name.clone().unwrap_or_else(|| crate::models::ROOT_ACCOUNT_NAME.into()),
    );

    let mut ids: HashMap<Guid, AccountId> = HashMap::new();
    ids.insert(root_guid, book.root());

    // Create every account first; parents may appear after their children.
    let mut pending_parents: Vec<(AccountId, Option<String>)> = Vec::new();
    for raw in accounts.into_iter() {
        let name = raw
            .name
            .ok_or_else(|| ReportError::Book("Account without a name".into()))?;
        let type_str = raw.account_type.unwrap_or_default();
        let account_type = AccountType::parse(&type_str).ok_or_else(|| {
            ReportError::Book(format!("Unknown account type '{}' for '{}'", type_str, name))
        })?;
        if account_type == AccountType::Root {
            continue;
        }
        let guid = parse_guid(raw.guid.as_deref(), &name)?;
        let id = book.insert_account(guid, name, account_type);
        let account = book.account_mut(id);
        account.commodity = raw.commodity;
        account.description = raw.description.filter(|d| !d.is_empty());
        ids.insert(guid, id);
        pending_parents.push((id, raw.parent));
    }

    for (id, parent) in pending_parents {
        let parent_id = match parent {
            Some(p) => {
                let guid = parse_guid(Some(&p), &book.account(id).name)?;
                *ids.get(&guid).ok_or_else(|| {
                    ReportError::Book(format!(
                        "Account '{}' has unknown parent {}",
                        book.account(id).name,
                        p
                    ))
                })?
            }
            None => book.root(),
        };
        book.set_parent(id, parent_id)?;
    }

    for raw in transactions {
        let guid = parse_guid(raw.guid.as_deref(), "transaction")?;
        let date_str = raw.date_posted.ok_or_else(|| {
            ReportError::Book(format!("Transaction {} has no posted date", guid))
        })?;
        let date_posted = parse_posted_date(&date_str).ok_or_else(|| {
            ReportError::Book(format!("Invalid date '{}' in transaction {}", date_str, guid))
        })?;

        let mut splits = Vec::with_capacity(raw.splits.len());
        for raw_split in raw.splits {
            let account_guid = parse_guid(raw_split.account.as_deref(), "split account")?;
            let account = *ids.get(&account_guid).ok_or_else(|| {
                ReportError::Book(format!(
                    "Transaction {} references unknown account {}",
                    guid, account_guid
                ))
            })?;
            let value_str = raw_split.value.unwrap_or_else(|| "0/1".into());
            let value = Money::parse_rational(&value_str)
                .map_err(|e| ReportError::Book(format!("Transaction {}: {}", guid, e)))?;
            let quantity = match raw_split.quantity {
                Some(q) => parse_quantity(&q).ok_or_else(|| {
                    ReportError::Book(format!("Transaction {}: invalid quantity '{}'", guid, q))
                })?,
                None => Decimal::new(value.cents(), 2),
            };
            let mut split = Split::with_quantity(account, value, quantity);
            split.memo = raw_split.memo.filter(|m| !m.is_empty());
            splits.push(split);
        }

        book.add_transaction(
            guid,
            date_posted,
            raw.num.filter(|n| !n.is_empty()),
            raw.description.filter(|d| !d.is_empty()),
            splits,
        )?;
    }

    Ok(book)
}

fn parse_guid(raw: Option<&str>, what: &str) -> ReportResult<Guid> {
    let raw = raw.ok_or_else(|| ReportError::Book(format!("Missing id for {}", what)))?;
    Guid::parse(raw).map_err(|e| ReportError::Book(format!("Bad id '{}' for {}: {}", raw, what, e)))
}

/// `2024-01-15 10:59:00 +0000` is the usual form; older files drop the offset
fn parse_posted_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a rational share quantity such as `"1500000/10000"`
fn parse_quantity(s: &str) -> Option<Decimal> {
    let s = s.trim();
    let (num, denom) = s.split_once('/').unwrap_or((s, "1"));
    let num: i64 = num.parse().ok()?;
    let denom: i64 = denom.parse().ok()?;
    Decimal::from(num).checked_div(Decimal::from(denom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gnucash::fixtures::SAMPLE_BOOK;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_parse_accounts_and_hierarchy() {
        let book = parse_book(SAMPLE_BOOK.as_bytes()).unwrap();

        let checking = book.find_accounts_by_name("Checking Account")[0];
        assert_eq!(book.full_name(checking), "Assets:Current Assets:Checking Account");
        assert_eq!(book.account(checking).account_type, AccountType::Bank);
        assert_eq!(book.account(checking).commodity.as_deref(), Some("USD"));

        let fund = book.find_accounts_by_name("Index Fund")[0];
        assert_eq!(book.account(fund).account_type, AccountType::Mutual);
        assert_eq!(book.account(fund).commodity.as_deref(), Some("VFIAX"));
    }

    #[test]
    fn test_parse_transactions() {
        let book = parse_book(SAMPLE_BOOK.as_bytes()).unwrap();
        let checking = book.find_accounts_by_name("Checking Account")[0];

        let splits: Vec<_> = book.splits(checking).collect();
        assert_eq!(splits.len(), 6);

        let (txn, split) = splits[0];
        assert_eq!(txn.date_posted, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(txn.description.as_deref(), Some("Opening Balance"));
        assert_eq!(split.value.cents(), 500000);

        let (txn, split) = splits[1];
        assert_eq!(txn.num.as_deref(), Some("1001"));
        assert_eq!(txn.description.as_deref(), Some("Grocery & Co"));
        assert_eq!(split.value.cents(), -12345);
    }

    #[test]
    fn test_child_listed_before_its_parent() {
        let xml = r#"<?xml version="1.0" encoding="utf-8" ?>
<gnc-v2 xmlns:gnc="http://www.gnucash.org/XML/gnc" xmlns:act="http://www.gnucash.org/XML/act">
<gnc:book version="2.0.0">
<gnc:account version="2.0.0">
  <act:name>Child</act:name>
  <act:id type="guid">c0000000000000000000000000000002</act:id>
  <act:type>BANK</act:type>
  <act:parent type="guid">c0000000000000000000000000000001</act:parent>
</gnc:account>
<gnc:account version="2.0.0">
  <act:name>Root Account</act:name>
  <act:id type="guid">c0000000000000000000000000000000</act:id>
  <act:type>ROOT</act:type>
</gnc:account>
<gnc:account version="2.0.0">
  <act:name>Parent &amp; Co</act:name>
  <act:id type="guid">c0000000000000000000000000000001</act:id>
  <act:type>ASSET</act:type>
  <act:parent type="guid">c0000000000000000000000000000000</act:parent>
</gnc:account>
</gnc:book>
</gnc-v2>
"#;
        let book = parse_book(xml.as_bytes()).unwrap();
        let child = book.find_accounts_by_name("Child")[0];
        let parent = book.find_accounts_by_name("Parent & Co")[0];

        assert_eq!(book.full_name(child), "Parent & Co:Child");
        assert_eq!(book.account(child).parent, Some(parent));
        assert_eq!(book.account(parent).parent, Some(book.root()));
    }

    #[test]
    fn test_share_quantity_is_kept() {
        let book = parse_book(SAMPLE_BOOK.as_bytes()).unwrap();
        let fund = book.find_accounts_by_name("Index Fund")[0];
        let (_, split) = book.splits(fund).next().unwrap();
        assert_eq!(split.value.cents(), 100000);
        assert_eq!(split.quantity, Decimal::new(25, 1));
    }

    #[test]
    fn test_template_transactions_are_ignored() {
        let book = parse_book(SAMPLE_BOOK.as_bytes()).unwrap();
        let roots = book
            .accounts()
            .filter(|a| a.account_type == AccountType::Root)
            .count();
        assert_eq!(roots, 1);
        assert!(book.find_accounts_by_name("Template Root").is_empty());
    }

    #[test]
    fn test_load_gzip_and_plain() {
        let temp_dir = TempDir::new().unwrap();

        let plain = temp_dir.path().join("plain.gnucash");
        std::fs::write(&plain, SAMPLE_BOOK).unwrap();

        let zipped = temp_dir.path().join("zipped.gnucash");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(SAMPLE_BOOK.as_bytes()).unwrap();
        std::fs::write(&zipped, encoder.finish().unwrap()).unwrap();

        let a = load_book(&plain).unwrap();
        let b = load_book(&zipped).unwrap();
        assert_eq!(a.account_count(), b.account_count());
        assert_eq!(a.transaction_count(), b.transaction_count());
    }

    #[test]
    fn test_missing_file() {
        let err = load_book("/definitely/not/here.gnucash").unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }

    #[test]
    fn test_unknown_split_account_is_an_error() {
        let xml = SAMPLE_BOOK.replace(
            "<split:account type=\"guid\">a0000000000000000000000000000003</split:account>",
            "<split:account type=\"guid\">ffffffffffffffffffffffffffffffff</split:account>",
        );
        let err = parse_book(xml.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("unknown account"));
    }

    #[test]
    fn test_posted_date_forms() {
        let d = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        assert_eq!(parse_posted_date("2024-05-06 10:59:00 +0000"), Some(d));
        assert_eq!(parse_posted_date("2024-05-06 23:00:00 -0500"), Some(d));
        assert_eq!(parse_posted_date("2024-05-06 00:00:00"), Some(d));
        assert_eq!(parse_posted_date("2024-05-06"), Some(d));
        assert_eq!(parse_posted_date("May 6"), None);
    }
}
