//! Browser localStorage access for highlights and the question bank.

use anyhow::Context;
use common::highlight::{HighlightStorage, StorageError};
use common::question::QuestionBank;
use common::study_const::QUESTION_BANK_STORAGE_KEY;

/// `window.localStorage`, or nothing when the browser refuses access
/// (private mode, disabled storage, desktop renderer).
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            dioxus::logger::tracing::warn!("localStorage unavailable, study data will not survive a reload");
        }
        Self { storage }
    }

    fn require(&self) -> Result<&web_sys::Storage, StorageError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not accessible".to_string()))
    }
}

impl HighlightStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.require()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.require()?
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}

/// Last imported question bank, or an empty one.
pub fn load_question_bank() -> QuestionBank {
    let storage = BrowserStorage::open();
    let raw = match storage.get_item(QUESTION_BANK_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return QuestionBank::default(),
        Err(e) => {
            dioxus::logger::tracing::warn!("Cannot read question bank: {e}");
            return QuestionBank::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(bank) => bank,
        Err(e) => {
            dioxus::logger::tracing::warn!("Discarding unreadable question bank: {e}");
            QuestionBank::default()
        }
    }
}

pub fn save_question_bank(bank: &QuestionBank) -> anyhow::Result<()> {
    let raw = serde_json::to_string(bank).context("serializing question bank")?;
    BrowserStorage::open()
        .set_item(QUESTION_BANK_STORAGE_KEY, &raw)
        .context("writing question bank to localStorage")?;
    Ok(())
}
