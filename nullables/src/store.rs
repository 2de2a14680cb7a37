//! Nullable store — thread-safe in-memory storage for testing.

use std::collections::HashMap;
use std::sync::Mutex;
use vault_store::{GovernanceStore, PoolStore, StoreError};
use vault_types::Address;

/// An in-memory pool + governance store for testing.
pub struct NullStore {
    account_histories: Mutex<HashMap<String, Vec<u8>>>,
    pool_meta: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
    proposals: Mutex<HashMap<u64, Vec<u8>>>,
    governance_meta: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            account_histories: Mutex::new(HashMap::new()),
            pool_meta: Mutex::new(HashMap::new()),
            proposals: Mutex::new(HashMap::new()),
            governance_meta: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolStore for NullStore {
    fn put_account_history(&self, account: &Address, data: &[u8]) -> Result<(), StoreError> {
        self.account_histories
            .lock()
            .unwrap()
            .insert(account.to_string(), data.to_vec());
        Ok(())
    }

    fn get_account_history(&self, account: &Address) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .account_histories
            .lock()
            .unwrap()
            .get(account.as_str())
            .cloned())
    }

    fn iter_account_histories(&self) -> Result<Vec<(Address, Vec<u8>)>, StoreError> {
        Ok(self
            .account_histories
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (Address::new(k.clone()), v.clone()))
            .collect())
    }

    fn put_meta(&self, key: &[u8], data: &[u8]) -> Result<(), StoreError> {
        self.pool_meta
            .lock()
            .unwrap()
            .insert(key.to_vec(), data.to_vec());
        Ok(())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.pool_meta.lock().unwrap().get(key).cloned())
    }
}

impl GovernanceStore for NullStore {
    fn put_proposal(&self, id: u64, data: &[u8]) -> Result<(), StoreError> {
        self.proposals.lock().unwrap().insert(id, data.to_vec());
        Ok(())
    }

    fn get_proposal(&self, id: u64) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.proposals.lock().unwrap().get(&id).cloned())
    }

    fn proposal_count(&self) -> Result<u64, StoreError> {
        Ok(self.proposals.lock().unwrap().len() as u64)
    }

    fn put_meta(&self, key: &[u8], data: &[u8]) -> Result<(), StoreError> {
        self.governance_meta
            .lock()
            .unwrap()
            .insert(key.to_vec(), data.to_vec());
        Ok(())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.governance_meta.lock().unwrap().get(key).cloned())
    }
}
