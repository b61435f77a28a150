//! In-memory bridge used by unit tests.

use std::cell::{Cell, RefCell};

use serde_json::{Value, json};

use crate::bridge::BridgeGateway;
use crate::error::HueError;

const BASE_URL: &str = "http://bridge.test/api/key/";

/// Serves a fixed group listing and records every write.
pub struct FakeBridge {
    groups: Value,
    gets: Cell<usize>,
    get_limit: Cell<Option<usize>>,
    put_status: Cell<Option<u16>>,
    puts: RefCell<Vec<(String, Value)>>,
}

impl FakeBridge {
    pub fn with_groups(groups: Value) -> Self {
        Self {
            groups,
            gets: Cell::new(0),
            get_limit: Cell::new(None),
            put_status: Cell::new(None),
            puts: RefCell::new(Vec::new()),
        }
    }

    /// Make every write fail with the given HTTP status.
    pub fn fail_puts_with(&self, status: u16) {
        self.put_status.set(Some(status));
    }

    /// Let `n` reads succeed, then behave as if the bridge went away.
    pub fn disconnect_after_gets(&self, n: usize) {
        self.get_limit.set(Some(n));
    }

    pub fn gets(&self) -> usize {
        self.gets.get()
    }

    pub fn puts(&self) -> Vec<(String, Value)> {
        self.puts.borrow().clone()
    }
}

impl BridgeGateway for FakeBridge {
    fn url(&self, path: &str) -> String {
        format!("{BASE_URL}{path}")
    }

    fn get(&self, path: &str) -> Result<Value, HueError> {
        let count = self.gets.get() + 1;
        self.gets.set(count);
        if self.get_limit.get().is_some_and(|limit| count > limit) {
            return Err(HueError::Transport {
                url: self.url(path),
                reason: "connection refused".to_string(),
            });
        }
        match path {
            "groups" => Ok(self.groups.clone()),
            _ => Err(HueError::Api {
                url: self.url(path),
                status: 404,
            }),
        }
    }

    fn put(&self, path: &str, body: &Value) -> Result<Value, HueError> {
        if let Some(status) = self.put_status.get() {
            return Err(HueError::Api {
                url: self.url(path),
                status,
            });
        }
        self.puts.borrow_mut().push((path.to_string(), body.clone()));
        Ok(json!([{ "success": body }]))
    }
}
