//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了基于内存的后备存储实现，主要用于测试和嵌入式场景。

use crate::error::Result;
use crate::store::Store;
use std::collections::BTreeMap;
use tracing::debug;

/// 内存后备存储
///
/// 基于BTreeMap的键值存储实现，迭代顺序稳定，便于确定性测试
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// 创建新的内存存储实例
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// 存储中的条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 存储是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<u8>)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (String, Vec<u8>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let result = self.entries.get(key).cloned();
        debug!("memory get: key={}, found={}", key, result.is_some());
        Ok(result)
    }

    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        let removed = self.entries.remove(key).is_some();
        debug!("memory delete: key={}, removed={}", key, removed);
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.entries.contains_key(key))
    }
}
