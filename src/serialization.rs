//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存系统的序列化机制，提供类型安全的值访问接口。

use crate::error::{CacheError, Result};
use crate::store::Store;
use serde::{de::DeserializeOwned, Serialize};

/// 序列化器特征
///
/// 定义序列化和反序列化操作的接口
pub trait Serializer {
    /// 序列化值为字节数组
    fn serialize<T: Serialize>(&self, value: &T) -> Result<Vec<u8>>;

    /// 从字节数组反序列化值
    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T>;
}

/// JSON序列化器
///
/// 实现基于serde_json的序列化和反序列化
#[derive(Debug, Default, Clone)]
pub struct JsonSerializer;

impl JsonSerializer {
    /// 创建新的JSON序列化器
    pub fn new() -> Self {
        Self
    }
}

impl Serializer for JsonSerializer {
    fn serialize<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| CacheError::Serialization(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        serde_json::from_slice(data).map_err(|e| CacheError::Serialization(e.to_string()))
    }
}

/// 缓存扩展特征
///
/// 在任意[`Store`]之上提供类型安全的缓存操作接口，
/// 值通过JSON序列化为字节数组存取
pub trait CacheExt: Store {
    /// 获取缓存值（反序列化）
    fn get_value<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            Some(data) => {
                let val = JsonSerializer::new().deserialize(&data)?;
                Ok(Some(val))
            }
            None => Ok(None),
        }
    }

    /// 设置缓存值（序列化）
    fn set_value<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let bytes = JsonSerializer::new().serialize(value)?;
        self.set(key, bytes)
    }
}

impl<C: Store + ?Sized> CacheExt for C {}
