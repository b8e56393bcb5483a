//! scratchcache - 写缓冲覆盖缓存库
//!
//! 在任意键值后备存储之上提供内存覆盖层，未提交的写入和删除暂存在本地，
//! 提交作用域正常结束时批量刷入后备存储，发生错误时整体放弃，
//! 退出时覆盖层总是被清空。

#![doc(html_root_url = "https://docs.rs/scratchcache/0.1.0")]

pub use serde;
pub use serde_json;

pub mod error;
pub mod scratch;
pub mod serialization;
pub mod store;

// Re-export commonly used items
pub use error::{CacheError, Result};
pub use scratch::{Pending, ScratchCache};
pub use serialization::{CacheExt, JsonSerializer, Serializer};
pub use store::{MemoryStore, Store};

/// scratchcache 版本号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
