//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了后备存储的能力契约，覆盖缓存通过该契约访问底层键值存储。

pub mod memory;

use crate::error::Result;

pub use memory::MemoryStore;

/// 后备存储特征
///
/// 定义覆盖缓存所依赖的底层键值存储的基本操作接口。
/// 覆盖缓存自身也实现该特征，因此草稿缓存可以层叠包装。
pub trait Store {
    /// 获取存储值
    ///
    /// # 参数
    ///
    /// * `key` - 存储键
    ///
    /// # 返回值
    ///
    /// 返回存储值，如果不存在则返回None；查找缺失的键不是错误
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// 设置存储值（插入或替换）
    ///
    /// # 参数
    ///
    /// * `key` - 存储键
    /// * `value` - 存储值
    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<()>;

    /// 删除存储值
    ///
    /// 键不存在时同样返回成功
    fn delete(&mut self, key: &str) -> Result<()>;

    /// 检查键是否存在
    fn contains(&self, key: &str) -> Result<bool>;
}
