//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了草稿缓存，将未提交的写入和删除暂存在内存覆盖层中，
//! 并提供批量提交作用域将覆盖层刷入后备存储。

use crate::error::{CacheError, Result};
use crate::store::Store;
use std::collections::BTreeMap;
use std::mem;
use tracing::{debug, instrument};

/// 待提交条目
///
/// 表示覆盖层中一个键的暂存状态：真实值或删除墓碑。
/// 显式的墓碑变体区分"待删除"与"无暂存条目"，
/// 因此任意字节值都是合法的缓存值，不存在保留的空值哨兵。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    /// 待写入的真实值
    Value(Vec<u8>),
    /// 删除墓碑
    Tombstone,
}

/// 草稿缓存
///
/// 包装一个后备存储，未提交的更改以键到[`Pending`]条目的映射暂存在本地覆盖层中。
/// 读取优先命中覆盖层，未命中时回落到后备存储；写入和删除只修改覆盖层。
///
/// [`batch_commit`](ScratchCache::batch_commit)作为提交作用域使用：
/// 作用域体正常结束时将覆盖层刷入后备存储（删除是否下推由`apply_deletes`决定），
/// 作用域体返回错误则不应用任何更改。无论成功或失败，退出时覆盖层都会被清空。
///
/// 单线程、同步、不可重入；后备存储由调用方拥有，缓存仅持有其可变借用。
pub struct ScratchCache<'a, S: Store> {
    /// 后备存储（非拥有引用）
    store: &'a mut S,
    /// 待提交更改表，迭代顺序按键稳定
    pending: BTreeMap<String, Pending>,
    /// 提交作用域是否已打开
    in_scope: bool,
}

impl<'a, S: Store> ScratchCache<'a, S> {
    /// 创建新的草稿缓存，覆盖层初始为空
    ///
    /// # 参数
    ///
    /// * `store` - 被包装的后备存储
    pub fn new(store: &'a mut S) -> Self {
        Self {
            store,
            pending: BTreeMap::new(),
            in_scope: false,
        }
    }

    /// 覆盖层中暂存的条目数量
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// 覆盖层是否有未提交的更改
    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty()
    }

    /// 在提交作用域内执行`body`并在退出时提交或放弃覆盖层
    ///
    /// 状态机：进入作用域后执行`body`，其间可任意调用缓存操作；
    /// `body`返回错误时不向后备存储应用任何条目，错误原样返回；
    /// `body`正常返回时按键序遍历覆盖层，值条目写入后备存储，
    /// 墓碑条目仅在`apply_deletes`为true时下推删除，否则静默丢弃。
    /// 无论哪条路径，覆盖层都在控制权返回调用方之前被清空，
    /// 失败的作用域会丢弃其未提交的工作而不是保留以供重试。
    ///
    /// 提交期间后备存储自身的错误不在本层捕获：先处理的条目已经生效，
    /// 未处理的条目随覆盖层清空一并丢失，调用方不应假定重试是安全的。
    ///
    /// # 参数
    ///
    /// * `apply_deletes` - 是否将墓碑作为删除下推到后备存储
    /// * `body` - 作用域体
    ///
    /// # 返回值
    ///
    /// 返回`body`的结果；同一实例上嵌套打开作用域返回
    /// [`CacheError::ScopeActive`]
    #[instrument(skip(self, body), level = "debug")]
    pub fn batch_commit<T, F>(&mut self, apply_deletes: bool, body: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        if self.in_scope {
            return Err(CacheError::ScopeActive("batch_commit".to_string()));
        }
        self.in_scope = true;
        let outcome = body(&mut *self);
        self.in_scope = false;

        // 覆盖层在返回前无条件清空，提交中途的存储错误也不例外
        let staged = mem::take(&mut self.pending);
        match outcome {
            Ok(value) => {
                let total = staged.len();
                let mut applied = 0usize;
                let mut dropped = 0usize;
                for (key, entry) in staged {
                    match entry {
                        Pending::Value(v) => {
                            self.store.set(&key, v)?;
                            applied += 1;
                        }
                        Pending::Tombstone => {
                            if apply_deletes {
                                self.store.delete(&key)?;
                                applied += 1;
                            } else {
                                dropped += 1;
                            }
                        }
                    }
                }
                debug!(
                    "批量提交完成: total={}, applied={}, dropped={}",
                    total, applied, dropped
                );
                Ok(value)
            }
            Err(e) => {
                debug!("提交作用域失败，放弃 {} 个暂存条目: {}", staged.len(), e);
                Err(e)
            }
        }
    }
}

impl<'a, S: Store> Store for ScratchCache<'a, S> {
    /// 获取缓存值
    ///
    /// 覆盖层命中时解码暂存条目（墓碑解码为None），
    /// 未命中时委托给后备存储；无副作用
    #[instrument(skip(self), level = "debug")]
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.pending.get(key) {
            Some(Pending::Value(v)) => Ok(Some(v.clone())),
            Some(Pending::Tombstone) => Ok(None),
            None => self.store.get(key),
        }
    }

    /// 设置缓存值
    ///
    /// 在覆盖层中记录值条目，覆盖该键之前的任何暂存条目；
    /// 不触碰后备存储
    #[instrument(skip(self, value), level = "debug")]
    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.pending.insert(key.to_string(), Pending::Value(value));
        Ok(())
    }

    /// 删除缓存值
    ///
    /// 在覆盖层中记录墓碑，覆盖该键之前的任何暂存条目。
    /// 键无需在任何层存在，删除从未见过的键同样合法
    #[instrument(skip(self), level = "debug")]
    fn delete(&mut self, key: &str) -> Result<()> {
        self.pending.insert(key.to_string(), Pending::Tombstone);
        Ok(())
    }

    /// 检查键是否存在
    ///
    /// 覆盖层命中时仅值条目视为存在，墓碑即使尚未刷入
    /// 也会遮蔽后备存储中的副本；未命中时委托给后备存储
    fn contains(&self, key: &str) -> Result<bool> {
        match self.pending.get(key) {
            Some(entry) => Ok(matches!(entry, Pending::Value(_))),
            None => self.store.contains(key),
        }
    }
}
