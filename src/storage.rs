//! 键值存储抽象
//!
//! 浏览器端由 `localStorage` / `sessionStorage` 实现，
//! 原生环境与测试使用内存实现。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 侧边栏最后一次使用的定义 id（持久存储）
pub const STORAGE_KEY_SIDEBAR: &str = "app_sidebar_layout_v1";
/// 网络异常跳转前所在的路径（会话存储）
pub const SESSION_KEY_PREVIOUS_PATH: &str = "previous_path";
/// bearer 模式下的访问令牌（持久存储）
pub const STORAGE_KEY_TOKEN: &str = "access_token";
/// 序列化的当前用户（持久存储）
pub const STORAGE_KEY_USER: &str = "user";

/// 键值存储
///
/// 与 Web Storage 语义一致：写入失败返回 `false`，不抛错。
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
    fn clear(&self) -> bool;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> bool {
        (**self).delete(key)
    }

    fn clear(&self) -> bool {
        (**self).clear()
    }
}

/// 内存存储
///
/// 克隆后共享同一份数据，方便测试中同时交给客户端和断言代码。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }

    fn clear(&self) -> bool {
        self.entries.borrow_mut().clear();
        true
    }
}
