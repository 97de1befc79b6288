//! Web Storage 封装模块
//!
//! 使用 `web_sys::Storage` 实现客户端核心的 `KeyValueStore`。

use autotest_client::KeyValueStore;

/// 浏览器存储区域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebStorage {
    /// `localStorage`，跨会话保留
    Local,
    /// `sessionStorage`，标签页关闭即清除
    Session,
}

impl WebStorage {
    /// 获取 Storage 实例
    fn storage(&self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match self {
            WebStorage::Local => window.local_storage().ok()?,
            WebStorage::Session => window.session_storage().ok()?,
        }
    }
}

impl KeyValueStore for WebStorage {
    /// 键不存在或发生错误时返回 `None`
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn delete(&self, key: &str) -> bool {
        self.storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }

    fn clear(&self) -> bool {
        self.storage().and_then(|s| s.clear().ok()).is_some()
    }
}
