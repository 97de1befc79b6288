use std::cell::RefCell;
use std::rc::Rc;

/// 浏览器位置抽象
///
/// HTTP 客户端只需要读取当前路径并在网络异常或登录失效时整页跳转。
pub trait Navigator {
    /// 当前路径（不含查询参数）
    fn current_path(&self) -> String;
    /// 跳转到给定路径
    fn redirect(&self, path: &str);
}

impl<T: Navigator + ?Sized> Navigator for Rc<T> {
    fn current_path(&self) -> String {
        (**self).current_path()
    }

    fn redirect(&self, path: &str) {
        (**self).redirect(path);
    }
}

/// 内存导航器，记录跳转历史
#[derive(Debug, Clone)]
pub struct MemoryNavigator {
    inner: Rc<RefCell<NavigatorState>>,
}

#[derive(Debug)]
struct NavigatorState {
    path: String,
    redirects: Vec<String>,
}

impl MemoryNavigator {
    pub fn at(path: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(NavigatorState {
                path: path.to_string(),
                redirects: Vec::new(),
            })),
        }
    }

    /// 模拟用户导航（不计入跳转历史）
    pub fn visit(&self, path: &str) {
        self.inner.borrow_mut().path = path.to_string();
    }

    pub fn redirects(&self) -> Vec<String> {
        self.inner.borrow().redirects.clone()
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::at("/")
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.inner.borrow().path.clone()
    }

    fn redirect(&self, path: &str) {
        let mut state = self.inner.borrow_mut();
        state.path = path.to_string();
        state.redirects.push(path.to_string());
    }
}
