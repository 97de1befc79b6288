use autotest_shared::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, Site, SiteListResponse};
use serde::{Deserialize, Serialize};

/// 分页窗口
///
/// `page` 从 1 开始。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            total: 0,
        }
    }
}

impl PageWindow {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            total,
        }
    }

    /// ceil(total / limit)，没有数据时为 0
    pub fn total_pages(&self) -> u32 {
        let limit = u64::from(self.limit.max(1));
        u32::try_from(self.total.div_ceil(limit)).unwrap_or(u32::MAX)
    }

    /// 渲染分页控件时至少显示一页
    pub fn display_pages(&self) -> u32 {
        self.total_pages().max(1)
    }

    /// 当前页的条目区间 `(first, last)`，没有数据或页码越界时为 `(0, 0)`
    pub fn range(&self) -> (u64, u64) {
        let limit = u64::from(self.limit.max(1));
        let start = u64::from(self.page.saturating_sub(1)) * limit + 1;
        if start > self.total {
            return (0, 0);
        }
        let end = (u64::from(self.page.max(1)) * limit).min(self.total);
        (start, end)
    }

    /// 页码越过最后一页时夹紧到最后一页
    pub fn clamped(self) -> Self {
        if self.page > self.display_pages() {
            self.go_to(self.display_pages())
        } else {
            self
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn next(self) -> Self {
        if self.has_next() {
            Self {
                page: self.page + 1,
                ..self
            }
        } else {
            self
        }
    }

    pub fn prev(self) -> Self {
        if self.has_prev() {
            Self {
                page: self.page - 1,
                ..self
            }
        } else {
            self
        }
    }

    /// 跳转到指定页，超出范围时夹紧
    pub fn go_to(self, page: u32) -> Self {
        Self {
            page: page.clamp(1, self.display_pages()),
            ..self
        }
    }

    /// 修改每页条数，页码重置为 1；不在可选范围内的值忽略
    pub fn with_limit(self, limit: u32) -> Self {
        if !PAGE_SIZE_OPTIONS.contains(&limit) {
            return self;
        }
        Self {
            page: 1,
            limit,
            ..self
        }
    }

    /// 分页栏文案，如 `11-20 of 35`
    pub fn summary(&self) -> String {
        let (start, end) = self.range();
        format!("{start}-{end} of {}", self.total)
    }
}

/// 服务端返回的分页元数据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// 一页站点数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitePage {
    pub data: Vec<Site>,
    pub meta: PageMeta,
}

impl From<SiteListResponse> for SitePage {
    fn from(resp: SiteListResponse) -> Self {
        let window = PageWindow::new(resp.page, resp.limit, resp.total);
        Self {
            meta: PageMeta {
                page: window.page,
                limit: window.limit,
                total: resp.total,
                total_pages: window.total_pages(),
            },
            data: resp.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PageWindow::new(1, 10, 0).total_pages(), 0);
        assert_eq!(PageWindow::new(1, 10, 0).display_pages(), 1);
        assert_eq!(PageWindow::new(1, 10, 10).total_pages(), 1);
        assert_eq!(PageWindow::new(1, 10, 11).total_pages(), 2);
        assert_eq!(PageWindow::new(1, 20, 95).total_pages(), 5);
    }

    #[test]
    fn test_range_for_each_page() {
        let window = PageWindow::new(1, 10, 35);
        assert_eq!(window.range(), (1, 10));
        assert_eq!(window.go_to(2).range(), (11, 20));
        assert_eq!(window.go_to(4).range(), (31, 35));
        assert_eq!(window.go_to(4).summary(), "31-35 of 35");
        assert_eq!(PageWindow::new(1, 10, 0).range(), (0, 0));
    }

    #[test]
    fn test_page_past_the_end_has_empty_range() {
        let window = PageWindow::new(4, 10, 30);
        assert_eq!(window.total_pages(), 3);
        assert_eq!(window.range(), (0, 0));
        assert_eq!(window.summary(), "0-0 of 30");

        let clamped = window.clamped();
        assert_eq!(clamped.page, 3);
        assert_eq!(clamped.range(), (21, 30));
        assert_eq!(PageWindow::new(2, 10, 0).clamped().page, 1);
    }

    #[test]
    fn test_zero_page_from_deserialized_window_does_not_underflow() {
        let window: PageWindow =
            serde_json::from_str(r#"{"page": 0, "limit": 10, "total": 25}"#).unwrap();
        assert_eq!(window.range(), (1, 10));
    }

    #[test]
    fn test_prev_next_bounds() {
        let window = PageWindow::new(1, 10, 25);
        assert!(!window.has_prev());
        assert!(window.has_next());
        let last = window.next().next();
        assert_eq!(last.page, 3);
        assert!(!last.has_next());
        assert_eq!(last.next().page, 3);
        assert_eq!(window.prev().page, 1);
        assert_eq!(window.go_to(99).page, 3);
    }

    #[test]
    fn test_changing_limit_resets_page() {
        let window = PageWindow::new(3, 10, 100).with_limit(50);
        assert_eq!(window.page, 1);
        assert_eq!(window.limit, 50);
        // 非法的每页条数被忽略
        assert_eq!(window.with_limit(7), window);
    }

    #[test]
    fn test_site_page_from_response() {
        let page = SitePage::from(SiteListResponse {
            total: 21,
            page: 2,
            limit: 10,
            data: Vec::new(),
        });
        assert_eq!(page.meta.total_pages, 3);
        let window = PageWindow::new(page.meta.page, page.meta.limit, page.meta.total);
        assert_eq!(window.range(), (11, 20));
    }
}
