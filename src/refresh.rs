//! 单飞刷新协调器
//!
//! 同一时刻最多只有一个会话刷新在进行。刷新进行期间到达的调用者按到达顺序排队，
//! 等待领头者的结果，而不是各自发起新的刷新。

use futures::channel::oneshot;
use std::cell::RefCell;
use std::future::Future;
use tracing::debug;

use crate::error::ApiError;

type Outcome = Result<(), ApiError>;

#[derive(Default)]
struct GateState {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<Outcome>>,
}

#[derive(Default)]
pub struct RefreshGate {
    state: RefCell<GateState>,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.state.borrow().in_flight
    }

    /// 正在等待结果的调用者数量
    pub fn pending(&self) -> usize {
        self.state.borrow().waiters.len()
    }

    /// 执行刷新，若已有刷新在进行则等待它的结果
    ///
    /// `refresh` 只会在本次调用成为领头者时被调用。
    pub async fn run_exclusive<F, Fut>(&self, refresh: F) -> Outcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Outcome>,
    {
        let waiter = {
            let mut state = self.state.borrow_mut();
            if state.in_flight {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                Some(rx)
            } else {
                state.in_flight = true;
                None
            }
        };

        if let Some(rx) = waiter {
            debug!("refresh already in flight, queued");
            // 领头者被丢弃时发送端随之释放
            return rx
                .await
                .unwrap_or_else(|_| Err(ApiError::RefreshFailed("refresh abandoned".to_string())));
        }

        let guard = InFlightGuard { gate: self };
        let outcome = refresh().await;
        guard.settle(&outcome);
        outcome
    }
}

/// 领头者持有的守卫，析构时清除进行中标记
struct InFlightGuard<'a> {
    gate: &'a RefreshGate,
}

impl InFlightGuard<'_> {
    fn settle(self, outcome: &Outcome) {
        let waiters = {
            let mut state = self.gate.state.borrow_mut();
            state.in_flight = false;
            std::mem::take(&mut state.waiters)
        };
        debug!(waiters = waiters.len(), ok = outcome.is_ok(), "refresh settled");
        for tx in waiters {
            // 等待者可能已被丢弃
            let _ = tx.send(outcome.clone());
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.gate.state.borrow_mut();
        state.in_flight = false;
        state.waiters.clear();
    }
}
