//! 定时器封装模块
//!
//! 使用 `web_sys` 的原生定时器 API。回调通过 `into_js_value` 交给 JS 持有，
//! 因此在回调内部 drop 自己的 `Timer`（例如倒计时归零）是安全的。

use std::time::Duration;

use wasm_bindgen::prelude::*;

use crate::page::timer::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Interval,
    Timeout,
}

/// 浏览器定时器句柄
///
/// drop 时自动清除定时器；对已触发的 timeout 清除是无害的。
pub struct Timer {
    handle: i32,
    kind: TimerKind,
    _callback: JsValue,
}

impl Timer {
    /// 周期性定时器 (`setInterval`)
    ///
    /// # Panics
    /// 如果无法获取 window 对象或设置定时器失败
    pub fn interval<F>(millis: u32, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        let callback = Closure::<dyn Fn()>::new(callback).into_js_value();
        let handle = window()
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis as i32,
            )
            .expect("设置定时器失败");

        Self {
            handle,
            kind: TimerKind::Interval,
            _callback: callback,
        }
    }

    /// 一次性定时器 (`setTimeout`)
    ///
    /// # Panics
    /// 如果无法获取 window 对象或设置定时器失败
    pub fn timeout<F>(millis: u32, callback: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let callback = Closure::once_into_js(callback);
        let handle = window()
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis as i32,
            )
            .expect("设置定时器失败");

        Self {
            handle,
            kind: TimerKind::Timeout,
            _callback: callback,
        }
    }

    pub fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            match self.kind {
                TimerKind::Interval => window.clear_interval_with_handle(self.handle),
                TimerKind::Timeout => window.clear_timeout_with_handle(self.handle),
            }
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn window() -> web_sys::Window {
    web_sys::window().expect("无法获取 window 对象")
}

fn millis(d: Duration) -> u32 {
    d.as_millis().min(i32::MAX as u128) as u32
}

/// 基于浏览器定时器的调度器
#[derive(Debug, Clone, Copy, Default)]
pub struct WebScheduler;

impl Scheduler for WebScheduler {
    type Handle = Timer;

    fn every(&self, period: Duration, callback: Box<dyn Fn()>) -> Timer {
        Timer::interval(millis(period), callback)
    }

    fn after(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Timer {
        Timer::timeout(millis(delay), callback)
    }
}
