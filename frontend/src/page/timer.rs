//! 定时器抽象
//!
//! 页面状态机只通过 [`Scheduler`] 创建定时器，浏览器实现见 `web::timer`。

use std::time::Duration;

/// 定时器工厂
///
/// 返回的句柄在 drop 时必须取消对应的定时器，
/// 这样持有 `Option<Handle>` 的一方只需 `take()` 即可幂等取消。
pub trait Scheduler {
    type Handle;

    /// 每隔 `period` 调用一次 `callback`
    fn every(&self, period: Duration, callback: Box<dyn Fn()>) -> Self::Handle;

    /// `delay` 之后调用一次 `callback`
    fn after(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::{Rc, Weak};

    enum Task {
        Repeat(Rc<dyn Fn()>),
        Once(Box<dyn FnOnce()>),
    }

    struct Entry {
        period: Duration,
        task: Task,
    }

    #[derive(Default)]
    struct Registry {
        next_id: u32,
        entries: BTreeMap<u32, Entry>,
        created: u32,
        cancelled: u32,
    }

    /// 手动驱动的调度器，测试中按需触发回调
    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        registry: Rc<RefCell<Registry>>,
    }

    pub struct ManualHandle {
        id: u32,
        registry: Weak<RefCell<Registry>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            if let Some(registry) = self.registry.upgrade() {
                let mut registry = registry.borrow_mut();
                if registry.entries.remove(&self.id).is_some() {
                    registry.cancelled += 1;
                }
            }
        }
    }

    impl ManualScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        fn register(&self, period: Duration, task: Task) -> ManualHandle {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.created += 1;
            registry.entries.insert(id, Entry { period, task });
            ManualHandle {
                id,
                registry: Rc::downgrade(&self.registry),
            }
        }

        /// 仍在运行的周期定时器数量
        pub fn active_intervals(&self) -> usize {
            self.registry
                .borrow()
                .entries
                .values()
                .filter(|e| matches!(e.task, Task::Repeat(_)))
                .count()
        }

        /// 尚未触发、也未取消的一次性定时器数量
        pub fn pending_timeouts(&self) -> usize {
            self.registry
                .borrow()
                .entries
                .values()
                .filter(|e| matches!(e.task, Task::Once(_)))
                .count()
        }

        pub fn active(&self) -> usize {
            self.registry.borrow().entries.len()
        }

        pub fn created(&self) -> u32 {
            self.registry.borrow().created
        }

        pub fn cancelled(&self) -> u32 {
            self.registry.borrow().cancelled
        }

        /// 周期定时器的间隔列表
        pub fn interval_periods(&self) -> Vec<Duration> {
            self.registry
                .borrow()
                .entries
                .values()
                .filter(|e| matches!(e.task, Task::Repeat(_)))
                .map(|e| e.period)
                .collect()
        }

        /// 让所有周期定时器各触发一次
        pub fn tick_intervals(&self) {
            let tasks: Vec<Rc<dyn Fn()>> = self
                .registry
                .borrow()
                .entries
                .values()
                .filter_map(|e| match &e.task {
                    Task::Repeat(f) => Some(Rc::clone(f)),
                    Task::Once(_) => None,
                })
                .collect();
            for task in tasks {
                task();
            }
        }

        /// 触发所有待执行的一次性定时器
        pub fn fire_timeouts(&self) {
            let tasks: Vec<Box<dyn FnOnce()>> = {
                let mut registry = self.registry.borrow_mut();
                let ids: Vec<u32> = registry
                    .entries
                    .iter()
                    .filter(|(_, e)| matches!(e.task, Task::Once(_)))
                    .map(|(id, _)| *id)
                    .collect();
                let mut due = Vec::with_capacity(ids.len());
                for id in ids {
                    if let Some(Entry {
                        task: Task::Once(f),
                        ..
                    }) = registry.entries.remove(&id)
                    {
                        due.push(f);
                    }
                }
                due
            };
            for task in tasks {
                task();
            }
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn every(&self, period: Duration, callback: Box<dyn Fn()>) -> ManualHandle {
            self.register(period, Task::Repeat(Rc::from(callback)))
        }

        fn after(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> ManualHandle {
            self.register(delay, Task::Once(callback))
        }
    }

    #[test]
    fn test_handle_drop_cancels() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&hits);
        let handle = scheduler.every(
            Duration::from_secs(1),
            Box::new(move || *counter.borrow_mut() += 1),
        );
        scheduler.tick_intervals();
        scheduler.tick_intervals();
        assert_eq!(*hits.borrow(), 2);

        drop(handle);
        scheduler.tick_intervals();
        assert_eq!(*hits.borrow(), 2);
        assert_eq!(scheduler.active(), 0);
        assert_eq!(scheduler.cancelled(), 1);
    }

    #[test]
    fn test_timeout_fires_once() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(RefCell::new(false));

        let flag = Rc::clone(&fired);
        let handle = scheduler.after(
            Duration::from_secs(5),
            Box::new(move || *flag.borrow_mut() = true),
        );
        assert_eq!(scheduler.pending_timeouts(), 1);
        scheduler.fire_timeouts();
        assert!(*fired.borrow());
        assert_eq!(scheduler.pending_timeouts(), 0);

        // 已触发的句柄 drop 不算一次取消
        drop(handle);
        assert_eq!(scheduler.cancelled(), 0);
    }
}
