//! 运行环境就绪信号
//!
//! 移动端的原生桥接只有在设备就绪事件触发后才能调用。该信号在进程内只触发一次，
//! 触发之后的所有等待都会立即返回。

use tokio::sync::watch;
use tracing::debug;

/// 一次性就绪锁存器
#[derive(Debug)]
pub struct ReadySignal {
    tx: watch::Sender<bool>,
}

impl ReadySignal {
    /// 创建一个尚未触发的信号
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// 创建一个已经触发的信号（桌面端或测试环境无需等待）
    pub fn fired() -> Self {
        let (tx, _rx) = watch::channel(true);
        Self { tx }
    }

    /// 触发信号，重复调用无副作用
    pub fn fire(&self) {
        if !self.tx.send_replace(true) {
            debug!("[Ready] 运行环境已就绪");
        }
    }

    pub fn is_fired(&self) -> bool {
        *self.tx.borrow()
    }

    /// 等待信号触发
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // sender 由 self 持有，wait_for 不会因通道关闭而返回错误
        let _ = rx.wait_for(|ready| *ready).await;
    }
}

impl Default for ReadySignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn fired_signal_does_not_block() {
        let signal = ReadySignal::fired();
        assert!(signal.is_fired());
        tokio::time::timeout(Duration::from_millis(50), signal.wait())
            .await
            .expect("already fired");
    }

    #[tokio::test]
    async fn waiters_resume_after_fire() {
        let signal = Arc::new(ReadySignal::new());
        assert!(!signal.is_fired());

        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.wait().await })
        };
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        signal.fire();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should resume")
            .unwrap();

        // 再次触发与再次等待都是空操作
        signal.fire();
        signal.wait().await;
        assert!(signal.is_fired());
    }
}
