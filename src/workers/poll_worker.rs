// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::poll_cycle::{CycleReport, PollCycle};
use crate::utils::errors::CycleError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// 轮询工作器
///
/// 持续模式下循环执行周期并在周期间休眠；单次触发走try_run_cycle。
/// 单飞约束：同一时刻至多一个周期在运行，期间到达的触发被跳过
pub struct PollWorker {
    cycle: Arc<PollCycle>,
    interval: Duration,
    in_flight: AtomicBool,
}

impl PollWorker {
    /// 创建新的轮询工作器实例
    ///
    /// # 参数
    ///
    /// * `cycle` - 轮询周期用例
    /// * `interval` - 持续模式下周期之间的休眠时间
    pub fn new(cycle: Arc<PollCycle>, interval: Duration) -> Self {
        Self {
            cycle,
            interval,
            in_flight: AtomicBool::new(false),
        }
    }

    /// 执行一个周期；已有周期在运行时跳过并返回None
    pub async fn try_run_cycle(&self) -> Option<Result<CycleReport, CycleError>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Poll trigger skipped: a cycle is already in progress");
            return None;
        }

        let result = self.cycle.run().await;
        self.in_flight.store(false, Ordering::SeqCst);
        Some(result)
    }

    /// 运行持续轮询循环
    pub async fn run(&self) {
        info!("Poll worker started, polling every {:?}", self.interval);
        loop {
            match self.try_run_cycle().await {
                Some(Ok(report)) => {
                    info!(
                        "Cycle finished: {} matched, {} new, {} sent, {} failed",
                        report.filings_matched,
                        report.new_filings,
                        report.messages_sent,
                        report.messages_failed
                    );
                }
                Some(Err(e)) => {
                    // 状态存储不可靠时跳过周期，好过重复或丢失告警
                    error!("Poll cycle aborted: {}", e);
                }
                None => {}
            }
            sleep(self.interval).await;
        }
    }
}
