// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::filing::Issuer;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含注册机构、通知通道、轮询、告警与状态存储等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 注册机构（SEC）配置
    pub sec: SecSettings,
    /// Telegram通知配置
    pub telegram: TelegramSettings,
    /// 轮询配置
    pub poll: PollSettings,
    /// 告警行为配置
    pub alerting: AlertingSettings,
    /// 已见状态存储配置
    pub state: StateSettings,
    /// 监控清单：发行人CIK列表，启动时加载一次
    #[serde(default)]
    pub watchlist: Vec<Issuer>,
}

/// 注册机构配置设置
#[derive(Debug, Deserialize)]
pub struct SecSettings {
    /// 标识身份的User-Agent（SEC要求：名称+联系方式）
    pub user_agent: String,
    /// 出站请求最小间隔（毫秒）；上限10请求/秒，默认留有余量
    pub min_request_interval_ms: u64,
    /// 提交资源基础URL
    pub submissions_base: String,
    /// EDGAR Archives基础URL
    pub archives_base: String,
    /// 主文档读取上限（字节）
    pub max_document_bytes: usize,
}

/// Telegram配置设置
#[derive(Debug, Deserialize)]
pub struct TelegramSettings {
    /// Bot令牌
    pub bot_token: String,
    /// 目标会话标识
    pub chat_id: String,
    /// Bot API基础URL
    pub api_base: String,
}

/// 轮询配置设置
#[derive(Debug, Deserialize)]
pub struct PollSettings {
    /// 轮询间隔（分钟）
    pub interval_minutes: u64,
    /// 单次模式：跑完一个周期就退出（供外部调度器触发）
    pub run_once: bool,
}

/// 告警行为配置设置
#[derive(Debug, Deserialize)]
pub struct AlertingSettings {
    /// 表单类型允许清单；`*`结尾的条目按前缀匹配
    pub form_types: Vec<String>,
    /// 只告警最近N天的备案（避免首次运行刷屏）
    pub max_filing_age_days: u32,
    /// 摘要模式：同发行人同表单同日合并为一条消息，并跳过分类
    pub digest_by_group: bool,
    /// 每周期最多发送的消息数（不设即不限）
    pub max_per_cycle: Option<usize>,
}

/// 状态存储配置设置
#[derive(Debug, Deserialize)]
pub struct StateSettings {
    /// 状态文件路径
    pub path: String,
    /// 持久化条目数上限，防止状态文件无限增长
    pub max_seen_accessions: usize,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件与环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default SEC settings
            .set_default("sec.user_agent", "secwatch your@email.com")?
            .set_default("sec.min_request_interval_ms", 250)?
            .set_default("sec.submissions_base", "https://data.sec.gov/submissions")?
            .set_default("sec.archives_base", "https://www.sec.gov/Archives/edgar/data")?
            .set_default("sec.max_document_bytes", 1_048_576)?
            // Default Telegram settings
            .set_default("telegram.bot_token", "")?
            .set_default("telegram.chat_id", "")?
            .set_default("telegram.api_base", "https://api.telegram.org")?
            // Default Poll settings
            .set_default("poll.interval_minutes", 5)?
            .set_default("poll.run_once", false)?
            // Default Alerting settings
            .set_default(
                "alerting.form_types",
                vec!["8-K", "424B*", "N-2", "DEF 14A"],
            )?
            .set_default("alerting.max_filing_age_days", 7)?
            .set_default("alerting.digest_by_group", true)?
            // Default State settings
            .set_default("state.path", "bot_state.json")?
            .set_default("state.max_seen_accessions", 5000)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SECWATCH").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// User-Agent是否仍是占位值（SEC要求真实联系方式）
    pub fn user_agent_is_placeholder(&self) -> bool {
        self.sec.user_agent.is_empty() || self.sec.user_agent.contains("your@email")
    }
}
