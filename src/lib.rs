// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含轮询周期用例，即管线驱动器
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体、服务和仓库接口
pub mod domain;

/// 基础设施模块
///
/// 提供外部资源的具体实现，如状态文件、反馈日志等
pub mod infrastructure;

/// 通知模块
///
/// 渲染告警消息并通过外部消息通道发送
pub mod notify;

/// 注册机构模块
///
/// 实现对EDGAR备案数据的抓取与解析
pub mod registry;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 实现轮询循环和单次触发执行
pub mod workers;
