//! 商品目录 REST 服务
//!
//! 对单一 `Item` 实体提供增删改查接口，存储后端可在内存列表与 MongoDB
//! 之间通过配置切换。

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod server;
