//! 基础设施层：日志与内存存储

pub mod logger;
pub mod store;
