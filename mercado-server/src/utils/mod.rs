//! 工具模块 - 通用工具函数

pub mod validation;
