// 数据库模块
// 包含数据库实体定义、存储库操作和约束错误映射

pub mod constraint;
pub mod entities;
pub mod repositories;
