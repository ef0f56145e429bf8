// 群组生命周期模块
// 负责群组的创建、删除、改名以及成员的加入、退出和移除

pub mod service;

pub use service::GroupService;
