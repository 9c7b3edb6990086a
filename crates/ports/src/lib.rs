//! ports - 抽象 trait 层
//!
//! 定义存储等基础设施的抽象接口

mod repository;

pub use repository::*;
