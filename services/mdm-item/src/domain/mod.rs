//! 领域层
//!
//! 实体、枚举、值对象、仓储接口，以及合规派生与复审排期等领域服务

pub mod entities;
pub mod enums;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use enums::*;
pub use repositories::*;
pub use value_objects::*;
