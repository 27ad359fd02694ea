//! Query building: expressions, operands, and SQL compilation.

pub mod compiler;
pub mod expressions;
pub mod operand;

pub use compiler::{DatabaseBackendType, FromItem, OrderBy, Query, SqlCompiler};
pub use expressions::{Expression, Operator};
pub use operand::Operand;
