pub mod builder;
pub mod closure;
pub mod ir;
