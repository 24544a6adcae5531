pub mod binding;
pub mod expr;
