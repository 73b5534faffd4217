pub mod closure;
pub mod defs;
