pub mod commands;
pub mod hexutil;
