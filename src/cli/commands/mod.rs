pub mod assign;
pub mod checkin;
pub mod checkout;
pub mod config;
pub mod export;
pub mod init;
pub mod layout;
pub mod log;
pub mod members;
pub mod place;
pub mod status;
pub mod unqueue;
