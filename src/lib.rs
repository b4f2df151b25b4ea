//! # mealbot
//!
//! A Telegram bot that collects meal recipes from chat submissions and
//! answers `/meal` with a random saved one.

pub mod bot;
pub mod commands;
pub mod config;
pub mod events;
pub mod meal;
pub mod messages;
pub mod platform;
pub mod storage;
