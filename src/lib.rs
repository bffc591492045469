pub mod catalog;
pub mod compute;
pub mod config;
pub mod entities;
pub mod round;
pub mod screens;
pub mod spawner;
