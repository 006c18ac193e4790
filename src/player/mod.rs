//! 再生制御モジュール

pub mod controller;
pub mod gate;
pub mod video_id;

pub use controller::PlayerController;
