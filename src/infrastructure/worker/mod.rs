//! Worker - 后台播放任务

mod reading_worker;

pub use reading_worker::PlaybackSupervisor;
