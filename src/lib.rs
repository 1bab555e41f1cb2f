pub mod logging;
pub mod record;
pub mod sheets;
pub mod storage;
pub mod web;
