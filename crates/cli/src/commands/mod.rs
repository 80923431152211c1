pub mod engage;
pub mod onboard;
pub mod serve;
