pub mod config;
pub mod error;

pub use config::{load_dotenv, parse_throttle, Config, ScheduleEnvConfig};
pub use error::*;
