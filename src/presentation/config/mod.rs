mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DatabaseSettings, FetcherSettings, LlmSettings, LoggingSettings, PipelineSettings,
    ServerSettings, Settings,
};
