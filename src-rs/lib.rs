#![deny(clippy::all)]

pub mod config;
pub mod cons;
pub mod llm;
pub mod storage;


use std::sync::Once;

pub use config::AppConfig;
pub use cons::provider_cons::ProviderKind;
pub use llm::agents::planner::{PipelineReport, Planner, TicketOutcome};
pub use llm::models::provider_handle::{
    build_payload, normalize, normalize_text, BuildError, Endpoint, LlmRequestHandler,
    NormalizeError, PayloadBody, RequestError, RequestHeaders, RequestSpec, ReqwestTransport,
    Transport, TransportError, TransportResponse,
};
pub use llm::utils::ticket_extractor::{extract_tickets, ExtractionError, Ticket};
pub use storage::{create_project_structure, ProjectWorkspace};

static INIT: Once = Once::new();

pub const LOG_CONFIG_ENV: &str = "PLANCRAFT_LOG4RS_CONFIG";
pub const LOG_FILE: &str = "logs/plancraft.log";

/// Initialises log4rs once per process, from the YAML file named by
/// `PLANCRAFT_LOG4RS_CONFIG` (default `log4rs.yaml`), else a file appender at
/// `logs/plancraft.log` with the given level.
pub fn init_logger(level: log::LevelFilter) {
    INIT.call_once(|| {
        use log4rs::append::file::FileAppender;
        use log4rs::config::{Appender, Config, Root};
        use log4rs::encode::pattern::PatternEncoder;

        let config_path =
            std::env::var(LOG_CONFIG_ENV).unwrap_or_else(|_| "log4rs.yaml".to_string());
        if std::path::Path::new(&config_path).exists()
            && log4rs::init_file(&config_path, Default::default()).is_ok()
        {
            log::info!("Logger initialized from {}", config_path);
            return;
        }

        let _ = std::fs::create_dir_all("logs");
        let pattern = "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}";

        let logfile = match FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(pattern)))
            .build(LOG_FILE)
        {
            Ok(f) => f,
            Err(e) => {
                eprintln!("[INIT] Failed to create log file: {}", e);
                return;
            }
        };

        let config = match Config::builder()
            .appender(Appender::builder().build("logfile", Box::new(logfile)))
            .build(Root::builder().appender("logfile").build(level))
        {
            Ok(c) => c,
            Err(e) => {
                eprintln!("[INIT] Failed to build logger config: {}", e);
                return;
            }
        };

        if let Err(e) = log4rs::init_config(config) {
            eprintln!("[INIT] Failed to initialize logger: {}", e);
        }
    });
}

/// Loads [`AppConfig`] and initialises logging at its configured level.
pub fn init() -> anyhow::Result<AppConfig> {
    let config = AppConfig::load()?;
    init_logger(config.logging.level_filter());
    Ok(config)
}
