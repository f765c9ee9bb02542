use crate::config::toml_config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

fn init_compact(filter: EnvFilter) {
    // 測試中可能重複初始化，忽略已設定的情況
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}

pub fn init_logger(verbose: bool) {
    let filter = if verbose {
        default_filter("usf_timetable=debug,info")
    } else {
        default_filter("usf_timetable=info")
    };
    init_compact(filter);
}

pub fn init_json_logger(level: &str) {
    let filter = default_filter(&format!("usf_timetable={}", level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .json(),
        )
        .try_init();
}

/// 依設定檔選擇日誌格式
pub fn init_from_config(config: &LoggingConfig) {
    let level = config.level();
    if config.json.unwrap_or(false) {
        init_json_logger(level);
    } else {
        init_compact(default_filter(&format!("usf_timetable={}", level)));
    }
}
