use mtlog_console::{Output, Severity, log_error, log_info, log_result, log_simple, logger_config};

fn main() {
    mtlog_console::init_console();
    // warnings and errors on stderr, results also kept in a file
    let logger = logger_config()
        .with_stderr()
        .with_output(
            Severity::Result,
            Output::file("/tmp/mtlog_console_results.log").expect("Unable to open results file"),
        )
        .init_global();
    log_simple!("--- multi-threaded console demo ---");
    log_info!("spawning ", 5, " workers");
    let handles: Vec<_> = (0..5)
        .map(|i| {
            std::thread::spawn(move || {
                log_info!("worker ", i, " started");
                if i == 3 {
                    log_error!("worker ", i, " failed");
                } else {
                    log_result!("worker ", i, " computed ", i * i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    log::warn!("routed through the log facade");
    logger.log(Severity::Simple, ["results file:"]);
    let results = std::fs::read_to_string("/tmp/mtlog_console_results.log").unwrap();
    for line in results.lines() {
        log_simple!("\t", line);
    }
}
