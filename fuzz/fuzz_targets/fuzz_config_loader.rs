#![no_main]
use libfuzzer_sys::fuzz_target;
use simtemp_core::ServiceConfig;

fuzz_target!(|data: &str| {
    // Parse and validation errors are fine; panics are not
    let Ok(cfg) = simtemp_config::load_toml(data) else {
        return;
    };
    let valid = cfg.validate().is_ok();
    let mapped: eyre::Result<ServiceConfig> = ServiceConfig::try_from(&cfg);
    // Anything the document validator accepts must map onto a valid service config
    if valid {
        let svc = mapped.expect("validated config must convert");
        assert!(svc.validate().is_ok());
    }
});
