use anyhow::Result;
use std::path::Path;
use tempfile::TempDir;
use usf_timetable::utils::logger;
use usf_timetable::utils::validation::Validate;
use usf_timetable::{LocalStorage, Usf, UsfConfig};

#[test]
fn test_config_drives_save_and_load() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("usf.toml");
    std::fs::write(
        &config_path,
        r#"
[format]
indent = 2

[load]
rollback_on_failure = true

[logging]
level = "debug"
"#,
    )?;

    let config = UsfConfig::from_file(&config_path)?;
    config.validate()?;
    logger::init_from_config(&config.logging());

    let storage = LocalStorage::new(temp_dir.path());
    let mut usf = Usf::default();
    usf.periods.push(("13:00".to_string(), "13:45".to_string()));
    usf.add_subject("Chemistry", Default::default());
    usf.add_schedule_entry(4, "even", "Chemistry", 1);

    usf.save_to(&storage, Path::new("week.json"), config.save_options())?;
    let text = std::fs::read_to_string(temp_dir.path().join("week.json"))?;
    assert!(text.starts_with("{\n  \"version\""));

    let mut loaded = Usf::default();
    loaded.load_from(&storage, Path::new("week.json"), config.load_options())?;
    assert_eq!(loaded, usf);
    Ok(())
}

#[test]
fn test_missing_config_file() {
    let result = UsfConfig::from_file("/no/such/usf.toml");
    assert!(matches!(
        result,
        Err(usf_timetable::UsfError::ConfigError { .. })
    ));
}
