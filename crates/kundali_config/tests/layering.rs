use std::path::Path;

use figment::Jail;
use kundali_chart::SignNaming;
use kundali_config::{KundaliConfig, OutputFormat};
use pretty_assertions::assert_eq;

/// Points the user config directory at the jail so a real
/// `~/.config/kundali/config.toml` never leaks into a test.
fn isolate_user_config(jail: &mut Jail) {
    let home = jail.directory().display().to_string();
    jail.set_env("XDG_CONFIG_HOME", &home);
    jail.set_env("HOME", &home);
}

#[test]
fn defaults_without_files() {
    Jail::expect_with(|jail| {
        isolate_user_config(jail);
        let config = KundaliConfig::load().expect("config loads");
        assert_eq!(config, KundaliConfig::default());
        Ok(())
    });
}

#[test]
fn local_file_overrides_defaults() {
    Jail::expect_with(|jail| {
        isolate_user_config(jail);
        jail.create_file(
            "kundali.toml",
            r#"
                [normalize]
                reject_duplicate_cusps = true

                [output]
                format = "text"
                naming = "sanskrit"
            "#,
        )?;
        let config = KundaliConfig::load().expect("config loads");
        assert!(config.normalize.reject_duplicate_cusps);
        assert!(config.normalize.hint_fallback);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.output.naming, SignNaming::Sanskrit);
        Ok(())
    });
}

#[test]
fn explicit_file_beats_local_file() {
    Jail::expect_with(|jail| {
        isolate_user_config(jail);
        jail.create_file("kundali.toml", "[output]\nformat = \"text\"\n")?;
        jail.create_file("ci.toml", "[output]\nformat = \"json\"\nshow_diagnostics = true\n")?;
        let config = KundaliConfig::load_with_file(Some(Path::new("ci.toml"))).expect("config loads");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.show_diagnostics);
        Ok(())
    });
}

#[test]
fn env_beats_files() {
    Jail::expect_with(|jail| {
        isolate_user_config(jail);
        jail.create_file("kundali.toml", "[normalize]\nhint_fallback = true\n")?;
        jail.set_env("KUNDALI_NORMALIZE__HINT_FALLBACK", "false");
        jail.set_env("KUNDALI_OUTPUT__NAMING", "sanskrit");
        let config = KundaliConfig::load().expect("config loads");
        assert!(!config.normalize.hint_fallback);
        assert_eq!(config.output.naming, SignNaming::Sanskrit);
        Ok(())
    });
}

#[test]
fn invalid_value_is_reported() {
    Jail::expect_with(|jail| {
        isolate_user_config(jail);
        jail.create_file("kundali.toml", "[output]\nformat = \"svg\"\n")?;
        assert!(KundaliConfig::load().is_err());
        Ok(())
    });
}

#[cfg(target_os = "linux")]
#[test]
fn user_file_sits_below_local_file() {
    Jail::expect_with(|jail| {
        isolate_user_config(jail);
        std::fs::create_dir_all(jail.directory().join("kundali"))
            .map_err(|e| e.to_string())?;
        jail.create_file(
            "kundali/config.toml",
            "[output]\nformat = \"text\"\nnaming = \"sanskrit\"\n",
        )?;
        jail.create_file("kundali.toml", "[output]\nnaming = \"western\"\n")?;
        let config = KundaliConfig::load().expect("config loads");
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.output.naming, SignNaming::Western);
        Ok(())
    });
}
