// SPDX-License-Identifier: MPL-2.0
use forum_desk::config::{self, Config};
use forum_desk::forum::roles::Role;
use forum_desk::i18n::fluent::I18n;
use forum_desk::i18n::Label;
use forum_desk::ui::notifications::{Manager, Severity};
use std::time::{Duration, Instant};
use tempfile::tempdir;

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let temp_config_file_path = dir.path().join("settings.toml");

    // 1. Initial config: en-US
    let mut initial_config = Config::default();
    initial_config.general.language = Some("en-US".to_string());
    config::save_to_path(&initial_config, &temp_config_file_path)
        .expect("Failed to write initial config file");

    let loaded_initial_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load initial config from path");
    let i18n_en = I18n::new(None, &loaded_initial_config);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");
    assert_eq!(Role::Moderator.label().resolve(&i18n_en), "Moderator");

    // 2. Change config to fr
    let mut french_config = loaded_initial_config;
    french_config.general.language = Some("fr".to_string());
    config::save_to_path(&french_config, &temp_config_file_path)
        .expect("Failed to write french config file");

    let loaded_french_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load french config from path");
    let i18n_fr = I18n::new(None, &loaded_french_config);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");
    assert_eq!(Role::Moderator.label().resolve(&i18n_fr), "Modérateur");

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn test_partial_config_keeps_defaults() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        "[server]\nbase_url = \"https://forum.example\"\n\n[notifications]\nerror_ms = 0\n",
    )
    .expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    assert_eq!(loaded.server.base_url, "https://forum.example");
    assert_eq!(loaded.timing, Config::default().timing);

    // An error toast with a zero duration stays until dismissed.
    let mut manager = Manager::with_settings(
        loaded.timing.transition(),
        loaded.notifications.durations(),
    );
    let start = Instant::now();
    manager.show(Label::text("boom"), Severity::Error, None, None, start);
    manager.tick(start + Duration::from_secs(3600));
    assert_eq!(manager.visible_count(), 1);
}

#[test]
fn test_every_dialog_key_is_translated() {
    let keys = [
        "dialog-ban-reason",
        "dialog-solution-confirm",
        "dialog-report-reason",
        "notification-connection-error",
        "notification-login-to-vote",
        "validation-content-too-short",
        "search-no-results",
    ];
    for lang in ["en-US", "fr"] {
        let i18n = I18n::new(Some(lang.to_string()), &Config::default());
        for key in keys {
            assert!(
                !i18n.tr(key).starts_with("MISSING"),
                "{key} missing in {lang}"
            );
        }
        let delete = Label::key("dialog-delete-confirm").with_arg("kind", "comment");
        assert!(!delete.resolve(&i18n).starts_with("MISSING"));
    }
}
