// Environment layer tests
// Author: kelexine (https://github.com/kelexine)
//
// Kept in their own test binary: the variables set here are process-wide and
// would leak into the file/CLI tests in config_tests.rs.

use grievance_relay::cli::Args;
use grievance_relay::config::AppConfig;
use std::io::Write;

const ENV_VARS: [(&str, &str); 3] = [
    ("GRIEVANCE_RELAY__SERVER__PORT", "6123"),
    ("GRIEVANCE_RELAY__GEMINI__TIMEOUT_SECONDS", "12"),
    ("GRIEVANCE_RELAY__GEMINI__API_KEY", "from-env"),
];

#[test]
fn test_env_overrides_file_and_cli_overrides_env() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(
        br#"
[server]
port = 8088

[gemini]
api_key = "from-file"
timeout_seconds = 30

[image]
jpeg_quality = 90
"#,
    )
    .unwrap();

    for (key, value) in ENV_VARS {
        std::env::set_var(key, value);
    }

    let file_only = Args {
        config: Some(file.path().to_path_buf()),
        ..Args::default()
    };
    let from_env = AppConfig::load(&file_only);

    let with_cli = Args {
        port: Some(5050),
        api_key: Some("from-cli".to_string()),
        ..file_only.clone()
    };
    let from_cli = AppConfig::load(&with_cli);

    for (key, _) in ENV_VARS {
        std::env::remove_var(key);
    }

    let config = from_env.unwrap();
    assert_eq!(config.server.port, 6123);
    assert_eq!(config.gemini.timeout_seconds, Some(12));
    assert_eq!(config.gemini.api_key.as_deref(), Some("from-env"));
    // Not set in the environment, so the file still wins
    assert_eq!(config.image.jpeg_quality, 90);

    let config = from_cli.unwrap();
    assert_eq!(config.server.port, 5050);
    assert_eq!(config.gemini.api_key.as_deref(), Some("from-cli"));
    assert_eq!(config.gemini.timeout_seconds, Some(12));
}
