use rynus_bot::config::{BotConfig, MissionFlow};
use rynus_bot::models::{LevelInfo, Mission, MissionStatus, UserInfoResponse, LabelTaskPayload};
use rynus_bot::client::api::{api_log_entry, LABELING_TASK_PATH};
use rynus_bot::models::Account;
use rynus_bot::PowerPolicyKind;
use std::path::PathBuf;

#[test]
fn test_load_or_create_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("rynus.toml");

    let config = BotConfig::load_or_create(&path).unwrap();
    assert!(path.exists());
    assert_eq!(config.labeling.max_tasks, 100);
    assert_eq!(config.timing.cooldown_seconds, 300);
    assert!(config.validate().is_ok());

    // Reading the generated file back gives the same values
    let reloaded = BotConfig::load_or_create(&path).unwrap();
    assert_eq!(reloaded.api.base_url, config.api.base_url);
    assert_eq!(reloaded.missions.flow, MissionFlow::ExecuteThenUpdate);
    assert_eq!(reloaded.timing.fixed_cycle_seconds, None);
}

#[test]
fn test_partial_file_keeps_defaults_for_missing_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rynus.toml");
    std::fs::write(
        &path,
        r#"
[timing]
fixed_cycle_seconds = 3600

[labeling]
power_policy = "client_simulated"

[missions]
flow = "update_only"

[files]
data_file = "accounts.txt"
"#,
    )
    .unwrap();

    let config = BotConfig::load_or_create(&path).unwrap();
    assert_eq!(config.timing.fixed_cycle_seconds, Some(3600));
    assert_eq!(config.timing.request_delay_ms, 2000);
    assert_eq!(config.labeling.power_policy, PowerPolicyKind::ClientSimulated);
    assert_eq!(config.labeling.max_retries, 3);
    assert_eq!(config.missions.flow, MissionFlow::UpdateOnly);
    assert_eq!(config.missions.daily_check_in_id, 1);
    assert_eq!(config.files.data_file, PathBuf::from("accounts.txt"));
    assert_eq!(config.files.log_file, PathBuf::from("application.log"));
}

#[test]
fn test_validate_rejects_bad_values() {
    let mut config = BotConfig::default();
    config.labeling.max_tasks = 0;
    assert!(config.validate().is_err());

    let mut config = BotConfig::default();
    config.labeling.power_recovery_minutes = 0.0;
    assert!(config.validate().is_err());

    let mut config = BotConfig::default();
    config.timing.fixed_cycle_seconds = Some(0);
    assert!(config.validate().is_err());
}

#[test]
fn test_level_lookup() {
    let gold = LevelInfo::for_level(13);
    assert_eq!(gold.name, "Gold III");
    assert_eq!(gold.maximum_energy, 50);
    assert_eq!(gold.text_task_point, 3250);
    assert_eq!(gold.groups, "Gold");
    assert_eq!(gold.level_code, "Gold_III");

    let unknown = LevelInfo::for_level(99);
    assert_eq!(unknown.name, "Unknown Level");
    assert_eq!(unknown.maximum_energy, 200);
    assert_eq!(unknown.text_task_point, 3750);

    assert_eq!(LevelInfo::all().len(), 14);
}

#[test]
fn test_mission_status_codes() {
    assert_eq!(MissionStatus::from_code("0"), MissionStatus::Pending);
    assert_eq!(MissionStatus::from_code("3"), MissionStatus::Completed);
    assert_eq!(MissionStatus::from_code("4"), MissionStatus::CompletedToday);
    assert_eq!(MissionStatus::from_code("1"), MissionStatus::Other("1".to_string()));

    // numeric status codes from the server decode the same way
    let mission: Mission = serde_json::from_str(r#"{"id":1,"name":"Daily","missionStatus":4}"#).unwrap();
    assert_eq!(mission.status(), MissionStatus::CompletedToday);
}

#[test]
fn test_user_info_envelope_decodes() {
    let body = r#"{"data":{"userData":{"id":77,"userCode":12345,"balance":10.5,"extraBalanceRental":3,
        "userPower":18,"levelId":2,"completedTasks":40,"region":"VN","userRole":"USER"}}}"#;
    let response: UserInfoResponse = serde_json::from_str(body).unwrap();
    let profile = response.data.and_then(|d| d.user_data).unwrap();

    assert_eq!(profile.id, 77);
    assert_eq!(profile.user_code, "12345");
    assert_eq!(profile.user_power, 18);
    assert_eq!(profile.extra_balance_rental, 3.0);

    let empty: UserInfoResponse = serde_json::from_str(r#"{"data":null}"#).unwrap();
    assert!(empty.data.is_none());
}

#[test]
fn test_label_payload_shape() {
    let payload = LabelTaskPayload::new("token", 77, Some("next".to_string()), 2500);
    let value = serde_json::to_value(&payload).unwrap();

    assert_eq!(value["authData"], "token");
    assert_eq!(value["nextKey"], "next");
    assert_eq!(value["taskId"], 0);
    assert_eq!(value["taskStatus"], 2);
    assert_eq!(value["taskType"], 2);
    assert_eq!(value["userId"], 77);

    let label: serde_json::Value = serde_json::from_str(value["labelResult"].as_str().unwrap()).unwrap();
    assert_eq!(label["taskId"], 770);
    assert_eq!(label["data"][1]["words"][0]["word"], "Rynus");
}

#[test]
fn test_api_log_entry_names_account_not_token() {
    let account = Account {
        raw_token: "query_id=secret&user=%7B%22id%22%3A42%7D".to_string(),
        telegram_id: "42".to_string(),
        username: Some("alice".to_string()),
    };

    let entry = api_log_entry(&account, "POST", LABELING_TASK_PATH, 512, 200, r#"{"data":null}"#);

    assert_eq!(entry["account"], account.display_name());
    assert_eq!(entry["method"], "POST");
    assert_eq!(entry["endpoint"], LABELING_TASK_PATH);
    assert_eq!(entry["request_bytes"], 512);
    assert_eq!(entry["status"], 200);
    assert_eq!(entry["response"], r#"{"data":null}"#);
    assert!(!entry.to_string().contains("secret"));
}
