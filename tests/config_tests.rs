/*
 *  tests/config_tests.rs
 *
 *  Config file loading and layering
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 */

use std::io::Write;
use std::time::Duration;

use hamons::config::{load_from, BusConfig, Cli, ConfigError, DriverKind};
use hamons::pacer::Pacing;
use hamons::render::MarkerStyle;

fn yaml_file(body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file
}

#[test]
fn file_values_then_cli_overrides() {
    let file = yaml_file(
        r#"
log_level: warn
display:
  driver: mock
  width: 128
  height: 128
  rotate_deg: 90
  bus:
    type: spi
    bus: /dev/spidev1.0
    speed_hz: 16000000
    dc_pin: 5
    rst_pin: 6
panel:
  cycle_delay_ms: 2000
  pacing: fixed_period
  marker: corner
watch:
  containers: [zigbee2mqtt, mosquitto]
  ping_host: 192.168.1.1
  ping_timeout_ms: 500
"#,
    );
    let cli = Cli {
        config: Some(file.path().to_path_buf()),
        ping_host: Some("1.1.1.1".into()),
        display_rotate_deg: Some(180),
        ..Default::default()
    };
    let cfg = load_from(&cli).unwrap();

    assert_eq!(cfg.log_level.as_deref(), Some("warn"));
    let display = cfg.display_config();
    assert_eq!(display.driver, Some(DriverKind::Mock));
    assert_eq!(display.rotate_deg, Some(180));
    assert!(matches!(display.bus, Some(BusConfig::Spi { ref bus, dc_pin: 5, .. }) if bus == "/dev/spidev1.0"));

    let panel = cfg.panel_settings();
    assert_eq!(panel.cycle_delay, Duration::from_secs(2));
    assert_eq!(panel.pacing, Pacing::FixedPeriod);
    assert_eq!(panel.marker, MarkerStyle::Corner);
    // untouched keys keep their defaults
    assert_eq!(panel.acquire_deadline, Duration::from_secs(5));

    let watch = cfg.watch_settings();
    assert_eq!(watch.containers, vec!["zigbee2mqtt", "mosquitto"]);
    assert_eq!(watch.ping_host, "1.1.1.1");
    assert_eq!(watch.ping_timeout, Duration::from_millis(500));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let cli = Cli {
        config: Some("/nonexistent/hamons.yaml".into()),
        ..Default::default()
    };
    assert!(matches!(load_from(&cli), Err(ConfigError::Validation(_))));
}

#[test]
fn malformed_yaml_is_an_error() {
    let file = yaml_file("panel: [not, a, map]\n");
    let cli = Cli { config: Some(file.path().to_path_buf()), ..Default::default() };
    assert!(matches!(load_from(&cli), Err(ConfigError::Yaml(_))));
}

#[test]
fn invalid_values_are_rejected_after_merge() {
    let file = yaml_file("panel:\n  margin: 2\n");
    let cli = Cli { config: Some(file.path().to_path_buf()), ..Default::default() };
    assert!(matches!(load_from(&cli), Err(ConfigError::Validation(_))));

    let file = yaml_file("display:\n  rotate_deg: 0\n");
    let cli = Cli {
        config: Some(file.path().to_path_buf()),
        display_rotate_deg: Some(45),
        ..Default::default()
    };
    assert!(matches!(load_from(&cli), Err(ConfigError::Validation(_))));
}

#[test]
fn container_list_must_fit_the_panel() {
    let file = yaml_file("log_level: info\n");
    let cli = |n: usize| Cli {
        containers: (0..n).map(|i| format!("svc{i}")).collect(),
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    assert!(load_from(&cli(4)).is_ok());
    assert!(matches!(load_from(&cli(6)), Err(ConfigError::Validation(_))));
}

#[test]
fn deadline_must_outlast_probe_timeouts() {
    let file = yaml_file("panel:\n  acquire_deadline_ms: 1500\nwatch:\n  docker_timeout_ms: 1500\n");
    let cli = Cli { config: Some(file.path().to_path_buf()), ..Default::default() };
    assert!(matches!(load_from(&cli), Err(ConfigError::Validation(_))));
}
