use std::env;
use std::sync::{Mutex, OnceLock};

use haggle_cli::commands::{provision, simulate};
use serde_json::Value;

#[test]
fn simulate_prints_a_transcript_and_ranked_summary() {
    with_env(&[], || {
        let result = simulate::run();
        assert_eq!(result.exit_code, 0, "expected successful simulation");

        assert!(result.output.contains("Calling SneakerXpress at 9525996352..."));
        assert!(result.output.contains("Top 3 Offers:"));
        assert!(result.output.contains("Confirmation: SIM-ORD"));
        // QuickKicks sits below the threshold; its listed price is final.
        assert!(result.output.contains("QuickKicks: Price is $270, delivery in 4 days."));
    });
}

#[test]
fn simulate_fails_cleanly_on_invalid_config() {
    with_env(&[("HAGGLE_NEGOTIATION_TOP_K", "0")], || {
        let result = simulate::run();
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "simulate");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn provision_falls_back_to_the_mock_agent_id() {
    with_env(&[], || {
        let result = provision::run();
        assert_eq!(result.exit_code, 0, "expected noop provisioning to succeed");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "provision");
        assert_eq!(payload["status"], "ok");
        let message = payload["message"].as_str().unwrap_or_default();
        assert!(message.contains("noop"));
        assert!(message.contains("mock-agent-id"));
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be JSON")
}

fn env_lock() -> &'static Mutex<()> {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

fn with_env(vars: &[(&str, &str)], body: impl FnOnce()) {
    let _guard = env_lock().lock().expect("env lock should not be poisoned");

    for (key, value) in vars {
        env::set_var(key, value);
    }

    body();

    for (key, _) in vars {
        env::remove_var(key);
    }
}
