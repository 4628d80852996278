pub mod config;
pub mod provision;
pub mod simulate;

use serde::Serialize;

/// The only failure classes haggle commands can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    ConfigValidation,
    RuntimeInit,
    Provisioning,
}

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: &'static str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_class: Option<ErrorClass>,
    message: String,
}

impl CommandResult {
    pub fn success(command: &'static str, message: impl Into<String>) -> Self {
        let outcome = CommandOutcome {
            command,
            status: "ok",
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: outcome.render() }
    }

    pub fn failure(
        command: &'static str,
        error_class: ErrorClass,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let outcome = CommandOutcome {
            command,
            status: "error",
            error_class: Some(error_class),
            message: message.into(),
        };
        Self { exit_code, output: outcome.render() }
    }
}

impl CommandOutcome {
    fn render(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|error| {
            format!(
                "{{\"command\":\"{}\",\"status\":\"error\",\"message\":\"{}\"}}",
                self.command,
                error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::{CommandResult, ErrorClass};

    #[test]
    fn failure_envelope_names_the_error_class() {
        let result =
            CommandResult::failure("provision", ErrorClass::Provisioning, "boom", 4);
        assert_eq!(result.exit_code, 4);

        let payload: Value = serde_json::from_str(&result.output).expect("output should be JSON");
        assert_eq!(payload["command"], "provision");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "provisioning");
        assert_eq!(payload["message"], "boom");
    }

    #[test]
    fn success_envelope_omits_the_error_class() {
        let result = CommandResult::success("provision", "done");

        let payload: Value = serde_json::from_str(&result.output).expect("output should be JSON");
        assert_eq!(payload["status"], "ok");
        assert!(payload.get("error_class").is_none());
    }
}
