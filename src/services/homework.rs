use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum HomeworkError {
    #[error("unexpected Practicum API answer type: expected an object, got {0}")]
    NotAnObject(&'static str),
    #[error("Practicum API answer has no \"homeworks\" key")]
    MissingHomeworks,
    #[error("\"homeworks\" in Practicum API answer is {0}, expected a list")]
    HomeworksNotAList(&'static str),
    #[error("homework record has no \"{0}\" key")]
    MissingField(&'static str),
    #[error("homework record field \"{field}\" is {kind}, expected a string")]
    InvalidField { field: &'static str, kind: &'static str },
    #[error("unknown homework status: {0}")]
    UnknownStatus(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub(crate) fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = HomeworkError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(HomeworkError::UnknownStatus(other.to_string())),
        }
    }
}

/// Checks the answer shape and returns the `homeworks` list.
///
/// An empty list is a valid answer: nothing changed since `from_date`.
pub(crate) fn check_response(answer: &Value) -> Result<&[Value], HomeworkError> {
    let object = answer.as_object().ok_or(HomeworkError::NotAnObject(json_kind(answer)))?;
    let homeworks = object.get("homeworks").ok_or(HomeworkError::MissingHomeworks)?;
    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or(HomeworkError::HomeworksNotAList(json_kind(homeworks)))
}

/// Reads the raw `status` of a record without validating it.
pub(crate) fn record_status(homework: &Value) -> Result<&str, HomeworkError> {
    string_field(homework, "status")
}

/// Builds the notification text for a single homework record.
pub(crate) fn parse_status(homework: &Value) -> Result<String, HomeworkError> {
    let homework_name = string_field(homework, "homework_name")?;
    let status: HomeworkStatus = record_status(homework)?.parse()?;

    Ok(format!("Изменился статус проверки работы \"{homework_name}\". {}", status.verdict()))
}

fn string_field<'a>(homework: &'a Value, field: &'static str) -> Result<&'a str, HomeworkError> {
    let value = homework.get(field).ok_or(HomeworkError::MissingField(field))?;
    value.as_str().ok_or(HomeworkError::InvalidField { field, kind: json_kind(value) })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn check_response_returns_homeworks() {
        let answer = json!({
            "homeworks": [{"homework_name": "X", "status": "approved"}],
            "current_date": 1_700_000_000,
        });
        let homeworks = check_response(&answer).expect("valid answer");
        assert_eq!(homeworks.len(), 1);
        assert_eq!(homeworks[0]["homework_name"], "X");
    }

    #[test]
    fn check_response_accepts_empty_list() {
        let answer = json!({"homeworks": []});
        assert!(check_response(&answer).expect("valid answer").is_empty());
    }

    #[test]
    fn check_response_rejects_non_object() {
        let answer = json!([{"homeworks": []}]);
        assert_eq!(check_response(&answer), Err(HomeworkError::NotAnObject("a list")));
    }

    #[test]
    fn check_response_rejects_missing_key() {
        let answer = json!({"current_date": 0});
        assert_eq!(check_response(&answer), Err(HomeworkError::MissingHomeworks));
    }

    #[test]
    fn check_response_rejects_non_list_homeworks() {
        let answer = json!({"homeworks": {"homework_name": "X"}});
        assert_eq!(check_response(&answer), Err(HomeworkError::HomeworksNotAList("an object")));
    }

    #[test]
    fn parse_status_formats_verdict() {
        let record = json!({"homework_name": "X", "status": "approved"});
        assert_eq!(
            parse_status(&record).expect("message"),
            "Изменился статус проверки работы \"X\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );

        let record = json!({"homework_name": "hw_sprint_2", "status": "rejected"});
        assert!(parse_status(&record)
            .expect("message")
            .ends_with(HomeworkStatus::Rejected.verdict()));
    }

    #[test]
    fn parse_status_rejects_unknown_status() {
        let record = json!({"homework_name": "X", "status": "lost"});
        assert_eq!(parse_status(&record), Err(HomeworkError::UnknownStatus("lost".to_string())));
    }

    #[test]
    fn parse_status_requires_fields() {
        let record = json!({"status": "approved"});
        assert_eq!(parse_status(&record), Err(HomeworkError::MissingField("homework_name")));

        let record = json!({"homework_name": "X"});
        assert_eq!(parse_status(&record), Err(HomeworkError::MissingField("status")));
    }

    #[test]
    fn non_string_status_is_invalid_not_missing() {
        let record = json!({"homework_name": "X", "status": 5});
        let err = record_status(&record).unwrap_err();
        assert_eq!(err, HomeworkError::InvalidField { field: "status", kind: "a number" });
        assert_eq!(
            err.to_string(),
            "homework record field \"status\" is a number, expected a string"
        );

        let record = json!({"homework_name": null, "status": "approved"});
        assert_eq!(
            parse_status(&record),
            Err(HomeworkError::InvalidField { field: "homework_name", kind: "null" })
        );
    }
}
