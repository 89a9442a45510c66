//! Tool handlers for `tools/call`

use bandwidth_core::{InputError, Precision};
use bandwidth_units::{
    Conversions, Outcome, Session, SpeedUnit, bit_units, byte_units, convert_formatted, parse,
    parse_unit,
};
use chrono::Local;
use serde_json::{json, Value as JsonValue};
use crate::McpError;

pub(crate) fn list() -> JsonValue {
    json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a value in one unit into all twelve bandwidth units.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": {
                            "type": "string",
                            "description": "Non-negative number; '.' or ',' as decimal separator"
                        },
                        "unit": {
                            "type": "string",
                            "description": "Source unit: identifier (MegabitPerSecond), label (Mbit/s) or alias (Mbps)"
                        },
                        "precision": {
                            "type": "integer",
                            "description": "Decimal places, clamped to 1..10 (default: session precision)"
                        }
                    },
                    "required": ["value", "unit"]
                }
            },
            {
                "name": "list_units",
                "description": "List supported units with labels and whether they accept fractions.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "edit",
                "description": "Type into a session field; every other field is recomputed.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "unit": {
                            "type": "string",
                            "description": "Field being edited"
                        },
                        "input": {
                            "type": "string",
                            "description": "Field text; blank clears the session"
                        }
                    },
                    "required": ["unit", "input"]
                }
            },
            {
                "name": "set_precision",
                "description": "Set session precision (clamped to 1..10) and recompute.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "precision": {
                            "type": "integer",
                            "description": "Decimal places"
                        }
                    },
                    "required": ["precision"]
                }
            },
            {
                "name": "reset",
                "description": "Clear every session field.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "report",
                "description": "Plain-text summary of the session fields.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            }
        ]
    })
}

pub(crate) fn convert(session: &Session, args: &JsonValue) -> Result<JsonValue, McpError> {
    let raw = value_arg(args, "value")?;
    let unit = unit_arg(args)?;
    let precision = match args.get("precision") {
        None | Some(JsonValue::Null) => session.precision(),
        Some(v) => v.as_i64()
            .map(Precision::clamped)
            .ok_or_else(|| McpError::invalid_params("precision must be an integer"))?,
    };

    match parse(&raw, unit) {
        Ok(value) => {
            let fields = convert_formatted(value, unit, precision);
            Ok(json!({
                "content": [{ "type": "text", "text": render_fields(&fields) }],
                "source": unit.identifier(),
                "precision": precision,
                "values": fields,
                "isError": false
            }))
        }
        Err(e) => Ok(input_error(&e)),
    }
}

pub(crate) fn list_units() -> JsonValue {
    let units: Vec<JsonValue> = SpeedUnit::ALL.iter().map(|u| json!({
        "identifier": u.identifier(),
        "label": u.display(),
        "family": u.family(),
        "allows_fractional": u.allows_fractional(),
        "bits_per_second": u.scale_to_bits_per_second()
    })).collect();

    let text = units.iter()
        .filter_map(|u| Some(format!("{} ({})", u["label"].as_str()?, u["identifier"].as_str()?)))
        .collect::<Vec<_>>()
        .join("\n");

    json!({
        "content": [{ "type": "text", "text": text }],
        "units": units
    })
}

pub(crate) fn edit(session: &mut Session, args: &JsonValue) -> Result<JsonValue, McpError> {
    let unit = unit_arg(args)?;
    let input = args.get("input")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing input argument"))?;

    let outcome = session.edit(unit, input);
    Ok(outcome_to_json(session, outcome))
}

pub(crate) fn set_precision(session: &mut Session, args: &JsonValue) -> Result<JsonValue, McpError> {
    let digits = args.get("precision")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| McpError::invalid_params("Missing integer precision argument"))?;

    match session.set_precision(digits) {
        Some(outcome) => Ok(outcome_to_json(session, outcome)),
        None => Ok(json!({
            "content": [{ "type": "text", "text": format!("Precision set to {}", session.precision()) }],
            "precision": session.precision(),
            "isError": false
        })),
    }
}

pub(crate) fn reset(session: &mut Session) -> JsonValue {
    session.reset();
    outcome_to_json(session, Outcome::Cleared)
}

pub(crate) fn report(session: &Session) -> JsonValue {
    let text = session.report(Local::now().naive_local());
    json!({ "content": [{ "type": "text", "text": text }] })
}

fn outcome_to_json(session: &Session, outcome: Outcome) -> JsonValue {
    match outcome {
        Outcome::Updated(fields) => json!({
            "content": [{ "type": "text", "text": render_fields(&fields) }],
            "source": session.active_unit().identifier(),
            "precision": session.precision(),
            "values": fields,
            "isError": false
        }),
        Outcome::Cleared => json!({
            "content": [{ "type": "text", "text": "All fields cleared" }],
            "precision": session.precision(),
            "values": session.fields(),
            "isError": false
        }),
        Outcome::Rejected(e) => input_error(&e),
    }
}

fn input_error(e: &InputError) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": format!("Error: {}", e.message) }],
        "error": e,
        "isError": true
    })
}

/// Accepts the value either as a string or as a JSON number
fn value_arg(args: &JsonValue, key: &str) -> Result<String, McpError> {
    match args.get(key) {
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(JsonValue::Number(n)) => Ok(n.to_string()),
        _ => Err(McpError::invalid_params(format!("Missing {} argument", key))),
    }
}

fn unit_arg(args: &JsonValue) -> Result<SpeedUnit, McpError> {
    let name = args.get("unit")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing unit argument"))?;

    parse_unit(name).map_err(|e| McpError::invalid_params(e.to_string()))
}

/// Two columns, bit family on the left and byte family on the right
fn render_fields(fields: &Conversions<String>) -> String {
    bit_units().into_iter()
        .zip(byte_units())
        .map(|(bit, byte)| format!(
            "{:>6}  {:<24}{:>4}  {}",
            bit.display(), fields[bit], byte.display(), fields[byte]
        ))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_success() {
        let session = Session::new();
        let result = convert(&session, &json!({"value": "1", "unit": "Gbps", "precision": 3})).unwrap();

        assert_eq!(result["isError"], false);
        assert_eq!(result["precision"], 3);
        assert_eq!(result["values"]["MegabitPerSecond"], "1000.000");
        assert_eq!(result["values"]["MegabytePerSecond"], "125.000");
    }

    #[test]
    fn test_convert_accepts_json_number() {
        let session = Session::new();
        let result = convert(&session, &json!({"value": 8, "unit": "BitPerSecond"})).unwrap();
        assert_eq!(result["values"]["BytePerSecond"], "1");
    }

    #[test]
    fn test_convert_input_error_is_tool_error() {
        let session = Session::new();
        let result = convert(&session, &json!({"value": "3.14", "unit": "bit/s"})).unwrap();

        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["kind"], "fractional-not-allowed");
    }

    #[test]
    fn test_convert_unknown_unit() {
        let session = Session::new();
        let err = convert(&session, &json!({"value": "1", "unit": "KiB/s"})).unwrap_err();
        assert_eq!(err.code, -32602);
    }

    #[test]
    fn test_list_units() {
        let result = list_units();
        let units = result["units"].as_array().unwrap();

        assert_eq!(units.len(), SpeedUnit::COUNT);
        assert_eq!(units[0]["label"], "bit/s");
        assert_eq!(units[0]["allows_fractional"], false);
        assert_eq!(units[6]["family"], "byte");
    }

    #[test]
    fn test_session_tools() {
        let mut session = Session::new();

        let result = edit(&mut session, &json!({"unit": "MB/s", "input": "12,5"})).unwrap();
        assert_eq!(result["values"]["MegabitPerSecond"], "100");
        assert_eq!(result["values"]["MegabytePerSecond"], "12,5");

        let result = set_precision(&mut session, &json!({"precision": 2})).unwrap();
        assert_eq!(result["values"]["MegabitPerSecond"], "100.00");

        let text = report(&session)["content"][0]["text"].as_str().unwrap().to_string();
        assert!(text.contains("MegabitPerSecond: 100.00"));
        assert!(text.contains("Precision: 2 decimal places"));

        let result = reset(&mut session);
        assert_eq!(result["values"]["MegabitPerSecond"], "");
    }

    #[test]
    fn test_edit_negative() {
        let mut session = Session::new();
        let result = edit(&mut session, &json!({"unit": "Mbit/s", "input": "-1"})).unwrap();
        assert_eq!(result["error"]["kind"], "negative");
    }

    #[test]
    fn test_render_fields() {
        let fields = convert_formatted(100.0, SpeedUnit::MegabitPerSecond, Precision::default());
        let text = render_fields(&fields);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[2].contains("Mbit/s") && lines[2].contains("MB/s") && lines[2].contains("12.5"));
    }
}
