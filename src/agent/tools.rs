//! Tools registered against agent sessions.
//!
//! Currently a single weather lookup returning synthesized data. The handler
//! must never propagate an error to the session: whatever the input looks
//! like, the agent gets a response object back.

use super::session::{ToolDefinition, ToolHandler};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

#[derive(Debug, Default, Deserialize)]
struct WeatherArgs {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    units: Option<String>,
}

pub fn weather_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "get_weather".to_string(),
        description: "Call this function to retrieve current weather information for a specific \
                      location. Provide the city name."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "The name of the city to get weather information for",
                },
            },
            "required": ["city"],
        }),
    }
}

/// Build the dispatch handler for `get_weather`, tagged with the agent id
/// for log correlation.
pub fn weather_tool_handler(agent_user_id: &str) -> ToolHandler {
    let agent_user_id = agent_user_id.to_string();
    Box::new(move |args: Value| {
        let agent_user_id = agent_user_id.clone();
        Box::pin(async move {
            info!("Tool ({}): get_weather request {}", agent_user_id, args);
            let response = synthesize_weather(&args);
            info!("Tool ({}): get_weather response {}", agent_user_id, response);
            response
        })
    })
}

/// Placeholder for a real weather API call; returns constant conditions.
fn synthesize_weather(args: &Value) -> Value {
    let args: WeatherArgs = match serde_json::from_value(args.clone()) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("get_weather received malformed arguments: {}", e);
            WeatherArgs::default()
        }
    };

    let city = args.city.unwrap_or_else(|| "unknown".to_string());
    let location = match args.country {
        Some(country) => format!("{city}, {country}"),
        None => city,
    };
    let units = match args.units.as_deref() {
        Some("imperial") => "°F",
        _ => "°C",
    };

    json!({
        "location": location,
        "temperature": 22,
        "units": units,
        "condition": "Partly Cloudy",
        "humidity": 65,
        "windSpeed": 10,
    })
}
