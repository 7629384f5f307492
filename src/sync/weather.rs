use std::time::Duration;

use ureq::Agent;

/// Current conditions at a coordinate. Purely decorative; nothing in the
/// calculator depends on it.
#[derive(Debug, Clone)]
pub struct Weather {
    pub city: String,
    pub temp_celsius: i64,
    pub condition: String,
    pub is_bad: bool,
}

const BAD_CONDITIONS: [&str; 4] = ["rain", "storm", "snow", "drizzle"];

/// Fetch current weather from OpenWeather. Returns None on any failure
/// (network, timeout, parse error) so the caller can silently skip it.
pub fn fetch_weather(api_key: &str, lat: f64, lon: f64) -> Option<Weather> {
    let agent: Agent = Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(5)))
        .build()
        .into();

    let url = format!(
        "https://api.openweathermap.org/data/2.5/weather?lat={lat}&lon={lon}&appid={api_key}&units=metric&lang=pt_br"
    );

    let body: String = agent
        .get(&url)
        .call()
        .ok()?
        .body_mut()
        .read_to_string()
        .ok()?;

    let json: serde_json::Value = serde_json::from_str(&body).ok()?;
    let main = json["weather"][0]["main"].as_str()?.to_lowercase();
    let is_bad = BAD_CONDITIONS.iter().any(|w| main.contains(w));

    Some(Weather {
        city: json["name"].as_str().unwrap_or("").to_string(),
        temp_celsius: json["main"]["temp"].as_f64()?.round() as i64,
        condition: json["weather"][0]["description"]
            .as_str()
            .unwrap_or("")
            .to_string(),
        is_bad,
    })
}
