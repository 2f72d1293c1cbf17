//! Demo tools registered by the chat command.

use anyhow::Result;
use pcore::{Model, Param, ToolDescriptor};
use rand::Rng;
use runtime::{Arguments, Runtime};

const CONDITIONS: [&str; 5] = ["sunny", "cloudy", "rainy", "windy", "snowy"];
const UNITS: [&str; 2] = ["celsius", "fahrenheit"];
const LEVELS: [&str; 3] = ["easy", "moderate", "hard"];

/// Register every demo tool.
pub fn register<M: Model>(runtime: &mut Runtime<M>) {
    let about = "Get the current weather in a given location";
    let location = Param::string("location").describe("The city, e.g. Paris");
    runtime.register(
        ToolDescriptor::new("get_current_weather", about)
            .param(location)
            .param(Param::one_of("unit", UNITS).default("celsius")),
        weather,
    );

    let about = "Find hiking trails near a location";
    let location = Param::string("location").describe("The area to search");
    runtime.register(
        ToolDescriptor::new("find_hiking_trails", about)
            .param(location)
            .param(Param::one_of("difficulty", LEVELS).default("moderate")),
        trails,
    );

    let about = "Search for restaurants matching a query";
    let query = Param::string("query").describe("Cuisine or restaurant name");
    runtime.register(
        ToolDescriptor::new("search_restaurants", about)
            .param(query)
            .param(Param::integer("maxResults").default(5)),
        restaurants,
    );
}

/// Report a random temperature and condition for a location.
pub async fn weather(args: Arguments) -> Result<String> {
    let location = args.str("location").unwrap_or("somewhere");
    let unit = args.str("unit").unwrap_or("celsius");
    let (celsius, condition) = {
        let mut rng = rand::rng();
        let celsius: i32 = rng.random_range(-5..=32);
        (celsius, CONDITIONS[rng.random_range(0..CONDITIONS.len())])
    };
    let (temperature, symbol) = match unit {
        "fahrenheit" => (celsius * 9 / 5 + 32, "F"),
        _ => (celsius, "C"),
    };
    Ok(format!("{location}: {temperature}°{symbol}, {condition}"))
}

/// List a few trails at the requested difficulty.
pub async fn trails(args: Arguments) -> Result<String> {
    let location = args.str("location").unwrap_or("the area");
    let difficulty = args.str("difficulty").unwrap_or("moderate");
    let names = ["Ridge Loop", "Falls Trail", "Summit Path"];
    let list = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let km = 3 + i * 4;
            format!("{}. {name} ({difficulty}, {km} km)", i + 1)
        })
        .collect::<Vec<_>>()
        .join("\n");
    Ok(format!("Trails near {location}:\n{list}"))
}

/// List restaurants matching the query.
pub async fn restaurants(args: Arguments) -> Result<String> {
    let query = args.require("query")?.to_string();
    let max = args.i64("maxResults").unwrap_or(5);
    anyhow::ensure!(max > 0, "maxResults must be positive, got {max}");
    let list = (1..=max.min(10))
        .map(|i| format!("{i}. {query} place #{i}"))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(format!("Restaurants for \"{query}\":\n{list}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn weather_respects_unit() {
        let args = Arguments::new()
            .with("location", "Paris")
            .with("unit", "fahrenheit");
        let report = weather(args).await.unwrap();
        assert!(report.starts_with("Paris: "));
        assert!(report.contains("°F"));
    }

    #[tokio::test]
    async fn trails_use_difficulty() {
        let args = Arguments::new()
            .with("location", "Denver")
            .with("difficulty", "hard");
        let list = trails(args).await.unwrap();
        assert!(list.starts_with("Trails near Denver:"));
        assert_eq!(list.matches("(hard,").count(), 3);
    }

    #[tokio::test]
    async fn restaurants_cap_results() {
        let args = Arguments::new()
            .with("query", "sushi")
            .with("maxResults", 2);
        let list = restaurants(args).await.unwrap();
        assert_eq!(list.lines().count(), 3);

        let args = Arguments::new().with("query", "x").with("maxResults", 0);
        let err = restaurants(args).await.unwrap_err();
        assert!(err.to_string().contains("maxResults"));
        assert!(restaurants(Arguments::new()).await.is_err());
    }
}
