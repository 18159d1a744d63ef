use openmeteo::{ForecastParams, OpenMeteo, OpenMeteoError};

#[tokio::main]
async fn main() -> Result<(), OpenMeteoError> {
    let client = OpenMeteo::new()?;

    let params = ForecastParams::builder()
        .latitude(45.4112)
        .longitude(-75.6981)
        .timezone("America/Toronto")
        .hourly(vec!["temperature_2m".into(), "cloud_cover".into()])
        .daily(vec!["temperature_2m_max".into()])
        .build();

    let forecast = client.forecast(&params).await?;
    println!(
        "{} ({}), elevation {} m",
        forecast.timezone, forecast.timezone_abbreviation, forecast.elevation
    );

    if let Some(rows) = forecast.hourly() {
        for row in rows.iter().take(6) {
            println!(
                "{:?}: {:?} °C, {:?} % cloud",
                row.datetime(),
                row.get("temperature_2m"),
                row.get("cloud_cover")
            );
        }
    }

    // the whole response, as JSON
    println!("{}", serde_json::to_string_pretty(&forecast).unwrap_or_default());

    Ok(())
}
