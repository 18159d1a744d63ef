use openmeteo::{
    ForecastParams, OpenMeteo, OpenMeteoError, CURRENT_VARIABLES, DAILY_VARIABLES,
    HOURLY_VARIABLES,
};

fn names(catalog: &[&str]) -> Vec<String> {
    catalog.iter().map(|name| name.to_string()).collect()
}

#[tokio::main]
async fn main() -> Result<(), OpenMeteoError> {
    let client = OpenMeteo::new()?;

    let params = ForecastParams::builder()
        .latitude(45.4112)
        .longitude(-75.6981)
        .forecast_days(1)
        .hourly(names(HOURLY_VARIABLES))
        .daily(names(DAILY_VARIABLES))
        .current(names(CURRENT_VARIABLES))
        .build();

    let forecast = client.forecast(&params).await?;

    if let Some(rows) = forecast.hourly() {
        println!("hourly: {} rows x {} fields", rows.len(), rows[0].keys().count());
    }
    if let Some(rows) = forecast.daily() {
        println!("daily: {} rows x {} fields", rows.len(), rows[0].keys().count());
    }
    if let Some(row) = forecast.current() {
        for (name, value) in row.fields() {
            let unit = forecast
                .current_units()
                .and_then(|units| units.get(name))
                .and_then(|unit| unit.as_str())
                .unwrap_or("");
            println!("{name}: {value:?} {unit}");
        }
    }

    Ok(())
}
