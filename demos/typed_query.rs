use openmeteo::{
    CurrentVariable, DailyVariable, HourlyVariable, LatLon, OpenMeteo, OpenMeteoError,
    TemperatureUnit, WindSpeedUnit,
};

#[tokio::main]
async fn main() -> Result<(), OpenMeteoError> {
    let client = OpenMeteo::new()?;

    let forecast = client
        .query(LatLon(52.52, 13.41))
        .timezone("Europe/Berlin")
        .forecast_days(3)
        .temperature_unit(TemperatureUnit::Fahrenheit)
        .wind_speed_unit(WindSpeedUnit::Kn)
        .hourly([HourlyVariable::Temperature2m, HourlyVariable::WindSpeed10m])
        .daily([DailyVariable::Sunrise, DailyVariable::Sunset])
        .current([CurrentVariable::Temperature2m])
        .call()
        .await?;

    println!("Now: {:?}", forecast.current().get("temperature_2m"));
    for day in forecast.daily() {
        let sunrise = day.get("sunrise").and_then(|ms| chrono::DateTime::from_timestamp_millis(ms as i64));
        let sunset = day.get("sunset").and_then(|ms| chrono::DateTime::from_timestamp_millis(ms as i64));
        println!("{:?}: sunrise {:?}, sunset {:?}", day.datetime(), sunrise, sunset);
    }
    println!(
        "{} hourly rows, units {:?}",
        forecast.hourly().len(),
        forecast.hourly_units()
    );

    Ok(())
}
