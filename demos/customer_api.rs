use openmeteo::{ForecastParams, OpenMeteo, OpenMeteoError, TransportError};
use std::env;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), OpenMeteoError> {
    let api_key = env::var("OPEN_METEO_API_KEY").unwrap_or_else(|_| "not-a-real-key".to_string());

    let client = OpenMeteo::builder()
        .api_key(api_key)
        .timeout(Duration::from_secs(10))
        .max_retries(1)
        .build()?;
    println!("Using {}", client.base_url());

    let params = ForecastParams::builder()
        .latitude(45.4112)
        .longitude(-75.6981)
        .daily(vec!["sunrise".into(), "sunset".into()])
        .build();

    match client.forecast(&params).await {
        Ok(forecast) => println!("{:#?}", forecast.daily()),
        Err(OpenMeteoError::Transport(TransportError::HttpStatus { status, reason, .. })) => {
            println!("Rejected with {status}: {}", reason.unwrap_or_default());
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
