use skycast_core::{RenderSink, WeatherReport};

/// Writes client callbacks to the terminal: progress and reports on stdout,
/// errors on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleRenderer;

impl RenderSink for ConsoleRenderer {
    fn on_loading(&self) {
        println!("Fetching weather data...");
    }

    fn on_error(&self, message: &str) {
        eprintln!("Error: {message}");
    }

    fn on_report(&self, report: &WeatherReport) {
        println!("{}", format_report(report));
    }
}

/// Multi-line report. Temperatures are shown as whole degrees, visibility
/// and UV index to one decimal with `N/A` for absent values.
fn format_report(report: &WeatherReport) -> String {
    let visibility = match report.visibility_km {
        Some(_) => format!("{} km", report.visibility_display()),
        None => report.visibility_display(),
    };

    format!(
        "{}, {}\n\
         {:.0}°C  {} (feels like {:.0}°C)\n\
         Humidity:   {} %\n\
         Wind:       {} m/s\n\
         Pressure:   {} hPa\n\
         Visibility: {}\n\
         UV index:   {}\n\
         Observed:   {}",
        report.city,
        report.country,
        report.temperature_c,
        report.condition,
        report.feels_like_c,
        report.humidity_pct,
        report.wind_speed_mps,
        report.pressure_hpa,
        visibility,
        report.uv_display(),
        report.observed_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::Coordinates;

    fn report() -> WeatherReport {
        WeatherReport {
            city: "London".to_string(),
            country: "GB".to_string(),
            coord: Coordinates::new(51.5074, -0.1278),
            temperature_c: 17.4,
            feels_like_c: 16.9,
            humidity_pct: 72,
            pressure_hpa: 1012,
            wind_speed_mps: 4.1,
            visibility_km: Some(12.0),
            condition: "scattered clouds".to_string(),
            icon: "03d".to_string(),
            uv_index: Some(3.0),
            observed_at: chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn report_shows_rounded_temperatures() {
        let text = format_report(&report());

        assert!(text.starts_with("London, GB\n"));
        assert!(text.contains("17°C  scattered clouds (feels like 17°C)"));
    }

    #[test]
    fn report_shows_visibility_and_uv_one_decimal() {
        let text = format_report(&report());

        assert!(text.contains("Visibility: 12.0 km"));
        assert!(text.contains("UV index:   3.0"));
    }

    #[test]
    fn report_marks_absent_fields_na() {
        let mut r = report();
        r.visibility_km = None;
        r.uv_index = None;

        let text = format_report(&r);

        assert!(text.contains("Visibility: N/A"));
        assert!(text.contains("UV index:   N/A"));
    }
}
