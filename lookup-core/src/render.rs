//! Pure presentation of a [`ViewState`].

use std::fmt;

use crate::view::ViewState;

pub const SEARCH_LABEL: &str = "Search";
pub const LOADING_LABEL: &str = "Loading...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoBlock {
    pub url: String,
    pub alt: String,
}

/// Display strings for one weather report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel {
    pub photo: Option<PhotoBlock>,
    pub name: String,
    pub icon_url: Option<String>,
    pub temperature: String,
    pub description: Option<String>,
    pub feels_like: String,
    pub humidity: String,
    pub wind_speed: String,
    pub pressure: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub query: String,
    pub submit: SubmitControl,
    pub error_banner: Option<String>,
    pub result: Option<ResultPanel>,
}

pub fn render(state: &ViewState) -> Screen {
    let submit = SubmitControl {
        label: if state.loading { LOADING_LABEL } else { SEARCH_LABEL },
        disabled: state.loading,
    };

    let error_banner = (!state.error.is_empty()).then(|| state.error.clone());

    let result = state.report.as_ref().map(|report| {
        let photo = state.photo.as_ref().map(|photo| PhotoBlock {
            url: photo.url.clone(),
            alt: photo
                .alt
                .clone()
                .filter(|alt| !alt.is_empty())
                .unwrap_or_else(|| state.query.clone()),
        });

        ResultPanel {
            photo,
            name: report.location_name.clone(),
            icon_url: report.condition.as_ref().map(|c| icon_url(&c.icon)),
            temperature: degrees(report.temperature_c),
            description: report
                .condition
                .as_ref()
                .map(|c| capitalize_first(&c.description)),
            feels_like: degrees(report.feels_like_c),
            humidity: format!("{}%", report.humidity_pct),
            wind_speed: format!("{} m/s", report.wind_speed_mps),
            pressure: format!("{} hPa", report.pressure_hpa),
        }
    });

    Screen {
        query: state.query.clone(),
        submit,
        error_banner,
        result,
    }
}

pub fn icon_url(icon: &str) -> String {
    format!("http://openweathermap.org/img/wn/{icon}@2x.png")
}

/// Whole degrees; halves round up (towards positive infinity).
fn degrees(celsius: f64) -> String {
    let floor = celsius.floor();
    let rounded = if celsius - floor >= 0.5 { floor + 1.0 } else { floor };
    // Avoid printing "-0°C".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}°C")
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "City: {}  [{}]", self.query, self.submit.label)?;

        if let Some(error) = &self.error_banner {
            writeln!(f)?;
            writeln!(f, "! {error}")?;
        }

        if let Some(panel) = &self.result {
            writeln!(f)?;
            write!(f, "{panel}")?;
        }

        Ok(())
    }
}

impl fmt::Display for ResultPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(photo) = &self.photo {
            writeln!(f, "Photo: {} ({})", photo.url, photo.alt)?;
        }

        writeln!(f, "{}", self.name)?;
        writeln!(f, "  {}", self.temperature)?;
        if let Some(description) = &self.description {
            writeln!(f, "  {description}")?;
        }
        writeln!(f, "  Feels like:  {}", self.feels_like)?;
        writeln!(f, "  Humidity:    {}", self.humidity)?;
        writeln!(f, "  Wind Speed:  {}", self.wind_speed)?;
        writeln!(f, "  Pressure:    {}", self.pressure)?;
        if let Some(icon) = &self.icon_url {
            writeln!(f, "  Icon:        {icon}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{
        LookupView,
        tests::{ImageReply, WeatherReply, fake_lookup, paris, paris_photo},
    };
    use crate::{CityPhoto, model::Condition};

    #[test]
    fn idle_screen() {
        let screen = render(&ViewState::default());

        assert_eq!(screen.submit.label, "Search");
        assert!(!screen.submit.disabled);
        assert!(screen.error_banner.is_none());
        assert!(screen.result.is_none());
    }

    #[test]
    fn loading_disables_submit() {
        let state = ViewState {
            loading: true,
            ..Default::default()
        };
        let screen = render(&state);

        assert_eq!(screen.submit.label, "Loading...");
        assert!(screen.submit.disabled);
    }

    #[tokio::test]
    async fn paris_scenario() {
        let photo = CityPhoto {
            url: "https://img/paris.jpg".into(),
            alt: None,
        };
        let (lookup, _log) = fake_lookup(WeatherReply::Report(paris()), ImageReply::Photo(photo));
        let mut view = LookupView::new(lookup);
        view.set_query("Paris");
        view.submit().await;

        let screen = render(view.state());
        assert!(screen.error_banner.is_none());
        let panel = screen.result.expect("result panel shown");

        assert_eq!(panel.name, "Paris");
        assert_eq!(panel.temperature, "15°C");
        assert_eq!(panel.description.as_deref(), Some("Clear sky"));
        assert_eq!(panel.feels_like, "15°C");
        assert_eq!(panel.humidity, "60%");
        assert_eq!(panel.wind_speed, "3.1 m/s");
        assert_eq!(panel.pressure, "1012 hPa");
        assert_eq!(
            panel.icon_url.as_deref(),
            Some("http://openweathermap.org/img/wn/01d@2x.png")
        );

        let photo = panel.photo.expect("photo shown");
        assert_eq!(photo.url, "https://img/paris.jpg");
        assert_eq!(photo.alt, "Paris");

        // Stored data is not capitalized.
        let stored = view.state().report.as_ref().unwrap();
        assert_eq!(stored.condition.as_ref().unwrap().description, "clear sky");
    }

    #[tokio::test]
    async fn not_found_scenario() {
        let (lookup, _log) = fake_lookup(WeatherReply::NotFound, ImageReply::Empty);
        let mut view = LookupView::new(lookup);
        view.set_query("Zzzzxx");
        view.submit().await;

        let screen = render(view.state());
        assert_eq!(screen.error_banner.as_deref(), Some("City not found"));
        assert!(screen.result.is_none());
        assert_eq!(screen.submit.label, "Search");
    }

    #[test]
    fn stale_report_shows_next_to_error() {
        let state = ViewState {
            query: "Zzzzxx".into(),
            report: Some(paris()),
            photo: Some(paris_photo()),
            loading: false,
            error: "City not found".into(),
        };

        let screen = render(&state);
        assert!(screen.error_banner.is_some());
        let panel = screen.result.unwrap();
        assert_eq!(panel.photo.unwrap().alt, "eiffel tower at dusk");
    }

    #[test]
    fn report_without_photo_has_no_photo_block() {
        let state = ViewState {
            report: Some(paris()),
            ..Default::default()
        };

        assert!(render(&state).result.unwrap().photo.is_none());
    }

    #[test]
    fn missing_condition_omits_description_and_icon() {
        let state = ViewState {
            report: Some(crate::WeatherReport {
                condition: None,
                ..paris()
            }),
            ..Default::default()
        };

        let panel = render(&state).result.unwrap();
        assert!(panel.description.is_none());
        assert!(panel.icon_url.is_none());
    }

    #[test]
    fn degrees_round_half_up() {
        assert_eq!(degrees(15.5), "16°C");
        assert_eq!(degrees(14.49), "14°C");
        assert_eq!(degrees(-2.5), "-2°C");
        assert_eq!(degrees(-2.6), "-3°C");
        assert_eq!(degrees(-0.4), "0°C");
        assert_eq!(degrees(0.49999999999999994), "0°C");
        assert_eq!(degrees(-0.5), "0°C");
    }

    #[test]
    fn other_numbers_keep_precision() {
        let state = ViewState {
            report: Some(crate::WeatherReport {
                humidity_pct: 61.5,
                pressure_hpa: 1012.25,
                wind_speed_mps: 10.0,
                ..paris()
            }),
            ..Default::default()
        };

        let panel = render(&state).result.unwrap();
        assert_eq!(panel.humidity, "61.5%");
        assert_eq!(panel.pressure, "1012.25 hPa");
        assert_eq!(panel.wind_speed, "10 m/s");
    }

    #[test]
    fn capitalizes_only_the_first_letter() {
        assert_eq!(capitalize_first("light rain showers"), "Light rain showers");
        assert_eq!(capitalize_first("ébullition"), "Ébullition");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn display_contains_panel_lines() {
        let state = ViewState {
            query: "Paris".into(),
            report: Some(paris()),
            photo: Some(paris_photo()),
            ..Default::default()
        };

        let text = render(&state).to_string();
        assert!(text.contains("[Search]"));
        assert!(text.contains("Photo: https://img/paris.jpg"));
        assert!(text.contains("Feels like:  15°C"));
        assert!(text.contains("Pressure:    1012 hPa"));
        assert!(!text.contains('!'));
    }

    #[test]
    fn display_shows_error_banner() {
        let state = ViewState {
            error: "City not found".into(),
            ..Default::default()
        };

        assert!(render(&state).to_string().contains("! City not found"));
    }

    #[test]
    fn description_and_icon_follow_condition() {
        let condition = Condition {
            main: "Rain".into(),
            description: "moderate rain".into(),
            icon: "10n".into(),
        };
        let state = ViewState {
            report: Some(crate::WeatherReport {
                condition: Some(condition),
                ..paris()
            }),
            ..Default::default()
        };

        let panel = render(&state).result.unwrap();
        assert_eq!(panel.description.as_deref(), Some("Moderate rain"));
        assert!(panel.icon_url.unwrap().contains("10n@2x"));
    }
}
