//! WebAssembly module for the GDD field dashboard
//!
//! Provides client-side computation for:
//! - Temperature series smoothing
//! - Cutting status messages
//! - Forecast chart specs from a raw field dashboard payload

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use shared::{
    is_within_forecast_window as within_window, moving_average, parse_calendar_date,
    ChartSettings, CuttingStatus, FieldDashboard, ForecastChartBuilder,
};

/// Moving average of `values` over `window` samples
#[wasm_bindgen]
pub fn smooth_series(values: Vec<f64>, window: usize) -> Vec<f64> {
    moving_average(&values, window)
}

/// Status line for a cutting date, evaluated against the browser's local date
#[wasm_bindgen]
pub fn cutting_status(cutting_date: Option<String>) -> Result<String, JsValue> {
    let now = js_sys::Date::new_0();
    let today = NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .ok_or_else(|| JsValue::from_str("Browser clock returned an invalid date"))?;

    status_message(cutting_date.as_deref(), today).map_err(to_js_error)
}

/// Status line for a cutting date, evaluated against `today` (YYYY-MM-DD)
#[wasm_bindgen]
pub fn cutting_status_on(cutting_date: Option<String>, today: &str) -> Result<String, JsValue> {
    let today = parse_date("today", today).map_err(to_js_error)?;
    status_message(cutting_date.as_deref(), today).map_err(to_js_error)
}

/// Whether `target` lies within the forecast dates given as a JSON array
#[wasm_bindgen]
pub fn is_within_forecast_window(target: &str, dates_json: &str) -> Result<bool, JsValue> {
    window_contains(target, dates_json).map_err(to_js_error)
}

/// Chart specs for a field dashboard payload, as JSON.
///
/// Yields `null` when the field has no sensors or its forecast series do not
/// share one date axis.
#[wasm_bindgen]
pub fn build_forecast_charts(payload_json: &str) -> Result<String, JsValue> {
    forecast_charts_json(payload_json, ChartSettings::default()).map_err(|e| {
        web_sys::console::warn_1(&JsValue::from_str(&format!("Invalid field dashboard: {}", e)));
        to_js_error(e)
    })
}

fn to_js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

fn parse_date(name: &str, value: &str) -> Result<NaiveDate, String> {
    parse_calendar_date(value).ok_or_else(|| format!("Invalid {} date: {:?}", name, value))
}

fn status_message(cutting_date: Option<&str>, today: NaiveDate) -> Result<String, String> {
    let cutting_date = cutting_date
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_date("cutting", raw))
        .transpose()?;

    Ok(CuttingStatus::evaluate(cutting_date, today).message())
}

fn window_contains(target: &str, dates_json: &str) -> Result<bool, String> {
    let target = parse_date("target", target)?;
    let raw: Vec<String> = serde_json::from_str(dates_json)
        .map_err(|e| format!("Invalid forecast dates JSON: {}", e))?;
    let dates = raw
        .iter()
        .map(|value| parse_date("forecast", value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(within_window(target, &dates))
}

fn forecast_charts_json(payload_json: &str, settings: ChartSettings) -> Result<String, String> {
    let dashboard = FieldDashboard::from_json(payload_json).map_err(|e| e.to_string())?;

    let charts = (dashboard.has_sensors() && dashboard.check_forecast_alignment().is_ok())
        .then(|| ForecastChartBuilder::new(settings).build(&dashboard));

    serde_json::to_string(&charts).map_err(|e| e.to_string())
}
