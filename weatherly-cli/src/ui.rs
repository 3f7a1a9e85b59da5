//! Terminal rendering: the weather panel, the blocking error panel and
//! transient toast lines are mutually exclusive per action outcome.

use weatherly_core::{ActionResult, App, DisplayModel, TempStrings, Theme};

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";

pub fn apply(app: &App, result: ActionResult) {
    match result {
        ActionResult::Rendered { view, notice } => {
            render(&view, app.theme());
            toast(&notice);
        }
        ActionResult::Notice(message) => toast(&message),
        ActionResult::Failed { title, message } => error_panel(&title, &message),
    }
}

pub fn render(view: &DisplayModel, theme: Theme) {
    let color = accent(&view.background_class, theme);

    println!();
    println!("{color}{}  {}{RESET}", view.icon, view.city_label);
    println!("{DIM}{}{RESET}", view.date_line);
    println!("{} ({})", view.condition, view.description);
    println!();
    render_temps(&view.temps);
    println!();
    println!("  humidity    {}", view.humidity);
    println!(
        "  wind        {} {}, gust {}",
        view.wind_speed, view.wind_direction, view.wind_gust
    );
    println!("  pressure    {}", view.pressure);
    println!("  visibility  {}", view.visibility);
    println!("  sunrise     {}   sunset {}", view.sunrise, view.sunset);
    println!();
}

pub fn render_temps(temps: &TempStrings) {
    println!(
        "  {}  feels like {}  (low {} / high {})",
        temps.temperature, temps.feels_like, temps.temp_min, temps.temp_max
    );
}

pub fn error_panel(title: &str, message: &str) {
    eprintln!();
    eprintln!("{RED}!! {title}{RESET}");
    eprintln!("   {message}");
    eprintln!();
}

pub fn toast(message: &str) {
    println!("{DIM}* {message}{RESET}");
}

pub fn loading() {
    println!("{DIM}Fetching current weather...{RESET}");
}

/// Rough terminal analogue of the page background classes: one accent color
/// per weather class, with a theme-dependent fallback.
fn accent(class: &str, theme: Theme) -> &'static str {
    match class {
        "weather-clear" => "\x1b[33m",
        "weather-clouds" | "weather-mist" | "weather-fog" | "weather-haze" => "\x1b[37m",
        "weather-rain" | "weather-drizzle" => "\x1b[34m",
        "weather-thunderstorm" => "\x1b[35m",
        "weather-snow" => "\x1b[36m",
        _ => match theme {
            Theme::Dark => "\x1b[90m",
            Theme::Light => "\x1b[32m",
        },
    }
}

/// Dark-mode hint from the terminal: `COLORFGBG` is "fg;bg", and low
/// background numbers mean a dark background.
pub fn os_prefers_dark() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| value.rsplit(';').next()?.parse::<u8>().ok())
        .is_some_and(|bg| bg < 8)
}
