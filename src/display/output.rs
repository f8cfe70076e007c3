use colored::*;
use wgapi::api::models::ErrorBody;

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    eprintln!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}

/// Error reported by the service inside an otherwise successful response.
pub fn display_api_error(error: &ErrorBody) {
    let field = error.field.as_deref().unwrap_or("-");
    eprintln!(
        "{} {} (code {}, field {})",
        "⚠️ API error:".yellow().bold(),
        error.message,
        error.code,
        field
    );
}

/// Print a response body, pretty printed when it is JSON.
pub fn display_body(body: &str) {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(pretty) => println!("{}", pretty),
            Err(_) => println!("{}", body),
        },
        Err(_) => println!("{}", body),
    }
}
