//! HTML blotter
//!
//! A single page with one input per curve quote (`rate0`, `rate1`, ...) and
//! the valuation table underneath. `GET /` shows the baseline quotes;
//! `POST /` reprices with the submitted ones.

use std::collections::HashMap;
use std::fmt::Write;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use pricer_core::types::Date;
use pricer_portfolio::{parse_quotes, PortfolioReport, BASELINE_QUOTES};

use super::AppState;
use crate::error::ApiError;

/// Build the blotter routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(show_blotter).post(submit_blotter))
}

/// GET / - Blotter with the baseline quotes
async fn show_blotter(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    let fields: Vec<String> = BASELINE_QUOTES.iter().map(|q| format!("{:.1}", q)).collect();
    respond(&state, fields).await
}

/// POST / - Reprice with submitted quotes
async fn submit_blotter(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Html<String>) {
    respond(&state, form_fields(&form)).await
}

/// Submitted values in field order.
///
/// The baseline fields always appear, taking their default when missing.
/// Extra fields are read while `rate{i}` keeps being present.
fn form_fields(form: &HashMap<String, String>) -> Vec<String> {
    let mut fields = Vec::new();
    for i in 0.. {
        match (form.get(&format!("rate{}", i)), BASELINE_QUOTES.get(i)) {
            (Some(value), _) => fields.push(value.clone()),
            (None, Some(default)) => fields.push(format!("{:.1}", default)),
            (None, None) => break,
        }
    }
    fields
}

async fn respond(state: &AppState, fields: Vec<String>) -> (StatusCode, Html<String>) {
    let valuation = state.config.valuation_date();
    match price_fields(state, valuation, &fields).await {
        Ok(report) => (StatusCode::OK, Html(render_page(&fields, Ok(&report)))),
        Err(err) => {
            err.log();
            (err.status(), Html(render_page(&fields, Err(&err))))
        }
    }
}

async fn price_fields(
    state: &AppState,
    valuation: Date,
    fields: &[String],
) -> Result<PortfolioReport, ApiError> {
    let quotes = parse_quotes(fields, state.pricer.config())?;
    tracing::info!(quotes = quotes.len(), valuation_date = %valuation, "Blotter request");
    state.price(valuation, quotes).await
}

fn render_page(fields: &[String], outcome: Result<&PortfolioReport, &ApiError>) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Rates Portfolio Blotter</title>\n</head>\n<body>\n\
         <h1>Rates Portfolio Blotter</h1>\n<form method=\"post\" action=\"/\">\n",
    );

    for (i, value) in fields.iter().enumerate() {
        let _ = writeln!(
            html,
            "<label>{y}Y rate (%) <input type=\"text\" name=\"rate{i}\" value=\"{v}\"></label><br>",
            y = i + 1,
            i = i,
            v = escape(value)
        );
    }
    html.push_str("<button type=\"submit\">Price</button>\n</form>\n");

    match outcome {
        Ok(report) => {
            let _ = writeln!(
                html,
                "<p>Valuation date: {}</p>\n<table>\n<tr><th>Type</th><th>NPV</th></tr>",
                report.valuation_date
            );
            for row in &report.rows {
                let _ = writeln!(
                    html,
                    "<tr><td>{}</td><td>{:.2}</td></tr>",
                    escape(&row.instrument_type),
                    row.npv
                );
            }
            html.push_str("</table>\n");
        }
        Err(err) => {
            let _ = writeln!(
                html,
                "<p class=\"error\">{}: {}</p>",
                err.kind(),
                escape(&err.to_string())
            );
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
