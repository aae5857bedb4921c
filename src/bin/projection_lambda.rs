//! AWS Lambda HTTP handler for projections
//!
//! POST body is a projection input bundle (see `assumptions::loader`).
//! Responds with the base projection and any requested scenarios.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::warn;
use serde::Serialize;
use unit_economics::{ProjectionInputs, ProjectionResult, ScenarioOutcome, ScenarioRunner};

#[derive(Debug, Serialize)]
struct ProjectionResponse {
    base: ProjectionResult,
    scenarios: Vec<ScenarioOutcome>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn parse_inputs(body: &Body) -> Result<ProjectionInputs, serde_json::Error> {
    match body {
        Body::Empty => Ok(ProjectionInputs::default()),
        Body::Text(text) => serde_json::from_str(text),
        Body::Binary(bytes) => serde_json::from_slice(bytes),
    }
}

fn json_response<T: Serialize>(status: u16, payload: &T) -> Result<Response<Body>, Error> {
    let body = serde_json::to_string(payload)?;
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::Text(body))?;
    Ok(response)
}

async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let inputs = match parse_inputs(event.body()) {
        Ok(inputs) => inputs,
        Err(err) => {
            warn!("Rejected projection request: {}", err);
            return json_response(400, &ErrorResponse { error: format!("Invalid request body: {}", err) });
        }
    };

    let runner = ScenarioRunner::new(inputs.assumption_set(), inputs.headcount_schedule());
    let response = ProjectionResponse {
        base: runner.run_base(),
        scenarios: runner.run_all(&inputs.scenarios),
    };
    json_response(200, &response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
