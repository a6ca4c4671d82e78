use std::{collections::HashMap, process::ExitCode};

use tento_quiz::{
    app_state::AppState,
    config::Config,
    errors::AppResult,
    models::domain::{GenerationRequest, MAX_QUESTIONS},
};

const USAGE: &str = "usage: tento-quiz <topic> [count]";

/// Reads `<topic> [count]` with the topic trimmed.
fn parse_args<I>(mut args: I) -> Result<(String, u32), String>
where
    I: Iterator<Item = String>,
{
    let topic = args
        .next()
        .map(|raw| raw.trim().to_string())
        .filter(|topic| !topic.is_empty())
        .ok_or_else(|| USAGE.to_string())?;
    let count = match args.next().map(|raw| raw.parse::<u32>()) {
        None => 5,
        Some(Ok(count)) => count,
        Some(Err(_)) => {
            return Err(format!(
                "count must be a number between 1 and {}\n{}",
                MAX_QUESTIONS, USAGE
            ))
        }
    };
    Ok((topic, count))
}

async fn run(topic: &str, count: u32) -> AppResult<()> {
    let config = Config::from_env();
    config.validate()?;
    let state = AppState::new(config).await?;

    let questions = state
        .quiz_service
        .generate_quiz(GenerationRequest::new(topic, None, count))
        .await?;
    for question in &questions {
        println!("Q{}. {}", question.question_number, question.question_text);
        for (label, text) in &question.options {
            println!("   {}) {}", label, text);
        }
    }

    let answers: HashMap<u32, String> = questions
        .iter()
        .filter_map(|q| q.correct_answer.map(|label| (q.question_number, label.to_string())))
        .collect();
    let result = state
        .scoring_service
        .score_quiz(&questions, &answers, Some(topic))
        .await;
    println!(
        "\nScore: {}/{} ({}%)",
        result.correct_answers, result.total_questions, result.percentage
    );

    let stats = state.stats_service.get_topic_stats(Some(topic)).await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    let (topic, count) = match parse_args(std::env::args().skip(1)) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    match run(&topic, count).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{} ({})", err, err.error_code());
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_parse_args_trims_topic() {
        assert_eq!(parse_args(args(&["  IoT ", "3"])), Ok(("IoT".to_string(), 3)));
        assert_eq!(parse_args(args(&["IoT"])), Ok(("IoT".to_string(), 5)));
    }

    #[test]
    fn test_parse_args_rejects_blank_topic_and_bad_count() {
        assert_eq!(parse_args(args(&["   "])), Err(USAGE.to_string()));
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["IoT", "many"]))
            .unwrap_err()
            .starts_with("count must be"));
    }
}
