//! Plays a short quiz against a mocked question bank through the default reqwest transport.
//!
//! The player always picks the first answer on screen, so the final score depends on the
//! shuffle.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use time::Duration;
use url::Url;
// self
use trivia_relay::{
	http::ReqwestHttpClient,
	quiz::{Phase, QuizConfig, QuizEngine},
	relay::{Relay, RelayConfig, ReqwestRelay},
	reqwest::Client,
	store::{MemoryStore, SessionStore},
};

const QUESTIONS: &str = r#"{"response_code":0,"results":[
	{"category":"Science &amp; Nature","type":"multiple","difficulty":"easy","question":"What is the chemical symbol for gold?","correct_answer":"Au","incorrect_answers":["Ag","Gd","Go"]},
	{"category":"History","type":"boolean","difficulty":"medium","question":"The Great Wall of China is visible from the Moon with the naked eye.","correct_answer":"False","incorrect_answers":["True"]},
	{"category":"Entertainment: Video Games","type":"multiple","difficulty":"easy","question":"Which company created &quot;Tetris&quot;?","correct_answer":"ELORG","incorrect_answers":["Nintendo","Sega","Atari"]}
]}"#;

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api_token.php").query_param("command", "request");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"response_code":0,"token":"demo-token"}"#);
		})
		.await;
	let questions_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api.php").query_param("token", "demo-token");
			then.status(200).header("content-type", "application/json").body(QUESTIONS);
		})
		.await;
	let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::default());
	// The mock server speaks https with a self-signed certificate.
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let relay: ReqwestRelay = Relay::at_base_url(
		store,
		Url::parse(&server.base_url())?,
		RelayConfig::default(),
		http_client,
	)?;
	let config = QuizConfig { amount: 3, ..Default::default() }
		.with_feedback_delay(Duration::milliseconds(200));
	let engine: QuizEngine<ReqwestRelay> = QuizEngine::new(relay, config);

	engine.start().await?;

	while engine.phase() == Phase::Answering {
		let state = engine.state();
		let Some(question) = state.current_question() else { break };
		let Some((position, total)) = state.progress() else { break };
		let pick = question.shuffled_answers()[0].clone();

		println!("[{position}/{total}] {}", question.display_prompt());

		for answer in question.display_answers() {
			println!("    - {answer}");
		}

		let selection = engine.select_answer(&pick)?;

		println!("  picked {pick:?}: {selection:?}.");

		engine.settle_feedback().await;
	}

	let state = engine.state();

	match (state.phase, state.verdict()) {
		(Phase::Result, Some(verdict)) =>
			println!("Score {}/{}. {}", state.score, state.questions.len(), verdict.message()),
		(Phase::Error(failure), _) => println!("Quiz stopped: {failure}"),
		(phase, _) => println!("Quiz ended in phase {}.", phase.label()),
	}

	token_mock.assert_async().await;
	questions_mock.assert_async().await;

	Ok(())
}
